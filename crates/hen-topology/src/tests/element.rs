use super::topology_with;
use crate::*;

#[test]
fn computer_fields_follow_the_property_panel() {
    let topo = topology_with(&["computer1"], 1);
    let el = topo.element("computer1").unwrap();
    assert_eq!(el.kind(), ElementKind::Computer);
    assert_eq!(el.id(), "computer1");
    assert!(el.deletable());

    let fields = el.fields();
    let labels: Vec<&str> = fields.iter().map(|f| f.label).collect();
    assert_eq!(
        labels,
        vec![
            "Node ID",
            "Motherboard",
            "CPU Type",
            "CPU Speed",
            "Multi Processors",
            "Memory",
            "loader",
            "filesystem",
            "kernel"
        ]
    );
    let editable: Vec<&str> = fields.iter().filter(|f| f.editable).map(|f| f.label).collect();
    assert_eq!(editable, vec!["loader", "filesystem", "kernel"]);
    assert_eq!(fields[1].value, "X");
}

#[test]
fn interface_fields_expose_ip_and_subnet_for_editing() {
    let topo = topology_with(&["computer1"], 1);
    let el = topo.element("computer1interface0").unwrap();
    assert_eq!(el.kind(), ElementKind::Interface);
    assert!(!el.deletable());
    let editable: Vec<&str> = el
        .fields()
        .into_iter()
        .filter(|f| f.editable)
        .map(|f| f.label)
        .collect();
    assert_eq!(editable, vec!["ip", "subnet"]);
}

#[test]
fn edge_fields_show_the_vlan_name() {
    let mut topo = topology_with(&["computer1", "computer2"], 1);
    topo.create_edge("vlanA", "computer1", 0, "computer2", 0).unwrap();
    let el = topo.element("vlanA0").unwrap();
    assert_eq!(el.kind(), ElementKind::Edge);
    assert!(el.deletable());
    assert_eq!(
        el.fields(),
        vec![Field {
            label: "VLAN Name",
            value: "vlanA".to_string(),
            editable: false
        }]
    );
    assert!(topo.element("missing").is_none());
}

#[test]
fn kinds_map_to_document_type_names() {
    for kind in [ElementKind::Computer, ElementKind::Interface, ElementKind::Edge] {
        assert_eq!(ElementKind::from_type_name(kind.type_name()), Some(kind));
    }
    assert_eq!(ElementKind::Interface.type_name(), "experimental");
    assert_eq!(ElementKind::from_type_name("switch"), None);
}
