use super::{profile, slots, topology_with};
use crate::xml::read_topology;
use crate::*;

fn meta() -> ExperimentMeta {
    ExperimentMeta {
        experiment_id: "exp1".to_string(),
        start_date: "01/02/2007".to_string(),
        end_date: "03/04/2007".to_string(),
        description: "first run".to_string(),
        credentials: UserCredentials {
            username: "alice".to_string(),
            password: "pw".to_string(),
            email: "a@example.org".to_string(),
        },
    }
}

#[test]
fn write_single_node_document() {
    let topo = topology_with(&["computer1"], 1);
    let expected = concat!(
        "<topology type=\"experiment\" experimentid=\"exp1\" startdate=\"01/02/2007\" enddate=\"03/04/2007\">\n",
        "\t<description>first run</description>\n",
        "\t<usermanagement username=\"alice\" password=\"pw\" email=\"a@example.org\"/>\n",
        "\t<node id=\"computer1\" type=\"computer\" cx=\"30\" cy=\"30\">\n",
        "\t\t<interface id=\"computer1interface0\" type=\"experimental\" mac=\"00:11:22:33:44:00\" model=\"e1000-0\" port=\"GigabitEthernet0/0\" switch=\"switch1\" ip=\"\" subnet=\"\" vlan=\"\" cx=\"44\" cy=\"30\" edgeId=\"\"/>\n",
        "\t\t<attribute name=\"motherboard\" value=\"X\"/>\n",
        "\t\t<attribute name=\"cputype\" value=\"Y\"/>\n",
        "\t\t<attribute name=\"cpuspeed\" value=\"2.4GHz\"/>\n",
        "\t\t<attribute name=\"mpu\" value=\"2\"/>\n",
        "\t\t<attribute name=\"memory\" value=\"1024\"/>\n",
        "\t\t<netbootinfo loader=\"\" filesystem=\"\" kernel=\"\"/>\n",
        "\t</node>\n",
        "</topology>",
    );
    assert_eq!(topo.to_xml(&meta()), expected);
}

#[test]
fn write_edges_after_nodes_with_derived_coordinates() {
    let mut topo = topology_with(&["computer1", "computer2"], 1);
    topo.move_node("computer2", geom::point(100.0, 30.5)).unwrap();
    topo.create_edge("vlanA", "computer1", 0, "computer2", 0).unwrap();
    let xml = topo.to_xml(&meta());

    let edge_line = "\t<edge id=\"vlanA0\" type=\"edge\" x1=\"44\" x2=\"114\" y1=\"30\" y2=\"30.5\" edgeStart=\"computer1interface0\" edgeEnd=\"computer2interface0\" vlan=\"vlanA\"/>\n";
    assert!(xml.contains(edge_line), "{xml}");
    assert!(xml.find("</node>").unwrap() < xml.find("<edge ").unwrap());
    assert!(xml.contains("vlan=\"vlanA\" cx=\"44\" cy=\"30\" edgeId=\"vlanA0\"/>"));
}

#[test]
fn write_escapes_attribute_values_and_description() {
    let mut topo = Topology::default();
    let mut hw = profile();
    hw.motherboard = "A&B \"<rev2>\"".to_string();
    topo.create_node("computer1", &hw, NetbootInfo::default(), &slots(0)).unwrap();
    let mut m = meta();
    m.description = "tcp <-> udp & more".to_string();
    let xml = topo.to_xml(&m);

    assert!(xml.contains("value=\"A&amp;B &quot;&lt;rev2&gt;&quot;\""), "{xml}");
    assert!(xml.contains("<description>tcp &lt;-&gt; udp &amp; more</description>"));

    let loaded = read_topology(&xml).unwrap();
    assert_eq!(loaded.nodes[0].hardware.motherboard, "A&B \"<rev2>\"");
    assert_eq!(loaded.meta.description, "tcp <-> udp & more");
}

#[test]
fn whitespace_controls_survive_a_reload() {
    let mut topo = Topology::default();
    let netboot = NetbootInfo {
        kernel: "vmlinuz\tconsole=ttyS0\nro".to_string(),
        loader: "pxe\r\nlinux".to_string(),
        ..Default::default()
    };
    topo.create_node("computer1", &profile(), netboot.clone(), &slots(1)).unwrap();
    let mut m = meta();
    m.description = "line one\r\nline two\n\tindented".to_string();
    let xml = topo.to_xml(&m);

    assert!(xml.contains("kernel=\"vmlinuz&#9;console=ttyS0&#10;ro\""), "{xml}");
    assert!(xml.contains("loader=\"pxe&#13;&#10;linux\""), "{xml}");
    assert!(xml.contains("<description>line one&#13;\nline two\n\tindented</description>"));

    let mut reloaded = Topology::default();
    assert_eq!(reloaded.load_xml(&xml).unwrap(), m);
    assert_eq!(reloaded.node("computer1").unwrap().netboot, netboot);
}

#[test]
fn interface_model_is_read_from_model_not_port() {
    let topo = topology_with(&["computer1"], 1);
    let loaded = read_topology(&topo.to_xml(&meta())).unwrap();
    let iface = &loaded.nodes[0].interfaces[0];
    assert_eq!(iface.model, "e1000-0");
    assert_eq!(iface.port, "GigabitEthernet0/0");
}

#[test]
fn load_restores_metadata_pool_and_netboot() {
    let mut source = topology_with(&["computer1", "computer3"], 2);
    source
        .set_netboot("computer3", NetbootField::Loader, "pxelinux.0")
        .unwrap();
    let xml = source.to_xml(&meta());

    let mut target = topology_with(&["computer2"], 1);
    let restored = target.load_xml(&xml).unwrap();
    assert_eq!(restored, meta());
    assert_eq!(
        target.nodes().map(|n| n.id.as_str()).collect::<Vec<_>>(),
        vec!["computer1", "computer3"]
    );
    assert_eq!(target.pool().available().collect::<Vec<_>>(), vec!["computer2"]);
    assert_eq!(target.node("computer3").unwrap().netboot.loader, "pxelinux.0");
    assert_eq!(target.node("computer3").unwrap().hardware, profile());
    assert_eq!(target.owner_of("computer3interface1"), Some("computer3"));
}

#[test]
fn failed_load_leaves_the_graph_untouched() {
    let mut topo = topology_with(&["computer1"], 1);
    let before = format!("{topo:?}");

    for bad in [
        "<topology>",
        "<experiment/>",
        "<topology><node id=\"n\" cx=\"a\" cy=\"1\"/></topology>",
        "<topology><node cx=\"1\" cy=\"1\"/></topology>",
        "<topology><node id=\"n\" cx=\"1\" cy=\"1\"/><node id=\"n\" cx=\"1\" cy=\"1\"/></topology>",
    ] {
        assert!(topo.load_xml(bad).is_err(), "{bad} should fail");
    }
    assert_eq!(format!("{topo:?}"), before);
}

#[test]
fn load_accepts_documents_in_the_legacy_layout() {
    let text = r#"<topology type="experiment" experimentid="legacy" startdate="10/08/2006" enddate="11/08/2006">
	<description>old save</description>
	<usermanagement username="bob" password="secret" email="bob@example.org"/>
	<node id="computer7" type="computer" cx="120" cy="45">
		<interface id="computer7interface0" type="experimental" mac="m0" model="tg3" port="4" switch="sw1" ip="10.1.0.7" subnet="255.255.0.0" vlan="red" cx="134" cy="45" edgeId="red0 red3"/>
		<attribute name="motherboard" value="S2882" />
		<attribute name="cputype" value="Opteron" />
		<attribute name="cpuspeed" value="2.0" />
		<attribute name="mpu" value="2" />
		<attribute name="memory" value="2048" />
		<netbootinfo loader="" filesystem="fc5" kernel="2.6.17"/>
	</node>
	<edge id="red0" type="edge" x1="134" x2="10" y1="45" y2="10" edgeStart="computer7interface0" edgeEnd="computer9interface0" vlan="red"/>
</topology>"#;
    let mut topo = Topology::default();
    let m = topo.load_xml(text).unwrap();
    assert_eq!(m.experiment_id, "legacy");
    assert_eq!(m.credentials.email, "bob@example.org");

    let iface = topo.interface("computer7interface0").unwrap();
    assert_eq!(iface.edges, vec!["red0", "red3"]);
    assert_eq!(iface.position, geom::point(134.0, 45.0));
    assert_eq!(topo.node("computer7").unwrap().netboot.kernel, "2.6.17");

    // endpoints are not re-validated on load
    let edge = topo.edge("red0").unwrap();
    assert_eq!(edge.end, "computer9interface0");
    assert_eq!(topo.edge_segment("red0"), None);
}

#[test]
fn edge_counter_skips_ids_taken_by_a_loaded_document() {
    let mut source = topology_with(&["computer1", "computer2"], 1);
    source.create_edge("lan", "computer1", 0, "computer2", 0).unwrap();
    let xml = source.to_xml(&meta());

    let mut topo = Topology::default();
    topo.load_xml(&xml).unwrap();
    let edge = topo.create_edge("lan", "computer1", 0, "computer2", 0).unwrap();
    assert_eq!(edge.id, "lan1");
}

#[test]
fn edges_connect_interfaces_by_index_not_document_order() {
    let text = r#"<topology type="experiment">
	<node id="computer1" type="computer" cx="30" cy="30">
		<interface id="computer1interface1" type="experimental" cx="16" cy="30" edgeId=""/>
		<interface id="computer1interface0" type="experimental" cx="44" cy="30" edgeId=""/>
	</node>
	<node id="computer2" type="computer" cx="100" cy="30">
		<interface id="computer2interface0" type="experimental" cx="114" cy="30" edgeId=""/>
	</node>
</topology>"#;
    let mut topo = Topology::default();
    topo.load_xml(text).unwrap();

    let edge = topo.create_edge("v", "computer1", 1, "computer2", 0).unwrap();
    assert_eq!(edge.start, "computer1interface1");
    assert_eq!(edge.end, "computer2interface0");
    assert_eq!(topo.interface("computer1interface1").unwrap().vlan, "v");
    assert_eq!(topo.interface("computer1interface0").unwrap().vlan, "");
    assert!(matches!(
        topo.create_edge("v", "computer1", 2, "computer2", 0),
        Err(Error::Validation { .. })
    ));
}
