//! Saved-topology document writer.

use crate::Topology;
use crate::experiment::ExperimentMeta;
use crate::geom::Segment;
use crate::model::{EDGE_TYPE, INTERFACE_TYPE, NODE_TYPE};
use crate::profile::HardwareProfile;
use std::fmt::Write as _;

/// Serializes the graph and experiment details. The output only depends on
/// its inputs: nodes and edges are written in the topology's storage order.
pub fn write_topology(topology: &Topology, meta: &ExperimentMeta) -> String {
    let mut out = String::new();
    let mut buf = ryu_js::Buffer::new();

    open_tag(
        &mut out,
        0,
        "topology",
        &[
            ("type", "experiment"),
            ("experimentid", &meta.experiment_id),
            ("startdate", &meta.start_date),
            ("enddate", &meta.end_date),
        ],
    );
    let _ = writeln!(
        out,
        "\t<description>{}</description>",
        htmlize::escape_text(meta.description.as_str()).replace('\r', "&#13;")
    );
    empty_tag(
        &mut out,
        1,
        "usermanagement",
        &[
            ("username", &meta.credentials.username),
            ("password", &meta.credentials.password),
            ("email", &meta.credentials.email),
        ],
    );

    for node in topology.nodes() {
        let cx = js_number(node.position.x, &mut buf).to_string();
        let cy = js_number(node.position.y, &mut buf).to_string();
        open_tag(
            &mut out,
            1,
            "node",
            &[
                ("id", &node.id),
                ("type", NODE_TYPE),
                ("cx", &cx),
                ("cy", &cy),
            ],
        );

        for iface in &node.interfaces {
            let cx = js_number(iface.position.x, &mut buf).to_string();
            let cy = js_number(iface.position.y, &mut buf).to_string();
            let edge_refs = iface.edge_ref_list();
            empty_tag(
                &mut out,
                2,
                "interface",
                &[
                    ("id", &iface.id),
                    ("type", INTERFACE_TYPE),
                    ("mac", &iface.mac),
                    ("model", &iface.model),
                    ("port", &iface.port),
                    ("switch", &iface.switch),
                    ("ip", &iface.ip),
                    ("subnet", &iface.subnet),
                    ("vlan", &iface.vlan),
                    ("cx", &cx),
                    ("cy", &cy),
                    ("edgeId", &edge_refs),
                ],
            );
        }

        for name in HardwareProfile::ATTRIBUTE_NAMES {
            let value = node.hardware.get(name).unwrap_or_default();
            empty_tag(
                &mut out,
                2,
                "attribute",
                &[("name", name), ("value", value)],
            );
        }
        empty_tag(
            &mut out,
            2,
            "netbootinfo",
            &[
                ("loader", &node.netboot.loader),
                ("filesystem", &node.netboot.filesystem),
                ("kernel", &node.netboot.kernel),
            ],
        );
        out.push_str("\t</node>\n");
    }

    for edge in topology.edges() {
        // Dangling endpoints leave the coordinates empty.
        let [x1, y1, x2, y2] = match topology.edge_segment(&edge.id) {
            Some(Segment { from, to }) => [from.x, from.y, to.x, to.y]
                .map(|v| js_number(v, &mut buf).to_string()),
            None => Default::default(),
        };
        empty_tag(
            &mut out,
            1,
            "edge",
            &[
                ("id", &edge.id),
                ("type", EDGE_TYPE),
                ("x1", &x1),
                ("x2", &x2),
                ("y1", &y1),
                ("y2", &y2),
                ("edgeStart", &edge.start),
                ("edgeEnd", &edge.end),
                ("vlan", &edge.vlan),
            ],
        );
    }

    out.push_str("</topology>");
    out
}

fn open_tag(out: &mut String, depth: usize, name: &str, attrs: &[(&str, &str)]) {
    start_tag(out, depth, name, attrs);
    out.push_str(">\n");
}

fn empty_tag(out: &mut String, depth: usize, name: &str, attrs: &[(&str, &str)]) {
    start_tag(out, depth, name, attrs);
    out.push_str("/>\n");
}

fn start_tag(out: &mut String, depth: usize, name: &str, attrs: &[(&str, &str)]) {
    for _ in 0..depth {
        out.push('\t');
    }
    out.push('<');
    out.push_str(name);
    for (key, value) in attrs {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        escape_attribute_into(out, value);
        out.push('"');
    }
}

/// `escape_attribute` plus tab, newline and carriage return as character
/// references; raw ones read back as spaces.
fn escape_attribute_into(out: &mut String, value: &str) {
    for ch in htmlize::escape_attribute(value).chars() {
        match ch {
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(ch),
        }
    }
}

/// Formats like JavaScript's `Number.prototype.toString` (`30`, not `30.0`).
fn js_number(v: f64, buf: &mut ryu_js::Buffer) -> &str {
    if !v.is_finite() {
        return "0";
    }
    if v == 0.0 {
        return "0";
    }
    buf.format_finite(v)
}
