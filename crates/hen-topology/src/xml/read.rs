//! Saved-topology document reader.

use crate::experiment::{ExperimentMeta, UserCredentials};
use crate::geom::point;
use crate::model::{Edge, Interface, Node};
use crate::profile::{HardwareProfile, NetbootInfo};
use crate::{Error, Result};
use rustc_hash::FxHashSet;

/// Everything a saved document holds, before it replaces a live graph.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTopology {
    pub meta: ExperimentMeta,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Parses a saved-topology document.
///
/// Edge endpoints are taken as written and not checked against the
/// interfaces in the document. Edge coordinates are ignored; they are derived
/// from the endpoint interfaces.
pub fn read_topology(text: &str) -> Result<LoadedTopology> {
    let doc = roxmltree::Document::parse(text)?;
    let root = doc.root_element();
    if !root.has_tag_name("topology") {
        return Err(Error::document(format!(
            "expected <topology> root, found <{}>",
            root.tag_name().name()
        )));
    }

    let mut meta = ExperimentMeta {
        experiment_id: attr(root, "experimentid"),
        start_date: attr(root, "startdate"),
        end_date: attr(root, "enddate"),
        ..Default::default()
    };

    let mut ids: FxHashSet<String> = FxHashSet::default();
    let mut nodes: Vec<Node> = Vec::new();
    let mut edges: Vec<Edge> = Vec::new();

    for child in root.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "description" => meta.description = text_content(child),
            "usermanagement" => {
                meta.credentials = UserCredentials {
                    username: attr(child, "username"),
                    password: attr(child, "password"),
                    email: attr(child, "email"),
                };
            }
            "node" => {
                let node = read_node(child)?;
                claim(&mut ids, &node.id)?;
                for iface in &node.interfaces {
                    claim(&mut ids, &iface.id)?;
                }
                nodes.push(node);
            }
            "edge" => {
                let edge = Edge {
                    id: required(child, "id")?,
                    vlan: attr(child, "vlan"),
                    start: attr(child, "edgeStart"),
                    end: attr(child, "edgeEnd"),
                };
                claim(&mut ids, &edge.id)?;
                edges.push(edge);
            }
            other => {
                tracing::debug!(element = %other, "ignoring unknown topology element");
            }
        }
    }

    Ok(LoadedTopology { meta, nodes, edges })
}

fn read_node(el: roxmltree::Node<'_, '_>) -> Result<Node> {
    let id = required(el, "id")?;
    let position = point(coord(el, "cx", &id)?, coord(el, "cy", &id)?);

    let mut hardware = HardwareProfile::default();
    let mut netboot = NetbootInfo::default();
    let mut interfaces = Vec::new();

    for child in el.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "interface" => {
                let iface_id = required(child, "id")?;
                let position = point(
                    coord(child, "cx", &iface_id)?,
                    coord(child, "cy", &iface_id)?,
                );
                let mut iface = Interface {
                    mac: attr(child, "mac"),
                    model: attr(child, "model"),
                    port: attr(child, "port"),
                    switch: attr(child, "switch"),
                    ip: attr(child, "ip"),
                    subnet: attr(child, "subnet"),
                    vlan: attr(child, "vlan"),
                    ..Interface::empty(iface_id, position)
                };
                iface.set_edge_ref_list(child.attribute("edgeId").unwrap_or_default());
                interfaces.push(iface);
            }
            "attribute" => {
                let name = attr(child, "name");
                if !hardware.set(&name, attr(child, "value")) {
                    tracing::debug!(node = %id, attribute = %name, "ignoring unknown node attribute");
                }
            }
            "netbootinfo" => {
                netboot = NetbootInfo {
                    loader: attr(child, "loader"),
                    filesystem: attr(child, "filesystem"),
                    kernel: attr(child, "kernel"),
                };
            }
            _ => {}
        }
    }

    Ok(Node {
        id,
        hardware,
        netboot,
        position,
        interfaces,
    })
}

fn claim(ids: &mut FxHashSet<String>, id: &str) -> Result<()> {
    if ids.insert(id.to_string()) {
        Ok(())
    } else {
        Err(Error::document(format!("duplicate id `{id}`")))
    }
}

fn attr(el: roxmltree::Node<'_, '_>, name: &str) -> String {
    el.attribute(name).unwrap_or_default().to_string()
}

fn required(el: roxmltree::Node<'_, '_>, name: &str) -> Result<String> {
    match el.attribute(name) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(Error::document(format!(
            "<{}> is missing its `{name}` attribute",
            el.tag_name().name()
        ))),
    }
}

fn coord(el: roxmltree::Node<'_, '_>, name: &str, owner: &str) -> Result<f64> {
    let raw = el.attribute(name).unwrap_or_default();
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            Error::document(format!(
                "`{owner}` has a non-numeric `{name}` coordinate: {raw:?}"
            ))
        })
}

fn text_content(el: roxmltree::Node<'_, '_>) -> String {
    el.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}
