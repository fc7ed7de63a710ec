//! Entities of the topology graph.

use crate::geom::Point;
use crate::profile::{HardwareProfile, NetbootInfo};

/// Value of the `type` attribute for hosts.
pub const NODE_TYPE: &str = "computer";
/// Value of the `type` attribute for interfaces.
pub const INTERFACE_TYPE: &str = "experimental";
/// Value of the `type` attribute for edges.
pub const EDGE_TYPE: &str = "edge";

/// A host placed on the canvas, owning a fixed set of interfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub hardware: HardwareProfile,
    pub netboot: NetbootInfo,
    pub position: Point,
    pub interfaces: Vec<Interface>,
}

impl Node {
    pub fn interface(&self, id: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|i| i.id == id)
    }

    pub(crate) fn interface_mut(&mut self, id: &str) -> Option<&mut Interface> {
        self.interfaces.iter_mut().find(|i| i.id == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Interface {
    pub id: String,
    pub mac: String,
    pub model: String,
    pub port: String,
    pub switch: String,
    pub ip: String,
    pub subnet: String,
    /// Empty until the interface is connected.
    pub vlan: String,
    /// Ids of the edges attached to this interface, in attachment order.
    pub edges: Vec<String>,
    pub position: Point,
}

impl Interface {
    pub(crate) fn empty(id: String, position: Point) -> Self {
        Self {
            id,
            mac: String::new(),
            model: String::new(),
            port: String::new(),
            switch: String::new(),
            ip: String::new(),
            subnet: String::new(),
            vlan: String::new(),
            edges: Vec::new(),
            position,
        }
    }

    /// The `edgeId` attribute: edge references joined by single spaces.
    pub fn edge_ref_list(&self) -> String {
        self.edges.join(" ")
    }

    pub(crate) fn set_edge_ref_list(&mut self, list: &str) {
        self.edges = list.split_whitespace().map(str::to_string).collect();
    }

    pub(crate) fn attach_edge(&mut self, edge_id: &str, vlan: &str) {
        self.edges.push(edge_id.to_string());
        self.vlan = vlan.to_string();
    }

    pub(crate) fn strip_edge(&mut self, edge_id: &str) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| e != edge_id);
        before != self.edges.len()
    }
}

/// The two address fields of an interface that stay editable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    Ip,
    Subnet,
}

/// `<nodeId>interface<index>`
pub fn interface_id(node_id: &str, index: usize) -> String {
    format!("{node_id}interface{index}")
}

/// A VLAN connection between two interfaces of two different nodes.
///
/// Coordinates are not stored; see [`crate::Topology::edge_segment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: String,
    pub vlan: String,
    pub start: String,
    pub end: String,
}

impl Edge {
    /// The endpoint on the other side of `interface_id`, if it is one of the two.
    pub fn other_end(&self, interface_id: &str) -> Option<&str> {
        if self.start == interface_id {
            Some(&self.end)
        } else if self.end == interface_id {
            Some(&self.start)
        } else {
            None
        }
    }
}
