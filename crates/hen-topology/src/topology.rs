//! The editable topology graph.

use crate::cidr::interface_address;
use crate::config::EditorConfig;
use crate::element::{Element, ElementKind};
use crate::experiment::ExperimentMeta;
use crate::geom::{Point, Segment, Vector, circle_bounds, point};
use crate::model::{AddressField, Edge, Interface, Node, interface_id};
use crate::observer::{EditorObserver, NoopObserver};
use crate::pool::NodePool;
use crate::profile::{HardwareProfile, InterfaceSlot, NetbootField, NetbootInfo};
use crate::{Error, Result, xml};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use std::f64::consts::PI;

/// Nodes, their interfaces and the edges between them, plus the pool of host
/// ids that can still be placed.
///
/// Nodes and edges keep insertion order, which is also the order they are
/// written to a saved document.
pub struct Topology {
    config: EditorConfig,
    nodes: IndexMap<String, Node>,
    edges: IndexMap<String, Edge>,
    // interface id -> owning node id
    owners: FxHashMap<String, String>,
    pool: NodePool,
    edge_counter: u64,
    observer: Box<dyn EditorObserver>,
}

impl std::fmt::Debug for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Topology")
            .field("config", &self.config)
            .field("nodes", &self.nodes)
            .field("edges", &self.edges)
            .field("pool", &self.pool)
            .field("edge_counter", &self.edge_counter)
            .finish_non_exhaustive()
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Topology {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_observer(config, NoopObserver)
    }

    pub fn with_observer(config: EditorConfig, observer: impl EditorObserver + 'static) -> Self {
        let pool = NodePool::new(config.candidates.iter().cloned());
        Self {
            config,
            nodes: IndexMap::new(),
            edges: IndexMap::new(),
            owners: FxHashMap::default(),
            pool,
            edge_counter: 0,
            observer: Box::new(observer),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn pool(&self) -> &NodePool {
        &self.pool
    }

    /// Replaces the candidate host list (e.g. from a node-list reply). Ids of
    /// nodes already on the canvas stay unavailable.
    pub fn set_candidates<I, S>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pool.set_candidates(candidates);
        let placed: Vec<String> = self.nodes.keys().cloned().collect();
        for id in &placed {
            self.pool.take(id);
        }
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.get(id)
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn interface(&self, id: &str) -> Option<&Interface> {
        let owner = self.owners.get(id)?;
        self.nodes.get(owner)?.interface(id)
    }

    /// Id of the node owning interface `id`.
    pub fn owner_of(&self, id: &str) -> Option<&str> {
        self.owners.get(id).map(String::as_str)
    }

    fn interface_mut(&mut self, id: &str) -> Option<&mut Interface> {
        let owner = self.owners.get(id)?;
        self.nodes.get_mut(owner)?.interface_mut(id)
    }

    /// Whether any node, interface or edge already uses `id`.
    pub fn contains_id(&self, id: &str) -> bool {
        self.nodes.contains_key(id) || self.owners.contains_key(id) || self.edges.contains_key(id)
    }

    /// Places a new host with one interface per slot.
    ///
    /// Interfaces are spread evenly on a circle of radius
    /// `node_radius - interface_radius` around the node, starting at angle 0.
    /// An invalid CIDR in any slot aborts the creation; with
    /// `clear_canvas_on_invalid_cidr` set the canvas is cleared as well.
    pub fn create_node(
        &mut self,
        id: &str,
        profile: &HardwareProfile,
        netboot: NetbootInfo,
        slots: &[InterfaceSlot],
    ) -> Result<&Node> {
        if id.is_empty() {
            return Err(Error::validation("Node ID must not be empty."));
        }
        if self.contains_id(id) {
            return Err(Error::DuplicateId { id: id.to_string() });
        }

        let mut addresses = Vec::with_capacity(slots.len());
        for slot in slots {
            match interface_address(&slot.cidr) {
                Ok(addr) => addresses.push(addr),
                Err(err) => {
                    if self.config.clear_canvas_on_invalid_cidr {
                        tracing::warn!(node = %id, cidr = %slot.cidr, "invalid CIDR, clearing canvas");
                        self.clear();
                    }
                    return Err(err);
                }
            }
        }

        let center = self.config.node_center();
        let orbit = self.config.interface_orbit();
        let count = slots.len();
        let mut interfaces = Vec::with_capacity(count);
        for (index, (slot, (ip, subnet))) in slots.iter().zip(addresses).enumerate() {
            let iface_id = interface_id(id, index);
            if self.contains_id(&iface_id) {
                return Err(Error::DuplicateId { id: iface_id });
            }
            let angle = 2.0 * PI * index as f64 / count as f64;
            let position = point(
                center.x + orbit * angle.cos(),
                center.y + orbit * angle.sin(),
            );
            interfaces.push(Interface {
                mac: slot.mac.clone(),
                model: slot.model.clone(),
                port: slot.port.clone(),
                switch: slot.switch.clone(),
                ip,
                subnet,
                ..Interface::empty(iface_id, position)
            });
        }

        for iface in &interfaces {
            self.owners.insert(iface.id.clone(), id.to_string());
        }
        let node = Node {
            id: id.to_string(),
            hardware: profile.clone(),
            netboot,
            position: center,
            interfaces,
        };
        self.pool.take(id);
        tracing::debug!(node = %id, interfaces = count, "node created");
        self.observer.node_created(&node);
        self.nodes.insert(id.to_string(), node);
        Ok(&self.nodes[id])
    }

    /// Removes a node, its interfaces and every edge attached to them. The
    /// deleted edges are stripped from the surviving endpoints, and the node id
    /// goes back to the pool.
    pub fn delete_node(&mut self, id: &str) -> Result<Node> {
        let node = self.nodes.shift_remove(id).ok_or_else(|| Error::not_found(id))?;

        for iface in &node.interfaces {
            self.owners.remove(&iface.id);
        }
        for iface in &node.interfaces {
            for edge_id in &iface.edges {
                // Stale references may name an edge that now joins other nodes.
                let attached = self
                    .edges
                    .get(edge_id)
                    .is_some_and(|e| e.other_end(&iface.id).is_some());
                if !attached {
                    continue;
                }
                let Some(edge) = self.edges.shift_remove(edge_id) else {
                    continue;
                };
                if let Some(other) = edge.other_end(&iface.id) {
                    if let Some(other) = self.interface_mut(other) {
                        other.strip_edge(&edge.id);
                    }
                }
                tracing::debug!(edge = %edge.id, node = %id, "dangling edge removed");
                self.observer.edge_deleted(&edge.id);
            }
        }

        self.pool.release(id);
        tracing::debug!(node = %id, "node deleted");
        self.observer.node_deleted(id);
        Ok(node)
    }

    /// Connects interface `start_iface` of `start_node` with interface
    /// `end_iface` of `end_node` on VLAN `vlan`.
    ///
    /// The edge id is the VLAN name followed by a session-wide counter that
    /// only moves on success. Ids already in use, or still listed by some
    /// interface after a `delete_edge`, are skipped.
    pub fn create_edge(
        &mut self,
        vlan: &str,
        start_node: &str,
        start_iface: usize,
        end_node: &str,
        end_iface: usize,
    ) -> Result<&Edge> {
        if vlan.is_empty() {
            return Err(Error::validation(
                "You'll need some sort of name for your VLAN.",
            ));
        }
        if start_node == end_node {
            return Err(Error::validation("Start and end node should be different!"));
        }
        let start = self.endpoint(start_node, start_iface, "Start")?;
        let end = self.endpoint(end_node, end_iface, "End")?;

        let edge_id = loop {
            let candidate = format!("{vlan}{}", self.edge_counter);
            self.edge_counter += 1;
            if !self.contains_id(&candidate) && !self.is_referenced(&candidate) {
                break candidate;
            }
        };

        for iface_id in [&start, &end] {
            if let Some(iface) = self.interface_mut(iface_id) {
                iface.attach_edge(&edge_id, vlan);
            }
        }
        let edge = Edge {
            id: edge_id.clone(),
            vlan: vlan.to_string(),
            start,
            end,
        };
        tracing::debug!(edge = %edge.id, start = %edge.start, end = %edge.end, "edge created");
        self.observer.edge_created(&edge);
        self.edges.insert(edge_id.clone(), edge);
        Ok(&self.edges[&edge_id])
    }

    /// Resolves `<node_id>interface<index>`, whatever its position in the node.
    fn endpoint(&self, node_id: &str, index: usize, side: &str) -> Result<String> {
        if !self.nodes.contains_key(node_id) {
            return Err(Error::validation(format!("{side} node has to exist first!")));
        }
        let iface_id = interface_id(node_id, index);
        match self.owners.get(&iface_id) {
            Some(owner) if owner == node_id => Ok(iface_id),
            _ => Err(Error::validation(format!(
                "{side} node interface has to exist first!"
            ))),
        }
    }

    /// Whether any interface still lists `edge_id`, live or stale.
    fn is_referenced(&self, edge_id: &str) -> bool {
        self.nodes
            .values()
            .flat_map(|n| &n.interfaces)
            .any(|i| i.edges.iter().any(|e| e == edge_id))
    }

    /// Removes an edge. The endpoint interfaces keep their reference to it;
    /// use [`Topology::detach_edge`] to clean those up too.
    pub fn delete_edge(&mut self, id: &str) -> Result<Edge> {
        let edge = self.edges.shift_remove(id).ok_or_else(|| Error::not_found(id))?;
        tracing::debug!(edge = %id, "edge deleted");
        self.observer.edge_deleted(id);
        Ok(edge)
    }

    /// Removes an edge and strips its id from both endpoint interfaces.
    pub fn detach_edge(&mut self, id: &str) -> Result<Edge> {
        let edge = self.delete_edge(id)?;
        for iface_id in [&edge.start, &edge.end] {
            if let Some(iface) = self.interface_mut(iface_id) {
                iface.strip_edge(&edge.id);
            }
        }
        Ok(edge)
    }

    /// Current line of an edge, from its two endpoint interfaces.
    pub fn edge_segment(&self, id: &str) -> Option<Segment> {
        let edge = self.edges.get(id)?;
        let from = self.interface(&edge.start)?.position;
        let to = self.interface(&edge.end)?.position;
        Some(Segment::new(from, to))
    }

    /// Lines of every edge attached to interface `id`, for redrawing after a move.
    pub fn edge_segments_for_interface(&self, id: &str) -> Vec<(String, Segment)> {
        let Some(iface) = self.interface(id) else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(iface.edges.len());
        for edge_id in &iface.edges {
            match self.edge_segment(edge_id) {
                Some(seg) => out.push((edge_id.clone(), seg)),
                None => tracing::warn!(interface = %id, edge = %edge_id, "dangling edge reference"),
            }
        }
        out
    }

    /// Lines of every edge attached to any interface of node `id`.
    pub fn edge_segments_for_node(&self, id: &str) -> Vec<(String, Segment)> {
        let Some(node) = self.nodes.get(id) else {
            return Vec::new();
        };
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut out = Vec::new();
        for iface in &node.interfaces {
            for (edge_id, seg) in self.edge_segments_for_interface(&iface.id) {
                if seen.insert(edge_id.clone()) {
                    out.push((edge_id, seg));
                }
            }
        }
        out
    }

    /// Drags a node (and its interfaces) so its center lands on `to`.
    pub fn move_node(&mut self, id: &str, to: Point) -> Result<Vec<(String, Segment)>> {
        let node = self.nodes.get_mut(id).ok_or_else(|| Error::not_found(id))?;
        let delta: Vector = to - node.position;
        node.position = to;
        for iface in &mut node.interfaces {
            iface.position += delta;
        }
        Ok(self.edge_segments_for_node(id))
    }

    /// Drags an interface within its node. A position that would put any part
    /// of the interface outside the node's bounding box is refused and the
    /// interface stays where it was.
    pub fn move_interface(&mut self, id: &str, to: Point) -> Result<Vec<(String, Segment)>> {
        let owner = self.owners.get(id).ok_or_else(|| Error::not_found(id))?;
        let node = self.nodes.get(owner).ok_or_else(|| Error::not_found(id))?;
        let outer = circle_bounds(node.position, self.config.node_radius);
        let inner = circle_bounds(to, self.config.interface_radius);
        let inside = outer.min_x() < inner.min_x()
            && outer.max_x() > inner.max_x()
            && outer.min_y() < inner.min_y()
            && outer.max_y() > inner.max_y();
        if !inside {
            return Err(Error::OutOfBounds { id: id.to_string() });
        }
        if let Some(iface) = self.interface_mut(id) {
            iface.position = to;
        }
        Ok(self.edge_segments_for_interface(id))
    }

    pub fn set_netboot(&mut self, node_id: &str, field: NetbootField, value: &str) -> Result<()> {
        let node = self
            .nodes
            .get_mut(node_id)
            .ok_or_else(|| Error::not_found(node_id))?;
        node.netboot.set(field, value);
        Ok(())
    }

    pub fn set_interface_address(
        &mut self,
        iface_id: &str,
        field: AddressField,
        value: &str,
    ) -> Result<()> {
        let iface = self
            .interface_mut(iface_id)
            .ok_or_else(|| Error::not_found(iface_id))?;
        match field {
            AddressField::Ip => iface.ip = value.to_string(),
            AddressField::Subnet => iface.subnet = value.to_string(),
        }
        Ok(())
    }

    /// Looks up any canvas element by id.
    pub fn element(&self, id: &str) -> Option<Element<'_>> {
        if let Some(node) = self.nodes.get(id) {
            return Some(Element::Computer(node));
        }
        if let Some(iface) = self.interface(id) {
            return Some(Element::Interface(iface));
        }
        self.edges.get(id).map(Element::Edge)
    }

    /// Deletes whatever element `id` names. Interfaces only go away with their node.
    pub fn delete_element(&mut self, id: &str) -> Result<ElementKind> {
        let kind = self
            .element(id)
            .map(|e| e.kind())
            .ok_or_else(|| Error::not_found(id))?;
        match kind {
            ElementKind::Computer => {
                self.delete_node(id)?;
            }
            ElementKind::Edge => {
                self.delete_edge(id)?;
            }
            ElementKind::Interface => return Err(Error::NotDeletable { id: id.to_string() }),
        }
        Ok(kind)
    }

    /// Removes everything from the canvas and makes every candidate available.
    /// The edge counter keeps running.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.owners.clear();
        self.pool.reset();
        tracing::debug!("canvas cleared");
        self.observer.canvas_cleared();
    }

    /// Writes the saved-topology document for this graph.
    pub fn to_xml(&self, meta: &ExperimentMeta) -> String {
        xml::write_topology(self, meta)
    }

    /// Replaces the graph with the one in `text` and returns the experiment
    /// details stored with it. Nothing changes if the document fails to load.
    pub fn load_xml(&mut self, text: &str) -> Result<ExperimentMeta> {
        let loaded = xml::read_topology(text)?;
        self.clear();

        for node in loaded.nodes {
            for iface in &node.interfaces {
                self.owners.insert(iface.id.clone(), node.id.clone());
            }
            self.nodes.insert(node.id.clone(), node);
        }
        for edge in loaded.edges {
            self.edges.insert(edge.id.clone(), edge);
        }
        self.pool
            .exclude_all(self.nodes.keys().map(String::as_str));

        tracing::debug!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "topology loaded"
        );
        self.observer
            .topology_loaded(self.nodes.len(), self.edges.len());
        Ok(loaded.meta)
    }
}
