use crate::model::{Edge, Node};

/// Display-refresh hooks, injected into a [`crate::Topology`] at construction.
///
/// All methods run synchronously after the mutation has been applied.
pub trait EditorObserver {
    fn node_created(&mut self, _node: &Node) {}
    fn node_deleted(&mut self, _id: &str) {}
    fn edge_created(&mut self, _edge: &Edge) {}
    fn edge_deleted(&mut self, _id: &str) {}
    fn canvas_cleared(&mut self) {}
    fn topology_loaded(&mut self, _node_count: usize, _edge_count: usize) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl EditorObserver for NoopObserver {}
