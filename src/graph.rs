//! Logical graph snapshot consumed by the topology.
//!
//! Nodes and edges are kept in input order; the order is significant for
//! offset assignment and draw order, so the collections are `Vec`s rather
//! than maps.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: u64,
    /// Logical position. Absent until a layout or simulation assigns one;
    /// a node without a position is skipped during drawing.
    #[serde(default)]
    pub position: Option<(f32, f32)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: u64,
    pub start: u64,
    pub end: u64,
}

impl Edge {
    pub fn is_loop(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node if no node with `id` exists yet.
    pub fn ensure_node(&mut self, id: u64, position: Option<(f32, f32)>) {
        if let Some(existing) = self.nodes.iter_mut().find(|n| n.id == id) {
            if position.is_some() {
                existing.position = position;
            }
            return;
        }
        self.nodes.push(Node { id, position });
    }

    pub fn add_edge(&mut self, id: u64, start: u64, end: u64) {
        self.edges.push(Edge { id, start, end });
    }

    pub fn remove_node(&mut self, id: u64) {
        self.nodes.retain(|n| n.id != id);
    }

    pub fn remove_edge(&mut self, id: u64) {
        self.edges.retain(|e| e.id != id);
    }
}
