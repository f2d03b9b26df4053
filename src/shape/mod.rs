//! Renderable shapes derived from the logical graph.
//!
//! Node and edge shapes wrap a logical node/edge with resolved style and
//! geometry state. Construction goes through the factory functions here so
//! marker/variant selection stays in one place.

pub mod border;
pub mod edge;
pub mod node;
pub mod offsets;

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::graph;
use crate::style::{EdgeStyle, NodeStyle};

pub use border::{BorderEnd, BorderHit, resolve_border};
pub use edge::{ArrowShape, EdgeOffset, EdgePath, EdgeShape, OffsetLine};
pub use node::NodeShape;
pub use offsets::assign_offsets;

/// Interaction state of a shape. Selection wins over hover: a hover
/// cascade never writes onto a selected shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShapeState {
    #[default]
    Idle,
    Selected,
    Hovered,
}

impl ShapeState {
    pub fn is_idle(self) -> bool {
        matches!(self, ShapeState::Idle)
    }
}

/// Node marker shapes with a registered border-distance function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Circle,
    Square,
    Diamond,
    Triangle,
    TriangleDown,
    Star,
    Hexagon,
}

static MARKER_KINDS: Lazy<HashMap<&'static str, MarkerKind>> = Lazy::new(|| {
    HashMap::from([
        ("circle", MarkerKind::Circle),
        ("dot", MarkerKind::Circle),
        ("square", MarkerKind::Square),
        ("diamond", MarkerKind::Diamond),
        ("triangle", MarkerKind::Triangle),
        ("triangle-down", MarkerKind::TriangleDown),
        ("triangleDown", MarkerKind::TriangleDown),
        ("star", MarkerKind::Star),
        ("hexagon", MarkerKind::Hexagon),
    ])
});

impl MarkerKind {
    /// Resolves a marker name from a style map. Unrecognized names fall
    /// back to a circle rather than failing.
    pub fn from_name(name: &str) -> MarkerKind {
        match MARKER_KINDS.get(name) {
            Some(kind) => *kind,
            None => {
                log::debug!("unknown marker shape {name:?}, falling back to circle");
                MarkerKind::Circle
            }
        }
    }
}

/// Builds a node shape for a node that just appeared in the topology.
pub fn build_node_shape(node: &graph::Node, style: NodeStyle) -> NodeShape {
    NodeShape::new(node, style)
}

/// Builds an edge shape with a neutral offset; the offset assigner fills
/// in the real variant after the full edge set is known.
pub fn build_edge_shape(edge: &graph::Edge, style: EdgeStyle) -> EdgeShape {
    EdgeShape::new(edge, style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_lookup_covers_all_names() {
        assert_eq!(MarkerKind::from_name("square"), MarkerKind::Square);
        assert_eq!(MarkerKind::from_name("triangle-down"), MarkerKind::TriangleDown);
        assert_eq!(MarkerKind::from_name("star"), MarkerKind::Star);
    }

    #[test]
    fn unknown_marker_falls_back_to_circle() {
        assert_eq!(MarkerKind::from_name("blob"), MarkerKind::Circle);
    }
}
