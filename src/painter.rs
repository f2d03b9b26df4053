//! Collaborator interfaces: the shape painter that receives resolved
//! geometry, and the image resolver for node background images.
//!
//! The engine never touches a drawing API; it hands fully resolved
//! coordinates to a [`ShapePainter`] and lets the host side-effect pixels.

use crate::shape::{ArrowShape, EdgePath, MarkerKind, ShapeState};
use crate::style::{EdgeStyle, NodeStyle};

/// Resolved node geometry for one draw invocation.
#[derive(Debug, Clone)]
pub struct NodePaint {
    pub id: u64,
    pub center: (f32, f32),
    pub radius: f32,
    pub marker: MarkerKind,
    pub state: ShapeState,
    pub style: NodeStyle,
    pub image: Option<ImageHandle>,
    pub label_enabled: bool,
}

/// Resolved edge geometry for one draw invocation. The path is the full
/// center-to-center geometry; `from_point`/`to_point` are the border
/// crossings where the visible stroke should start and stop.
#[derive(Debug, Clone)]
pub struct EdgePaint {
    pub id: u64,
    pub path: EdgePath,
    pub from_point: (f32, f32),
    pub to_point: (f32, f32),
    pub arrow: Option<ArrowShape>,
    pub state: ShapeState,
    pub style: EdgeStyle,
    pub label_enabled: bool,
}

/// Drawing backend. Implementations stroke and fill with whatever API
/// they own (canvas, WebGL, SVG); the engine only supplies coordinates.
pub trait ShapePainter {
    fn paint_edge(&mut self, edge: &EdgePaint);
    fn paint_node(&mut self, node: &NodePaint);
}

/// Painter that records every invocation, for tests and layout dumps.
#[derive(Debug, Default)]
pub struct RecordingPainter {
    pub nodes: Vec<NodePaint>,
    pub edges: Vec<EdgePaint>,
}

impl ShapePainter for RecordingPainter {
    fn paint_edge(&mut self, edge: &EdgePaint) {
        self.edges.push(edge.clone());
    }

    fn paint_node(&mut self, node: &NodePaint) {
        self.nodes.push(node.clone());
    }
}

/// A loaded (or at least measured) node background image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageHandle {
    pub width: f32,
    pub height: f32,
}

/// Image loading collaborator, injected into the topology so the core
/// stays testable without a DOM or network.
pub trait ImageResolver {
    fn resolve(&self, url: &str) -> Option<ImageHandle>;
}

/// Default resolver: no images available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImages;

impl ImageResolver for NoImages {
    fn resolve(&self, _url: &str) -> Option<ImageHandle> {
        None
    }
}

/// Outcome of one draw pass, returned in place of render-start/render-end
/// notifications; the whole pass is synchronous.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawSummary {
    pub nodes_drawn: usize,
    pub edges_drawn: usize,
    /// Shapes omitted by a skip condition (missing position, zero width).
    pub nodes_skipped: usize,
    pub edges_skipped: usize,
}
