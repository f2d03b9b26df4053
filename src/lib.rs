pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod painter;
pub mod shape;
pub mod style;
pub mod topology;
pub mod viewport;

pub use config::{EngineConfig, load_config};
pub use error::EngineError;
pub use geometry::Rect;
pub use graph::{Edge, Graph, Node};
pub use painter::{DrawSummary, ImageResolver, RecordingPainter, ShapePainter};
pub use shape::{EdgeShape, NodeShape, ShapeState};
pub use style::{StyleSheet, load_stylesheet};
pub use topology::Topology;
pub use viewport::ViewTransform;
