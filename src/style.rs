//! Style maps for nodes and edges.
//!
//! A [`StyleSheet`] carries one default style per shape class plus id-keyed
//! overrides. An override replaces the whole style for that id; all fields
//! have serde defaults so a partial JSON object is enough.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Preferred stroke rendering for an edge. Geometry (straight vs curved vs
/// loop) is decided by the offset assigner, not by this field; the painter
/// uses it for dashing only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineKind {
    Solid,
    Dashed,
    CustomDashed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeStyle {
    /// Marker shape name: circle, square, diamond, triangle, triangle-down,
    /// star, hexagon. Unknown names fall back to circle.
    pub marker: String,
    pub radius: f32,
    pub border_width: f32,
    pub fill: String,
    pub stroke: String,
    pub mass: f32,
    /// Background image URL, resolved through the injected image resolver.
    pub image: Option<String>,
    pub label: bool,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            marker: "circle".to_string(),
            radius: 10.0,
            border_width: 2.0,
            fill: "#97C2FC".to_string(),
            stroke: "#2B7CE9".to_string(),
            mass: 1.0,
            image: None,
            label: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeStyle {
    pub line: LineKind,
    pub width: f32,
    pub color: String,
    /// On/off run lengths for `LineKind::CustomDashed`.
    pub dash: Option<Vec<f32>>,
    /// Arrowhead scale factor; zero disables the arrowhead.
    pub arrow_scale: f32,
    pub label: bool,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            line: LineKind::Solid,
            width: 1.0,
            color: "#2B7CE9".to_string(),
            dash: None,
            arrow_scale: 1.0,
            label: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSheet {
    pub node: NodeStyle,
    pub edge: EdgeStyle,
    pub nodes: BTreeMap<u64, NodeStyle>,
    pub edges: BTreeMap<u64, EdgeStyle>,
}

impl StyleSheet {
    pub fn node_style(&self, id: u64) -> &NodeStyle {
        self.nodes.get(&id).unwrap_or(&self.node)
    }

    pub fn edge_style(&self, id: u64) -> &EdgeStyle {
        self.edges.get(&id).unwrap_or(&self.edge)
    }
}

/// Loads a stylesheet from a JSON file; `None` yields the defaults.
pub fn load_stylesheet(path: Option<&Path>) -> Result<StyleSheet, EngineError> {
    let Some(path) = path else {
        return Ok(StyleSheet::default());
    };
    let contents = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| EngineError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_replaces_default_style() {
        let mut sheet = StyleSheet::default();
        sheet.nodes.insert(
            7,
            NodeStyle {
                radius: 25.0,
                ..NodeStyle::default()
            },
        );
        assert_eq!(sheet.node_style(7).radius, 25.0);
        assert_eq!(sheet.node_style(8).radius, NodeStyle::default().radius);
    }

    #[test]
    fn missing_file_reports_an_io_error() {
        let path = Path::new("does-not-exist/styles.json");
        let err = load_stylesheet(Some(path)).unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let sheet: StyleSheet =
            serde_json::from_str(r##"{"node": {"radius": 4.0}, "edges": {"1": {"width": 3.0}}}"##)
                .unwrap();
        assert_eq!(sheet.node.radius, 4.0);
        assert_eq!(sheet.node.marker, "circle");
        assert_eq!(sheet.edge_style(1).width, 3.0);
        assert_eq!(sheet.edge_style(1).arrow_scale, 1.0);
    }
}
