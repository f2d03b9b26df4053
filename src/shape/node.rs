//! Node shapes and their border-distance functions.
//!
//! Every marker kind defines the distance from the node center to its
//! outline along a given approach angle. Circles are rotation-invariant;
//! the polygonal markers cast a ray against a unit outline scaled by the
//! node radius, following the same edge-intersection math used for edge
//! clipping.

use crate::geometry::{EPSILON, angle_between, distance};
use crate::graph::Node;
use crate::style::NodeStyle;

use super::{MarkerKind, ShapeState};

// Unit outlines for polygonal markers, circumscribed by the unit circle
// (y grows downward, matching canvas coordinates).
const SQUARE: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
const DIAMOND: [(f32, f32); 4] = [(0.0, -1.0), (1.0, 0.0), (0.0, 1.0), (-1.0, 0.0)];
const TRIANGLE: [(f32, f32); 3] = [(0.0, -1.0), (0.866, 0.5), (-0.866, 0.5)];
const TRIANGLE_DOWN: [(f32, f32); 3] = [(0.0, 1.0), (0.866, -0.5), (-0.866, -0.5)];
const HEXAGON: [(f32, f32); 6] = [
    (1.0, 0.0),
    (0.5, 0.866),
    (-0.5, 0.866),
    (-1.0, 0.0),
    (-0.5, -0.866),
    (0.5, -0.866),
];
// Five-pointed star: outer radius 1.0, inner radius 0.5, apex upward.
const STAR: [(f32, f32); 10] = [
    (0.0, -1.0),
    (0.2939, -0.4045),
    (0.9511, -0.309),
    (0.4755, 0.1545),
    (0.5878, 0.809),
    (0.0, 0.5),
    (-0.5878, 0.809),
    (-0.4755, 0.1545),
    (-0.9511, -0.309),
    (-0.2939, -0.4045),
];

#[derive(Debug, Clone)]
pub struct NodeShape {
    pub id: u64,
    pub state: ShapeState,
    /// Current position, settable independently of the source node so a
    /// simulation can move the shape between rebuilds.
    pub position: Option<(f32, f32)>,
    pub mass: f32,
    pub marker: MarkerKind,
    pub style: NodeStyle,
    /// Ids of edge shapes ending at this node. Rebuilt with the topology;
    /// id-based so removal can never dangle.
    pub in_edges: Vec<u64>,
    /// Ids of edge shapes starting at this node.
    pub out_edges: Vec<u64>,
}

impl NodeShape {
    pub fn new(node: &Node, style: NodeStyle) -> Self {
        Self {
            id: node.id,
            state: ShapeState::Idle,
            position: node.position,
            mass: style.mass,
            marker: MarkerKind::from_name(&style.marker),
            style,
            in_edges: Vec::new(),
            out_edges: Vec::new(),
        }
    }

    /// Reassigns upstream data on a rebuild. The shape keeps its state and
    /// any position a simulation has set; the source position is adopted
    /// only while the shape has none.
    pub fn apply(&mut self, node: &Node, style: NodeStyle) {
        if self.position.is_none() {
            self.position = node.position;
        }
        self.mass = style.mass;
        self.marker = MarkerKind::from_name(&style.marker);
        self.style = style;
    }

    pub fn center(&self) -> Option<(f32, f32)> {
        self.position
    }

    pub fn radius(&self) -> f32 {
        self.style.radius
    }

    /// Radius including half the border stroke, where edges should stop.
    pub fn bordered_radius(&self) -> f32 {
        self.style.radius + self.style.border_width / 2.0
    }

    /// Distance from the center to the visual border along `angle`.
    /// Constant for circles, direction-dependent for polygonal markers.
    pub fn border_distance(&self, angle: f32) -> f32 {
        let half_border = self.style.border_width / 2.0;
        match self.outline() {
            None => self.bordered_radius(),
            Some(outline) => {
                let dir = (angle.cos(), angle.sin());
                match ray_outline_distance(dir, outline, self.style.radius) {
                    Some(dist) => dist + half_border,
                    None => self.bordered_radius(),
                }
            }
        }
    }

    /// Hit test in logical coordinates; false while unpositioned.
    pub fn includes_point(&self, point: (f32, f32)) -> bool {
        let Some(center) = self.position else {
            return false;
        };
        let dist = distance(center, point);
        if dist <= EPSILON {
            return true;
        }
        dist <= self.border_distance(angle_between(center, point))
    }

    pub fn image_url(&self) -> Option<&str> {
        self.style.image.as_deref()
    }

    fn outline(&self) -> Option<&'static [(f32, f32)]> {
        match self.marker {
            MarkerKind::Circle => None,
            MarkerKind::Square => Some(&SQUARE),
            MarkerKind::Diamond => Some(&DIAMOND),
            MarkerKind::Triangle => Some(&TRIANGLE),
            MarkerKind::TriangleDown => Some(&TRIANGLE_DOWN),
            MarkerKind::Star => Some(&STAR),
            MarkerKind::Hexagon => Some(&HEXAGON),
        }
    }
}

/// Distance from the origin along `dir` (unit vector) to the outline
/// scaled by `scale`. Returns the nearest crossing, or `None` when the ray
/// misses (possible only for degenerate outlines).
fn ray_outline_distance(dir: (f32, f32), outline: &[(f32, f32)], scale: f32) -> Option<f32> {
    let mut best: Option<f32> = None;
    for i in 0..outline.len() {
        let (x1, y1) = outline[i];
        let (x2, y2) = outline[(i + 1) % outline.len()];
        let (x1, y1) = (x1 * scale, y1 * scale);
        let sx = x2 * scale - x1;
        let sy = y2 * scale - y1;
        let denom = dir.0 * sy - dir.1 * sx;
        if denom.abs() < EPSILON {
            continue;
        }
        let t = (x1 * sy - y1 * sx) / denom;
        let u = (x1 * dir.1 - y1 * dir.0) / denom;
        if t >= 0.0 && (0.0..=1.0).contains(&u) {
            match best {
                Some(b) if t >= b => {}
                _ => best = Some(t),
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::NodeStyle;

    fn shape(marker: &str, radius: f32, border_width: f32) -> NodeShape {
        let style = NodeStyle {
            marker: marker.to_string(),
            radius,
            border_width,
            ..NodeStyle::default()
        };
        NodeShape::new(
            &Node {
                id: 1,
                position: Some((0.0, 0.0)),
            },
            style,
        )
    }

    #[test]
    fn circle_border_is_rotation_invariant() {
        let node = shape("circle", 10.0, 2.0);
        for step in 0..8 {
            let angle = step as f32 * std::f32::consts::FRAC_PI_4;
            assert!((node.border_distance(angle) - 11.0).abs() < 1e-4);
        }
    }

    #[test]
    fn square_border_depends_on_angle() {
        let node = shape("square", 10.0, 0.0);
        // Straight out through a side: distance equals the radius.
        assert!((node.border_distance(0.0) - 10.0).abs() < 1e-3);
        // Out through a corner: sqrt(2) times the radius.
        let diag = node.border_distance(std::f32::consts::FRAC_PI_4);
        assert!((diag - 10.0 * std::f32::consts::SQRT_2).abs() < 1e-3);
    }

    #[test]
    fn diamond_border_is_shortest_on_diagonals() {
        let node = shape("diamond", 10.0, 0.0);
        let axis = node.border_distance(0.0);
        let diag = node.border_distance(std::f32::consts::FRAC_PI_4);
        assert!((axis - 10.0).abs() < 1e-3);
        assert!(diag < axis);
    }

    #[test]
    fn includes_point_respects_marker_outline() {
        let node = shape("diamond", 10.0, 0.0);
        assert!(node.includes_point((4.0, 4.0)));
        assert!(!node.includes_point((8.0, 8.0)));
        assert!(node.includes_point((9.5, 0.0)));
    }

    #[test]
    fn unpositioned_node_never_includes_points() {
        let mut node = shape("circle", 10.0, 0.0);
        node.position = None;
        assert!(!node.includes_point((0.0, 0.0)));
    }

    #[test]
    fn apply_keeps_simulated_position() {
        let mut node = shape("circle", 10.0, 0.0);
        node.position = Some((50.0, 60.0));
        node.state = ShapeState::Selected;
        node.apply(
            &Node {
                id: 1,
                position: Some((0.0, 0.0)),
            },
            NodeStyle::default(),
        );
        assert_eq!(node.position, Some((50.0, 60.0)));
        assert_eq!(node.state, ShapeState::Selected);
    }
}
