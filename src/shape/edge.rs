//! Edge shapes: straight, curved and loopback geometry plus arrowheads.

use std::f32::consts::{FRAC_PI_2, TAU};

use crate::config::CurveConfig;
use crate::geometry::{
    EPSILON, distance, lerp, quadratic_point, quadratic_tangent, segment_distance,
};
use crate::graph::Edge;
use crate::style::EdgeStyle;

use super::ShapeState;
use super::border::BorderHit;

/// Geometric variant of an edge, decided by the offset assigner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OffsetLine {
    #[default]
    Straight,
    Curved,
    Loop,
}

/// Offset descriptor assigned to each edge: which geometry to use and how
/// far to fan out. For non-loop edges `magnitude == 0` implies a straight
/// line; loop magnitudes start at 1.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeOffset {
    pub line: OffsetLine,
    pub magnitude: f32,
}

/// Parametric edge path over `t` in `[0, 1]`.
///
/// Loop circles place `t = 0` and `t = 1` on the point nearest the owning
/// node so the border search span sits on the arc closest to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgePath {
    Segment {
        from: (f32, f32),
        to: (f32, f32),
    },
    Quadratic {
        from: (f32, f32),
        ctrl: (f32, f32),
        to: (f32, f32),
    },
    Circle {
        center: (f32, f32),
        radius: f32,
        clockwise: bool,
    },
}

impl EdgePath {
    pub fn point_at(&self, t: f32) -> (f32, f32) {
        match *self {
            EdgePath::Segment { from, to } => lerp(from, to, t),
            EdgePath::Quadratic { from, ctrl, to } => quadratic_point(from, ctrl, to, t),
            EdgePath::Circle {
                center,
                radius,
                clockwise,
            } => {
                let angle = circle_angle(t, clockwise);
                (
                    center.0 + radius * angle.cos(),
                    center.1 + radius * angle.sin(),
                )
            }
        }
    }

    /// Path direction at `t`, not normalized.
    pub fn tangent_at(&self, t: f32) -> (f32, f32) {
        match *self {
            EdgePath::Segment { from, to } => (to.0 - from.0, to.1 - from.1),
            EdgePath::Quadratic { from, ctrl, to } => quadratic_tangent(from, ctrl, to, t),
            EdgePath::Circle {
                radius, clockwise, ..
            } => {
                let angle = circle_angle(t, clockwise);
                let sign = if clockwise { 1.0 } else { -1.0 };
                (-angle.sin() * radius * sign, angle.cos() * radius * sign)
            }
        }
    }

    /// Minimum distance from `point` to the path. Exact for segments and
    /// circles; sampled for quadratics.
    pub fn distance_to(&self, point: (f32, f32), samples: u32) -> f32 {
        match *self {
            EdgePath::Segment { from, to } => segment_distance(point, from, to),
            EdgePath::Quadratic { .. } => {
                let samples = samples.max(2);
                let mut best = f32::MAX;
                for i in 0..=samples {
                    let t = i as f32 / samples as f32;
                    best = best.min(distance(point, self.point_at(t)));
                }
                best
            }
            EdgePath::Circle { center, radius, .. } => (distance(point, center) - radius).abs(),
        }
    }
}

fn circle_angle(t: f32, clockwise: bool) -> f32 {
    if clockwise {
        FRAC_PI_2 + t * TAU
    } else {
        FRAC_PI_2 - t * TAU
    }
}

/// Arrowhead placement: tip sits on the node border, the head points along
/// the path direction at the border parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowShape {
    pub tip: (f32, f32),
    pub angle: f32,
    pub length: f32,
}

#[derive(Debug, Clone)]
pub struct EdgeShape {
    pub id: u64,
    pub start: u64,
    pub end: u64,
    pub state: ShapeState,
    pub style: EdgeStyle,
    pub offset: EdgeOffset,
}

impl EdgeShape {
    pub fn new(edge: &Edge, style: EdgeStyle) -> Self {
        Self {
            id: edge.id,
            start: edge.start,
            end: edge.end,
            state: ShapeState::Idle,
            style,
            offset: EdgeOffset::default(),
        }
    }

    /// Reassigns upstream data on a rebuild, keeping interaction state.
    pub fn apply(&mut self, edge: &Edge, style: EdgeStyle) {
        self.start = edge.start;
        self.end = edge.end;
        self.style = style;
    }

    pub fn is_loop(&self) -> bool {
        self.start == self.end
    }

    /// The endpoint opposite to `node_id`; for loops this is the owning
    /// node itself.
    pub fn other_end(&self, node_id: u64) -> u64 {
        if self.start == node_id {
            self.end
        } else {
            self.start
        }
    }

    /// Resolves the path for the current offset. `from` and `to` are the
    /// endpoint node centers; `loop_anchor` is the owning node's bordered
    /// radius, used to size loop circles.
    ///
    /// Panics when a loop offset is attached to an edge with distinct
    /// endpoints; that indicates a broken factory mapping, not a runtime
    /// condition.
    pub fn path(&self, from: (f32, f32), to: (f32, f32), loop_anchor: f32, config: &CurveConfig) -> EdgePath {
        match self.offset.line {
            OffsetLine::Loop => {
                if !self.is_loop() {
                    panic!(
                        "edge {} has loop geometry but distinct endpoints {} -> {}",
                        self.id, self.start, self.end
                    );
                }
                let radius = loop_anchor + config.loop_radius_step * self.offset.magnitude;
                EdgePath::Circle {
                    center: (from.0, from.1 - radius),
                    radius,
                    clockwise: config.loop_clockwise,
                }
            }
            OffsetLine::Curved => match self.control_point(from, to, config) {
                Some(ctrl) => EdgePath::Quadratic { from, ctrl, to },
                None => EdgePath::Segment { from, to },
            },
            OffsetLine::Straight => EdgePath::Segment { from, to },
        }
    }

    /// Control point for the curved variant: perpendicular offset from the
    /// segment midpoint by `magnitude * bend_step`. `None` for degenerate
    /// (zero-length) segments.
    pub fn control_point(
        &self,
        from: (f32, f32),
        to: (f32, f32),
        config: &CurveConfig,
    ) -> Option<(f32, f32)> {
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        let len = (dx * dx + dy * dy).sqrt();
        if len <= EPSILON {
            return None;
        }
        let mid = ((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
        let bend = self.offset.magnitude * config.bend_step;
        Some((mid.0 + dy / len * bend, mid.1 - dx / len * bend))
    }

    /// Arrowhead at the target border crossing. Length scales with the
    /// arrow-size style and three times the line width.
    pub fn arrow(&self, path: &EdgePath, hit: &BorderHit) -> ArrowShape {
        let tangent = path.tangent_at(hit.t);
        ArrowShape {
            tip: hit.point,
            angle: tangent.1.atan2(tangent.0),
            length: 3.0 * self.style.width * self.style.arrow_scale,
        }
    }
}
