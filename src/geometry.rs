//! Small 2D helpers shared by the shape, topology and viewport modules.
//!
//! Points are plain `(f32, f32)` tuples in logical (graph) coordinates.

use serde::{Deserialize, Serialize};

pub(crate) const EPSILON: f32 = 1e-6;

/// Axis-aligned rectangle, used for bounding boxes and viewports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, point: (f32, f32)) -> bool {
        point.0 >= self.x
            && point.0 <= self.x + self.width
            && point.1 >= self.y
            && point.1 <= self.y + self.height
    }
}

pub fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    (dx * dx + dy * dy).sqrt()
}

/// Angle of the ray from `from` to `to`, in radians.
pub fn angle_between(from: (f32, f32), to: (f32, f32)) -> f32 {
    (to.1 - from.1).atan2(to.0 - from.0)
}

pub fn lerp(a: (f32, f32), b: (f32, f32), t: f32) -> (f32, f32) {
    (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t)
}

/// Point on a quadratic Bézier with a single control point.
pub fn quadratic_point(from: (f32, f32), ctrl: (f32, f32), to: (f32, f32), t: f32) -> (f32, f32) {
    let u = 1.0 - t;
    (
        u * u * from.0 + 2.0 * u * t * ctrl.0 + t * t * to.0,
        u * u * from.1 + 2.0 * u * t * ctrl.1 + t * t * to.1,
    )
}

/// Derivative of a quadratic Bézier at `t` (not normalized).
pub fn quadratic_tangent(from: (f32, f32), ctrl: (f32, f32), to: (f32, f32), t: f32) -> (f32, f32) {
    let u = 1.0 - t;
    (
        2.0 * u * (ctrl.0 - from.0) + 2.0 * t * (to.0 - ctrl.0),
        2.0 * u * (ctrl.1 - from.1) + 2.0 * t * (to.1 - ctrl.1),
    )
}

/// Distance from `point` to the closed segment `a`-`b`.
pub fn segment_distance(point: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= EPSILON {
        return distance(point, a);
    }
    let t = ((point.0 - a.0) * dx + (point.1 - a.1) * dy) / len_sq;
    let t = t.clamp(0.0, 1.0);
    distance(point, (a.0 + dx * t, a.1 + dy * t))
}
