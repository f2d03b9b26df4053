//! Border resolution: where an edge path crosses a node's outline.
//!
//! Straight segments have a closed form. Curved and loop paths do not,
//! because the border distance may depend on the approach angle, so those
//! use a bounded bisection over the path parameter. The search is a
//! best-effort approximation: on exhausting the iteration cap the last
//! midpoint is returned, with error bounded by one bisection step at the
//! configured threshold.

use crate::config::BorderSearchConfig;
use crate::geometry::{EPSILON, angle_between, distance, lerp};

use super::edge::EdgePath;

/// A point on the edge path lying on (or near) the node border, plus the
/// path parameter that produced it. The parameter feeds arrow rotation on
/// curved and loop edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderHit {
    pub point: (f32, f32),
    pub t: f32,
}

/// Which end of the edge the border is resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderEnd {
    Start,
    End,
}

/// Finds the point where `path` crosses the border of the node centered at
/// `node_center`, whose outline is described by `border` (approach angle
/// to distance).
///
/// Returns `None` for degenerate paths (zero-length segments); a missing
/// node position must be handled by the caller before building the path.
pub fn resolve_border(
    path: &EdgePath,
    node_center: (f32, f32),
    border: &dyn Fn(f32) -> f32,
    which: BorderEnd,
    config: &BorderSearchConfig,
) -> Option<BorderHit> {
    match *path {
        EdgePath::Segment { from, to } => {
            resolve_segment(from, to, node_center, border, which)
        }
        EdgePath::Quadratic { .. } => Some(bisect(
            path,
            node_center,
            border,
            (0.0, 1.0),
            // t = 1 sits at the end node, t = 0 at the start node.
            matches!(which, BorderEnd::End),
            config.curved_threshold,
            config.max_iterations,
        )),
        EdgePath::Circle { .. } => {
            let near_high = match which {
                BorderEnd::End => config.loop_search_forward,
                BorderEnd::Start => !config.loop_search_forward,
            };
            let (lo, hi) = config.loop_span;
            let span = if near_high {
                (lo, hi)
            } else {
                // Mirrored arc on the other side of the node-facing point.
                (1.0 - hi, 1.0 - lo)
            };
            Some(bisect(
                path,
                node_center,
                border,
                span,
                near_high,
                config.loop_threshold,
                config.max_iterations,
            ))
        }
    }
}

/// Closed form for straight segments. The approach angle is taken to be
/// the segment direction; this is exact for circles and a deliberate
/// approximation for polygonal markers, kept for parity with the bisected
/// curved case which uses the true angle.
fn resolve_segment(
    from: (f32, f32),
    to: (f32, f32),
    node_center: (f32, f32),
    border: &dyn Fn(f32) -> f32,
    which: BorderEnd,
) -> Option<BorderHit> {
    let length = distance(from, to);
    if length <= EPSILON {
        return None;
    }
    match which {
        BorderEnd::End => {
            let d = border(angle_between(from, to));
            let t = ((length - d) / length).clamp(0.0, 1.0);
            Some(BorderHit {
                point: lerp(from, to, t),
                t,
            })
        }
        BorderEnd::Start => {
            let d = border(angle_between(to, from));
            let t = (d / length).clamp(0.0, 1.0);
            Some(BorderHit {
                point: lerp(from, to, t),
                t,
            })
        }
    }
}

/// Bounded bisection over the path parameter. `node_is_high` states which
/// span end lies inside the node: narrowing moves toward it while the
/// midpoint is still outside the border, and away once inside.
fn bisect(
    path: &EdgePath,
    node_center: (f32, f32),
    border: &dyn Fn(f32) -> f32,
    span: (f32, f32),
    node_is_high: bool,
    threshold: f32,
    max_iterations: u32,
) -> BorderHit {
    let (mut low, mut high) = span;
    let mut t = (low + high) / 2.0;
    let mut point = path.point_at(t);
    for _ in 0..max_iterations {
        t = (low + high) / 2.0;
        point = path.point_at(t);
        let dist = distance(node_center, point);
        let border_dist = border(angle_between(node_center, point));
        if (border_dist - dist).abs() < threshold {
            return BorderHit { point, t };
        }
        let outside = dist > border_dist;
        if outside == node_is_high {
            low = t;
        } else {
            high = t;
        }
    }
    BorderHit { point, t }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BorderSearchConfig;

    #[test]
    fn straight_edge_between_circles_is_exact() {
        let config = BorderSearchConfig::default();
        for dist in [30.0_f32, 100.0, 400.0] {
            let path = EdgePath::Segment {
                from: (0.0, 0.0),
                to: (dist, 0.0),
            };
            let hit = resolve_border(&path, (dist, 0.0), &|_| 10.0, BorderEnd::End, &config)
                .expect("segment should resolve");
            let off = crate::geometry::distance(hit.point, (dist, 0.0));
            assert!(
                (off - 10.0).abs() < 1e-3,
                "distance {dist}: border point at {off}"
            );
            assert!((hit.t - (dist - 10.0) / dist).abs() < 1e-5);
        }
    }

    #[test]
    fn straight_edge_start_border_mirrors_end_border() {
        let config = BorderSearchConfig::default();
        let path = EdgePath::Segment {
            from: (0.0, 0.0),
            to: (100.0, 0.0),
        };
        let hit = resolve_border(&path, (0.0, 0.0), &|_| 8.0, BorderEnd::Start, &config).unwrap();
        assert!((hit.t - 0.08).abs() < 1e-5);
        assert!((hit.point.0 - 8.0).abs() < 1e-3);
    }

    #[test]
    fn zero_length_segment_is_skipped() {
        let config = BorderSearchConfig::default();
        let path = EdgePath::Segment {
            from: (5.0, 5.0),
            to: (5.0, 5.0),
        };
        assert!(resolve_border(&path, (5.0, 5.0), &|_| 10.0, BorderEnd::End, &config).is_none());
    }

    #[test]
    fn curved_edge_converges_within_threshold() {
        let config = BorderSearchConfig::default();
        let path = EdgePath::Quadratic {
            from: (0.0, 0.0),
            ctrl: (50.0, 30.0),
            to: (100.0, 0.0),
        };
        let hit =
            resolve_border(&path, (100.0, 0.0), &|_| 10.0, BorderEnd::End, &config).unwrap();
        let dist = crate::geometry::distance(hit.point, (100.0, 0.0));
        assert!(
            (dist - 10.0).abs() <= config.curved_threshold,
            "border error {} exceeds threshold",
            (dist - 10.0).abs()
        );
        assert!(hit.t > 0.5 && hit.t < 1.0);
    }

    #[test]
    fn curved_edge_start_border_lands_near_t_zero() {
        let config = BorderSearchConfig::default();
        let path = EdgePath::Quadratic {
            from: (0.0, 0.0),
            ctrl: (50.0, 30.0),
            to: (100.0, 0.0),
        };
        let hit =
            resolve_border(&path, (0.0, 0.0), &|_| 10.0, BorderEnd::Start, &config).unwrap();
        let dist = crate::geometry::distance(hit.point, (0.0, 0.0));
        assert!((dist - 10.0).abs() <= config.curved_threshold);
        assert!(hit.t < 0.5);
    }

    #[test]
    fn loop_border_resolves_on_the_near_arc() {
        let config = BorderSearchConfig::default();
        // Loop circle through the node center at (0, 0).
        let path = EdgePath::Circle {
            center: (0.0, -20.0),
            radius: 20.0,
            clockwise: true,
        };
        let hit = resolve_border(&path, (0.0, 0.0), &|_| 10.0, BorderEnd::End, &config).unwrap();
        let dist = crate::geometry::distance(hit.point, (0.0, 0.0));
        assert!((dist - 10.0).abs() <= config.loop_threshold);
        assert!(hit.t >= config.loop_span.0 && hit.t <= config.loop_span.1);

        // The start border lands on the mirrored arc span.
        let start = resolve_border(&path, (0.0, 0.0), &|_| 10.0, BorderEnd::Start, &config)
            .unwrap();
        assert!(start.t <= 1.0 - config.loop_span.0);
        assert!(
            (crate::geometry::distance(start.point, (0.0, 0.0)) - 10.0).abs()
                <= config.loop_threshold
        );
        assert!((start.point.0 - hit.point.0).abs() > 1.0 || start.point.0 * hit.point.0 < 0.0);
    }

    #[test]
    fn bisection_is_bounded_even_without_convergence() {
        // A tiny threshold cannot converge within ten iterations; the
        // search must still terminate and return the last midpoint.
        let config = BorderSearchConfig {
            curved_threshold: 1e-9,
            ..BorderSearchConfig::default()
        };
        let path = EdgePath::Quadratic {
            from: (0.0, 0.0),
            ctrl: (50.0, 30.0),
            to: (100.0, 0.0),
        };
        let hit =
            resolve_border(&path, (100.0, 0.0), &|_| 10.0, BorderEnd::End, &config).unwrap();
        // Error is bounded by one bisection step of the span.
        let dist = crate::geometry::distance(hit.point, (100.0, 0.0));
        assert!((dist - 10.0).abs() < 1.0);
    }
}
