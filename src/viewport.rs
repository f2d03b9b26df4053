//! Pan/zoom transform between logical and screen coordinates.
//!
//! Screen = logical * k + (x, y). Fitting composes with the current
//! transform: the bounding box is measured in screen space under the
//! current zoom, so a second fit of an unchanged box is a no-op (up to
//! clamping).

use serde::{Deserialize, Serialize};

use crate::config::FitConfig;
use crate::geometry::{EPSILON, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub x: f32,
    pub y: f32,
    pub k: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            k: 1.0,
        }
    }
}

impl ViewTransform {
    /// Transform that fits `bounds` (logical coordinates) into `viewport`
    /// (screen coordinates) with the configured margin, clamped to the
    /// zoom limits, keeping the bounds center on the viewport center.
    pub fn fit_zoom(&self, bounds: Rect, viewport: Rect, fit: &FitConfig) -> ViewTransform {
        let margin = 1.0 + fit.margin;
        let screen_w = bounds.width * self.k * margin;
        let screen_h = bounds.height * self.k * margin;
        let scale = if screen_w <= EPSILON || screen_h <= EPSILON {
            // Degenerate bounds (single node): keep the current zoom and
            // only re-center.
            1.0
        } else {
            (viewport.width / screen_w).min(viewport.height / screen_h)
        };
        let k = (self.k * scale).clamp(fit.min_zoom, fit.max_zoom);
        let (bx, by) = bounds.center();
        let (vx, vy) = viewport.center();
        ViewTransform {
            x: vx - k * bx,
            y: vy - k * by,
            k,
        }
    }

    pub fn logical_to_screen(&self, point: (f32, f32)) -> (f32, f32) {
        (point.0 * self.k + self.x, point.1 * self.k + self.y)
    }

    /// Inverts the pan/zoom to map a screen coordinate back into graph
    /// space.
    pub fn screen_to_logical(&self, point: (f32, f32)) -> (f32, f32) {
        ((point.0 - self.x) / self.k, (point.1 - self.y) / self.k)
    }

    /// Like [`Self::screen_to_logical`], for hosts that center their
    /// coordinate system on `origin` before applying the transform.
    pub fn screen_to_logical_from(&self, point: (f32, f32), origin: (f32, f32)) -> (f32, f32) {
        self.screen_to_logical((point.0 - origin.0, point.1 - origin.1))
    }

    pub fn logical_to_screen_from(&self, point: (f32, f32), origin: (f32, f32)) -> (f32, f32) {
        let screen = self.logical_to_screen(point);
        (screen.0 + origin.0, screen.1 + origin.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f32, f32), b: (f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-3 && (a.1 - b.1).abs() < 1e-3
    }

    #[test]
    fn fit_centers_the_bounds_in_the_viewport() {
        let fit = FitConfig::default();
        let bounds = Rect::new(-50.0, -50.0, 100.0, 100.0);
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
        let transform = ViewTransform::default().fit_zoom(bounds, viewport, &fit);
        let center = transform.logical_to_screen(bounds.center());
        assert!(close(center, viewport.center()));
        // Height is the limiting dimension: 600 / (100 * 1.1).
        assert!((transform.k - 600.0 / 110.0).abs() < 1e-3);
    }

    #[test]
    fn fit_is_idempotent_for_unchanged_bounds() {
        let fit = FitConfig::default();
        let bounds = Rect::new(10.0, 20.0, 300.0, 150.0);
        let viewport = Rect::new(0.0, 0.0, 640.0, 480.0);
        let first = ViewTransform::default().fit_zoom(bounds, viewport, &fit);
        let second = first.fit_zoom(bounds, viewport, &fit);
        assert!((first.k - second.k).abs() < 1e-4);
        assert!((first.x - second.x).abs() < 1e-2);
        assert!((first.y - second.y).abs() < 1e-2);
    }

    #[test]
    fn fit_clamps_to_zoom_limits() {
        let fit = FitConfig {
            min_zoom: 0.5,
            max_zoom: 2.0,
            margin: 0.0,
        };
        let tiny = Rect::new(0.0, 0.0, 1.0, 1.0);
        let viewport = Rect::new(0.0, 0.0, 1000.0, 1000.0);
        let transform = ViewTransform::default().fit_zoom(tiny, viewport, &fit);
        assert_eq!(transform.k, 2.0);

        let huge = Rect::new(0.0, 0.0, 1e6, 1e6);
        let transform = ViewTransform::default().fit_zoom(huge, viewport, &fit);
        assert_eq!(transform.k, 0.5);
    }

    #[test]
    fn degenerate_bounds_keep_current_zoom() {
        let fit = FitConfig::default();
        let point_bounds = Rect::new(42.0, 7.0, 0.0, 0.0);
        let viewport = Rect::new(0.0, 0.0, 100.0, 100.0);
        let current = ViewTransform {
            x: 5.0,
            y: 5.0,
            k: 3.0,
        };
        let transform = current.fit_zoom(point_bounds, viewport, &fit);
        assert_eq!(transform.k, 3.0);
        assert!(close(transform.logical_to_screen((42.0, 7.0)), (50.0, 50.0)));
    }

    #[test]
    fn screen_and_logical_are_inverses() {
        let transform = ViewTransform {
            x: 120.0,
            y: -35.0,
            k: 2.5,
        };
        let logical = (13.0, -7.5);
        let screen = transform.logical_to_screen(logical);
        assert!(close(transform.screen_to_logical(screen), logical));
    }

    #[test]
    fn origin_offset_is_applied_before_the_transform() {
        let transform = ViewTransform {
            x: 10.0,
            y: 10.0,
            k: 2.0,
        };
        let origin = (400.0, 300.0);
        let logical = (5.0, 5.0);
        let screen = transform.logical_to_screen_from(logical, origin);
        assert!(close(
            transform.screen_to_logical_from(screen, origin),
            logical
        ));
    }
}
