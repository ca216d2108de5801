//! Plot meters to drawing pixels.

use crate::config::RenderConfig;

/// Point in drawing pixel space (y grows downward).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl From<(f64, f64)> for Point {
    fn from(v: (f64, f64)) -> Self {
        Point { x: v.0, y: v.1 }
    }
}

/// Axis-aligned rectangle in drawing pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PxRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl PxRect {
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.w / 2.0,
            y: self.y + self.h / 2.0,
        }
    }
}

/// Uniform linear mapping `(m + padding) * scale`, identical on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    scale: f64,
    padding: f64,
}

impl CoordinateMapper {
    pub fn new(scale_px_per_m: f64, padding_m: f64) -> Self {
        Self {
            scale: scale_px_per_m,
            padding: padding_m,
        }
    }

    pub fn from_config(cfg: &RenderConfig) -> Self {
        Self::new(cfg.scale_px_per_m, cfg.padding_m)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Length in meters to pixels.
    pub fn to_px(&self, meters: f64) -> f64 {
        meters * self.scale
    }

    pub fn to_x(&self, meters: f64) -> f64 {
        (meters + self.padding) * self.scale
    }

    pub fn to_y(&self, meters: f64) -> f64 {
        (meters + self.padding) * self.scale
    }

    pub fn point(&self, x_m: f64, y_m: f64) -> Point {
        Point {
            x: self.to_x(x_m),
            y: self.to_y(y_m),
        }
    }

    /// Rectangle from start/end corners in meters. Inverted input yields a
    /// negative extent; it is not normalized.
    pub fn rect(&self, x_start: f64, y_start: f64, x_end: f64, y_end: f64) -> PxRect {
        PxRect {
            x: self.to_x(x_start),
            y: self.to_y(y_start),
            w: self.to_px(x_end - x_start),
            h: self.to_px(y_end - y_start),
        }
    }

    /// Pixel rectangle covering the plot itself (inside the padding).
    pub fn plot_rect(&self, width_m: f64, depth_m: f64) -> PxRect {
        self.rect(0.0, 0.0, width_m, depth_m)
    }

    /// Overall drawing size `((w + 2P)·S, (d + 2P)·S)`.
    pub fn drawing_size(&self, width_m: f64, depth_m: f64) -> (f64, f64) {
        (
            (width_m + self.padding * 2.0) * self.scale,
            (depth_m + self.padding * 2.0) * self.scale,
        )
    }
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_with_padding_and_scale() {
        let m = CoordinateMapper::default();
        assert_eq!(m.point(0.0, 0.0), Point { x: 80.0, y: 80.0 });
        assert_eq!(m.point(10.0, 5.0), Point { x: 480.0, y: 280.0 });
        assert_eq!(m.to_px(0.9), 36.0);
    }

    #[test]
    fn drawing_size_includes_padding_on_both_sides() {
        let m = CoordinateMapper::default();
        assert_eq!(m.drawing_size(10.0, 10.0), (560.0, 560.0));
        assert_eq!(m.drawing_size(12.0, 18.0), (640.0, 880.0));
    }

    #[test]
    fn doubling_width_leaves_height_alone() {
        let m = CoordinateMapper::new(25.0, 1.5);
        let (w1, h1) = m.drawing_size(8.0, 6.0);
        let (w2, h2) = m.drawing_size(16.0, 6.0);
        assert_eq!(h1, h2);
        assert_eq!(w2 - w1, 8.0 * 25.0);
    }

    #[test]
    fn rect_keeps_aspect_ratio() {
        let m = CoordinateMapper::default();
        let r = m.rect(1.0, 2.0, 4.0, 8.0);
        assert_eq!(
            r,
            PxRect {
                x: 120.0,
                y: 160.0,
                w: 120.0,
                h: 240.0
            }
        );
        assert_eq!(r.w / r.h, 3.0 / 6.0);
        assert_eq!(r.center(), Point { x: 180.0, y: 280.0 });
    }
}
