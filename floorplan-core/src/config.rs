use serde::{Deserialize, Serialize};

/// Drawing and export constants. Every field falls back to its default when
/// absent from a config file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Pixels per meter.
    #[serde(default = "default_scale")]
    pub scale_px_per_m: f64,
    /// Margin around the plot on every side, in meters.
    #[serde(default = "default_padding")]
    pub padding_m: f64,
    /// Wall stroke width in pixels.
    #[serde(default = "default_wall_thickness")]
    pub wall_thickness_px: f64,
    /// Raster size multiplier applied at export.
    #[serde(default = "default_supersample")]
    pub supersample: f32,
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

fn default_scale() -> f64 {
    40.0
}
fn default_padding() -> f64 {
    2.0
}
fn default_wall_thickness() -> f64 {
    6.0
}
fn default_supersample() -> f32 {
    2.0
}
fn default_jpeg_quality() -> u8 {
    90
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale_px_per_m: default_scale(),
            padding_m: default_padding(),
            wall_thickness_px: default_wall_thickness(),
            supersample: default_supersample(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}
