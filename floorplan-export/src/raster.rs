use std::sync::Arc;

use tracing::debug;

use crate::error::ExportError;
use crate::fonts::system_fontdb;
use crate::stage::CapturedSource;

/// Opaque RGBA bitmap. Premultiplied and straight alpha coincide because the
/// surface is painted white before the drawing.
pub struct Raster {
    pixmap: tiny_skia::Pixmap,
}

impl Raster {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn rgba(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn rgb(&self) -> Vec<u8> {
        self.pixmap
            .data()
            .chunks_exact(4)
            .flat_map(|p| [p[0], p[1], p[2]])
            .collect()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap
            .pixel(x, y)
            .map(|c| [c.red(), c.green(), c.blue(), c.alpha()])
    }

    pub fn pixmap(&self) -> &tiny_skia::Pixmap {
        &self.pixmap
    }
}

/// Turns captured SVG into a bitmap at a fixed supersampling factor.
pub struct Rasterizer {
    supersample: f32,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Rasterizer {
    pub fn new(supersample: f32) -> Self {
        Self::with_fontdb(supersample, system_fontdb())
    }

    pub fn with_fontdb(supersample: f32, fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self {
            supersample,
            fontdb,
        }
    }

    pub fn supersample(&self) -> f32 {
        self.supersample
    }

    /// Font database used for text; hand it to [`crate::pdf::to_pdf_with_fontdb`]
    /// so a PDF of the same drawing picks the same faces.
    pub fn fontdb(&self) -> Arc<usvg::fontdb::Database> {
        self.fontdb.clone()
    }

    /// Output size for a captured source, `ceil(size * factor)` per axis.
    pub fn target_size(&self, src: &CapturedSource) -> (u32, u32) {
        let f = self.supersample;
        (
            (src.width as f32 * f).ceil() as u32,
            (src.height as f32 * f).ceil() as u32,
        )
    }

    pub fn rasterize(&self, src: &CapturedSource) -> Result<Raster, ExportError> {
        let opt = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&src.svg, &opt)
            .map_err(|e| ExportError::Decode(e.to_string()))?;

        let (w, h) = self.target_size(src);
        let mut pixmap = tiny_skia::Pixmap::new(w, h).ok_or(ExportError::SurfaceAcquisition {
            width: w,
            height: h,
        })?;
        pixmap.fill(tiny_skia::Color::WHITE);
        let mut pm = pixmap.as_mut();
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(self.supersample, self.supersample),
            &mut pm,
        );
        debug!(
            generation = src.generation,
            width = w,
            height = h,
            "rasterized drawing"
        );
        Ok(Raster { pixmap })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(svg: &str, width: u32, height: u32) -> CapturedSource {
        CapturedSource {
            generation: 1,
            svg: svg.to_string(),
            width,
            height,
        }
    }

    fn rasterizer(f: f32) -> Rasterizer {
        Rasterizer::with_fontdb(f, Arc::new(usvg::fontdb::Database::new()))
    }

    #[test]
    fn output_is_supersampled() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="6"><rect x="0" y="0" width="5" height="6" fill="black"/></svg>"#;
        let r = rasterizer(2.0).rasterize(&source(svg, 10, 6)).unwrap();
        assert_eq!((r.width(), r.height()), (20, 12));
        assert_eq!(r.pixel(2, 2), Some([0, 0, 0, 255]));
        assert_eq!(r.pixel(15, 2), Some([255, 255, 255, 255]));
        assert_eq!(r.rgb().len(), 20 * 12 * 3);
    }

    #[test]
    fn malformed_svg_is_a_decode_error() {
        let err = rasterizer(2.0)
            .rasterize(&source("<svg", 10, 10))
            .err()
            .unwrap();
        assert!(matches!(err, ExportError::Decode(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn zero_sized_target_fails_to_acquire_a_surface() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"/>"#;
        let err = rasterizer(0.0)
            .rasterize(&source(svg, 10, 10))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ExportError::SurfaceAcquisition {
                width: 0,
                height: 0
            }
        ));
    }
}
