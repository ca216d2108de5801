//! Vector PDF of a captured drawing.

use std::sync::Arc;

use svg2pdf::{ConversionOptions, PageOptions};
use tracing::info;

use crate::error::ExportError;
use crate::fonts::system_fontdb;
use crate::stage::CapturedSource;

/// Single-page PDF at the drawing's own size, with text set in the system
/// fonts.
pub fn to_pdf(src: &CapturedSource) -> Result<Vec<u8>, ExportError> {
    to_pdf_with_fontdb(src, system_fontdb())
}

pub fn to_pdf_with_fontdb(
    src: &CapturedSource,
    fontdb: Arc<usvg::fontdb::Database>,
) -> Result<Vec<u8>, ExportError> {
    let opt = usvg::Options {
        fontdb,
        ..Default::default()
    };
    let tree =
        usvg::Tree::from_str(&src.svg, &opt).map_err(|e| ExportError::Decode(e.to_string()))?;
    let pdf = svg2pdf::to_pdf(&tree, ConversionOptions::default(), PageOptions::default())
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    info!(generation = src.generation, bytes = pdf.len(), "pdf exported");
    Ok(pdf)
}
