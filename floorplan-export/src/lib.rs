//! Raster, PDF and hand-off of floor-plan drawings.

pub mod encode;
pub mod error;
pub mod fonts;
pub mod pdf;
pub mod raster;
pub mod session;
pub mod stage;

pub use encode::{EncodedImage, ImageFormat, encode, encode_jpeg, encode_png};
pub use error::{ConsumerError, ExportError};
pub use fonts::{alias_sans_serif, system_fontdb};
pub use pdf::{to_pdf, to_pdf_with_fontdb};
pub use raster::{Raster, Rasterizer};
pub use session::{ExportKind, ExportRequest, ExportSession, ExportStatus, ImageConsumer};
pub use stage::{CapturedSource, Stage};
