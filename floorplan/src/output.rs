use std::fs;
use std::path::PathBuf;

use base64::Engine as _;
use floorplan_export::{ConsumerError, ExportRequest, ImageConsumer};
use tracing::info;

/// Writes each exported image to a file, as raw bytes or base64 text.
pub struct FileConsumer {
    path: PathBuf,
    base64: bool,
    written: usize,
}

impl FileConsumer {
    pub fn new(path: impl Into<PathBuf>, base64: bool) -> Self {
        Self {
            path: path.into(),
            base64,
            written: 0,
        }
    }

    /// Number of images written so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl ImageConsumer for FileConsumer {
    fn consume(&mut self, request: ExportRequest<'_>) -> Result<(), ConsumerError> {
        if self.base64 {
            fs::write(&self.path, request.image.to_base64())?;
        } else {
            fs::write(&self.path, &request.image.bytes)?;
        }
        self.written += 1;
        info!(
            path = %self.path.display(),
            kind = ?request.kind,
            mime = request.image.format.mime(),
            "image written"
        );
        Ok(())
    }
}

/// Write a byte payload, as base64 text when asked.
pub fn write_payload(path: &std::path::Path, bytes: &[u8], base64: bool) -> std::io::Result<()> {
    if base64 {
        fs::write(path, base64::engine::general_purpose::STANDARD.encode(bytes))
    } else {
        fs::write(path, bytes)
    }
}
