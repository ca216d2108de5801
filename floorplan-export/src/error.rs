use thiserror::Error;

/// Boxed error returned by an [`crate::ImageConsumer`].
pub type ConsumerError = Box<dyn std::error::Error + Send + Sync>;

/// Export failures. Display strings are short enough to show inline next to
/// the action that failed.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The stage has no drawing, or its layout has not completed.
    #[error("drawing is not ready for export")]
    MissingSource,

    #[error("could not allocate a {width}x{height} drawing surface")]
    SurfaceAcquisition { width: u32, height: u32 },

    #[error("could not read the drawing: {0}")]
    Decode(String),

    #[error("image encoding failed: {0}")]
    Encode(String),

    #[error("PDF conversion failed: {0}")]
    Pdf(String),

    /// Interior export was asked for before the base export finished.
    #[error("base export has not finished")]
    NotReady,

    #[error("export consumer failed: {0}")]
    Consumer(#[source] ConsumerError),
}

impl ExportError {
    /// Whether repeating the same request may succeed. Decode and encode
    /// failures are deterministic for a given drawing.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            ExportError::Decode(_) | ExportError::Encode(_) | ExportError::Pdf(_)
        )
    }
}

impl From<png::EncodingError> for ExportError {
    fn from(e: png::EncodingError) -> Self {
        ExportError::Encode(e.to_string())
    }
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        ExportError::Encode(e.to_string())
    }
}
