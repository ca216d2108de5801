//! Export workflow for the drawing on a [`Stage`].
//!
//! The base export (the plain rasterized plan) runs at most once per drawing
//! generation and waits for the stage's layout signal. Interior exports pass
//! a prompt along with the same source and are refused until the base
//! export is done.

use tracing::{info, warn};

use floorplan_core::RenderConfig;

use crate::encode::{EncodedImage, ImageFormat, encode};
use crate::error::{ConsumerError, ExportError};
use crate::raster::Rasterizer;
use crate::stage::Stage;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportKind {
    Base,
    Interior,
}

/// What a consumer receives for one export.
#[derive(Clone, Copy, Debug)]
pub struct ExportRequest<'a> {
    pub kind: ExportKind,
    pub generation: u64,
    pub image: &'a EncodedImage,
    pub prompt: Option<&'a str>,
}

/// Receiver of exported images, e.g. an image-generation call or a file
/// download.
pub trait ImageConsumer {
    fn consume(&mut self, request: ExportRequest<'_>) -> Result<(), ConsumerError>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportStatus {
    #[default]
    Idle,
    WaitingForLayout,
    Running,
    Done,
    Failed {
        message: String,
        retryable: bool,
    },
}

impl ExportStatus {
    fn failed(err: &ExportError) -> Self {
        ExportStatus::Failed {
            message: err.to_string(),
            retryable: err.is_retryable(),
        }
    }

    /// In progress or finished; a new request would be redundant.
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            ExportStatus::WaitingForLayout | ExportStatus::Running | ExportStatus::Done
        )
    }
}

pub struct ExportSession {
    rasterizer: Rasterizer,
    format: ImageFormat,
    jpeg_quality: u8,
    generation: Option<u64>,
    base: ExportStatus,
    interior: ExportStatus,
}

impl ExportSession {
    pub fn new(rasterizer: Rasterizer, format: ImageFormat, jpeg_quality: u8) -> Self {
        Self {
            rasterizer,
            format,
            jpeg_quality,
            generation: None,
            base: ExportStatus::Idle,
            interior: ExportStatus::Idle,
        }
    }

    pub fn from_config(cfg: &RenderConfig, format: ImageFormat) -> Self {
        Self::new(Rasterizer::new(cfg.supersample), format, cfg.jpeg_quality)
    }

    pub fn base_status(&self) -> &ExportStatus {
        &self.base
    }

    pub fn interior_status(&self) -> &ExportStatus {
        &self.interior
    }

    /// Drop all state when the stage shows a different drawing.
    fn sync(&mut self, stage: &Stage) {
        let current = stage.generation();
        if self.generation != current {
            if self.generation.is_some() {
                info!(?current, "drawing changed, export state reset");
            }
            self.generation = current;
            self.base = ExportStatus::Idle;
            self.interior = ExportStatus::Idle;
        }
    }

    fn run(
        &self,
        stage: &Stage,
        kind: ExportKind,
        prompt: Option<&str>,
        consumer: &mut dyn ImageConsumer,
    ) -> Result<(), ExportError> {
        let src = stage.capture()?;
        let raster = self.rasterizer.rasterize(&src)?;
        let image = encode(&raster, self.format, self.jpeg_quality)?;
        info!(
            ?kind,
            generation = src.generation,
            bytes = image.bytes.len(),
            "export encoded"
        );
        consumer
            .consume(ExportRequest {
                kind,
                generation: src.generation,
                image: &image,
                prompt,
            })
            .map_err(ExportError::Consumer)
    }

    fn run_base(
        &mut self,
        stage: &Stage,
        consumer: &mut dyn ImageConsumer,
    ) -> Result<(), ExportError> {
        self.base = ExportStatus::Running;
        match self.run(stage, ExportKind::Base, None, consumer) {
            Ok(()) => {
                self.base = ExportStatus::Done;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "base export failed");
                self.base = ExportStatus::failed(&e);
                Err(e)
            }
        }
    }

    /// Start the base export. A no-op while one is waiting, running or done;
    /// deferred until [`ExportSession::on_layout_ready`] if the stage is not
    /// laid out yet.
    pub fn request_base(
        &mut self,
        stage: &Stage,
        consumer: &mut dyn ImageConsumer,
    ) -> Result<(), ExportError> {
        self.sync(stage);
        if self.base.is_settled() {
            return Ok(());
        }
        if stage.generation().is_none() {
            let e = ExportError::MissingSource;
            self.base = ExportStatus::failed(&e);
            return Err(e);
        }
        if !stage.is_ready() {
            self.base = ExportStatus::WaitingForLayout;
            return Ok(());
        }
        self.run_base(stage, consumer)
    }

    /// Forward of the stage's readiness signal; runs a deferred base export.
    pub fn on_layout_ready(
        &mut self,
        stage: &Stage,
        consumer: &mut dyn ImageConsumer,
    ) -> Result<(), ExportError> {
        self.sync(stage);
        if self.base == ExportStatus::WaitingForLayout && stage.is_ready() {
            return self.run_base(stage, consumer);
        }
        Ok(())
    }

    /// Run the base export again after a failure.
    pub fn retry_base(
        &mut self,
        stage: &Stage,
        consumer: &mut dyn ImageConsumer,
    ) -> Result<(), ExportError> {
        self.sync(stage);
        if matches!(self.base, ExportStatus::Failed { .. }) {
            self.base = ExportStatus::Idle;
        }
        self.request_base(stage, consumer)
    }

    /// Export the same source with an interior prompt. Every call runs; a
    /// failed call is retried by calling again.
    pub fn request_interior(
        &mut self,
        stage: &Stage,
        prompt: &str,
        consumer: &mut dyn ImageConsumer,
    ) -> Result<(), ExportError> {
        self.sync(stage);
        if self.base != ExportStatus::Done {
            return Err(ExportError::NotReady);
        }
        self.interior = ExportStatus::Running;
        match self.run(stage, ExportKind::Interior, Some(prompt), consumer) {
            Ok(()) => {
                self.interior = ExportStatus::Done;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "interior export failed");
                self.interior = ExportStatus::failed(&e);
                Err(e)
            }
        }
    }
}
