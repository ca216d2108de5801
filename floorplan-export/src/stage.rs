//! Display host for one drawing at a time.
//!
//! A mounted drawing is not capturable until the host reports that layout
//! finished. Every mount starts a new generation; export state keyed to an
//! older generation is stale.

use floorplan_core::Drawing;
use tracing::debug;

use crate::error::ExportError;

/// Serialized snapshot of the mounted drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedSource {
    pub generation: u64,
    pub svg: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug)]
struct Mounted {
    generation: u64,
    drawing: Drawing,
    laid_out: bool,
}

#[derive(Debug, Default)]
pub struct Stage {
    next_generation: u64,
    mounted: Option<Mounted>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the displayed drawing. Layout is pending until
    /// [`Stage::complete_layout`] is called.
    pub fn mount(&mut self, drawing: Drawing) -> u64 {
        self.next_generation += 1;
        let generation = self.next_generation;
        debug!(generation, "drawing mounted");
        self.mounted = Some(Mounted {
            generation,
            drawing,
            laid_out: false,
        });
        generation
    }

    /// Readiness signal from the host. Returns false if nothing was pending.
    pub fn complete_layout(&mut self) -> bool {
        match self.mounted.as_mut() {
            Some(m) if !m.laid_out => {
                m.laid_out = true;
                debug!(generation = m.generation, "layout complete");
                true
            }
            _ => false,
        }
    }

    pub fn unmount(&mut self) {
        self.mounted = None;
    }

    pub fn is_ready(&self) -> bool {
        self.mounted.as_ref().is_some_and(|m| m.laid_out)
    }

    pub fn generation(&self) -> Option<u64> {
        self.mounted.as_ref().map(|m| m.generation)
    }

    pub fn drawing(&self) -> Option<&Drawing> {
        self.mounted.as_ref().map(|m| &m.drawing)
    }

    pub fn capture(&self) -> Result<CapturedSource, ExportError> {
        let m = self
            .mounted
            .as_ref()
            .filter(|m| m.laid_out)
            .ok_or(ExportError::MissingSource)?;
        let (width, height) = m.drawing.pixel_size();
        Ok(CapturedSource {
            generation: m.generation,
            svg: m.drawing.to_svg(),
            width,
            height,
        })
    }
}
