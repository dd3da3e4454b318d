//! Wholesale grid replacement and conversion sequencing
//!
//! Every request that may replace the grid (upload, mode change, resize,
//! clear) issues a new ticket. A finished conversion is only installed if
//! its ticket is still the latest one, so a slow decode can never overwrite
//! the result of a newer request.
//!
//! An upload becomes the image of record as soon as it is requested: later
//! mode changes and resizes re-convert it even if its own conversion has
//! not finished yet.

use std::sync::Arc;

use pixel_painter_config::clamp_grid_dim;
use tracing::{debug, info, warn};

use crate::convert::{ConversionJob, ConversionOutcome};
use crate::error::PaintingError;
use crate::grid::Grid;
use crate::types::ConversionMode;

use super::Canvas;

impl Canvas {
    fn issue_ticket(&mut self) -> u64 {
        self.latest_ticket += 1;
        self.latest_ticket
    }

    fn job_for(&mut self, source: Arc<[u8]>) -> ConversionJob {
        let ticket = self.issue_ticket();
        debug!(
            "Issued conversion ticket {} ({:?}, width {})",
            ticket, self.mode, self.target_width
        );
        ConversionJob {
            ticket,
            source,
            mode: self.mode,
            target_width: self.target_width,
        }
    }

    /// Request conversion of an uploaded image
    ///
    /// Nothing changes until the finished job is passed to
    /// [`Canvas::apply_conversion`].
    pub fn load_image(&mut self, bytes: impl Into<Arc<[u8]>>) -> ConversionJob {
        let source: Arc<[u8]> = bytes.into();
        self.pending_source = Some(Arc::clone(&source));
        self.job_for(source)
    }

    /// Image that re-conversions should use: the latest upload, else the
    /// image the grid was converted from
    fn current_source(&self) -> Option<Arc<[u8]>> {
        self.pending_source.clone().or_else(|| self.source.clone())
    }

    /// Record the conversion mode; re-converts the retained image if any
    pub fn set_conversion_mode(&mut self, mode: ConversionMode) -> Option<ConversionJob> {
        self.mode = mode;
        self.repixelate()
    }

    /// Change the grid width (clamped to the legal range)
    ///
    /// With a retained image this returns a re-conversion job. Otherwise the
    /// grid is replaced by a blank square grid right away.
    pub fn resize(&mut self, width: u32) -> Option<ConversionJob> {
        self.target_width = clamp_grid_dim(width);
        if let Some(source) = self.current_source() {
            return Some(self.job_for(source));
        }

        self.issue_ticket();
        let width = self.target_width;
        self.replace_grid(Grid::blank(width, width), None, None);
        None
    }

    /// Re-run conversion of the retained image with the current settings
    pub fn repixelate(&mut self) -> Option<ConversionJob> {
        let source = self.current_source()?;
        Some(self.job_for(source))
    }

    /// Install a finished conversion
    ///
    /// Returns `Ok(false)` if a newer request was issued after this one; the
    /// result is discarded. A failed conversion is returned as an error and
    /// leaves every piece of canvas state untouched.
    pub fn apply_conversion(&mut self, outcome: ConversionOutcome) -> Result<bool, PaintingError> {
        if outcome.ticket != self.latest_ticket {
            warn!(
                "Discarding stale conversion (ticket {}, latest {})",
                outcome.ticket, self.latest_ticket
            );
            return Ok(false);
        }

        let converted = outcome.result.and_then(|conversion| conversion.into_grid());
        let grid = match converted {
            Ok(grid) => grid,
            Err(e) => {
                // Fall back to the last image that converted successfully
                if self
                    .pending_source
                    .as_ref()
                    .is_some_and(|pending| Arc::ptr_eq(pending, &outcome.source))
                {
                    self.pending_source = None;
                }
                return Err(e);
            }
        };

        let reference = grid.colors().to_vec();
        self.replace_grid(grid, Some(reference), Some(outcome.source));
        Ok(true)
    }

    /// Replace the grid with a blank one, dropping any loaded image
    pub fn new_blank(&mut self, width: u32, height: u32) -> Result<(), PaintingError> {
        if width == 0 || height == 0 {
            return Err(PaintingError::InvalidGeometry { width, height });
        }
        self.issue_ticket();
        self.replace_grid(Grid::blank(width, height), None, None);
        Ok(())
    }

    /// Drop the loaded image and start over blank at the current size
    pub fn clear_image(&mut self) {
        let (width, height) = (self.width(), self.height());
        self.issue_ticket();
        self.replace_grid(Grid::blank(width, height), None, None);
    }

    /// Swap in a new grid and reset the rest of the consistency group
    fn replace_grid(
        &mut self,
        grid: Grid,
        reference: Option<Vec<u32>>,
        source: Option<Arc<[u8]>>,
    ) {
        self.abort_gesture();
        info!(
            "Replacing grid: {}x{} -> {}x{} (reference: {})",
            self.grid.width(),
            self.grid.height(),
            grid.width(),
            grid.height(),
            reference.is_some()
        );

        self.grid = grid;
        self.reference = reference;
        self.source = source;
        self.pending_source = None;
        self.painted.clear();
        self.history.clear();
        self.bump_revision();
    }
}
