// src/render.rs

//! One render pass: layout the grid for the current geometry and stream
//! each image through the transcode pipeline into the protocol emitter.

use crate::config::GridConfig;
use crate::emitter;
use crate::geometry::{self, GeometrySnapshot};
use crate::grid;
use crate::source::ImageRecord;
use crate::transcode;
use anyhow::{bail, Result};
use log::{info, warn};
use std::io::Write;

/// Renders `records` as a grid onto `out` using one consistent geometry
/// snapshot. A resize arriving mid-pass is picked up by the next pass.
///
/// Per-image transcode failures are logged and skipped so one corrupt file
/// never aborts the batch; write failures on `out` are fatal. Returns the
/// number of images actually emitted.
pub fn render_grid<W: Write>(
    records: &[ImageRecord],
    config: GridConfig,
    snapshot: GeometrySnapshot,
    out: &mut W,
) -> Result<usize> {
    if !geometry::has_pixel_dimensions(&snapshot) {
        bail!(
            "terminal reports no pixel dimensions ({}x{}); cannot size grid cells",
            snapshot.pixel_width,
            snapshot.pixel_height
        );
    }

    let resolved = config.resolve();
    let mut emitted = 0;

    for (record, placement) in records
        .iter()
        .zip(grid::layout(records.len(), resolved, snapshot))
    {
        if record.index == 0 {
            info!(
                "grid layout: {} rows, {} columns, cell size: {}x{}",
                resolved.rows, resolved.columns, placement.pixel_width, placement.pixel_height
            );
        }

        match transcode::transcode(&record.path, placement.pixel_width, placement.pixel_height) {
            Ok(payload) => {
                emitter::emit(out, &payload, placement.pixel_width, placement.pixel_height)?;
                emitted += 1;
            }
            Err(e) => warn!("skipping image {}: {}", record.index, e),
        }

        // Cursor positioning only: advance after each completed grid row,
        // skipped cells included.
        if (record.index + 1) % resolved.columns as usize == 0 {
            emitter::row_break(out)?;
        }
    }

    out.flush()?;
    Ok(emitted)
}
