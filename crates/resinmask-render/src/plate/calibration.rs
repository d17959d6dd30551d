// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Calibration grids — one exposure split into rows x columns steps, each
// step masking a larger share of the board so every grid cell ends up with a
// different total cure time.

use resinmask_core::error::Result;
use resinmask_core::types::CalibrationSpec;
use tracing::{debug, info, instrument};

use super::ExposureCell;
use super::compositor::{BoardPlacement, PlateCanvas};
use crate::schedule::{cell_durations, schedule};

/// Expand the canvas into `rows * columns` exposure cells, row-major.
///
/// Each cell captures the plate before its own mask is painted. The mask is
/// anchored at the board's bottom-left corner and grows to
/// `(col + 1) / columns` of the board width and `(row + 1) / rows` of its
/// height. Masks accumulate on `canvas`.
#[instrument(skip(canvas), fields(rows = spec.rows, columns = spec.columns))]
pub fn render_grid(
    canvas: &mut PlateCanvas,
    placement: &BoardPlacement,
    spec: &CalibrationSpec,
) -> Result<Vec<ExposureCell>> {
    let times = schedule(spec)?;
    let durations = cell_durations(&times);
    info!(
        steps = durations.len(),
        total_s = times.last().copied().unwrap_or_default(),
        "Rendering calibration grid"
    );

    let board_w = f64::from(placement.width);
    let board_h = f64::from(placement.height);
    let mut cells = Vec::with_capacity(durations.len());
    let mut steps = durations.into_iter();

    for row in 0..spec.rows {
        for column in 0..spec.columns {
            let Some(duration_s) = steps.next() else {
                break;
            };
            cells.push(ExposureCell {
                duration_s,
                raster: canvas.slice(),
            });

            let mask_w = (board_w * f64::from(column + 1) / f64::from(spec.columns)).round() as u32;
            let mask_h = (board_h * f64::from(row + 1) / f64::from(spec.rows)).round() as u32;
            let mask_y = placement.y + i64::from(placement.height) - i64::from(mask_h);
            debug!(row, column, duration_s, mask_w, mask_h, "Calibration cell captured");
            canvas.mask(placement.x, mask_y, mask_w, mask_h);
        }
    }
    Ok(cells)
}
