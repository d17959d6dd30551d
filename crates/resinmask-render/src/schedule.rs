// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Exposure scheduling for calibration grids.

use resinmask_core::error::Result;
use resinmask_core::types::{CalibrationSpec, Interpolation};

/// Cumulative exposure times for `steps` grid cells, spread from `min_s` to
/// `max_s`.
///
/// Step 0 is always `min_s`. With a single step no interpolation happens and
/// `max_s` is ignored. Otherwise the last step is exactly `max_s`.
pub fn exposure_times(steps: u32, min_s: f64, max_s: f64, mode: Interpolation) -> Vec<f64> {
    let steps = steps as usize;
    let mut times = Vec::with_capacity(steps);
    if steps == 0 {
        return times;
    }
    times.push(min_s);
    if steps == 1 {
        return times;
    }

    let last = (steps - 1) as f64;
    for step in 1..steps - 1 {
        let fraction = step as f64 / last;
        let time = match mode {
            Interpolation::Geometric => min_s * (max_s / min_s).powf(fraction),
            Interpolation::Linear => min_s + step as f64 * (max_s - min_s) / last,
        };
        times.push(time);
    }
    times.push(max_s);
    times
}

/// Per-cell durations from cumulative times: the first cell gets the first
/// time, every later cell the increment over its predecessor.
pub fn cell_durations(cumulative: &[f64]) -> Vec<f64> {
    let mut previous = 0.0;
    cumulative
        .iter()
        .map(|&time| {
            let duration = time - previous;
            previous = time;
            duration
        })
        .collect()
}

/// Validate `spec` and return its cumulative schedule.
pub fn schedule(spec: &CalibrationSpec) -> Result<Vec<f64>> {
    spec.validate()?;
    Ok(exposure_times(
        spec.steps(),
        spec.min_time_s,
        spec.max_time_s,
        spec.interpolation,
    ))
}
