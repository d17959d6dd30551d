// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plate module — board placement, orientation correction, calibration grids.

pub mod calibration;
pub mod compositor;
pub mod orientation;

use image::RgbaImage;

pub use compositor::{BoardPlacement, PlateCanvas, PlateCompositor};
pub use orientation::PlateOrientation;

/// One exposure step of a layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ExposureCell {
    /// Incremental exposure for this step, in seconds.
    pub duration_s: f64,
    /// Full plate raster in the printer's native orientation.
    pub raster: RgbaImage,
}
