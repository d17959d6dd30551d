// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// resinmask-render — Layout and compositing for mask-projection printers.
//
// Provides artwork mirroring (explicit affine rewrite of the SVG), vector
// rasterization, placement of the board on the build plate with orientation
// correction, exposure scheduling and calibration grids.

pub mod artwork;
pub mod layer;
pub mod plate;
pub mod raster;
pub mod schedule;

// Re-export the primary types so callers can use `resinmask_render::PlateCompositor` etc.
pub use artwork::{Affine, BoardArtwork, ViewBox};
pub use layer::{RenderedLayer, render_layer};
pub use plate::{BoardPlacement, ExposureCell, PlateCanvas, PlateCompositor, PlateOrientation};
pub use raster::{Rasterizer, SvgRasterizer};
