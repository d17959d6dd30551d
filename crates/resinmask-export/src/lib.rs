// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// resinmask-export — Turns an export request into per-layer output records.
//
// Drives the render pipeline layer by layer, assigns unique output names,
// hands exposure cells to a format-specific file builder and fingerprints
// the resulting artifacts.

pub mod builder;
pub mod integrity;
pub mod names;
pub mod pipeline;

pub use builder::{FileBuilder, LayerStackBuilder};
pub use names::FileNamer;
pub use pipeline::{ExportPipeline, OutputRecord};
