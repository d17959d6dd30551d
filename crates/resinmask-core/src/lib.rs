// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// resinmask — Core types and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::ExportConfig;
pub use error::MaskError;
pub use types::*;
