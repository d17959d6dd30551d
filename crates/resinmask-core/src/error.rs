// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for resinmask.

use thiserror::Error;

/// Top-level error type for all resinmask operations.
///
/// Every variant is fatal for the export that raised it: the pipeline stops
/// at the first error and returns no partial results.
#[derive(Debug, Error)]
pub enum MaskError {
    // -- Input errors --
    #[error("malformed layer markup: {0}")]
    MalformedMarkup(String),

    #[error("degenerate calibration: {0}")]
    DegenerateCalibration(String),

    #[error("no exposure time configured for layer '{0}'")]
    MissingExposureTime(String),

    #[error("exposure time for layer '{0}' must be a positive number of seconds, got {1}")]
    InvalidExposureTime(String, f64),

    #[error("invalid printer profile: {0}")]
    InvalidProfile(String),

    // -- Collaborator errors --
    #[error("rasterization failed: {0}")]
    Rasterization(String),

    #[error("file encoding failed: {0}")]
    Encoding(String),

    #[error("image processing failed: {0}")]
    Image(String),

    #[error("integrity check failed for {path}: expected {expected}, got {actual}")]
    IntegrityMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, MaskError>;
