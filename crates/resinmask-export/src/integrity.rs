// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Artifact integrity — SHA-256 fingerprints for exported files.

use std::path::Path;

use resinmask_core::error::{MaskError, Result};
use sha2::{Digest, Sha256};
use tracing::debug;

/// SHA-256 of `data` as lowercase hex.
pub fn hash_bytes(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Re-read a written artifact and compare it against the digest recorded
/// at export time. Case of `expected_hex` is ignored.
pub fn verify_file(path: &Path, expected_hex: &str) -> Result<()> {
    let actual = hash_bytes(&std::fs::read(path)?);
    if !actual.eq_ignore_ascii_case(expected_hex) {
        return Err(MaskError::IntegrityMismatch {
            path: path.display().to_string(),
            expected: expected_hex.to_owned(),
            actual,
        });
    }
    debug!(path = %path.display(), "Artifact digest verified");
    Ok(())
}
