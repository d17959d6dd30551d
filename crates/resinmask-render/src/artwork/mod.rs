// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Artwork module — board geometry extraction and side-specific mirroring.

pub mod affine;
pub mod markup;

pub use affine::Affine;
pub use markup::{BoardArtwork, ViewBox, apply_transform};
