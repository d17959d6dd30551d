// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for resinmask.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{MaskError, Result};

/// Unique identifier for one export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExportId(pub Uuid);

impl ExportId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ExportId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ExportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which face of the board a layer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Top => write!(f, "top"),
            Self::Bottom => write!(f, "bottom"),
        }
    }
}

/// One vector artwork layer of the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardLayer {
    /// Stable identifier, also the key into the exposure-time table.
    pub id: String,
    pub side: Side,
    /// Candidate output filename. Not guaranteed unique across layers.
    pub filename: String,
    /// SVG markup with physical `width`/`height` and a `viewBox`.
    #[serde(alias = "svg")]
    pub markup: String,
    /// Mask polarity: inverted layers are drawn on a black plate.
    #[serde(default)]
    pub inverted: bool,
    #[serde(default)]
    pub display_order: i32,
}

/// Per-axis mirroring for one board side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisFlip {
    pub horizontal: bool,
    pub vertical: bool,
}

/// Mirroring flags for both board sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlipFlags {
    pub top: AxisFlip,
    pub bottom: AxisFlip,
}

impl FlipFlags {
    /// Flags that apply to layers on `side`.
    pub fn for_side(&self, side: Side) -> AxisFlip {
        match side {
            Side::Top => self.top,
            Side::Bottom => self.bottom,
        }
    }
}

/// Physical and raster characteristics of the target printer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrinterProfile {
    /// Human-readable model name, carried through to the file builder.
    #[serde(default)]
    pub model: String,
    /// Native panel resolution in pixels, in the panel's own orientation.
    pub resolution: [u32; 2],
    /// Millimetres per pixel, identical on both axes.
    pub pixel_pitch_mm: f64,
    /// Size of the thumbnail embedded in the output file.
    pub preview_resolution: [u32; 2],
    /// Output file extension, e.g. `pwms`.
    pub file_format: String,
    /// Firmware expects the whole plate rotated by 180 degrees.
    #[serde(default)]
    pub rotate_180: bool,
    #[serde(default)]
    pub flips: FlipFlags,
}

impl PrinterProfile {
    /// Check that the profile describes a usable raster device.
    pub fn validate(&self) -> Result<()> {
        if self.resolution.contains(&0) {
            return Err(MaskError::InvalidProfile(format!(
                "resolution must be non-zero, got {}x{}",
                self.resolution[0], self.resolution[1]
            )));
        }
        if self.preview_resolution.contains(&0) {
            return Err(MaskError::InvalidProfile(format!(
                "preview resolution must be non-zero, got {}x{}",
                self.preview_resolution[0], self.preview_resolution[1]
            )));
        }
        if !self.pixel_pitch_mm.is_finite() || self.pixel_pitch_mm <= 0.0 {
            return Err(MaskError::InvalidProfile(format!(
                "pixel pitch must be a positive number of millimetres, got {}",
                self.pixel_pitch_mm
            )));
        }
        if self.file_format.trim().is_empty() {
            return Err(MaskError::InvalidProfile("file format is empty".into()));
        }
        Ok(())
    }

    /// The panel is taller than it is wide in its native orientation.
    pub fn is_portrait(&self) -> bool {
        self.resolution[0] < self.resolution[1]
    }

    /// Landscape working canvas: (longer side, shorter side).
    pub fn working_size(&self) -> (u32, u32) {
        let [a, b] = self.resolution;
        (a.max(b), a.min(b))
    }

    /// Convert a physical length to whole pixels. This is the only place
    /// millimetres are rounded.
    pub fn mm_to_px(&self, mm: f64) -> i64 {
        (mm / self.pixel_pitch_mm).round() as i64
    }
}

/// Reference point on the build plate the board is aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnchorCorner {
    #[default]
    #[serde(rename = "TL")]
    TopLeft,
    #[serde(rename = "TR")]
    TopRight,
    #[serde(rename = "BL")]
    BottomLeft,
    #[serde(rename = "BR")]
    BottomRight,
    #[serde(rename = "C")]
    Center,
}

/// How calibration exposure times are spread between min and max.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    #[default]
    Geometric,
    Linear,
}

/// A rows x columns exposure test grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSpec {
    pub rows: u32,
    pub columns: u32,
    pub min_time_s: f64,
    pub max_time_s: f64,
    #[serde(default)]
    pub interpolation: Interpolation,
}

/// Largest calibration grid accepted. Every cell holds a full-plate raster.
pub const MAX_CALIBRATION_CELLS: u32 = 1024;

impl CalibrationSpec {
    /// Number of exposure steps (grid cells). Saturates for grids that
    /// `validate` rejects.
    pub fn steps(&self) -> u32 {
        self.rows.checked_mul(self.columns).unwrap_or(u32::MAX)
    }

    /// Reject grids that would divide by zero or produce non-positive
    /// cell durations.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(MaskError::DegenerateCalibration(format!(
                "grid must have at least one row and column, got {}x{}",
                self.rows, self.columns
            )));
        }
        match self.rows.checked_mul(self.columns) {
            Some(cells) if cells <= MAX_CALIBRATION_CELLS => {}
            _ => {
                return Err(MaskError::DegenerateCalibration(format!(
                    "{}x{} grid exceeds {MAX_CALIBRATION_CELLS} cells",
                    self.rows, self.columns
                )));
            }
        }
        if !self.min_time_s.is_finite() || self.min_time_s <= 0.0 {
            return Err(MaskError::DegenerateCalibration(format!(
                "minimum exposure must be positive, got {}",
                self.min_time_s
            )));
        }
        if !self.max_time_s.is_finite() {
            return Err(MaskError::DegenerateCalibration(format!(
                "maximum exposure must be finite, got {}",
                self.max_time_s
            )));
        }
        if self.steps() == 1 {
            if self.max_time_s != self.min_time_s {
                return Err(MaskError::DegenerateCalibration(format!(
                    "a single-cell grid cannot span {}s..{}s",
                    self.min_time_s, self.max_time_s
                )));
            }
        } else if self.max_time_s <= self.min_time_s {
            return Err(MaskError::DegenerateCalibration(format!(
                "maximum exposure {}s must exceed minimum {}s",
                self.max_time_s, self.min_time_s
            )));
        }
        Ok(())
    }
}

/// Where and how boards are placed on the plate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlacementOptions {
    #[serde(default)]
    pub anchor_corner: AnchorCorner,
    /// Offset from the anchor in millimetres (x, y).
    #[serde(default)]
    pub anchor_offset_mm: [f64; 2],
    /// Exposure seconds keyed by layer id.
    #[serde(default)]
    pub exposure_times: HashMap<String, f64>,
    #[serde(default)]
    pub calibration: Option<CalibrationSpec>,
}

impl PlacementOptions {
    /// Exposure time for a layer when no calibration grid is requested.
    /// Must be a finite number of seconds above zero.
    pub fn exposure_time(&self, layer_id: &str) -> Result<f64> {
        let seconds = self
            .exposure_times
            .get(layer_id)
            .copied()
            .ok_or_else(|| MaskError::MissingExposureTime(layer_id.to_owned()))?;
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(MaskError::InvalidExposureTime(layer_id.to_owned(), seconds));
        }
        Ok(seconds)
    }
}

/// Everything needed for one export run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub layers: Vec<BoardLayer>,
    #[serde(default)]
    pub options: PlacementOptions,
    pub profile: PrinterProfile,
}
