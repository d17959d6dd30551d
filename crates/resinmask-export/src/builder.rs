// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// File builders — encode a layer's exposure cells into printer artifacts.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::RgbaImage;
use resinmask_core::error::{MaskError, Result};
use resinmask_core::types::PrinterProfile;
use resinmask_render::ExposureCell;
use resinmask_render::raster::encode_png;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Encodes exposure cells into the bytes of one output file.
///
/// `preview_rgba` is the raw RGBA8 thumbnail at the profile's preview
/// resolution. Failures surface as `MaskError::Encoding`.
pub trait FileBuilder {
    fn build(
        &self,
        cells: &[ExposureCell],
        preview_rgba: &[u8],
        profile: &PrinterProfile,
    ) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Container tag written at the top of every layer stack.
pub const LAYER_STACK_FORMAT: &str = "resinmask-layer-stack";
pub const LAYER_STACK_VERSION: u32 = 1;

/// JSON layer stack: exposure times and base64 PNG masks.
///
/// Not a printer-native format. Useful for inspecting exports and for
/// feeding an external slicer-format converter.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayerStackBuilder {
    pretty: bool,
}

impl LayerStackBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit indented JSON.
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    #[instrument(skip_all, fields(cells = cells.len(), format = %profile.file_format))]
    fn encode(
        &self,
        cells: &[ExposureCell],
        preview_rgba: &[u8],
        profile: &PrinterProfile,
    ) -> Result<Vec<u8>> {
        if cells.is_empty() {
            return Err(MaskError::Encoding("layer stack needs at least one cell".into()));
        }

        let [preview_w, preview_h] = profile.preview_resolution;
        let preview = RgbaImage::from_raw(preview_w, preview_h, preview_rgba.to_vec())
            .ok_or_else(|| {
                MaskError::Encoding(format!(
                    "preview holds {} bytes, expected {preview_w}x{preview_h} RGBA",
                    preview_rgba.len()
                ))
            })?;

        let layers = cells
            .iter()
            .map(|cell| -> Result<StackEntry> {
                Ok(StackEntry {
                    exposure_s: cell.duration_s,
                    width: cell.raster.width(),
                    height: cell.raster.height(),
                    png: BASE64.encode(encode_png(&cell.raster).map_err(to_encoding)?),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let stack = LayerStack {
            format: LAYER_STACK_FORMAT.into(),
            version: LAYER_STACK_VERSION,
            model: profile.model.clone(),
            file_format: profile.file_format.clone(),
            resolution: profile.resolution,
            pixel_pitch_mm: profile.pixel_pitch_mm,
            total_exposure_s: cells.iter().map(|c| c.duration_s).sum(),
            preview: StackEntry {
                exposure_s: 0.0,
                width: preview_w,
                height: preview_h,
                png: BASE64.encode(encode_png(&preview).map_err(to_encoding)?),
            },
            layers,
        };

        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&stack)
        } else {
            serde_json::to_vec(&stack)
        }
        .map_err(|err| MaskError::Encoding(format!("layer stack serialization failed: {err}")))?;
        debug!(bytes = bytes.len(), "Layer stack encoded");
        Ok(bytes)
    }
}

impl FileBuilder for LayerStackBuilder {
    async fn build(
        &self,
        cells: &[ExposureCell],
        preview_rgba: &[u8],
        profile: &PrinterProfile,
    ) -> Result<Vec<u8>> {
        self.encode(cells, preview_rgba, profile)
    }
}

fn to_encoding(err: MaskError) -> MaskError {
    match err {
        MaskError::Encoding(_) => err,
        other => MaskError::Encoding(other.to_string()),
    }
}

/// On-disk shape of a layer stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerStack {
    pub format: String,
    pub version: u32,
    pub model: String,
    pub file_format: String,
    pub resolution: [u32; 2],
    pub pixel_pitch_mm: f64,
    pub total_exposure_s: f64,
    pub preview: StackEntry,
    pub layers: Vec<StackEntry>,
}

/// One PNG image in a layer stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackEntry {
    pub exposure_s: f64,
    pub width: u32,
    pub height: u32,
    /// Base64 (standard alphabet) PNG bytes.
    pub png: String,
}
