// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export pipeline — render, name and encode every layer of a request.
//
// Layers run one at a time in input order. The first failure aborts the run
// and no records are returned.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use resinmask_core::error::Result;
use resinmask_core::types::{BoardLayer, ExportId, ExportRequest};
use resinmask_render::raster::encode_png;
use resinmask_render::{Rasterizer, render_layer};
use tracing::{field, info, instrument};

use crate::builder::FileBuilder;
use crate::integrity::hash_bytes;
use crate::names::FileNamer;

/// One exported layer.
#[derive(Debug, Clone)]
pub struct OutputRecord {
    pub export_id: ExportId,
    pub layer_id: String,
    pub layer: BoardLayer,
    /// Full-plate preview in working orientation, PNG encoded.
    pub preview_png: Vec<u8>,
    pub file_name: String,
    pub artifact: Vec<u8>,
    /// Lowercase hex SHA-256 of `artifact`.
    pub artifact_sha256: String,
    /// Number of exposure cells encoded in `artifact`.
    pub cells: usize,
}

impl OutputRecord {
    /// The preview as a `data:` URL for display surfaces.
    pub fn preview_data_url(&self) -> String {
        format!("data:image/png;base64,{}", BASE64.encode(&self.preview_png))
    }
}

/// Drives the per-layer render and encode steps with the given collaborators.
#[derive(Debug, Clone)]
pub struct ExportPipeline<R, B> {
    rasterizer: R,
    builder: B,
}

impl<R: Rasterizer, B: FileBuilder> ExportPipeline<R, B> {
    pub fn new(rasterizer: R, builder: B) -> Self {
        Self {
            rasterizer,
            builder,
        }
    }

    /// Export every layer of `request`, returning records in input order.
    #[instrument(skip_all, fields(export = field::Empty, layers = request.layers.len()))]
    pub async fn run(&self, request: &ExportRequest) -> Result<Vec<OutputRecord>> {
        let export_id = ExportId::new();
        tracing::Span::current().record("export", field::display(export_id));

        request.profile.validate()?;
        info!(
            model = %request.profile.model,
            format = %request.profile.file_format,
            "Export started"
        );

        let mut namer = FileNamer::new();
        let mut records = Vec::with_capacity(request.layers.len());

        for layer in &request.layers {
            let file_name = namer.assign(&layer.filename, &request.profile.file_format);
            let rendered =
                render_layer(&self.rasterizer, layer, &request.options, &request.profile).await?;

            let artifact = self
                .builder
                .build(&rendered.cells, rendered.thumbnail.as_raw(), &request.profile)
                .await?;
            let preview_png = encode_png(&rendered.preview)?;
            let artifact_sha256 = hash_bytes(&artifact);

            info!(
                layer = %layer.id,
                file = %file_name,
                bytes = artifact.len(),
                sha256 = %artifact_sha256,
                "Layer exported"
            );
            records.push(OutputRecord {
                export_id,
                layer_id: layer.id.clone(),
                layer: layer.clone(),
                preview_png,
                file_name,
                artifact,
                artifact_sha256,
                cells: rendered.cells.len(),
            });
        }

        info!(outputs = records.len(), "Export finished");
        Ok(records)
    }
}
