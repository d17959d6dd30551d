// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Writes export records to disk and builds the stdout summary.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use resinmask_core::config::ExportConfig;
use resinmask_core::error::Result;
use resinmask_export::OutputRecord;
use resinmask_export::integrity::verify_file;
use serde::Serialize;
use tracing::{debug, info};

/// JSON summary printed after an export.
#[derive(Debug, Serialize)]
pub(crate) struct ExportSummary {
    pub(crate) id: Option<String>,
    pub(crate) started_at: DateTime<Utc>,
    pub(crate) finished_at: DateTime<Utc>,
    pub(crate) output_dir: PathBuf,
    pub(crate) outputs: Vec<WrittenOutput>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WrittenOutput {
    pub(crate) layer: String,
    pub(crate) file: String,
    pub(crate) sha256: String,
    pub(crate) cells: usize,
    pub(crate) bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) preview: Option<PathBuf>,
}

/// Write every artifact (and its preview, when enabled) into the output
/// directory, creating it if needed. Each artifact is read back and checked
/// against its recorded digest.
pub(crate) fn write_records(
    config: &ExportConfig,
    records: &[OutputRecord],
) -> Result<Vec<WrittenOutput>> {
    fs::create_dir_all(&config.output_dir)?;

    let mut written = Vec::with_capacity(records.len());
    for record in records {
        let path = config.output_dir.join(plain_file_name(&record.file_name)?);
        fs::write(&path, &record.artifact)?;
        verify_file(&path, &record.artifact_sha256)?;
        debug!(path = %path.display(), bytes = record.artifact.len(), "Artifact written");

        let preview = if config.write_previews {
            let preview_path = config.preview_path(&record.file_name);
            fs::write(&preview_path, &record.preview_png)?;
            Some(preview_path)
        } else {
            None
        };

        written.push(WrittenOutput {
            layer: record.layer_id.clone(),
            file: record.file_name.clone(),
            sha256: record.artifact_sha256.clone(),
            cells: record.cells,
            bytes: record.artifact.len(),
            preview,
        });
    }

    info!(
        dir = %config.output_dir.display(),
        files = written.len(),
        "Outputs written"
    );
    Ok(written)
}

/// Output names must stay inside the output directory.
fn plain_file_name(name: &str) -> Result<&Path> {
    let path = Path::new(name);
    let mut components = path.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(path),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("refusing to write '{name}' outside the output directory"),
        )
        .into()),
    }
}
