// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Settings for the command-line exporter. Missing keys in a config file
/// fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory the sliced files and previews are written to.
    pub output_dir: PathBuf,
    /// Write a PNG preview next to every sliced file.
    pub write_previews: bool,
    /// Suffix appended to the sliced filename for its preview image.
    pub preview_suffix: String,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("out"),
            write_previews: true,
            preview_suffix: ".preview.png".into(),
            log_filter: "info".into(),
        }
    }
}

impl ExportConfig {
    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Preview path for a sliced file name inside the output directory.
    pub fn preview_path(&self, file_name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{file_name}{}", self.preview_suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MaskError;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"output_dir": "masks", "write_previews": false}"#).unwrap();

        let config = ExportConfig::load(&path).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("masks"));
        assert!(!config.write_previews);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.preview_path("a.pwms"), PathBuf::from("masks/a.pwms.preview.png"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ExportConfig::load(dir.path().join("nope.json"));
        assert!(matches!(result, Err(MaskError::Io(_))));
    }

    #[test]
    fn bad_json_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(ExportConfig::load(&path), Err(MaskError::Serialization(_))));
    }
}
