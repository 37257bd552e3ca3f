//! File-backed persistence for the color-mode preference.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use dashkit_core::{ColorMode, PreferenceBackend};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreferenceFile {
    color_mode: ColorMode,
}

/// Stores the preference as `{"colorMode": "dark"}` in a JSON file.
///
/// A missing file means nothing was saved yet. Writes go to a sibling temp
/// file first and are renamed into place, so a crash never leaves a
/// truncated file behind.
#[derive(Debug, Clone)]
pub struct FilePreferenceBackend {
    path: PathBuf,
}

impl FilePreferenceBackend {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceBackend for FilePreferenceBackend {
    fn load(&self) -> anyhow::Result<Option<ColorMode>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", self.path.display()));
            }
        };
        let file: PreferenceFile = serde_json::from_str(&text)
            .with_context(|| format!("invalid preference file {}", self.path.display()))?;
        Ok(Some(file.color_mode))
    }

    fn save(&self, mode: ColorMode) -> anyhow::Result<()> {
        let text = serde_json::to_string(&PreferenceFile { color_mode: mode })?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, text).with_context(|| format!("failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        debug!(path = %self.path.display(), %mode, "color mode saved");
        Ok(())
    }
}
