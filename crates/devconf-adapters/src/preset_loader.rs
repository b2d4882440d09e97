//! Filesystem-based preset loader.
//!
//! Reads user presets from a flat directory. The file stem is the preset
//! name; the document has the same shape as the built-in presets.
//!
//! ```text
//! presets/
//! ├── rust.json
//! └── go-web.toml
//! ```
//!
//! `rust.json`:
//!
//! ```json
//! {
//!   "label": "Rust",
//!   "description": "Rust development environment",
//!   "config": { "name": "Rust Development", "image": "..." }
//! }
//! ```
//!
//! The TOML form carries the same keys, with `[config]` as a table.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use devconf_core::domain::{DomainError, Preset, validate_preset_name};

use crate::builtin_presets;

/// Loads [`Preset`]s from `*.json` and `*.toml` files in one directory.
///
/// Files whose name is not a valid preset name, or whose content does not
/// parse, emit a `WARN` log and are skipped.
pub struct DirectoryPresetLoader {
    dir: PathBuf,
    user: String,
}

impl DirectoryPresetLoader {
    pub fn new(dir: impl Into<PathBuf>, user: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            user: user.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load every valid preset found in the directory.
    ///
    /// A missing directory yields no presets.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn load_all(&self) -> Result<Vec<Preset>, DomainError> {
        if !self.dir.exists() {
            debug!("preset directory does not exist");
            return Ok(Vec::new());
        }

        let mut presets = Vec::new();

        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                DomainError::InvalidPreset(format!(
                    "failed to read preset directory '{}': {e}",
                    self.dir.display()
                ))
            })?;

            let path = entry.path();
            if !entry.file_type().is_file() || format_of(path).is_none() {
                continue;
            }

            match self.load_file(path) {
                Ok(preset) => {
                    debug!(name = %preset.name, "loaded preset");
                    presets.push(preset);
                }
                Err(e) => {
                    warn!(
                        file  = %path.display(),
                        error = %e,
                        "skipping preset file due to load error"
                    );
                }
            }
        }

        debug!(count = presets.len(), "finished loading presets");
        Ok(presets)
    }

    fn load_file(&self, path: &Path) -> Result<Preset, DomainError> {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| DomainError::InvalidPreset("file name is not UTF-8".into()))?;
        validate_preset_name(name)?;

        let raw = fs::read_to_string(path).map_err(|e| {
            DomainError::InvalidPreset(format!("failed to read '{}': {e}", path.display()))
        })?;

        let value: Value = match format_of(path) {
            Some(Format::Toml) => toml::from_str(&raw).map_err(|e| {
                DomainError::InvalidPreset(format!("failed to parse '{}': {e}", path.display()))
            })?,
            Some(Format::Json) | None => serde_json::from_str(&raw).map_err(|e| {
                DomainError::InvalidPreset(format!("failed to parse '{}': {e}", path.display()))
            })?,
        };

        builtin_presets::preset_from_value(name, value, &self.user)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Option<Format> {
    match path.extension()?.to_str()? {
        "json" => Some(Format::Json),
        "toml" => Some(Format::Toml),
        _ => None,
    }
}
