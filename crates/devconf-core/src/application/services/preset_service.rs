//! Preset Service - listing and scaffolding presets.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, PresetStore},
    },
    domain::{Preset, PresetFile, validate_preset_name},
    error::{DevconfError, DevconfResult},
};

/// Service for preset operations.
pub struct PresetService {
    store: Box<dyn PresetStore>,
    filesystem: Box<dyn Filesystem>,
}

impl PresetService {
    pub fn new(store: Box<dyn PresetStore>, filesystem: Box<dyn Filesystem>) -> Self {
        Self { store, filesystem }
    }

    /// All presets, sorted by name.
    pub fn list(&self) -> DevconfResult<Vec<Preset>> {
        let mut presets = self.store.list()?;
        presets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(presets)
    }

    pub fn get(&self, name: &str) -> DevconfResult<Preset> {
        self.store.get(name)
    }

    /// Write a starter `<dir>/<name>.json` for a new preset.
    ///
    /// Refuses names that are malformed, already registered, or whose file
    /// already exists. Returns the path written.
    #[instrument(skip(self, dir), fields(dir = %dir.display()))]
    pub fn scaffold(&self, name: &str, dir: &Path) -> DevconfResult<PathBuf> {
        validate_preset_name(name)?;

        let path = dir.join(format!("{name}.json"));

        match self.store.get(name) {
            Ok(_) => {
                return Err(ApplicationError::PresetExists {
                    name: name.to_string(),
                    path,
                }
                .into());
            }
            Err(DevconfError::Domain(_)) => {}
            Err(e) => return Err(e),
        }

        if self.filesystem.exists(&path) {
            return Err(ApplicationError::PresetExists {
                name: name.to_string(),
                path,
            }
            .into());
        }

        let file = PresetFile::scaffold(name);
        let mut text = serde_json::to_string_pretty(&file).map_err(|e| DevconfError::Internal {
            message: format!("rendering preset scaffold: {e}"),
        })?;
        text.push('\n');

        self.filesystem.create_dir_all(dir)?;
        self.filesystem.write_file(&path, text.as_bytes())?;
        info!(path = %path.display(), "Preset scaffold created");

        Ok(path)
    }
}
