//! Project override loader.

use std::{fs, path::Path};

use serde_json::Value;
use tracing::{info, instrument, warn};

use devconf_core::{
    application::ports::ProjectConfigLoader,
    domain::{ConfigCheck, DevContainerConfig, check_config},
};

/// File looked up in the output directory.
pub const PROJECT_CONFIG_FILE: &str = "project-config.json";

/// Reads `project-config.json` from the output directory.
///
/// A missing file is normal. An unreadable or malformed one is reported at
/// `WARN` and treated as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonProjectLoader;

impl JsonProjectLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ProjectConfigLoader for JsonProjectLoader {
    #[instrument(skip(self), fields(dir = %dir.display()))]
    fn load(&self, dir: &Path) -> Option<DevContainerConfig> {
        let path = dir.join(PROJECT_CONFIG_FILE);
        if !path.is_file() {
            return None;
        }

        info!(path = %path.display(), "Loading project-specific config");

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read project config");
                return None;
            }
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to parse project config");
                return None;
            }
        };

        match check_config(value) {
            ConfigCheck::Valid(config) => Some(config),
            ConfigCheck::Invalid(reason) => {
                warn!(path = %path.display(), %reason, "Ignoring malformed project config");
                None
            }
        }
    }
}
