//! Command handlers, one module per subcommand.

pub mod completions;
pub mod config;
pub mod init;
pub mod list;
pub mod new_preset;

use tracing::debug;

use devconf_adapters::{DirectoryPresetLoader, InMemoryPresetStore};

use crate::{config::AppConfig, error::CliResult};

/// Built-in presets plus those in the user preset directory.
pub(crate) fn preset_store(config: &AppConfig) -> CliResult<InMemoryPresetStore> {
    let store = InMemoryPresetStore::with_builtin(&config.user)?;
    let loader = DirectoryPresetLoader::new(config.presets_dir(), config.user.as_str());
    let loaded = store.load_dir(&loader)?;

    debug!(
        user_presets = loaded,
        total = store.len(),
        dir = %loader.dir().display(),
        "preset registry ready"
    );
    Ok(store)
}
