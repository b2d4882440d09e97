//! In-memory preset registry with built-in presets.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use tracing::info;

use devconf_core::{
    application::{ApplicationError, ports::PresetStore},
    domain::{DomainError, Preset, validate_preset_name},
    error::DevconfResult,
};

use crate::{builtin_presets, preset_loader::DirectoryPresetLoader};

/// Thread-safe in-memory preset registry, keyed and ordered by name.
#[derive(Clone, Default)]
pub struct InMemoryPresetStore {
    inner: Arc<RwLock<BTreeMap<String, Preset>>>,
}

impl InMemoryPresetStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the built-in presets rendered for `user`.
    pub fn with_builtin(user: &str) -> DevconfResult<Self> {
        let store = Self::new();
        store.load_builtin(user)?;
        Ok(store)
    }

    pub fn load_builtin(&self, user: &str) -> DevconfResult<()> {
        for preset in builtin_presets::all_presets(user)? {
            self.insert(preset)?;
        }
        Ok(())
    }

    /// Add user presets, replacing built-ins of the same name.
    ///
    /// Returns how many presets were loaded.
    pub fn load_dir(&self, loader: &DirectoryPresetLoader) -> DevconfResult<usize> {
        let presets = loader.load_all()?;
        let count = presets.len();

        for preset in presets {
            if self.contains(&preset.name)? {
                info!(
                    name = %preset.name,
                    dir = %loader.dir().display(),
                    "user preset overrides built-in"
                );
            }
            self.insert(preset)?;
        }

        Ok(count)
    }

    pub fn contains(&self, name: &str) -> DevconfResult<bool> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.contains_key(name))
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PresetStore for InMemoryPresetStore {
    fn get(&self, name: &str) -> DevconfResult<Preset> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.get(name).cloned().ok_or_else(|| {
            DomainError::UnknownPreset {
                name: name.to_string(),
                available: inner.keys().cloned().collect(),
            }
            .into()
        })
    }

    fn list(&self) -> DevconfResult<Vec<Preset>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner.values().cloned().collect())
    }

    fn insert(&self, preset: Preset) -> DevconfResult<()> {
        validate_preset_name(&preset.name)?;

        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.insert(preset.name.clone(), preset);
        Ok(())
    }
}
