//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `devconf-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{DevContainerConfig, Preset};
use crate::error::DevconfResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `devconf_adapters::filesystem::LocalFilesystem` (production)
/// - `devconf_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> DevconfResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &[u8]) -> DevconfResult<()>;

    /// Mark a file executable (no-op where unsupported).
    fn set_permissions(&self, path: &Path, executable: bool) -> DevconfResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for the preset registry.
///
/// Implemented by `devconf_adapters::preset_store::InMemoryPresetStore`.
#[cfg_attr(test, mockall::automock)]
pub trait PresetStore: Send + Sync {
    /// Look a preset up by name.
    ///
    /// Fails with `DomainError::UnknownPreset` carrying the valid names.
    fn get(&self, name: &str) -> DevconfResult<Preset>;

    /// All presets, sorted by name.
    fn list(&self) -> DevconfResult<Vec<Preset>>;

    /// Insert or replace a preset.
    fn insert(&self, preset: Preset) -> DevconfResult<()>;
}

/// Port for the optional project override.
#[cfg_attr(test, mockall::automock)]
pub trait ProjectConfigLoader: Send + Sync {
    /// Override layer stored in `dir`, if there is a usable one.
    ///
    /// Unreadable or malformed overrides are reported and yield `None`.
    fn load(&self, dir: &Path) -> Option<DevContainerConfig>;
}

/// A file copied next to the generated descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFile {
    /// Path relative to the output directory.
    pub path: PathBuf,
    pub contents: Vec<u8>,
    pub executable: bool,
}

/// Port for the auxiliary scripts (`bin/`, `initialize.sh`, `post-create.sh`).
///
/// Implemented by:
/// - `devconf_adapters::assets::EmbeddedAssets` (shipped in the binary)
/// - `devconf_adapters::assets::DirectoryAssets` (a templates directory)
#[cfg_attr(test, mockall::automock)]
pub trait AssetBundle: Send + Sync {
    fn files(&self) -> DevconfResult<Vec<AssetFile>>;
}
