//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Preset store error")]
    StoreLockError,

    /// A descriptor is already present and `--force` was not given.
    #[error("{path} already exists")]
    DescriptorExists { path: PathBuf },

    /// A preset with this name is already registered or on disk.
    #[error("Preset '{name}' already exists at {path}")]
    PresetExists { name: String, path: PathBuf },

    /// Auxiliary assets could not be read.
    #[error("Assets unavailable: {reason}")]
    AssetsUnavailable { reason: String },

    /// Base configuration could not be loaded.
    #[error("Base configuration unusable ({source_name}): {reason}")]
    BaseUnavailable { source_name: String, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::StoreLockError => vec![
                "The preset store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::DescriptorExists { .. } => vec![
                "Use --force to overwrite".into(),
                "Or pick another directory with --output".into(),
            ],
            Self::PresetExists { name, .. } => vec![
                format!("'{name}' is taken, choose a different preset name"),
                "Edit the existing preset file instead".into(),
            ],
            Self::AssetsUnavailable { .. } => vec![
                "Set assets_dir in the config file or DEVCONF_ASSETS_DIR".into(),
                "Or skip the copy with --no-assets".into(),
            ],
            Self::BaseUnavailable { source_name, .. } => vec![
                format!("Check the base configuration at {source_name}"),
                "Remove base_file from the config to use the built-in base".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::StoreLockError => ErrorCategory::Internal,
            Self::DescriptorExists { .. } | Self::PresetExists { .. } => ErrorCategory::Validation,
            Self::AssetsUnavailable { .. } | Self::BaseUnavailable { .. } => {
                ErrorCategory::Configuration
            }
        }
    }
}
