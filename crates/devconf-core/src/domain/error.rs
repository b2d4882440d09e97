// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid preset: {0}")]
    InvalidPreset(String),

    #[error("Invalid preset name '{name}': {reason}")]
    InvalidPresetName { name: String, reason: String },

    #[error("Generated descriptor is invalid: {}", errors.join("; "))]
    InvalidDescriptor { errors: Vec<String> },

    // ========================================================================
    // Not Found Errors (404-level equivalent)
    // ========================================================================
    #[error("Unknown preset '{name}'")]
    UnknownPreset {
        name: String,
        available: Vec<String>,
    },

    // ========================================================================
    // Serialization
    // ========================================================================
    #[error("Failed to serialize descriptor: {0}")]
    Serialization(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidConfig(msg) => vec![
                "Check the configuration layer for typos or wrong value types".into(),
                format!("Details: {}", msg),
            ],
            Self::InvalidPresetName { .. } => vec![
                "Preset names start with a lowercase letter".into(),
                "Use only lowercase letters, digits, and hyphens".into(),
                "Examples: rust, go-web, python3".into(),
            ],
            Self::InvalidDescriptor { errors } => {
                let mut out = vec!["The merged devcontainer.json would be invalid:".into()];
                out.extend(errors.iter().map(|e| format!("  • {e}")));
                out.push("Fix the preset or project-config.json and try again".into());
                out
            }
            Self::UnknownPreset { available, .. } => {
                let mut out = vec!["Available presets:".to_string()];
                out.extend(available.iter().map(|p| format!("  • {p}")));
                out.push("List presets with descriptions: devconf list".into());
                out
            }
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfig(_)
            | Self::InvalidPreset(_)
            | Self::InvalidPresetName { .. }
            | Self::InvalidDescriptor { .. } => ErrorCategory::Validation,
            Self::UnknownPreset { .. } => ErrorCategory::NotFound,
            Self::Serialization(_) => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
