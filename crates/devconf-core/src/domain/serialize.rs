//! Descriptor text form.

use super::config::DevContainerConfig;
use super::error::DomainError;

/// Render a descriptor as pretty JSON (two-space indent) with exactly one
/// trailing newline.
pub fn to_descriptor_json(config: &DevContainerConfig) -> Result<String, DomainError> {
    let mut out = serde_json::to_string_pretty(config)
        .map_err(|e| DomainError::Serialization(e.to_string()))?;
    out.push('\n');
    Ok(out)
}

/// Parse descriptor text back into the model.
pub fn from_descriptor_json(text: &str) -> Result<DevContainerConfig, DomainError> {
    serde_json::from_str(text).map_err(|e| DomainError::InvalidConfig(e.to_string()))
}
