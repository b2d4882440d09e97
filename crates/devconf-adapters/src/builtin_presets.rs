//! Base layer and presets that ship inside the binary.
//!
//! The JSON sources live in `presets/` and are embedded at compile time.
//! Any string value may contain `{{user}}`, which is replaced with the
//! configured container user before the document is interpreted.
//!
//! ```env
//! DEVCONTAINER_USER=dev-user
//! ```

use std::path::Path;

use serde_json::Value;
use tracing::{debug, instrument};

use devconf_core::{
    application::ApplicationError,
    domain::{ConfigCheck, DevContainerConfig, DomainError, Preset, PresetFile, check_config},
    error::DevconfResult,
};

/// Container user when none is configured.
pub const DEFAULT_USER: &str = "dev-user";

/// Placeholder substituted with the container user.
pub const USER_PLACEHOLDER: &str = "{{user}}";

const BASE: &str = include_str!("../presets/base.json");

const PRESETS: &[(&str, &str)] = &[
    ("bun", include_str!("../presets/bun.json")),
    ("fullstack", include_str!("../presets/fullstack.json")),
    ("haskell", include_str!("../presets/haskell.json")),
    ("node", include_str!("../presets/node.json")),
    ("python", include_str!("../presets/python.json")),
    ("writing", include_str!("../presets/writing.json")),
];

/// Names of the built-in presets, sorted.
pub fn names() -> Vec<&'static str> {
    PRESETS.iter().map(|(name, _)| *name).collect()
}

/// The shipped base layer.
pub fn base_config(user: &str) -> Result<DevContainerConfig, DomainError> {
    parse_layer(BASE, user, "built-in base")
}

/// A base layer read from `path` instead of the shipped one.
#[instrument(skip(user), fields(path = %path.display()))]
pub fn base_from_file(path: &Path, user: &str) -> DevconfResult<DevContainerConfig> {
    let text = std::fs::read_to_string(path).map_err(|e| ApplicationError::BaseUnavailable {
        source_name: path.display().to_string(),
        reason: e.to_string(),
    })?;

    parse_layer(&text, user, &path.display().to_string()).map_err(|e| {
        ApplicationError::BaseUnavailable {
            source_name: path.display().to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// All built-in presets, rendered for `user`.
#[instrument]
pub fn all_presets(user: &str) -> Result<Vec<Preset>, DomainError> {
    let presets = PRESETS
        .iter()
        .map(|(name, text)| parse_preset(name, text, user))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = presets.len(), "built-in presets loaded");
    Ok(presets)
}

/// Parse a preset document (`{label, description, config}`) for `user`.
pub fn parse_preset(name: &str, text: &str, user: &str) -> Result<Preset, DomainError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| DomainError::InvalidPreset(format!("{name}: {e}")))?;
    preset_from_value(name, value, user)
}

/// Interpret an already-parsed preset document for `user`.
pub fn preset_from_value(name: &str, mut value: Value, user: &str) -> Result<Preset, DomainError> {
    render_user(&mut value, user);

    let file: PresetFile = serde_json::from_value(value)
        .map_err(|e| DomainError::InvalidPreset(format!("{name}: {e}")))?;
    Ok(Preset::from_file(name, file))
}

fn parse_layer(text: &str, user: &str, origin: &str) -> Result<DevContainerConfig, DomainError> {
    let mut value: Value = serde_json::from_str(text)
        .map_err(|e| DomainError::InvalidConfig(format!("{origin}: {e}")))?;
    render_user(&mut value, user);

    match check_config(value) {
        ConfigCheck::Valid(config) => Ok(config),
        ConfigCheck::Invalid(reason) => Err(DomainError::InvalidConfig(format!("{origin}: {reason}"))),
    }
}

/// Replace [`USER_PLACEHOLDER`] in every string value.
///
/// Works on parsed values so a user name can never break the JSON syntax.
pub fn render_user(value: &mut Value, user: &str) {
    match value {
        Value::String(s) if s.contains(USER_PLACEHOLDER) => {
            *s = s.replace(USER_PLACEHOLDER, user);
        }
        Value::Array(items) => items.iter_mut().for_each(|v| render_user(v, user)),
        Value::Object(map) => map.values_mut().for_each(|v| render_user(v, user)),
        _ => {}
    }
}
