//! Named presets and the on-disk preset document.

use serde::{Deserialize, Serialize};

use super::config::DevContainerConfig;
use super::error::DomainError;

/// A named configuration layer offered to users (`node`, `python`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    /// Registry key, as typed on the command line.
    pub name: String,
    /// Short display name.
    pub label: String,
    pub description: String,
    pub config: DevContainerConfig,
}

impl Preset {
    pub fn from_file(name: impl Into<String>, file: PresetFile) -> Self {
        Self {
            name: name.into(),
            label: file.label,
            description: file.description,
            config: file.config,
        }
    }
}

/// JSON document a preset is stored as.
///
/// ```json
/// { "label": "Rust", "description": "...", "config": { "name": "..." } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetFile {
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub config: DevContainerConfig,
}

impl PresetFile {
    /// Starter document for a new preset called `name`.
    ///
    /// `name` must already have passed [`validate_preset_name`].
    pub fn scaffold(name: &str) -> Self {
        let pascal = to_pascal_case(name);
        Self {
            description: format!("{pascal} development environment"),
            config: DevContainerConfig {
                name: Some(format!("{pascal} Development")),
                ..Default::default()
            },
            label: pascal,
        }
    }
}

/// Preset names look like `rust`, `go-web`, `python3`.
pub fn validate_preset_name(name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidPresetName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let mut chars = name.chars();
    match chars.next() {
        None => return Err(invalid("name cannot be empty")),
        Some(first) if !first.is_ascii_lowercase() => {
            return Err(invalid("must start with a lowercase letter"));
        }
        Some(_) => {}
    }

    if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(invalid(
            "may only contain lowercase letters, digits, and hyphens",
        ));
    }

    Ok(())
}

/// `my-preset` → `MyPreset`.
pub fn to_pascal_case(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = String::with_capacity(word.len());
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                    out
                }
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_well_formed_names() {
        for name in ["rust", "go-web", "python3", "a"] {
            assert!(validate_preset_name(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn rejects_malformed_names() {
        for name in ["", "Rust", "1abc", "-x", "my_preset", "my preset", "ünï"] {
            assert!(
                matches!(
                    validate_preset_name(name),
                    Err(DomainError::InvalidPresetName { .. })
                ),
                "{name}"
            );
        }
    }

    #[test]
    fn pascal_case() {
        assert_eq!(to_pascal_case("rust"), "Rust");
        assert_eq!(to_pascal_case("my-preset"), "MyPreset");
        assert_eq!(to_pascal_case("go-web-2"), "GoWeb2");
    }

    #[test]
    fn scaffold_document() {
        let file = PresetFile::scaffold("my-preset");
        assert_eq!(
            serde_json::to_value(&file).unwrap(),
            json!({
                "label": "MyPreset",
                "description": "MyPreset development environment",
                "config": { "name": "MyPreset Development" }
            })
        );
    }

    #[test]
    fn preset_file_defaults() {
        let file: PresetFile = serde_json::from_value(json!({ "label": "Bun" })).unwrap();
        let preset = Preset::from_file("bun", file);
        assert_eq!(preset.name, "bun");
        assert_eq!(preset.description, "");
        assert_eq!(preset.config, DevContainerConfig::default());
    }
}
