//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `DEVCONTAINER_USER`
//! 3. Environment variables prefixed `DEVCONF_` (`__` separates sections,
//!    e.g. `DEVCONF_PRESETS__DIR`)
//! 4. Config file (`--config FILE`, or [`AppConfig::config_path`] if present)
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use devconf_adapters::builtin_presets::DEFAULT_USER;

/// Environment variable naming the container user.
pub const USER_ENV: &str = "DEVCONTAINER_USER";

/// Prefix of the other environment overrides.
pub const ENV_PREFIX: &str = "DEVCONF";

/// Output directory used when `init` gets no `--output`.
pub const DEFAULT_OUTPUT_DIR: &str = ".devcontainer";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Container user substituted for `{{user}}`.
    pub user: String,

    /// Directory `init` writes to by default.
    pub default_output: PathBuf,

    /// Replaces the built-in base layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_file: Option<PathBuf>,

    /// Directory holding `bin/`, `initialize.sh` and `post-create.sh`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_dir: Option<PathBuf>,

    /// Output settings.
    pub output: OutputConfig,

    /// User preset settings.
    #[serde(default)]
    pub presets: PresetsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetsConfig {
    /// Where user presets live. Defaults to [`AppConfig::default_presets_dir`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// How the CLI should render its output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Human-readable with colors.
    Human,
    /// Plain text without colors.
    Plain,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user: DEFAULT_USER.into(),
            default_output: PathBuf::from(DEFAULT_OUTPUT_DIR),
            base_file: None,
            assets_dir: None,
            output: OutputConfig {
                no_color: false,
                format: OutputFormat::Auto,
            },
            presets: PresetsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, file and environment.
    ///
    /// `config_file` is the path passed via `--config`; it must exist.  The
    /// default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::from(Self::config_path()).required(false),
        };

        let mut builder = Config::builder()
            .set_default("user", DEFAULT_USER)?
            .set_default("default_output", DEFAULT_OUTPUT_DIR)?
            .set_default("output.no_color", false)?
            .set_default("output.format", "auto")?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        if let Some(user) = std::env::var(USER_ENV).ok().filter(|u| !u.is_empty()) {
            builder = builder.set_override("user", user)?;
        }

        builder
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.devconf.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "devconf", "devconf")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".devconf.toml"))
    }

    /// User preset directory when none is configured.
    pub fn default_presets_dir() -> PathBuf {
        directories::ProjectDirs::from("dev", "devconf", "devconf")
            .map(|d| d.config_dir().join("presets"))
            .unwrap_or_else(|| PathBuf::from(".devconf/presets"))
    }

    /// The effective user preset directory.
    pub fn presets_dir(&self) -> PathBuf {
        self.presets
            .dir
            .clone()
            .unwrap_or_else(Self::default_presets_dir)
    }

    pub fn assets_dir(&self) -> Option<&Path> {
        self.assets_dir.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_user_is_dev_user() {
        assert_eq!(AppConfig::default().user, "dev-user");
    }

    #[test]
    fn default_output_is_devcontainer() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.default_output, PathBuf::from(".devcontainer"));
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn file_values_are_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
default_output = "out"
base_file = "/etc/devconf/base.json"

[output]
format = "plain"

[presets]
dir = "/srv/presets"
"#,
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.default_output, PathBuf::from("out"));
        assert_eq!(cfg.base_file, Some(PathBuf::from("/etc/devconf/base.json")));
        assert_eq!(cfg.output.format, OutputFormat::Plain);
        assert_eq!(cfg.presets_dir(), PathBuf::from("/srv/presets"));
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let missing = PathBuf::from("/no/such/devconf.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn presets_dir_falls_back_to_default() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.presets_dir(), AppConfig::default_presets_dir());
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
