//! `devconf config`: inspect configuration values.

use crate::{
    cli::ConfigCommands,
    config::{AppConfig, OutputFormat},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.data(&value)?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.data(serialised.trim_end())?;
            if config.presets.dir.is_none() {
                output.detail(&format!(
                    "# presets.dir = {:?} (default)",
                    AppConfig::default_presets_dir().display().to_string()
                ))?;
            }
        }

        ConfigCommands::Path => {
            output.data(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let path_or_empty =
        |p: Option<&std::path::Path>| p.map(|p| p.display().to_string()).unwrap_or_default();

    match key {
        "user" => Ok(config.user.clone()),
        "default_output" => Ok(config.default_output.display().to_string()),
        "base_file" => Ok(path_or_empty(config.base_file.as_deref())),
        "assets_dir" => Ok(path_or_empty(config.assets_dir.as_deref())),
        "presets.dir" => Ok(config.presets_dir().display().to_string()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(match config.output.format {
            OutputFormat::Auto => "auto",
            OutputFormat::Human => "human",
            OutputFormat::Plain => "plain",
        }
        .to_string()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}
