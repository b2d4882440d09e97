//! Implementation of the `devconf list` command.

use serde_json::json;

use devconf_adapters::LocalFilesystem;
use devconf_core::{
    application::PresetService,
    domain::{DomainError, Preset},
};

use crate::{
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Width of the name column in table output.
const NAME_WIDTH: usize = 12;

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = PresetService::new(
        Box::new(super::preset_store(&config)?),
        Box::new(LocalFilesystem::new()),
    );
    let presets = service.list()?;

    match args.format {
        ListFormat::Table => {
            output.header("Available Presets:")?;
            output.print("")?;
            for preset in &presets {
                output.print(&table_row(preset))?;
                if !preset.description.is_empty() {
                    output.detail(&format!(
                        "  {}{}",
                        " ".repeat(NAME_WIDTH + 4),
                        preset.description
                    ))?;
                }
                output.print("")?;
            }
            output.print("Usage: devconf init --preset <name>")?;
        }

        // JSON and plain lists go through `data` so pipes always get them.
        ListFormat::Json => {
            let json = serde_json::to_string_pretty(&to_json(&presets))
                .map_err(|e| DomainError::Serialization(e.to_string()))?;
            output.data(&json)?;
        }

        ListFormat::List => {
            for preset in &presets {
                output.data(&preset.name)?;
            }
        }
    }

    Ok(())
}

fn table_row(preset: &Preset) -> String {
    format!("  {:<NAME_WIDTH$} - {}", preset.name, preset.label)
}

fn to_json(presets: &[Preset]) -> serde_json::Value {
    presets
        .iter()
        .map(|p| {
            json!({
                "name": p.name,
                "label": p.label,
                "description": p.description,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use devconf_core::domain::DevContainerConfig;

    fn preset(name: &str, label: &str) -> Preset {
        Preset {
            name: name.into(),
            label: label.into(),
            description: format!("{label} development environment"),
            config: DevContainerConfig::default(),
        }
    }

    #[test]
    fn row_pads_name_column() {
        assert_eq!(
            table_row(&preset("node", "Node.js/TypeScript")),
            "  node         - Node.js/TypeScript"
        );
    }

    #[test]
    fn json_lists_name_label_description() {
        let value = to_json(&[preset("bun", "Bun")]);
        assert_eq!(
            value,
            json!([{
                "name": "bun",
                "label": "Bun",
                "description": "Bun development environment"
            }])
        );
    }
}
