//! Implementation of the `devconf new-preset` command.

use tracing::instrument;

use devconf_adapters::LocalFilesystem;
use devconf_core::application::PresetService;

use crate::{cli::NewPresetArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(name = %args.name))]
pub fn execute(args: NewPresetArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let dir = args.dir.unwrap_or_else(|| config.presets_dir());

    let service = PresetService::new(
        Box::new(super::preset_store(&config)?),
        Box::new(LocalFilesystem::new()),
    );
    let path = service.scaffold(&args.name, &dir)?;

    output.success(&format!("Created preset '{}': {}", args.name, path.display()))?;
    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  1. Edit {}", path.display()))?;
    if dir != config.presets_dir() {
        output.print(&format!(
            "  2. Point presets.dir (or DEVCONF_PRESETS__DIR) at {}",
            dir.display()
        ))?;
    }
    output.print(&format!("  Then run: devconf init --preset {}", args.name))?;
    Ok(())
}
