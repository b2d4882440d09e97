//! Implementation of the `devconf init` command.
//!
//! Responsibility: pick the base layer and adapters from configuration, call
//! the core generate service, and display results. No merge logic lives here.

use tracing::{info, instrument};

use devconf_adapters::{JsonProjectLoader, LocalFilesystem, assets, builtin_presets};
use devconf_core::{
    application::{GenerateOutcome, GenerateRequest, GenerateService},
    domain::DevContainerConfig,
};

use crate::{cli::InitArgs, config::AppConfig, error::CliResult, output::OutputManager};

/// Execute the `devconf init` command.
///
/// 1. Resolve the base layer (built-in or `base_file`)
/// 2. Build the preset registry and adapters
/// 3. Generate (or preview) the descriptor and assets
/// 4. Report the outcome
#[instrument(skip_all, fields(preset = args.preset.as_deref().unwrap_or("<base>")))]
pub fn execute(args: InitArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| config.default_output.clone());

    output.header("Initializing DevContainer configuration...")?;

    match args.preset.as_deref() {
        Some(name) => output.info(&format!("Using preset: {name}"))?,
        None => output.info("Using base configuration only (no preset)")?,
    }

    let service = GenerateService::new(
        load_base(&config)?,
        Box::new(super::preset_store(&config)?),
        Box::new(JsonProjectLoader::new()),
        Box::new(LocalFilesystem::new()),
        assets::resolve(config.assets_dir()),
    );

    let mut request = GenerateRequest::new(&output_dir)
        .force(args.force)
        .dry_run(args.dry_run)
        .copy_assets(!args.no_assets);
    if let Some(preset) = args.preset {
        request = request.with_preset(preset);
    }

    let outcome = service.generate(&request)?;

    if outcome.used_project_override {
        output.info("Applied project-config.json")?;
    }
    for warning in &outcome.warnings {
        output.warning(warning)?;
    }

    if outcome.written {
        report_written(&outcome, &output)
    } else {
        report_dry_run(&outcome, &output)
    }
}

fn load_base(config: &AppConfig) -> CliResult<DevContainerConfig> {
    match &config.base_file {
        Some(path) => {
            info!(path = %path.display(), "Using custom base layer");
            Ok(builtin_presets::base_from_file(path, &config.user)?)
        }
        None => Ok(builtin_presets::base_config(&config.user)?),
    }
}

fn report_dry_run(outcome: &GenerateOutcome, output: &OutputManager) -> CliResult<()> {
    output.print("")?;
    output.info("Dry run mode - no files will be created")?;
    output.print(&format!(
        "Would create: {}",
        outcome.descriptor_path.display()
    ))?;
    for asset in &outcome.assets {
        output.print(&format!("Would copy: {}", asset.display()))?;
    }
    output.print("")?;
    output.data(outcome.json.trim_end())?;
    Ok(())
}

fn report_written(outcome: &GenerateOutcome, output: &OutputManager) -> CliResult<()> {
    output.success(&format!("Created: {}", outcome.descriptor_path.display()))?;
    for asset in &outcome.assets {
        output.success(&format!("Copied: {}", asset.display()))?;
    }

    output.print("")?;
    output.success("DevContainer configuration generated successfully!")?;
    output.print("")?;
    output.print("Next steps:")?;
    output.print("  1. Open your project in VS Code")?;
    output.print("  2. Dev Containers: Reopen in Container")?;
    Ok(())
}
