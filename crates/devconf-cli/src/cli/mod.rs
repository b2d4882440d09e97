//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "devconf",
    bin_name = "devconf",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "DevContainer configuration generator",
    long_about = "devconf builds a devcontainer.json by layering a shared base, \
                  an optional preset and an optional project-config.json.",
    after_help = "EXAMPLES:\n\
        \x20 devconf init\n\
        \x20 devconf init --preset python --output .devcontainer\n\
        \x20 devconf list\n\
        \x20 devconf completions bash > /usr/share/bash-completion/completions/devconf",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate devcontainer.json and copy the helper scripts.
    #[command(
        about = "Initialize DevContainer configuration",
        after_help = "EXAMPLES:\n\
            \x20 devconf init                       # base configuration only\n\
            \x20 devconf init -p node               # base + node preset\n\
            \x20 devconf init -p python --dry-run   # print the result, write nothing\n\
            \x20 devconf init -o .devcontainer -f   # overwrite an existing file"
    )]
    Init(InitArgs),

    /// List available presets.
    #[command(
        visible_aliases = ["ls", "list-presets"],
        about = "List available presets",
        after_help = "EXAMPLES:\n\
            \x20 devconf list\n\
            \x20 devconf list --format json"
    )]
    List(ListArgs),

    /// Write a starter preset file.
    #[command(
        about = "Create a new preset",
        after_help = "EXAMPLES:\n\
            \x20 devconf new-preset rust\n\
            \x20 devconf new-preset go-web --dir ./presets"
    )]
    NewPreset(NewPresetArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 devconf completions bash > ~/.local/share/bash-completion/completions/devconf\n\
            \x20 devconf completions zsh  > ~/.zfunc/_devconf\n\
            \x20 devconf completions fish > ~/.config/fish/completions/devconf.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the devconf configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 devconf config get user\n\
            \x20 devconf config list\n\
            \x20 devconf config path"
    )]
    Config(ConfigCommands),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `devconf init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Preset layered on top of the base.
    #[arg(
        short = 'p',
        long = "preset",
        value_name = "NAME",
        help = "Preset name (see `devconf list`)"
    )]
    pub preset: Option<String>,

    /// Directory that receives devcontainer.json.
    ///
    /// Defaults to the `default_output` config value (`.devcontainer`).
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory"
    )]
    pub output: Option<PathBuf>,

    /// Overwrite an existing devcontainer.json.
    #[arg(short = 'f', long = "force", help = "Overwrite existing files")]
    pub force: bool,

    /// Preview the generated descriptor without writing any files.
    #[arg(
        long = "dry-run",
        help = "Show what would be done without making changes"
    )]
    pub dry_run: bool,

    /// Only write devcontainer.json.
    #[arg(long = "no-assets", help = "Do not copy helper scripts")]
    pub no_assets: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `devconf list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── new-preset ────────────────────────────────────────────────────────────────

/// Arguments for `devconf new-preset`.
#[derive(Debug, Args)]
pub struct NewPresetArgs {
    /// Preset name: lowercase letters, digits and hyphens.
    #[arg(value_name = "NAME", help = "Preset name, e.g. go-web")]
    pub name: String,

    /// Directory to write `<NAME>.json` into.
    ///
    /// Defaults to the user preset directory.
    #[arg(
        short = 'd',
        long = "dir",
        value_name = "DIR",
        help = "Target directory (default: user preset directory)"
    )]
    pub dir: Option<PathBuf>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `devconf completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `devconf config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `presets.dir`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
