//! Flags shared by every `devconf` subcommand.

use clap::Args;
use std::path::PathBuf;

/// Logging, colour and config-file switches, flattened into [`super::Cli`].
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log more of what the generator does. Repeat for more detail.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Log more detail (-v, -vv, -vvv)",
        long_help = "Log more of what devconf does on stderr:
    (none)  - Warnings and errors only
    -v      - Layers used and files written
    -vv     - Merge and asset decisions
    -vvv    - Every merge step"
    )]
    pub verbose: u8,

    /// Print nothing but errors and machine-readable data.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only print errors and requested data"
    )]
    pub quiet: bool,

    /// Plain output without ANSI colours.
    ///
    /// Any non-empty `NO_COLOR` other than a false-like value (`0`,
    /// `false`, `no`, `off`) turns this on.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        action = clap::ArgAction::SetTrue,
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Print without colours"
    )]
    pub no_color: bool,

    /// devconf settings file, used instead of the per-user one.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Read settings from FILE"
    )]
    pub config: Option<PathBuf>,
}
