//! Terminal output for `devconf` commands.
//!
//! Progress lines go through the status methods and vanish under `--quiet`.
//! Generated JSON and preset listings go through [`OutputManager::data`].

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;

use crate::cli::GlobalArgs;
use crate::config::{AppConfig, OutputFormat};

/// Writes command output to stdout, coloured unless disabled.
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Colour is off under `--no-color` or `output.no_color`, and whenever
    /// the resolved format is plain.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // `auto` follows whether stdout is a terminal.
        let resolved_format = match config.output.format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            explicit => explicit,
        };

        Self {
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format == OutputFormat::Plain,
            term: Term::stdout(),
        }
    }

    /// Unstyled status line, e.g. a "Next steps" entry.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// `✓` line for a finished write.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// `⚠` line, used for descriptor validation warnings.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// `ℹ` line for layer choices and dry-run notices.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Section heading such as "Available Presets:".
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Dimmed secondary line, e.g. a preset description.
    pub fn detail(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.dimmed().to_string()
        };
        self.term.write_line(&line)
    }

    /// Descriptor JSON and preset lists. Printed even under `--quiet`.
    pub fn data(&self, text: &str) -> io::Result<()> {
        self.term.write_line(text)
    }

    /// Whether error reports may use colour too.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(quiet: bool, no_color: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
        };
        let mut config = AppConfig::default();
        config.output.format = format;
        OutputManager::new(&args, &config)
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.print("hello").is_ok());
    }

    #[test]
    fn data_is_written_in_quiet_mode() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.data("[]").is_ok());
    }

    #[test]
    fn no_color_flag_reported() {
        let colored = make_manager(false, false, OutputFormat::Human);
        let no_color = make_manager(false, true, OutputFormat::Human);
        assert!(colored.supports_color());
        assert!(!no_color.supports_color());
    }

    #[test]
    fn plain_format_disables_color() {
        let out = make_manager(false, false, OutputFormat::Plain);
        assert!(!out.supports_color());
    }
}
