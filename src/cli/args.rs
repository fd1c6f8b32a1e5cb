// CLI argument definitions using Clap

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::config::FormatterConfig;
use crate::report::{FormatterOptions, Verbosity};

/// Replay parsed TAP event streams through the console reporter
#[derive(Parser, Debug)]
#[command(name = "tapconsole")]
#[command(author = "tapconsole team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render TAP result streams as console progress and summaries", long_about = None)]
pub struct Cli {
    /// JSON-lines event files, one per test file (`-` reads stdin)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Echo every result line
    #[arg(short = 'v', long, default_value_t = false, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Less output; twice suppresses everything but bailouts
    #[arg(short = 'q', long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Echo lines carrying SKIP/TODO directives
    #[arg(long, default_value_t = false)]
    pub directives: bool,

    /// Echo failing tests only
    #[arg(short = 'f', long, default_value_t = false)]
    pub failures: bool,

    /// Echo diagnostic comments
    #[arg(short = 'o', long, default_value_t = false)]
    pub comments: bool,

    /// Print elapsed time after each file
    #[arg(long, default_value_t = false)]
    pub timer: bool,

    /// Print elapsed time with millisecond precision
    #[arg(long, default_value_t = false)]
    pub hires: bool,

    /// Disable colored output
    #[arg(short = 'c', long, default_value_t = false)]
    pub no_color: bool,

    /// Force the running test counter on
    #[arg(long, default_value_t = false, conflicts_with = "no_show_count")]
    pub show_count: bool,

    /// Force the running test counter off
    #[arg(long, default_value_t = false)]
    pub no_show_count: bool,

    /// Configuration file (defaults to .tapconsolerc.toml lookup)
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, default_value_t = false)]
    pub verbose_log: bool,
}

impl Cli {
    /// Verbosity from flags, falling back to the configured level
    pub fn verbosity(&self, configured: Verbosity) -> Verbosity {
        match (self.verbose, self.quiet) {
            (true, _) => Verbosity::Verbose,
            (false, 0) => configured,
            (false, 1) => Verbosity::Quiet,
            (false, _) => Verbosity::ReallyQuiet,
        }
    }

    /// Merge flags over file configuration. Flags only ever switch
    /// features on, except `--no-color`.
    pub fn formatter_options(&self, config: &FormatterConfig, color_capable: bool) -> FormatterOptions {
        let base = config.to_options();
        FormatterOptions {
            verbosity: self.verbosity(base.verbosity),
            directives: self.directives || base.directives,
            failures: self.failures || base.failures,
            comments: self.comments || base.comments,
            timer: self.timer || self.hires || base.timer,
            hires_time: self.hires || base.hires_time,
            color: !self.no_color && base.color && color_capable,
        }
    }

    /// Explicit counter choice, if any
    pub fn show_count(&self) -> Option<bool> {
        match (self.show_count, self.no_show_count) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
