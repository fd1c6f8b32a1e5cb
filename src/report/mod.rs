// Report module - console session output and the sinks it writes to

pub mod classify;
pub mod console;
pub mod memory;
pub mod progress;
pub mod session;
pub mod summary;

use std::io;

use serde::{Deserialize, Serialize};

pub use classify::ResultStyle;
pub use console::ConsoleFormatter;
pub use memory::{Channel, MemorySink, RecordedWrite};
pub use progress::ProgressTracker;
pub use session::{Session, SessionArgs, SessionConfig};
pub use summary::Summary;

/// Terminal colors a sink may be asked to switch to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Yellow,
    White,
    OnBlue,
}

/// How chatty the formatter is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    ReallyQuiet,
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl std::str::FromStr for Verbosity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "really_quiet" => Ok(Self::ReallyQuiet),
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            other => Err(format!("unknown verbosity: {}", other)),
        }
    }
}

/// Formatter-wide settings shared by every session it hosts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatterOptions {
    pub verbosity: Verbosity,
    /// Echo lines carrying a SKIP/TODO directive
    pub directives: bool,
    /// Echo failing tests only
    pub failures: bool,
    /// Echo diagnostic comments
    pub comments: bool,
    pub timer: bool,
    /// Report elapsed time with millisecond precision
    pub hires_time: bool,
    pub color: bool,
}

impl FormatterOptions {
    pub fn really_quiet(&self) -> bool {
        self.verbosity == Verbosity::ReallyQuiet
    }

    /// True for both quiet levels
    pub fn quiet(&self) -> bool {
        self.verbosity <= Verbosity::Quiet
    }

    pub fn verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }
}

/// Where progress redraws go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressChannel {
    /// Interactive terminal: carriage-return redraws are written through
    Terminal,
    /// File or pipe: carriage-return redraws are dropped
    Redirected,
}

/// Output side of a formatter, as seen by a reporting session
pub trait OutputSink {
    fn options(&self) -> &FormatterOptions;

    /// Whether the destination is an interactive terminal
    fn is_interactive(&self) -> bool;

    /// Padded display name for a test file
    fn format_name(&self, name: &str) -> String;

    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Failure-oriented output (red when colors are on)
    fn write_failure(&mut self, text: &str) -> io::Result<()>;

    fn set_colors(&mut self, colors: &[Color]) -> io::Result<()>;

    fn reset_colors(&mut self) -> io::Result<()>;

    /// Progress channel matching the destination
    fn progress_channel(&self) -> ProgressChannel {
        if self.is_interactive() {
            ProgressChannel::Terminal
        } else {
            ProgressChannel::Redirected
        }
    }
}

/// Pad `name` with dots so names up to `longest` bytes line up
pub fn pad_name(name: &str, longest: usize) -> String {
    let dots = (longest + 2).saturating_sub(name.len()).max(1);
    format!("{} {} ", name, ".".repeat(dots))
}
