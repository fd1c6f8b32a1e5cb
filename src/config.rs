// Configuration file handling

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::report::{FormatterOptions, Verbosity};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub formatter: FormatterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatterConfig {
    /// Enable colored output
    #[serde(default = "default_color")]
    pub color: bool,

    /// Print elapsed time for each file
    #[serde(default)]
    pub timer: bool,

    /// Elapsed time with millisecond precision
    #[serde(default)]
    pub hires_time: bool,

    /// Echo lines carrying SKIP/TODO directives
    #[serde(default)]
    pub directives: bool,

    /// Echo failing tests
    #[serde(default)]
    pub failures: bool,

    /// Echo diagnostic comments
    #[serde(default)]
    pub comments: bool,

    /// One of really_quiet, quiet, normal, verbose
    #[serde(default)]
    pub verbosity: Verbosity,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            timer: false,
            hires_time: false,
            directives: false,
            failures: false,
            comments: false,
            verbosity: Verbosity::Normal,
        }
    }
}

// Default values
pub const CONFIG_FILE_NAMES: [&str; 2] = [".tapconsolerc.toml", ".tapconsolerc"];

fn default_color() -> bool {
    true
}

impl FormatterConfig {
    /// Formatter options before command-line overrides
    pub fn to_options(&self) -> FormatterOptions {
        FormatterOptions {
            verbosity: self.verbosity,
            directives: self.directives,
            failures: self.failures,
            comments: self.comments,
            timer: self.timer,
            hires_time: self.hires_time,
            color: self.color,
        }
    }
}

impl Config {
    /// Load configuration from default locations
    pub fn load() -> Option<Self> {
        // Check locations in order:
        // 1. .tapconsolerc.toml (current directory)
        // 2. .tapconsolerc (current directory)
        // 3. ~/.tapconsolerc.toml (home directory)
        // 4. ~/.tapconsolerc (home directory)

        let cwd = std::env::current_dir().ok()?;
        let home = dirs::home_dir();

        let mut paths: Vec<_> = CONFIG_FILE_NAMES.iter().map(|n| cwd.join(n)).collect();
        if let Some(home) = home {
            paths.extend(CONFIG_FILE_NAMES.iter().map(|n| home.join(n)));
        }

        for path in &paths {
            if path.exists() {
                tracing::debug!("Loading config from {}", path.display());
                return Self::load_from_file(path);
            }
        }

        None
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Option<Self> {
        match toml::from_str(content) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("Ignoring invalid config: {}", e);
                None
            }
        }
    }

    /// Generate default configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|_| String::new())
    }
}
