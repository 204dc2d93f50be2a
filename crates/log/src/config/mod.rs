//! Configuration types
//!
//! - `Config`: level filter, format, writer and display options
//! - `presets`: environment loading and ready-made setups

mod presets;

use serde::{Deserialize, Serialize};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Level filter, e.g. `"info"` or `"debug,assay_check=trace"`
    pub level: String,

    /// Output format
    pub format: Format,

    /// Output destination
    pub writer: WriterConfig,

    /// Display configuration
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: Format::Compact,
            writer: WriterConfig::Stderr,
            display: DisplayConfig::default(),
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Human-readable, multi-line
    Pretty,
    /// Single-line
    #[default]
    Compact,
    /// One JSON object per event
    Json,
}

impl Format {
    /// Parses a format name; unknown names fall back to `Compact`.
    pub fn parse_lossy(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "pretty" => Self::Pretty,
            "json" => Self::Json,
            _ => Self::Compact,
        }
    }
}

/// Output destination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum WriterConfig {
    #[default]
    Stderr,
    Stdout,
    /// Captured by the test harness.
    Test,
}

/// Display configuration
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use ANSI colors
    pub colors: bool,
    /// Show timestamps
    pub time: bool,
    /// Show target module
    pub target: bool,
    /// Show source location (`file:line`)
    pub source: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            colors: std::io::IsTerminal::is_terminal(&std::io::stderr()),
            time: true,
            target: true,
            source: cfg!(debug_assertions),
        }
    }
}

/// Rewrites level aliases in a filter string: `warning` becomes `warn` and
/// `critical` becomes `error`. Targets are left untouched.
pub fn normalize_filter(filter: &str) -> String {
    filter
        .split(',')
        .map(|directive| {
            let directive = directive.trim();
            match directive.rsplit_once('=') {
                Some((target, level)) => format!("{target}={}", normalize_level(level)),
                None => normalize_level(directive).to_owned(),
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn normalize_level(level: &str) -> &str {
    if level.eq_ignore_ascii_case("warning") {
        "warn"
    } else if level.eq_ignore_ascii_case("critical") {
        "error"
    } else {
        level
    }
}
