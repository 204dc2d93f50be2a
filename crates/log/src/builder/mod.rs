//! Logger builder
//!
//! - `format`: format layer creation macros

#[macro_use]
mod format;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, Format, WriterConfig, normalize_filter};
use crate::error::{LogError, LogResult};

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

/// Settings of the installed global logger.
///
/// The subscriber lives for the rest of the process; dropping this value
/// does not uninstall it.
#[derive(Debug)]
pub struct LoggerInfo {
    filter: String,
    format: Format,
}

impl LoggerInfo {
    /// The effective filter, after level aliases were normalized.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn format(&self) -> Format {
        self.format
    }
}

/// Installs `Registry + filter + fmt layer` as the global default.
macro_rules! init_subscriber {
    ($filter:expr, $fmt_layer:expr) => {
        Registry::default()
            .with($filter)
            .with($fmt_layer)
            .try_init()
            .map_err(|e| LogError::Init(e.to_string()))
    };
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Parses the level filter without installing anything.
    ///
    /// # Errors
    ///
    /// [`LogError::Filter`] if a directive cannot be parsed.
    pub fn filter(&self) -> LogResult<EnvFilter> {
        let level = normalize_filter(&self.config.level);
        EnvFilter::try_new(&level).map_err(|e| LogError::Filter {
            filter: self.config.level.clone(),
            reason: e.to_string(),
        })
    }

    /// Build and install the global logger
    ///
    /// # Errors
    ///
    /// - [`LogError::Filter`] if the level filter cannot be parsed
    /// - [`LogError::Init`] if a global subscriber is already installed
    pub fn build(self) -> LogResult<LoggerInfo> {
        let filter = self.filter()?;
        let display = &self.config.display;
        let writer = make_writer(self.config.writer);

        match self.config.format {
            Format::Pretty => {
                init_subscriber!(filter, create_fmt_layer!(pretty, display, writer))?;
            }
            Format::Compact => {
                init_subscriber!(filter, create_fmt_layer!(compact, display, writer))?;
            }
            Format::Json => {
                init_subscriber!(filter, create_json_layer!(display, writer))?;
            }
        }

        Ok(LoggerInfo {
            filter: normalize_filter(&self.config.level),
            format: self.config.format,
        })
    }
}

fn make_writer(writer: WriterConfig) -> BoxMakeWriter {
    match writer {
        WriterConfig::Stderr => BoxMakeWriter::new(std::io::stderr),
        WriterConfig::Stdout => BoxMakeWriter::new(std::io::stdout),
        WriterConfig::Test => BoxMakeWriter::new(tracing_subscriber::fmt::TestWriter::new()),
    }
}
