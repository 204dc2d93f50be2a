//! Configuration presets for common scenarios

use super::{Config, DisplayConfig, Format, WriterConfig};

impl Config {
    /// Create configuration from environment variables
    ///
    /// `ASSAY_LOG` (or `RUST_LOG`) sets the filter, `ASSAY_LOG_FORMAT` the
    /// format, and `ASSAY_LOG_COLORS`, `ASSAY_LOG_TIME`, `ASSAY_LOG_SOURCE`
    /// toggle display options (`0` or `false` disables).
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup("ASSAY_LOG").or_else(|| lookup("RUST_LOG")) {
            config.level = level;
        }

        if let Some(format) = lookup("ASSAY_LOG_FORMAT") {
            config.format = Format::parse_lossy(&format);
        }

        config.display.apply_lookup(&lookup);
        config
    }

    /// Development configuration (pretty, debug level)
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_owned(),
            format: Format::Pretty,
            display: DisplayConfig {
                colors: true,
                source: true,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }

    /// Production configuration (JSON, info level)
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "info".to_owned(),
            format: Format::Json,
            display: DisplayConfig {
                colors: false,
                source: false,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }

    /// Test configuration (captured by the test harness)
    #[must_use]
    pub fn test() -> Self {
        Self {
            level: "debug".to_owned(),
            format: Format::Compact,
            writer: WriterConfig::Test,
            display: DisplayConfig {
                colors: false,
                time: false,
                target: true,
                source: false,
            },
        }
    }
}

impl DisplayConfig {
    fn apply_lookup(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        let flag = |key: &str| lookup(key).map(|v| v != "0" && !v.eq_ignore_ascii_case("false"));

        if let Some(colors) = flag("ASSAY_LOG_COLORS") {
            self.colors = colors;
        }
        if let Some(time) = flag("ASSAY_LOG_TIME") {
            self.time = time;
        }
        if let Some(source) = flag("ASSAY_LOG_SOURCE") {
            self.source = source;
        }
    }
}
