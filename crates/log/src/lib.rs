//! # assay-log
//!
//! Logging sink for assay. The engine emits `tracing` events; this crate
//! installs a `tracing-subscriber` registry that prints them.
//!
//! ```rust,no_run
//! // Reads ASSAY_LOG / RUST_LOG, ASSAY_LOG_FORMAT, ASSAY_LOG_COLORS, ...
//! let _logger = assay_log::init().expect("logger");
//!
//! // Or start from a preset
//! let _logger = assay_log::init_with(assay_log::Config::development());
//! ```
//!
//! Level names `warning` and `critical` are accepted as aliases of `warn`
//! and `error`.

mod builder;
mod config;
mod error;

pub use builder::{LoggerBuilder, LoggerInfo};
pub use config::{Config, DisplayConfig, Format, WriterConfig, normalize_filter};
pub use error::{LogError, LogResult};

/// Installs the global logger from environment variables.
pub fn init() -> LogResult<LoggerInfo> {
    init_with(Config::from_env())
}

/// Installs the global logger from `config`.
pub fn init_with(config: Config) -> LogResult<LoggerInfo> {
    LoggerBuilder::from_config(config).build()
}
