//! Runtime configuration for the CLI.
//! Provides the Config type, log levels, default paths and validation.

pub mod paths;
pub mod types;
mod validate;

pub use paths::{default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};

/// Environment variable consulted for the log level when no flag sets one.
pub const LOG_LEVEL_ENV: &str = "ARCHIVE_MANAGER_LOG_LEVEL";

/// Seconds to wait after printing the run parameters (CLI default).
pub const START_DELAY_DEFAULT_SECS: u64 = 1;
