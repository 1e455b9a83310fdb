//! Core configuration types.
//! - Config holds one invocation's settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::{paths, START_DELAY_DEFAULT_SECS};
use crate::archive::ArchiveOptions;

/// Program-defined verbosity levels exposed to users.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Settings for one CLI invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory whose direct children are archived
    pub origin: PathBuf,
    /// Archive root
    pub destination: PathBuf,
    /// Engine options
    pub options: ArchiveOptions,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Emit JSON log lines
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            origin: PathBuf::new(),
            destination: PathBuf::new(),
            options: ArchiveOptions {
                start_delay: Duration::from_secs(START_DELAY_DEFAULT_SECS),
                ..ArchiveOptions::default()
            },
            log_level: LogLevel::Normal,
            log_file: paths::default_log_path(),
            json: false,
        }
    }
}

impl Config {
    /// Construct a Config with explicit directories; other fields use defaults.
    pub fn new(origin: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_common_levels_case_insensitive() {
        assert_eq!(LogLevel::parse("QUIET"), Some(LogLevel::Quiet));
        assert_eq!(LogLevel::parse("normal"), Some(LogLevel::Normal));
        assert_eq!(LogLevel::parse("Verbose"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("trace"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("loud"), None);
    }

    #[test]
    fn display_roundtrips_with_fromstr() {
        for lvl in [LogLevel::Quiet, LogLevel::Normal, LogLevel::Info, LogLevel::Debug] {
            assert_eq!(LogLevel::from_str(&lvl.to_string()).unwrap(), lvl);
        }
    }

    #[test]
    fn defaults_use_cli_start_delay() {
        let cfg = Config::new("/in", "/out");
        assert_eq!(cfg.options.start_delay, Duration::from_secs(START_DELAY_DEFAULT_SECS));
        assert!(cfg.options.replace);
        assert!(!cfg.options.persist);
    }
}
