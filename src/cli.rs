//! CLI definition and parsing.
//!
//! Notes:
//! - --granularity is kept as text; the app resolves it after logging is up so
//!   a bad value can be reported and replaced by the default.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;
use std::time::Duration;

use crate::archive::{Layout, DEFAULT_DELIMITER};
use crate::config::types::{Config, LogLevel};
use crate::config::{LOG_LEVEL_ENV, START_DELAY_DEFAULT_SECS};

/// Archive files from ORIGIN into DESTINATION, organized by modification date.
///
/// Granularity may be given as a number or a word:
/// 1 Year, 2 Month, 3 Day, 4 Hour, 5 Minute, 6 Second.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Directory whose direct children are archived.
    #[arg(value_name = "ORIGIN", value_hint = ValueHint::DirPath)]
    pub origin: PathBuf,

    /// Archive root; created if missing.
    #[arg(value_name = "DESTINATION", value_hint = ValueHint::DirPath)]
    pub destination: PathBuf,

    /// How much of the date to use (1-6 or year..second).
    #[arg(long, value_name = "GRAIN", default_value = "day")]
    pub granularity: String,

    /// Put everything directly in DESTINATION, prefixing names with the date.
    #[arg(long)]
    pub flat: bool,

    /// Separator between date parts in flat names.
    #[arg(long, default_value = DEFAULT_DELIMITER)]
    pub delimiter: String,

    /// Leave files that already exist in DESTINATION alone.
    #[arg(long)]
    pub no_replace: bool,

    /// Copy instead of move; originals stay in ORIGIN.
    #[arg(long)]
    pub persist: bool,

    /// Set access/modification times of archived files to now.
    #[arg(long)]
    pub update_time: bool,

    /// Log to the console only (no log file).
    #[arg(short = 'n', long)]
    pub no_log: bool,

    /// Write the log file here instead of the default location (ignored with --no-log).
    #[arg(short = 'l', long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub log_dest: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Set log level: quiet, normal, info, debug.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,

    /// Seconds to wait before the first transfer.
    #[arg(long, value_name = "SECS", default_value_t = START_DELAY_DEFAULT_SECS)]
    pub start_delay: u64,
}

impl Args {
    /// Precedence: --debug > --log-level > $ARCHIVE_MANAGER_LOG_LEVEL.
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        if let Some(lvl) = self.log_level.as_deref().and_then(LogLevel::parse) {
            return Some(lvl);
        }
        std::env::var(LOG_LEVEL_ENV)
            .ok()
            .as_deref()
            .and_then(LogLevel::parse)
    }

    pub fn layout(&self) -> Layout {
        if self.flat { Layout::Flat } else { Layout::Nested }
    }

    /// Build a Config from the parsed flags. Granularity is left at its default.
    pub fn to_config(&self) -> Config {
        let mut cfg = Config::new(&self.origin, &self.destination);
        self.apply_overrides(&mut cfg);
        cfg
    }

    /// Apply CLI flags to a Config (in-place).
    pub fn apply_overrides(&self, cfg: &mut Config) {
        cfg.origin = self.origin.clone();
        cfg.destination = self.destination.clone();
        cfg.options.layout = self.layout();
        cfg.options.delimiter = self.delimiter.clone();
        cfg.options.replace = !self.no_replace;
        cfg.options.persist = self.persist;
        cfg.options.update_timestamp = self.update_time;
        cfg.options.start_delay = Duration::from_secs(self.start_delay);
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.no_log {
            cfg.log_file = None;
        } else if let Some(dest) = &self.log_dest {
            cfg.log_file = Some(dest.clone());
        }
        cfg.json = self.json;
    }
}

pub fn parse() -> Args {
    Args::parse()
}
