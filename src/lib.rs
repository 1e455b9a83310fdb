//! Core library for `archive_manager`.
//!
//! Moves or copies the direct children of an origin directory into a
//! destination organized by each entry's modification time, either as nested
//! date directories (`2024/03/07/name`) or as date-prefixed names
//! (`2024.03.07.name`).
//!
//! The engine lives in [`archive`]; [`formatting`] turns a granularity into the
//! date components used for placement.

pub mod archive;
pub mod cli;
pub mod config;
pub mod errors;
pub mod formatting;
pub mod fs_ops;
pub mod output;
pub mod platform;
pub mod shutdown;

pub use archive::{
    archive, resolve_granularity, ArchiveLogger, ArchiveOptions, EntryOutcome, Layout, Summary,
    TracingLogger, TransferMode,
};
pub use config::{default_log_path, path_has_symlink_ancestor, Config, LogLevel};
pub use errors::ArchiveError;
pub use formatting::{date_pattern, DateComponent, DatePattern, Granularity};
