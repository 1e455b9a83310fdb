//! Typed error definitions for archive_manager.
//! Covers the failures that invalidate a whole run; per-entry I/O problems are
//! recorded in the run summary instead, and a user interrupt is a summary flag.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit status for setup failures reported as [`ArchiveError`].
pub const EXIT_FATAL: u8 = 1;
/// Exit status for any other failure escaping the run.
pub const EXIT_UNCAUGHT: u8 = 3;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("No such origin directory: {0}")]
    OriginNotFound(PathBuf),

    #[error("Cannot read origin directory {path}: {source}")]
    OriginUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create destination directory {path}: {source}")]
    DestinationCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No such granularity: {0}")]
    InvalidGranularity(String),
}

impl ArchiveError {
    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u16 {
        match self {
            ArchiveError::OriginNotFound(_) => 10,
            ArchiveError::OriginUnreadable { .. } => 11,
            ArchiveError::DestinationCreateFailed { .. } => 20,
            ArchiveError::InvalidGranularity(_) => 30,
        }
    }

    /// Short machine-friendly kind label.
    pub fn kind(&self) -> &'static str {
        match self {
            ArchiveError::OriginNotFound(_) => "origin_not_found",
            ArchiveError::OriginUnreadable { .. } => "origin_unreadable",
            ArchiveError::DestinationCreateFailed { .. } => "destination_create_failed",
            ArchiveError::InvalidGranularity(_) => "invalid_granularity",
        }
    }
}
