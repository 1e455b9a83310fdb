//! Options for a single archival run.

use std::time::Duration;

use super::layout::Layout;
use crate::formatting::Granularity;

pub const DEFAULT_DELIMITER: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOptions {
    pub granularity: Granularity,
    pub layout: Layout,
    /// Joins date components in flat names; ignored for nested layout.
    pub delimiter: String,
    /// Overwrite an existing target instead of skipping the entry.
    pub replace: bool,
    /// Copy instead of move.
    pub persist: bool,
    /// Reset atime/mtime of each target to now after transfer.
    pub update_timestamp: bool,
    /// Pause between logging the run parameters and the first transfer.
    pub start_delay: Duration,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            granularity: Granularity::Day,
            layout: Layout::Nested,
            delimiter: DEFAULT_DELIMITER.to_string(),
            replace: true,
            persist: false,
            update_timestamp: false,
            start_delay: Duration::ZERO,
        }
    }
}

impl ArchiveOptions {
    pub fn new(granularity: Granularity, layout: Layout) -> Self {
        Self {
            granularity,
            layout,
            ..Default::default()
        }
    }
}
