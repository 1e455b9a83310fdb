//! Logger collaborator injected into the engine.
//!
//! The engine only needs leveled line output; where it ends up (console,
//! file, JSON) is decided by the binary's tracing setup.

use tracing::{error, info, warn};

pub trait ArchiveLogger {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    /// Unrecoverable condition for the run.
    fn fatal(&self, message: &str);
}

/// Forwards every line to `tracing` under the `archive` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl ArchiveLogger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "archive", "{message}");
    }

    fn warn(&self, message: &str) {
        warn!(target: "archive", "{message}");
    }

    fn error(&self, message: &str) {
        error!(target: "archive", "{message}");
    }

    fn fatal(&self, message: &str) {
        error!(target: "archive", fatal = true, "{message}");
    }
}
