//! Application orchestrator.
//! Builds the config from CLI flags, initializes logging, installs the Ctrl-C
//! handler, resolves the granularity and runs the archive engine.

use anyhow::{Context, Result};
use std::sync::{Arc, Mutex};
use tracing::{debug, error};

use archive_manager::cli::Args;
use archive_manager::output as out;
use archive_manager::{archive, resolve_granularity, shutdown, ArchiveLogger, TracingLogger};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    let mut cfg = args.to_config();

    let guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), cfg.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    // First interrupt stops the run between entries; a second one flushes the
    // log file and exits immediately.
    let guard_slot = Arc::new(Mutex::new(guard));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            if shutdown::is_requested() {
                if let Ok(mut g) = guard_slot.lock() {
                    let _ = g.take();
                }
                std::process::exit(130);
            }
            shutdown::request();
            out::print_warn("Received interrupt; stopping after the current entry...");
        })
        .context("failed to install signal handler")?;
    }

    debug!("Starting archive_manager: {:?}", args);

    let logger = TracingLogger;
    cfg.options.granularity = resolve_granularity(&args.granularity, &logger);

    let result = (|| -> Result<()> {
        cfg.validate()?;
        match archive(&cfg.origin, &cfg.destination, &cfg.options, &logger) {
            Ok(summary) => {
                if summary.cancelled {
                    logger.fatal("Interrupt given. Forced to quit.");
                }
                out::print_summary(&summary);
                Ok(())
            }
            Err(e) => {
                error!(code = e.code(), kind = e.kind(), error = %e, "Archival aborted");
                Err(e.into())
            }
        }
    })();

    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}
