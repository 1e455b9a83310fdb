//! Archive engine.
//!
//! `archive` validates the origin, prepares the destination, lists the origin's
//! direct children, plans a target for each from its modification time and
//! then copies or moves them one by one. Problems with a single entry are
//! logged and recorded in the returned [`Summary`]; only setup failures abort
//! the run.

mod layout;
mod logger;
mod options;
mod plan;
mod summary;
mod transfer;

pub use layout::{Layout, Placement};
pub use logger::{ArchiveLogger, TracingLogger};
pub use options::{ArchiveOptions, DEFAULT_DELIMITER};
pub use plan::{build_plan, modified_local, payload_list, unique_in_order, PlanEntry, TransferPlan};
pub use summary::{EntryOutcome, Summary, TransferMode};
pub use transfer::{decide, execute, Decision};

use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::errors::ArchiveError;
use crate::formatting::Granularity;
use crate::shutdown;
use layout::display_relative;

const DELAY_SLICE: Duration = Duration::from_millis(100);

/// Archive the direct children of `origin` into `destination`.
pub fn archive(
    origin: &Path,
    destination: &Path,
    options: &ArchiveOptions,
    logger: &dyn ArchiveLogger,
) -> Result<Summary, ArchiveError> {
    if !origin.is_dir() {
        let err = ArchiveError::OriginNotFound(origin.to_path_buf());
        logger.fatal(&err.to_string());
        return Err(err);
    }
    prepare_destination(destination, logger)?;

    let origin = dunce::canonicalize(origin).map_err(|source| ArchiveError::OriginUnreadable {
        path: origin.to_path_buf(),
        source,
    })?;
    let destination =
        dunce::canonicalize(destination).map_err(|source| ArchiveError::DestinationCreateFailed {
            path: destination.to_path_buf(),
            source,
        })?;

    log_run_parameters(&origin, &destination, options, logger);

    let mut summary = Summary::default();
    if !wait_before_start(options.start_delay, logger) {
        logger.info("Quitting...");
        summary.cancelled = true;
        return Ok(summary);
    }
    logger.info("");
    logger.info("BEGINNING ARCHIVAL");

    logger.info("Building payload list.");
    let payload = payload_list(&origin, Some(destination.as_path()))?;
    let plan = build_plan(&payload, &destination, options);

    if options.layout == Layout::Nested {
        logger.info(&format!(
            "Creating nested directory structure in: {}",
            destination.display()
        ));
        create_directories(&plan, &destination, logger);
    }

    logger.info(if options.persist {
        "Copying files to their archive locations..."
    } else {
        "Moving files to their archive locations..."
    });
    let width = plan.widest_name();
    for step in steps_in_payload_order(&payload, &plan) {
        if shutdown::is_requested() {
            logger.info("Quitting...");
            summary.cancelled = true;
            break;
        }
        let outcome = match step {
            Step::Planned(entry) => process_entry(entry, &destination, options, width, logger),
            Step::Unplanned(source, reason) => {
                logger.error(&format!("Unable to plan '{}': {}", source.display(), reason));
                EntryOutcome::Failed {
                    source: source.to_path_buf(),
                    destination: None,
                    error: reason.to_string(),
                }
            }
        };
        summary.outcomes.push(outcome);
    }

    logger.info(&format!("Archival finished: {summary}"));
    Ok(summary)
}

/// Normalize `input`, falling back to Day (and logging why) when it is invalid.
pub fn resolve_granularity(input: &str, logger: &dyn ArchiveLogger) -> Granularity {
    match Granularity::normalize(input) {
        Ok(g) => g,
        Err(_) => {
            let fallback = Granularity::default();
            logger.error(&format!(
                "Bad granularity:   {} [using default: {}]",
                input,
                fallback.label(true)
            ));
            fallback
        }
    }
}

fn prepare_destination(destination: &Path, logger: &dyn ArchiveLogger) -> Result<(), ArchiveError> {
    let failed = |source| ArchiveError::DestinationCreateFailed {
        path: destination.to_path_buf(),
        source,
    };
    match fs::metadata(destination) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => {
            let err = failed(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "exists and is not a directory",
            ));
            logger.fatal(&err.to_string());
            Err(err)
        }
        Err(_) => {
            logger.info(&format!("Creating destination directory at: {}", destination.display()));
            fs::create_dir_all(destination).map_err(|e| {
                let err = failed(e);
                logger.fatal(&err.to_string());
                err
            })
        }
    }
}

fn log_run_parameters(origin: &Path, destination: &Path, options: &ArchiveOptions, logger: &dyn ArchiveLogger) {
    let g = options.granularity;
    let pattern = g.date_pattern().strftime();
    logger.info(&"-".repeat(80));
    logger.info(&format!("Archiving from:     {}", origin.display()));
    logger.info(&format!("Archiving to:       {}", destination.display()));
    logger.info(&format!("Persisting:         {}", options.persist));
    logger.info(&format!("Replacing:          {}", options.replace));
    logger.info(&format!("Updating times:     {}", options.update_timestamp));
    logger.info(&format!("Granularity set to: {} [{}]", g.label(true), g.label(false)));
    logger.info(&format!(
        "Date format set to: {} [currently: {}]",
        pattern,
        Local::now().format(&pattern)
    ));
    logger.info(&format!("Structure set to:   {}", options.layout.describe()));
    if options.layout == Layout::Flat {
        logger.info(&format!("Delimiter set to:   '{}'", options.delimiter));
    }
}

/// Sleep for `delay` in short slices. Returns false if shutdown was requested.
fn wait_before_start(delay: Duration, logger: &dyn ArchiveLogger) -> bool {
    if delay.is_zero() {
        return !shutdown::is_requested();
    }
    logger.info(&format!("Will begin in {}...", describe_delay(delay)));
    // A delay too large to represent as an Instant only ends on shutdown.
    let deadline = Instant::now().checked_add(delay);
    loop {
        if shutdown::is_requested() {
            return false;
        }
        let slice = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return true;
                }
                DELAY_SLICE.min(deadline - now)
            }
            None => DELAY_SLICE,
        };
        std::thread::sleep(slice);
    }
}

/// "1 second", "5 seconds", "1.5 seconds".
fn describe_delay(delay: Duration) -> String {
    let secs = delay.as_secs();
    if delay.subsec_nanos() != 0 {
        format!("{:.1} seconds", delay.as_secs_f64())
    } else if secs == 1 {
        "1 second".to_string()
    } else {
        format!("{secs} seconds")
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Step<'a> {
    Planned(&'a PlanEntry),
    Unplanned(&'a Path, &'a str),
}

/// Interleave planned and unplanned entries back into payload order.
fn steps_in_payload_order<'a>(payload: &'a [PathBuf], plan: &'a TransferPlan) -> Vec<Step<'a>> {
    let mut entries = plan.entries.iter().peekable();
    let mut unplanned = plan.unplanned.iter().peekable();
    let mut steps = Vec::with_capacity(payload.len());
    for source in payload {
        if let Some((path, reason)) = unplanned.next_if(|(s, _)| s == source) {
            steps.push(Step::Unplanned(path, reason));
        } else if let Some(entry) = entries.next_if(|e| &e.source == source) {
            steps.push(Step::Planned(entry));
        }
    }
    steps
}

fn create_directories(plan: &TransferPlan, destination: &Path, logger: &dyn ArchiveLogger) {
    for dir in &plan.directories {
        if dir.is_dir() {
            continue;
        }
        logger.info(&format!("  {}", display_relative(destination, dir)));
        if let Err(e) = fs::create_dir_all(dir) {
            logger.error(&format!("Unable to create directory '{}': {}", dir.display(), e));
        }
    }
}

fn process_entry(
    entry: &PlanEntry,
    destination: &Path,
    options: &ArchiveOptions,
    width: usize,
    logger: &dyn ArchiveLogger,
) -> EntryOutcome {
    let name = entry
        .source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let shown = display_relative(destination, &entry.destination);

    match decide(&entry.source, &entry.destination, options.replace) {
        Decision::Transfer => {}
        Decision::Skip => {
            logger.info(&format!("  {name:>width$} skipped ({shown} already exists)"));
            return EntryOutcome::Skipped {
                source: entry.source.clone(),
                destination: entry.destination.clone(),
            };
        }
        Decision::KeepDirectory => {
            logger.warn(&format!(
                "  {name:>width$} skipped ({shown} is an existing directory and is never replaced)"
            ));
            return EntryOutcome::Skipped {
                source: entry.source.clone(),
                destination: entry.destination.clone(),
            };
        }
    }

    let arrow = if options.persist { "=>" } else { "->" };
    logger.info(&format!("  {name:>width$} {arrow} {shown}"));
    match execute(entry, options) {
        Ok(mode) => EntryOutcome::Transferred {
            source: entry.source.clone(),
            destination: entry.destination.clone(),
            mode,
        },
        Err(e) => {
            let error = format!("{e:#}");
            logger.error(&error);
            logger.error(&format!(
                "Unable to transfer '{}' to path: {}",
                entry.source.display(),
                entry.destination.display()
            ));
            EntryOutcome::Failed {
                source: entry.source.clone(),
                destination: Some(entry.destination.clone()),
                error,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unplanned_entries_keep_their_payload_position() {
        let payload: Vec<PathBuf> = ["/in/a", "/in/b", "/in/c"].iter().map(PathBuf::from).collect();
        let plan = TransferPlan {
            entries: vec![
                PlanEntry {
                    source: PathBuf::from("/in/a"),
                    destination: PathBuf::from("/out/a"),
                },
                PlanEntry {
                    source: PathBuf::from("/in/c"),
                    destination: PathBuf::from("/out/c"),
                },
            ],
            directories: Vec::new(),
            unplanned: vec![(PathBuf::from("/in/b"), "stat failed".to_string())],
        };

        let steps = steps_in_payload_order(&payload, &plan);

        assert_eq!(
            steps,
            vec![
                Step::Planned(&plan.entries[0]),
                Step::Unplanned(Path::new("/in/b"), "stat failed"),
                Step::Planned(&plan.entries[1]),
            ]
        );
    }

    #[test]
    fn delay_wording() {
        assert_eq!(describe_delay(Duration::from_secs(1)), "1 second");
        assert_eq!(describe_delay(Duration::from_secs(0)), "0 seconds");
        assert_eq!(describe_delay(Duration::from_secs(5)), "5 seconds");
        assert_eq!(describe_delay(Duration::from_millis(1500)), "1.5 seconds");
    }
}
