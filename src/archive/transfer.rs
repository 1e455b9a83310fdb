//! Transfer step for a single plan entry.

use anyhow::{bail, Result};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

use super::options::ArchiveOptions;
use super::plan::PlanEntry;
use super::summary::TransferMode;
use crate::fs_ops::{copy_entry, io_error_with_help, move_entry, touch_now};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Transfer,
    /// Target exists and replacing is off.
    Skip,
    /// Source and target are both directories; directories are never replaced.
    KeepDirectory,
}

/// Always transfer when replacing; otherwise only into a free target.
/// A directory landing on an existing directory is kept either way.
pub fn decide(source: &Path, target: &Path, replace: bool) -> Decision {
    let existing = fs::symlink_metadata(target).ok();
    match existing {
        None => Decision::Transfer,
        Some(meta) if meta.is_dir() && source.is_dir() => Decision::KeepDirectory,
        Some(_) if replace => Decision::Transfer,
        Some(_) => Decision::Skip,
    }
}

/// Remove whatever non-directory occupies `target` (files, symlinks).
fn clear_target(target: &Path) -> Result<()> {
    match fs::symlink_metadata(target) {
        Ok(meta) if meta.is_dir() => {
            bail!("target '{}' is an existing directory; refusing to replace it", target.display())
        }
        Ok(_) => {
            fs::remove_file(target).map_err(io_error_with_help("remove existing target", target))?;
            debug!(path = %target.display(), "removed existing target");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(io_error_with_help("stat target", target)(e)),
    }
}

/// Copy or move `entry.source` onto `entry.destination`.
pub fn execute(entry: &PlanEntry, options: &ArchiveOptions) -> Result<TransferMode> {
    clear_target(&entry.destination)?;
    let mode = if options.persist {
        copy_entry(&entry.source, &entry.destination)?;
        TransferMode::Copied
    } else {
        move_entry(&entry.source, &entry.destination)?;
        TransferMode::Moved
    };
    if options.update_timestamp {
        touch_now(&entry.destination)?;
    }
    Ok(mode)
}
