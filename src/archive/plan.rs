//! Payload listing and transfer planning.
//!
//! Everything here reads the origin only; nothing in the destination is
//! touched until the plan has been computed for every entry.

use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::fs;
use std::hash::Hash;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::layout::Layout;
use super::options::ArchiveOptions;
use crate::errors::ArchiveError;
use crate::fs_ops::io_error_with_help_io;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub source: PathBuf,
    pub destination: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferPlan {
    pub entries: Vec<PlanEntry>,
    /// Absolute directories to create before any transfer, first-seen order.
    pub directories: Vec<PathBuf>,
    /// Entries whose target could not be computed, with the reason.
    pub unplanned: Vec<(PathBuf, String)>,
}

impl TransferPlan {
    /// Length of the widest source file name, for aligned log lines.
    pub fn widest_name(&self) -> usize {
        self.entries
            .iter()
            .filter_map(|e| e.source.file_name())
            .map(|n| n.to_string_lossy().chars().count())
            .max()
            .unwrap_or(0)
    }
}

/// Direct children of `origin` as absolute paths, sorted. `exclude` is left out
/// so a destination living inside the origin is never archived into itself.
pub fn payload_list(origin: &Path, exclude: Option<&Path>) -> Result<Vec<PathBuf>, ArchiveError> {
    let unreadable = |source: io::Error| ArchiveError::OriginUnreadable {
        path: origin.to_path_buf(),
        source,
    };
    let mut payload = Vec::new();
    for entry in fs::read_dir(origin).map_err(unreadable)? {
        let path = entry.map_err(unreadable)?.path();
        if exclude.is_some_and(|ex| ex == path) {
            debug!(path = %path.display(), "leaving destination out of payload");
            continue;
        }
        payload.push(path);
    }
    payload.sort();
    Ok(payload)
}

/// Local modification time, following symlinks where the target exists.
pub fn modified_local(path: &Path) -> io::Result<DateTime<Local>> {
    let meta = fs::metadata(path)
        .or_else(|_| fs::symlink_metadata(path))
        .map_err(io_error_with_help_io("stat", path))?;
    let modified = meta.modified().map_err(io_error_with_help_io("read mtime of", path))?;
    Ok(DateTime::<Local>::from(modified))
}

/// Compute the target of every payload entry.
pub fn build_plan(payload: &[PathBuf], destination: &Path, options: &ArchiveOptions) -> TransferPlan {
    let pattern = options.granularity.date_pattern();
    let mut plan = TransferPlan::default();
    let mut subdirs = Vec::new();

    for source in payload {
        let Some(file_name) = source.file_name() else {
            plan.unplanned
                .push((source.clone(), "entry has no file name".to_string()));
            continue;
        };
        let modified = match modified_local(source) {
            Ok(t) => t,
            Err(e) => {
                plan.unplanned
                    .push((source.clone(), e.to_string()));
                continue;
            }
        };

        let components = pattern.render(&modified);
        let placement = options.layout.place(&components, file_name, &options.delimiter);
        if let Some(subdir) = placement.subdir {
            subdirs.push(subdir);
        }
        let target = destination.join(&placement.relative);
        debug!(src = %source.display(), dest = %target.display(), "planned");
        plan.entries.push(PlanEntry {
            source: source.clone(),
            destination: target,
        });
    }

    if options.layout == Layout::Nested {
        plan.directories = unique_in_order(subdirs)
            .into_iter()
            .map(|d| destination.join(d))
            .collect();
    }
    plan
}

/// Drop duplicates, keeping the first occurrence of each item.
pub fn unique_in_order<T: Eq + Hash + Clone>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        if seen.insert(item.clone()) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::Granularity;
    use chrono::TimeZone;
    use filetime::{set_file_mtime, FileTime};
    use tempfile::tempdir;

    fn set_local_mtime(path: &Path, y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) {
        let t = Local.with_ymd_and_hms(y, mo, d, h, mi, s).single().unwrap();
        set_file_mtime(path, FileTime::from_unix_time(t.timestamp(), 0)).unwrap();
    }

    #[test]
    fn unique_in_order_keeps_first_seen() {
        assert_eq!(unique_in_order(vec![3, 1, 3, 2, 1]), vec![3, 1, 2]);
        assert!(unique_in_order(Vec::<u8>::new()).is_empty());
    }

    #[test]
    fn payload_is_sorted_and_excludes() {
        let td = tempdir().unwrap();
        for name in ["c.txt", "a.txt", "b.txt"] {
            fs::write(td.path().join(name), b"x").unwrap();
        }
        fs::create_dir(td.path().join("out")).unwrap();
        let out = td.path().join("out");

        let payload = payload_list(td.path(), Some(out.as_path())).unwrap();
        let names: Vec<_> = payload
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
        assert!(payload.iter().all(|p| p.is_absolute()));
    }

    #[test]
    fn payload_of_missing_origin_is_unreadable() {
        let td = tempdir().unwrap();
        let err = payload_list(&td.path().join("nope"), None).unwrap_err();
        assert!(matches!(err, ArchiveError::OriginUnreadable { .. }));
    }

    #[test]
    fn nested_plan_dedups_directories() {
        let td = tempdir().unwrap();
        let origin = td.path().join("in");
        let dest = td.path().join("out");
        fs::create_dir(&origin).unwrap();
        for (name, day) in [("a", 17), ("b", 17), ("c", 18)] {
            let p = origin.join(name);
            fs::write(&p, b"x").unwrap();
            set_local_mtime(&p, 2023, 5, day, 10, 0, 0);
        }

        let payload = payload_list(&origin, None).unwrap();
        let plan = build_plan(&payload, &dest, &ArchiveOptions::default());

        assert_eq!(
            plan.directories,
            vec![dest.join("2023/05/17"), dest.join("2023/05/18")]
        );
        assert_eq!(plan.entries[1].destination, dest.join("2023/05/17/b"));
        assert_eq!(plan.entries[2].destination, dest.join("2023/05/18/c"));
        assert_eq!(plan.widest_name(), 1);
    }

    #[test]
    fn flat_plan_has_no_directories() {
        let td = tempdir().unwrap();
        let f = td.path().join("report.pdf");
        fs::write(&f, b"x").unwrap();
        set_local_mtime(&f, 2023, 5, 17, 10, 42, 7);
        let dest = td.path().join("out");

        let mut opts = ArchiveOptions::new(Granularity::Minute, Layout::Flat);
        opts.delimiter = "-".into();
        let plan = build_plan(&[f], &dest, &opts);

        assert!(plan.directories.is_empty());
        assert_eq!(plan.entries[0].destination, dest.join("2023-05-17-10-42-report.pdf"));
    }

    #[test]
    fn vanished_entry_is_unplanned() {
        let td = tempdir().unwrap();
        let ghost = td.path().join("ghost");
        let plan = build_plan(&[ghost.clone()], td.path(), &ArchiveOptions::default());
        assert!(plan.entries.is_empty());
        assert_eq!(plan.unplanned[0].0, ghost);
        assert!(plan.unplanned[0].1.starts_with("stat "), "reason: {}", plan.unplanned[0].1);
    }
}
