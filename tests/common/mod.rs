#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use archive_manager::ArchiveLogger;
use chrono::{Local, TimeZone};
use filetime::{set_file_mtime, FileTime};
use tempfile::TempDir;

/// Logger that keeps every line for assertions.
#[derive(Default)]
pub struct RecordingLogger {
    pub lines: RefCell<Vec<(&'static str, String)>>,
}

impl RecordingLogger {
    pub fn contains(&self, level: &str, needle: &str) -> bool {
        self.lines
            .borrow()
            .iter()
            .any(|(l, m)| *l == level && m.contains(needle))
    }
}

impl ArchiveLogger for RecordingLogger {
    fn info(&self, message: &str) {
        self.lines.borrow_mut().push(("info", message.to_string()));
    }
    fn warn(&self, message: &str) {
        self.lines.borrow_mut().push(("warn", message.to_string()));
    }
    fn error(&self, message: &str) {
        self.lines.borrow_mut().push(("error", message.to_string()));
    }
    fn fatal(&self, message: &str) {
        self.lines.borrow_mut().push(("fatal", message.to_string()));
    }
}

/// Canonical temp root with `in/` created and `out/` left for the engine.
pub struct Workspace {
    _td: TempDir,
    pub origin: PathBuf,
    pub destination: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let td = tempfile::tempdir().expect("tempdir");
        let base = fs::canonicalize(td.path()).expect("canonicalize tempdir");
        let origin = base.join("in");
        fs::create_dir_all(&origin).expect("create origin");
        Self {
            _td: td,
            origin,
            destination: base.join("out"),
        }
    }

    /// Write `contents` to origin/`name` and stamp it with a local mtime.
    pub fn add_file(&self, name: &str, contents: &str, when: (i32, u32, u32, u32, u32, u32)) -> PathBuf {
        let p = self.origin.join(name);
        fs::write(&p, contents).expect("write file");
        set_local_mtime(&p, when);
        p
    }
}

pub fn set_local_mtime(path: &Path, (y, mo, d, h, mi, s): (i32, u32, u32, u32, u32, u32)) {
    let t = Local
        .with_ymd_and_hms(y, mo, d, h, mi, s)
        .single()
        .expect("unambiguous local time");
    set_file_mtime(path, FileTime::from_unix_time(t.timestamp(), 0)).expect("set mtime");
}

pub const MAY_17: (i32, u32, u32, u32, u32, u32) = (2023, 5, 17, 10, 0, 0);
pub const MAY_18: (i32, u32, u32, u32, u32, u32) = (2023, 5, 18, 23, 59, 59);
