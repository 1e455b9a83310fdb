//! Copy and move primitives used by the transfer step.
//! - Files: `fs::copy` then metadata preservation.
//! - Directories: walk the tree with walkdir, recreate directories, copy files.
//! - Moves: rename first; on a cross-device failure fall back to copy + remove.

use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::helpers::{io_error_with_help, is_cross_device};
use super::metadata::preserve_metadata;

/// Copy a single file (or the target of a symlink) keeping timestamps and mode.
pub fn copy_file_with_metadata(src: &Path, dest: &Path) -> Result<()> {
    let meta = fs::metadata(src).map_err(io_error_with_help("stat", src))?;
    fs::copy(src, dest).map_err(io_error_with_help("copy to", dest))?;
    preserve_metadata(dest, &meta);
    Ok(())
}

/// Copy a directory tree rooted at `src` to `dest` (which must not exist yet).
pub fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src)?;
        let target = dest.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(io_error_with_help("create directory", &target))?;
        } else {
            copy_file_with_metadata(entry.path(), &target)?;
        }
    }
    if let Ok(meta) = fs::metadata(src) {
        preserve_metadata(dest, &meta);
    }
    Ok(())
}

/// Copy a file or directory entry.
pub fn copy_entry(src: &Path, dest: &Path) -> Result<()> {
    if src.is_dir() {
        copy_tree(src, dest)
    } else {
        copy_file_with_metadata(src, dest)
    }
}

/// Move a file or directory entry.
pub fn move_entry(src: &Path, dest: &Path) -> Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => {
            debug!(src = %src.display(), dest = %dest.display(), "renamed");
            Ok(())
        }
        Err(e) if is_cross_device(&e) => {
            warn!(error = %e, src = %src.display(), "rename crossed filesystems; copying instead");
            copy_entry(src, dest)?;
            if src.is_dir() {
                fs::remove_dir_all(src).map_err(io_error_with_help("remove original directory", src))?;
            } else {
                fs::remove_file(src).map_err(io_error_with_help("remove original file", src))?;
            }
            Ok(())
        }
        Err(e) => Err(io_error_with_help("move to", dest)(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn copy_tree_recreates_structure() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("album");
        src.child("one.txt").write_str("one").unwrap();
        src.child("sub").child("two.txt").write_str("two").unwrap();
        let dest = temp.child("copy");

        copy_entry(src.path(), dest.path()).unwrap();

        dest.child("one.txt").assert("one");
        dest.child("sub").child("two.txt").assert("two");
        src.child("one.txt").assert("one");
    }

    #[test]
    fn move_entry_renames_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("a.txt");
        src.write_str("hello").unwrap();
        let dest = temp.child("b.txt");

        move_entry(src.path(), dest.path()).unwrap();

        assert!(!src.path().exists());
        dest.assert("hello");
    }

    #[test]
    fn move_entry_reports_missing_source() {
        let temp = assert_fs::TempDir::new().unwrap();
        let err = move_entry(&temp.path().join("nope"), &temp.path().join("dest")).unwrap_err();
        assert!(err.to_string().contains("move to"), "msg was: {err}");
    }
}
