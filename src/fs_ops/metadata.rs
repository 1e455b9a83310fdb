//! Timestamp and permission handling for archived entries.
//! - Copies keep the source's atime/mtime and (on Unix) mode bits so that a
//!   later run buckets the copy under the same date.
//! - `touch_now` resets atime/mtime to the current time.
//! Preservation is best-effort: failures are logged, not returned.

use anyhow::Result;
use filetime::{set_file_times, FileTime};
use std::fs;
use std::path::Path;
use tracing::{trace, warn};

use super::helpers::io_error_with_help;

/// Preserve timestamps and permissions on `dest` from already-fetched `src_meta`.
pub fn preserve_metadata(dest: &Path, src_meta: &fs::Metadata) {
    let mt = FileTime::from_last_modification_time(src_meta);
    let at = FileTime::from_last_access_time(src_meta);
    if let Err(e) = set_file_times(dest, at, mt) {
        warn!(path = %dest.display(), error = %e, "failed to set atime/mtime on destination");
    } else {
        trace!(path = %dest.display(), "set atime/mtime on destination");
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let src_mode = src_meta.permissions().mode() & 0o777;
        if let Err(e) = fs::set_permissions(dest, fs::Permissions::from_mode(src_mode)) {
            warn!(path = %dest.display(), mode = format!("{:o}", src_mode), error = %e, "failed to set permissions on destination");
        }
    }

    #[cfg(windows)]
    {
        let ro = src_meta.permissions().readonly();
        if let Ok(meta) = fs::metadata(dest) {
            let mut perms = meta.permissions();
            perms.set_readonly(ro);
            if let Err(e) = fs::set_permissions(dest, perms) {
                warn!(path = %dest.display(), readonly = ro, error = %e, "failed to set readonly attribute on destination");
            }
        }
    }
}

/// Set both access and modification time of `path` to now.
pub fn touch_now(path: &Path) -> Result<()> {
    let now = FileTime::now();
    set_file_times(path, now, now).map_err(io_error_with_help("update timestamps of", path))?;
    trace!(path = %path.display(), "reset atime/mtime to now");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::set_file_mtime;
    use tempfile::tempdir;

    #[test]
    fn preserve_copies_mtime() {
        let td = tempdir().unwrap();
        let src = td.path().join("src.txt");
        let dst = td.path().join("dst.txt");
        fs::write(&src, b"a").unwrap();
        fs::write(&dst, b"a").unwrap();
        let ts = FileTime::from_unix_time(1_600_000_000, 0);
        set_file_mtime(&src, ts).unwrap();

        preserve_metadata(&dst, &fs::metadata(&src).unwrap());

        let got = FileTime::from_last_modification_time(&fs::metadata(&dst).unwrap());
        assert_eq!(got.unix_seconds(), ts.unix_seconds());
    }

    #[test]
    fn touch_now_moves_mtime_forward() {
        let td = tempdir().unwrap();
        let f = td.path().join("old.txt");
        fs::write(&f, b"a").unwrap();
        set_file_mtime(&f, FileTime::from_unix_time(1_000_000_000, 0)).unwrap();

        touch_now(&f).unwrap();

        let got = FileTime::from_last_modification_time(&fs::metadata(&f).unwrap());
        assert!(got.unix_seconds() > 1_000_000_000);
    }

    #[test]
    fn touch_now_reports_missing_path() {
        let td = tempdir().unwrap();
        let err = touch_now(&td.path().join("missing")).unwrap_err();
        assert!(err.to_string().contains("update timestamps of"));
    }
}
