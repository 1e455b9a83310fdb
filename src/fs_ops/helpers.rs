//! I/O helper utilities.
//!
//! Small adapters that enrich io::Error with the operation, the path involved
//! and a platform-aware hint, usable with map_err in both io::Result and
//! anyhow::Result code paths.
//!
//! Usage:
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create directory", dir))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Format "<op> '<path>': <error>; <hint> [os code: N]".
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            let hint = match code {
                libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
                libc::EXDEV => Some("cross-filesystem; rename not possible"),
                libc::EBUSY => Some("resource busy; ensure no other process is using it"),
                libc::ENOENT => Some("path not found; verify it exists"),
                libc::EEXIST => Some("already exists"),
                libc::ENOSPC => Some("insufficient space on device"),
                libc::EROFS => Some("read-only filesystem; cannot write here"),
                libc::EISDIR => Some("is a directory"),
                libc::ENOTDIR => Some("a path component is not a directory"),
                libc::ENAMETOOLONG => Some("filename or path too long"),
                _ => None,
            };
            if let Some(hint) = hint {
                msg.push_str("; ");
                msg.push_str(hint);
            }
        }
        #[cfg(windows)]
        {
            let hint = match code {
                5 => Some("access denied; check permissions"),
                17 => Some("not same device; cross-filesystem move"),
                32 => Some("sharing violation; file is in use"),
                2 | 3 => Some("path not found; verify it exists"),
                112 => Some("insufficient disk space"),
                206 => Some("filename or path too long"),
                _ => None,
            };
            if let Some(hint) = hint {
                msg.push_str("; ");
                msg.push_str(hint);
            }
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        let hint = match e.kind() {
            io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
            io::ErrorKind::NotFound => Some("path not found; verify it exists"),
            io::ErrorKind::AlreadyExists => Some("already exists"),
            _ => None,
        };
        if let Some(hint) = hint {
            msg.push_str("; ");
            msg.push_str(hint);
        }
    }

    msg
}

/// Adapter for anyhow::Result code: `.map_err(io_error_with_help("copy", p))`.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}

/// Adapter for io::Result code; keeps the original ErrorKind.
pub fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), build_message(op, path, &e))
}

/// True when the error is a cross-device rename failure.
pub(crate) fn is_cross_device(e: &io::Error) -> bool {
    #[cfg(unix)]
    {
        e.raw_os_error() == Some(libc::EXDEV)
    }
    #[cfg(windows)]
    {
        e.raw_os_error() == Some(17)
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = e;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_includes_op_path_and_hint() {
        let p = Path::new("/nonexistent/archive/file.txt");
        let err = io_error_with_help("copy", p)(io::Error::from(io::ErrorKind::NotFound));
        let msg = err.to_string();
        assert!(msg.starts_with("copy '/nonexistent/archive/file.txt'"), "msg was: {msg}");
        assert!(msg.contains("path not found"), "msg was: {msg}");
    }

    #[cfg(unix)]
    #[test]
    fn raw_os_codes_get_hints() {
        let p = Path::new("/tmp");
        let msg = io_error_with_help("write", p)(io::Error::from_raw_os_error(libc::ENOSPC)).to_string();
        assert!(msg.contains("insufficient space"), "msg was: {msg}");
        assert!(msg.contains("os code"), "msg was: {msg}");

        let msg = io_error_with_help("remove", p)(io::Error::from_raw_os_error(libc::EACCES)).to_string();
        assert!(msg.contains("permission denied"), "msg was: {msg}");
    }

    #[cfg(unix)]
    #[test]
    fn cross_device_detection() {
        assert!(is_cross_device(&io::Error::from_raw_os_error(libc::EXDEV)));
        assert!(!is_cross_device(&io::Error::from_raw_os_error(libc::ENOENT)));
    }

    #[test]
    fn io_adapter_preserves_kind() {
        let p = Path::new("/tmp/test.txt");
        let wrapped = io_error_with_help_io("create", p)(io::Error::from(io::ErrorKind::AlreadyExists));
        assert_eq!(wrapped.kind(), io::ErrorKind::AlreadyExists);
        assert!(wrapped.to_string().contains("already exists"));
    }
}
