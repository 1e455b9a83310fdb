//! Destination layouts.
//!
//! Both layouts turn rendered date components plus the entry's file name into
//! a target path; only nested placement needs a directory.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// destination/2024/03/07/name
    #[default]
    Nested,
    /// destination/2024.03.07.name
    Flat,
}

/// Where one entry goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Directory relative to the destination that must exist first.
    pub subdir: Option<PathBuf>,
    /// Target path relative to the destination.
    pub relative: PathBuf,
}

impl Layout {
    pub fn place(self, components: &[String], file_name: &OsStr, delimiter: &str) -> Placement {
        match self {
            Layout::Nested => {
                let subdir: PathBuf = components.iter().collect();
                let relative = subdir.join(file_name);
                Placement {
                    subdir: Some(subdir),
                    relative,
                }
            }
            Layout::Flat => {
                let mut name = OsString::from(components.join(delimiter));
                name.push(delimiter);
                name.push(file_name);
                Placement {
                    subdir: None,
                    relative: PathBuf::from(name),
                }
            }
        }
    }

    /// One-line description used when logging run parameters.
    pub fn describe(self) -> &'static str {
        match self {
            Layout::Nested => "nested directories (file names will not be modified)",
            Layout::Flat => "flat (date will be prepended to file names)",
        }
    }
}

/// Render `path` relative to `base` as "./rel" for log lines.
pub(crate) fn display_relative(base: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(base).unwrap_or(path);
    format!("./{}", rel.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn nested_joins_components_as_directories() {
        let p = Layout::Nested.place(&parts(&["2024", "03", "07"]), OsStr::new("a.txt"), ".");
        assert_eq!(p.subdir, Some(PathBuf::from("2024").join("03").join("07")));
        assert_eq!(p.relative, Path::new("2024").join("03").join("07").join("a.txt"));
    }

    #[test]
    fn flat_prefixes_name_with_delimiter() {
        let p = Layout::Flat.place(&parts(&["2024", "03", "07"]), OsStr::new("a.txt"), ".");
        assert_eq!(p.subdir, None);
        assert_eq!(p.relative, PathBuf::from("2024.03.07.a.txt"));

        let p = Layout::Flat.place(&parts(&["2024", "03"]), OsStr::new("b"), "_");
        assert_eq!(p.relative, PathBuf::from("2024_03_b"));
    }

    #[test]
    fn relative_display() {
        let base = Path::new("/dest");
        assert_eq!(display_relative(base, Path::new("/dest/2024/a")), "./2024/a");
    }
}
