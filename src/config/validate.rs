//! Config validation logic.
//! The engine does its own origin/destination checks; this only rejects
//! combinations the CLI should never hand to it.

use anyhow::{bail, Result};
use tracing::debug;

use super::types::Config;

impl Config {
    /// Refuse an origin and destination that resolve to the same directory.
    pub fn validate(&self) -> Result<()> {
        if self.origin.as_os_str().is_empty() {
            bail!("must give an origin directory");
        }
        if self.destination.as_os_str().is_empty() {
            bail!("must give a destination directory");
        }

        let origin_real = dunce::canonicalize(&self.origin).unwrap_or_else(|_| self.origin.clone());
        let dest_real =
            dunce::canonicalize(&self.destination).unwrap_or_else(|_| self.destination.clone());
        if origin_real == dest_real {
            bail!(
                "origin and destination resolve to the same path: '{}'",
                origin_real.display()
            );
        }
        if self.options.delimiter.contains(std::path::MAIN_SEPARATOR) {
            bail!("delimiter must not contain a path separator: '{}'", self.options.delimiter);
        }

        debug!(
            origin = %origin_real.display(),
            destination = %dest_real.display(),
            "Config validated"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn same_directory_is_rejected() {
        let td = tempdir().unwrap();
        let cfg = Config::new(td.path(), td.path().join("."));
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("same path"));
    }

    #[test]
    fn distinct_directories_pass() {
        let td = tempdir().unwrap();
        let cfg = Config::new(td.path().join("in"), td.path().join("out"));
        cfg.validate().unwrap();
    }

    #[test]
    fn separator_in_delimiter_is_rejected() {
        let td = tempdir().unwrap();
        let mut cfg = Config::new(td.path().join("in"), td.path().join("out"));
        cfg.options.delimiter = format!("a{}b", std::path::MAIN_SEPARATOR);
        assert!(cfg.validate().is_err());
    }
}
