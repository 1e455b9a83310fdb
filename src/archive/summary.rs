//! Per-entry outcomes and the run summary.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    Moved,
    Copied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Transferred {
        source: PathBuf,
        destination: PathBuf,
        mode: TransferMode,
    },
    /// Target already existed and replace was off.
    Skipped {
        source: PathBuf,
        destination: PathBuf,
    },
    /// `destination` is None when the target could not even be computed.
    Failed {
        source: PathBuf,
        destination: Option<PathBuf>,
        error: String,
    },
}

impl EntryOutcome {
    pub fn source(&self) -> &PathBuf {
        match self {
            EntryOutcome::Transferred { source, .. }
            | EntryOutcome::Skipped { source, .. }
            | EntryOutcome::Failed { source, .. } => source,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub outcomes: Vec<EntryOutcome>,
    /// A shutdown request stopped the run before every entry was processed.
    pub cancelled: bool,
}

impl Summary {
    pub fn transferred(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Transferred { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Failed { .. }))
    }

    pub fn failures(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, EntryOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&EntryOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} transferred, {} skipped, {} failed",
            self.transferred(),
            self.skipped(),
            self.failed()
        )?;
        if self.cancelled {
            f.write_str(" (cancelled)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_display() {
        let s = Summary {
            outcomes: vec![
                EntryOutcome::Transferred {
                    source: "a".into(),
                    destination: "x/a".into(),
                    mode: TransferMode::Moved,
                },
                EntryOutcome::Skipped {
                    source: "b".into(),
                    destination: "x/b".into(),
                },
                EntryOutcome::Failed {
                    source: "c".into(),
                    destination: None,
                    error: "boom".into(),
                },
            ],
            cancelled: true,
        };
        assert_eq!((s.transferred(), s.skipped(), s.failed()), (1, 1, 1));
        assert_eq!(s.failures().next().unwrap().source(), &PathBuf::from("c"));
        assert_eq!(s.to_string(), "1 transferred, 1 skipped, 1 failed (cancelled)");
    }
}
