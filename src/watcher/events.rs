//! Results produced by one poll cycle.

#![allow(clippy::missing_const_for_fn)]

use std::path::PathBuf;

use super::snapshot::SnapshotDiff;

/// A new occurrence of the magic string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    /// File the line was found in.
    pub path: PathBuf,
    /// 1-based line number.
    pub line_number: u64,
    /// Line text without its trailing newline.
    pub text: String,
}

/// Everything observed during one poll cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Paths that appeared since the previous cycle.
    pub added: Vec<PathBuf>,
    /// Paths that disappeared since the previous cycle.
    pub removed: Vec<PathBuf>,
    /// Number of files scanned this cycle.
    pub scanned: usize,
    /// Matches found this cycle, in path then line order.
    pub discoveries: Vec<Discovery>,
}

impl CycleReport {
    /// Start a report from a snapshot diff.
    #[must_use]
    pub fn from_diff(diff: SnapshotDiff) -> Self {
        Self {
            added: diff.added.into_iter().collect(),
            removed: diff.removed.into_iter().collect(),
            ..Self::default()
        }
    }

    /// True when the cycle saw no changes and no matches.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.discoveries.is_empty()
    }

    /// Comma-joined list of added paths.
    #[must_use]
    pub fn added_list(&self) -> String {
        join_paths(&self.added)
    }

    /// Comma-joined list of removed paths.
    #[must_use]
    pub fn removed_list(&self) -> String {
        join_paths(&self.removed)
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_from_diff_keeps_sorted_order() {
        let diff = SnapshotDiff {
            added: BTreeSet::from([PathBuf::from("/d/b.txt"), PathBuf::from("/d/a.txt")]),
            removed: BTreeSet::from([PathBuf::from("/d/z.txt")]),
        };

        let report = CycleReport::from_diff(diff);

        assert_eq!(
            report.added,
            vec![PathBuf::from("/d/a.txt"), PathBuf::from("/d/b.txt")]
        );
        assert_eq!(report.removed, vec![PathBuf::from("/d/z.txt")]);
        assert!(report.discoveries.is_empty());
        assert_eq!(report.scanned, 0);
    }

    #[test]
    fn test_joined_lists() {
        let report = CycleReport {
            added: vec![PathBuf::from("/d/a.txt"), PathBuf::from("/d/b.txt")],
            ..Default::default()
        };
        assert_eq!(report.added_list(), "/d/a.txt, /d/b.txt");
        assert_eq!(report.removed_list(), "");
    }

    #[test]
    fn test_is_quiet() {
        let mut report = CycleReport::default();
        assert!(report.is_quiet());

        report.scanned = 3;
        assert!(report.is_quiet());

        report.discoveries.push(Discovery {
            path: PathBuf::from("/d/a.txt"),
            line_number: 1,
            text: "magic".to_string(),
        });
        assert!(!report.is_quiet());
    }
}
