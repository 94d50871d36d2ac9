//! Extension filter deciding which directory entries get scanned.

use std::path::Path;

/// Selects directory entries whose file name ends with an extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    extension: String,
}

impl ExtensionFilter {
    /// Create a filter for names ending in `extension` (e.g. `.txt`).
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    /// The configured extension.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Check whether the file name of `path` ends with the extension.
    ///
    /// This is a plain suffix test on the name, so `note.txt.bak` does not
    /// match `.txt`.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with(&self.extension))
    }

    /// Check whether `path` should be scanned: a matching name that is not a
    /// directory.
    #[must_use]
    pub fn should_scan(&self, path: &Path) -> bool {
        self.matches(path) && !path.is_dir()
    }
}
