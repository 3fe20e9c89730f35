use std::path::{Path, PathBuf};
use log::{debug, trace, warn};
use walkdir::WalkDir;

use crate::utils::file_utils;

/// File collector for finding AL source files
#[derive(Debug, Clone)]
pub struct FileCollector {
    /// File name suffix to collect
    suffix: String,
}

impl FileCollector {
    /// Create a new file collector with a custom suffix
    pub fn with_suffix(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Collect every file under `input_dir` whose name ends with the suffix.
    ///
    /// Unreadable directories are logged and skipped.
    pub fn collect_files(&self, input_dir: impl AsRef<Path>) -> Vec<PathBuf> {
        let input_dir = input_dir.as_ref();
        debug!("Collecting *{} files from directory: {}", self.suffix, input_dir.display());

        let mut files = Vec::new();

        for entry in WalkDir::new(input_dir).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let location = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                    warn!("Skipping {}: {}", location, e);
                    continue;
                }
            };

            if entry.file_type().is_file() && file_utils::has_suffix(entry.path(), &self.suffix) {
                trace!("Found file: {}", entry.path().display());
                files.push(entry.into_path());
            }
        }

        debug!("Collected {} files for processing", files.len());
        files
    }
}

/// Recursively list files under `root` whose name ends with `suffix`
pub fn scan(root: impl AsRef<Path>, suffix: &str) -> Vec<PathBuf> {
    FileCollector::with_suffix(suffix).collect_files(root)
}
