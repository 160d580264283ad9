//! Recursive discovery of C/C++ source files under a scan root.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::domain::errors::{OutlineError, OutlineResult};
use crate::services::path_filter::{is_ignored_directory, is_source_file};

/// Files found by a walk plus the directories that could not be listed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkOutcome {
    pub files: BTreeSet<PathBuf>,
    pub unreadable: Vec<PathBuf>,
}

/// Walks a directory tree and collects candidate source files.
///
/// Ignored directories are pruned before descending. Symlinks are
/// neither followed nor collected. A directory that cannot be read is
/// logged, recorded in [`WalkOutcome::unreadable`] and skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryWalker;

impl DirectoryWalker {
    pub const fn new() -> Self {
        Self
    }

    /// Enumerate all source files below `root`.
    ///
    /// Fails with [`OutlineError::InvalidInput`] before any I/O when `root`
    /// is not absolute.
    pub async fn walk(&self, root: &Path) -> OutlineResult<WalkOutcome> {
        if !root.is_absolute() {
            return Err(OutlineError::InvalidInput(format!(
                "scan root must be an absolute path, got '{}'",
                root.display()
            )));
        }

        let mut outcome = WalkOutcome::default();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            if let Err(err) = Self::read_directory(&dir, &mut pending, &mut outcome.files).await {
                warn!(error = %err, "skipping unreadable directory");
                outcome.unreadable.push(dir);
            }
        }

        debug!(
            root = %root.display(),
            files = outcome.files.len(),
            unreadable = outcome.unreadable.len(),
            "directory walk complete"
        );
        Ok(outcome)
    }

    /// List one directory, queueing subdirectories and collecting files.
    async fn read_directory(
        dir: &Path,
        pending: &mut Vec<PathBuf>,
        files: &mut BTreeSet<PathBuf>,
    ) -> OutlineResult<()> {
        let read_error = |source| OutlineError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        };

        let mut entries = fs::read_dir(dir).await.map_err(read_error)?;

        while let Some(entry) = entries.next_entry().await.map_err(read_error)? {
            let file_type = match entry.file_type().await {
                Ok(file_type) => file_type,
                Err(err) => {
                    warn!(path = %entry.path().display(), error = %err, "cannot stat entry");
                    continue;
                }
            };

            let name = entry.file_name();
            let name = name.to_string_lossy();

            if file_type.is_dir() {
                if !is_ignored_directory(&name) {
                    pending.push(entry.path());
                }
            } else if file_type.is_file() && is_source_file(&name) {
                files.insert(entry.path());
            }
        }

        Ok(())
    }
}
