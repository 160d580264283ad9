//! CLI command implementations.

pub mod generate;
pub mod render;
pub mod scan;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Absolute scan root: `dir` joined onto the current directory when
/// relative, the current directory itself when absent.
pub fn resolve_root(dir: Option<&Path>) -> Result<PathBuf> {
    match dir {
        Some(dir) if dir.is_absolute() => Ok(dir.to_path_buf()),
        Some(dir) => Ok(std::env::current_dir()
            .context("Failed to get current directory")?
            .join(dir)),
        None => std::env::current_dir().context("Failed to get current directory"),
    }
}
