//! Implementation of the `driver-outline scan` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::cli::commands::resolve_root;
use crate::cli::output::{create_spinner, output, CommandOutput, ProgressBarExt};
use crate::services::outline_aggregator::{relative_path, sort_by_locale};
use crate::services::DirectoryWalker;

#[derive(Args, Debug, Default)]
pub struct ScanArgs {
    /// Directory to scan (defaults to current directory)
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct ScanOutput {
    pub root: PathBuf,
    pub files: Vec<String>,
    pub unreadable: Vec<PathBuf>,
}

impl CommandOutput for ScanOutput {
    fn to_human(&self) -> String {
        if self.files.is_empty() {
            return format!("No C/C++ source files found under {}", self.root.display());
        }

        let mut lines: Vec<String> = self.files.iter().map(|f| format!("  {f}")).collect();
        lines.insert(
            0,
            format!("{} source files under {}:", self.files.len(), self.root.display()),
        );

        if !self.unreadable.is_empty() {
            lines.push(format!("\nSkipped {} unreadable directories:", self.unreadable.len()));
            for dir in &self.unreadable {
                lines.push(format!("  - {}", dir.display()));
            }
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: ScanArgs, json_mode: bool) -> Result<()> {
    let root = resolve_root(args.dir.as_deref())?;

    let spinner = (!json_mode).then(|| create_spinner(format!("Scanning {}", root.display())));

    let walk = DirectoryWalker::new()
        .walk(&root)
        .await
        .with_context(|| format!("Failed to scan {}", root.display()))?;

    if let Some(spinner) = spinner {
        spinner.finish_success(format!("{} files", walk.files.len()));
    }

    let output_data = ScanOutput {
        files: relative_listing(&walk.files, &root),
        root,
        unreadable: walk.unreadable,
    };
    output(&output_data, json_mode);

    Ok(())
}

/// Relative paths of `files` in the same order the outline document uses
fn relative_listing(files: &BTreeSet<PathBuf>, root: &Path) -> Vec<String> {
    let mut listing: Vec<String> = files.iter().map(|f| relative_path(f, root)).collect();
    sort_by_locale(&mut listing, String::as_str);
    listing
}
