//! Implementation of the `driver-outline generate` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::cli::commands::resolve_root;
use crate::cli::output::{output, CommandOutput, PassProgress, TableFormatter};
use crate::domain::models::{Config, OutlineDocument};
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::output::OutlineWriter;
use crate::infrastructure::providers::CtagsSymbolProvider;
use crate::services::{ConvergenceState, OutlineGenerator};

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Directory to scan (defaults to current directory)
    pub dir: Option<PathBuf>,

    /// Maximum number of pipeline passes
    #[arg(long)]
    pub max_passes: Option<u32>,

    /// Pause between passes in milliseconds
    #[arg(long)]
    pub pass_delay_ms: Option<u64>,

    /// Maximum number of files fetched concurrently
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Path to the ctags executable
    #[arg(long)]
    pub ctags: Option<String>,

    /// Print the summary without writing report files
    #[arg(long)]
    pub no_write: bool,
}

impl GenerateArgs {
    /// Apply flag overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(max_passes) = self.max_passes {
            config.convergence.max_passes = max_passes;
        }
        if let Some(pass_delay_ms) = self.pass_delay_ms {
            config.convergence.pass_delay_ms = pass_delay_ms;
        }
        if let Some(concurrency) = self.concurrency {
            config.scan.concurrency_limit = concurrency;
        }
        if let Some(ref ctags) = self.ctags {
            config.provider.ctags_path.clone_from(ctags);
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateOutput {
    pub run_id: Uuid,
    pub root: PathBuf,
    pub passes: u32,
    pub state: ConvergenceState,
    pub total_files: usize,
    pub total_symbols: usize,
    pub written: Vec<PathBuf>,
    #[serde(skip)]
    pub document: OutlineDocument,
}

impl CommandOutput for GenerateOutput {
    fn to_human(&self) -> String {
        let formatter = TableFormatter::new();
        let mut sections = vec![formatter.format_run_summary(
            &self.document,
            self.passes,
            self.state,
            &self.written,
        )];
        if !self.document.files.is_empty() {
            sections.push(formatter.format_files(&self.document.files));
        }
        sections.join("\n\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: GenerateArgs, mut config: Config, json_mode: bool) -> Result<()> {
    let root = resolve_root(args.dir.as_deref())?;

    args.apply(&mut config);
    ConfigLoader::validate(&config).context("Invalid generate options")?;

    let provider = CtagsSymbolProvider::from_config(&config.provider);
    if !provider.is_available().await {
        warn!(
            ctags = provider.ctags_path(),
            "ctags is not runnable; every file will report zero symbols"
        );
        if !json_mode {
            eprintln!(
                "{} ctags not found at '{}'; files will have no symbols",
                console::style("warning:").yellow().bold(),
                provider.ctags_path()
            );
        }
    }

    let generator = OutlineGenerator::new(Arc::new(provider), &config);
    let progress = PassProgress::new(!json_mode);

    let outcome = match generator.generate(&root, &progress).await {
        Ok(outcome) => outcome,
        Err(err) => {
            progress.abandon();
            return Err(err).with_context(|| format!("Failed to outline {}", root.display()));
        }
    };

    match outcome.state {
        ConvergenceState::Stabilized => progress.finish_success(format!(
            "stabilized after {} passes",
            outcome.passes
        )),
        _ => progress.finish_warning(format!(
            "stopped after {} passes without stabilizing",
            outcome.passes
        )),
    }

    let written = if args.no_write {
        Vec::new()
    } else {
        OutlineWriter::new()
            .write_all(&outcome.document, &root)
            .await
            .context("Failed to write outline reports")?
    };

    let output_data = GenerateOutput {
        run_id: outcome.run_id,
        root,
        passes: outcome.passes,
        state: outcome.state,
        total_files: outcome.document.total_files,
        total_symbols: outcome.document.total_symbols,
        written,
        document: outcome.document,
    };
    output(&output_data, json_mode);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = GenerateArgs {
            max_passes: Some(3),
            pass_delay_ms: Some(0),
            concurrency: Some(2),
            ctags: Some("/opt/ctags".to_string()),
            ..GenerateArgs::default()
        };
        let mut config = Config::default();
        args.apply(&mut config);

        assert_eq!(config.convergence.max_passes, 3);
        assert_eq!(config.convergence.pass_delay_ms, 0);
        assert_eq!(config.scan.concurrency_limit, 2);
        assert_eq!(config.provider.ctags_path, "/opt/ctags");
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let mut config = Config::default();
        GenerateArgs::default().apply(&mut config);

        assert_eq!(config.convergence.max_passes, 15);
        assert_eq!(config.scan.concurrency_limit, 8);
        assert_eq!(config.provider.ctags_path, "ctags");
    }

    #[test]
    fn test_json_output_omits_document() {
        let output_data = GenerateOutput {
            run_id: Uuid::nil(),
            root: PathBuf::from("/src/drv"),
            passes: 2,
            state: ConvergenceState::Stabilized,
            total_files: 0,
            total_symbols: 0,
            written: vec![],
            document: OutlineDocument {
                title: String::new(),
                generated_at: chrono::Utc::now(),
                root_directory: PathBuf::from("/src/drv"),
                total_files: 0,
                total_symbols: 0,
                files: vec![],
            },
        };

        let value = output_data.to_json();
        assert_eq!(value["state"], "stabilized");
        assert_eq!(value["passes"], 2);
        assert!(value.get("document").is_none());
    }
}
