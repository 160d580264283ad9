//! Implementation of the `driver-outline render` command.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use tokio::fs;

use crate::domain::models::OutlineDocument;
use crate::services::ReportFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RenderFormat {
    #[default]
    Markdown,
    Text,
    Json,
}

impl From<RenderFormat> for ReportFormat {
    fn from(format: RenderFormat) -> Self {
        match format {
            RenderFormat::Markdown => Self::Markdown,
            RenderFormat::Text => Self::Text,
            RenderFormat::Json => Self::Json,
        }
    }
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Previously written driver_outline.json
    pub input: PathBuf,

    /// Report representation to print
    #[arg(short, long, value_enum, default_value_t = RenderFormat::Markdown)]
    pub format: RenderFormat,
}

/// Parse a stored outline document
pub async fn load_document(path: &std::path::Path) -> Result<OutlineDocument> {
    let contents = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&contents)
        .with_context(|| format!("{} is not an outline document", path.display()))
}

/// `--json` forces the JSON representation regardless of `--format`.
pub async fn execute(args: RenderArgs, json_mode: bool) -> Result<()> {
    let document = load_document(&args.input).await?;

    let format = if json_mode {
        ReportFormat::Json
    } else {
        ReportFormat::from(args.format)
    };

    let rendered = format.render(&document).context("Failed to render outline")?;
    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }

    Ok(())
}
