//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::generate::GenerateArgs;
use crate::cli::commands::render::RenderArgs;
use crate::cli::commands::scan::ScanArgs;

#[derive(Parser, Debug)]
#[command(name = "driver-outline")]
#[command(about = "Hierarchical symbol outlines for C/C++ source trees", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this YAML file instead of .driver-outline/
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Outline a source tree and write driver_outline.{json,md,txt}
    Generate(GenerateArgs),

    /// List the source files a generate run would visit
    Scan(ScanArgs),

    /// Re-render a stored driver_outline.json
    Render(RenderArgs),
}
