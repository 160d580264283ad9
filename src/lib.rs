//! Driver Outline - symbol outlines for C/C++ source trees
//!
//! Walks a directory of C/C++ sources, asks an external symbol provider for
//! each file's symbol tree, and aggregates the results into one sorted,
//! counted document rendered as JSON, Markdown and plain text. Whole passes
//! are repeated until the total symbol count stops changing, which absorbs
//! providers that are still indexing when the first pass runs.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, errors and the provider/progress ports
//! - **Service Layer** (`services`): walk, fetch, schedule, aggregate, converge, render
//! - **Infrastructure Layer** (`infrastructure`): config, logging, ctags, report files
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use driver_outline::{Config, CtagsSymbolProvider, NullProgress, OutlineGenerator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let provider = Arc::new(CtagsSymbolProvider::from_config(&config.provider));
//!     let generator = OutlineGenerator::new(provider, &config);
//!     let outcome = generator.generate("/src/driver".as_ref(), &NullProgress).await?;
//!     println!("{} symbols", outcome.document.total_symbols);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{OutlineError, OutlineResult};
pub use domain::models::{
    Config, FileRecord, OutlineDocument, SourcePosition, SourceRange, Symbol, SymbolKind,
    SymbolOutline,
};
pub use domain::ports::{NullProgress, ProgressSink, ProviderError, SymbolProvider};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::output::OutlineWriter;
pub use infrastructure::providers::CtagsSymbolProvider;
pub use services::{
    ConvergenceController, ConvergenceOutcome, ConvergenceState, OutlineGenerator, ReportFormat,
};
