use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::Symbol;

/// Error type for symbol provider operations
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Provider execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Provider returned invalid output: {0}")]
    InvalidOutput(String),
}

/// External capability that analyzes one source file.
///
/// Implementations return the file's top-level symbol forest. An empty
/// forest is a legitimate answer, but may also mean the provider has not
/// finished indexing the file yet.
#[async_trait]
pub trait SymbolProvider: Send + Sync {
    /// Short identifier used in logs
    fn provider_id(&self) -> &str;

    /// Produce the symbol forest for `path`
    async fn provide_symbols(&self, path: &Path) -> Result<Vec<Symbol>, ProviderError>;
}
