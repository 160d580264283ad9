//! Port trait definitions (Hexagonal Architecture)
//!
//! - SymbolProvider: the external symbol analysis capability
//! - ProgressSink: receiver for pass and file progress

pub mod progress;
pub mod symbol_provider;

pub use progress::{NullProgress, ProgressSink};
pub use symbol_provider::{ProviderError, SymbolProvider};
