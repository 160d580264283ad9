//! Domain models

pub mod config;
pub mod outline;
pub mod symbol;

pub use config::{
    Config, ConvergenceConfig, FetchConfig, LoggingConfig, ProviderConfig, ScanConfig,
};
pub use outline::{FileRecord, OutlineDocument, SymbolOutline, OUTLINE_TITLE};
pub use symbol::{count_forest, SourcePosition, SourceRange, Symbol, SymbolKind};
