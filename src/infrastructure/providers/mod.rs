//! SymbolProvider implementations

pub mod ctags;

pub use ctags::CtagsSymbolProvider;
