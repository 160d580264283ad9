//! Outline document produced by one collection pass.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::symbol::{SourceRange, SymbolKind};

/// Title carried by every outline document
pub const OUTLINE_TITLE: &str = "C/C++ File Outline";

/// A symbol prepared for reporting.
///
/// Carries one-based display positions next to the raw zero-based range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolOutline {
    pub name: String,

    /// Human-readable kind label
    #[serde(rename = "type")]
    pub kind_label: String,

    /// Numeric kind code, see [`SymbolKind::code`]
    pub type_code: u8,

    pub kind: SymbolKind,

    /// One-based start line
    pub line: u32,

    /// One-based start column
    pub column: u32,

    /// One-based end line
    pub end_line: u32,

    /// One-based end column
    pub end_column: u32,

    /// Zero-based range as reported by the provider
    pub range: SourceRange,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SymbolOutline>,
}

impl SymbolOutline {
    /// Whether the symbol spans more than a single position
    pub fn has_distinct_end(&self) -> bool {
        self.end_line != self.line || self.end_column != self.column
    }
}

/// All symbols collected for one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Absolute path of the file
    pub path: PathBuf,

    /// Path relative to the scan root, `/`-separated
    pub relative_path: String,

    /// Top-level symbol forest, sorted by start position
    pub symbols: Vec<SymbolOutline>,

    /// Number of symbols in the forest including all descendants
    pub symbol_count: usize,
}

/// Aggregated outline of a scanned directory tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineDocument {
    pub title: String,

    pub generated_at: DateTime<Utc>,

    /// Absolute scan root
    pub root_directory: PathBuf,

    pub total_files: usize,

    pub total_symbols: usize,

    /// Files sorted by relative path
    pub files: Vec<FileRecord>,
}
