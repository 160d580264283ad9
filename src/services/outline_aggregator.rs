//! Turns per-file symbol forests into a sorted, counted outline document.

use chrono::Utc;
use feruca::{Collator, Locale, Tailoring};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use crate::domain::models::{
    count_forest, FileRecord, OutlineDocument, Symbol, SymbolOutline, OUTLINE_TITLE,
};

/// Builds [`OutlineDocument`]s.
///
/// Every discovered file gets a record, even with zero symbols. Symbols are
/// stably sorted by start position at every nesting level, and files are
/// ordered by relative path.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineAggregator;

impl OutlineAggregator {
    pub const fn new() -> Self {
        Self
    }

    /// Aggregate a pass's results into a fresh document.
    ///
    /// Forests for paths outside `files` are ignored.
    pub fn aggregate<'a, I>(
        &self,
        files: I,
        mut symbols_by_file: HashMap<PathBuf, Vec<Symbol>>,
        scan_root: &Path,
    ) -> OutlineDocument
    where
        I: IntoIterator<Item = &'a PathBuf>,
    {
        let mut records: Vec<FileRecord> = files
            .into_iter()
            .map(|path| {
                let forest = symbols_by_file.remove(path).unwrap_or_default();
                build_file_record(path, forest, scan_root)
            })
            .collect();

        sort_by_locale(&mut records, |record| record.relative_path.as_str());
        records.dedup_by(|a, b| a.path == b.path);

        let total_symbols = records.iter().map(|r| r.symbol_count).sum();

        OutlineDocument {
            title: OUTLINE_TITLE.to_string(),
            generated_at: Utc::now(),
            root_directory: scan_root.to_path_buf(),
            total_files: records.len(),
            total_symbols,
            files: records,
        }
    }
}

fn build_file_record(path: &Path, forest: Vec<Symbol>, scan_root: &Path) -> FileRecord {
    let symbol_count = count_forest(&forest);
    FileRecord {
        path: path.to_path_buf(),
        relative_path: relative_path(path, scan_root),
        symbols: format_forest(forest),
        symbol_count,
    }
}

/// Stable sort by start position, then convert bottom-up.
fn format_forest(mut forest: Vec<Symbol>) -> Vec<SymbolOutline> {
    forest.sort_by_key(|symbol| symbol.range.start);
    forest.into_iter().map(format_symbol).collect()
}

/// One-based display positions are derived here and nowhere earlier.
fn format_symbol(symbol: Symbol) -> SymbolOutline {
    let Symbol {
        name,
        kind,
        range,
        detail,
        children,
    } = symbol;

    let children = format_forest(children);

    SymbolOutline {
        name,
        kind_label: kind.label().to_string(),
        type_code: kind.code(),
        kind,
        line: one_based(range.start.line),
        column: one_based(range.start.column),
        end_line: one_based(range.end.line),
        end_column: one_based(range.end.column),
        range,
        detail,
        children,
    }
}

/// Positions at `u32::MAX` stay there instead of wrapping.
const fn one_based(position: u32) -> u32 {
    position.saturating_add(1)
}

/// `/`-separated path of `path` relative to `root`
pub fn relative_path(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) => relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}

/// CLDR root collation with punctuation kept significant.
///
/// Punctuation sorts before digits and digits before letters, so `dev_ops.c`
/// and `dev-x.c` come ahead of `dev.c`, which precedes `dev1.c`. Letters
/// compare case-insensitively first; on a case-only difference lowercase
/// sorts first.
pub fn path_collator() -> Collator {
    Collator::new(Tailoring::Cldr(Locale::Root), false, true)
}

/// Sort `items` by the collation order of the string `key` returns.
pub fn sort_by_locale<T>(items: &mut [T], key: impl Fn(&T) -> &str) {
    let mut collator = path_collator();
    items.sort_by(|a, b| collator.collate(key(a), key(b)));
}

/// Compare two strings with [`path_collator`].
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    path_collator().collate(a, b)
}
