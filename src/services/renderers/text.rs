use std::fmt::Write;

use super::TIMESTAMP_FORMAT;
use crate::domain::models::{OutlineDocument, SymbolOutline};

const INDENT: &str = "  ";

/// Plain-text report: the Markdown content without markup, two spaces of
/// indent per nesting level.
pub fn render_text(document: &OutlineDocument) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", document.title);
    let _ = writeln!(out, "{}\n", "=".repeat(document.title.chars().count()));
    let _ = writeln!(
        out,
        "Generated: {}",
        document.generated_at.format(TIMESTAMP_FORMAT)
    );
    let _ = writeln!(out, "Directory: {}", document.root_directory.display());
    let _ = writeln!(
        out,
        "Summary: {} files, {} symbols\n",
        document.total_files, document.total_symbols
    );

    for file in &document.files {
        let _ = writeln!(out, "{}", file.relative_path);
        let _ = writeln!(out, "{}", "-".repeat(file.relative_path.chars().count()));
        let _ = writeln!(out, "Full path: {}", file.path.display());
        let _ = writeln!(out, "Symbol count: {}\n", file.symbol_count);

        for symbol in &file.symbols {
            write_symbol(&mut out, symbol, 0);
        }

        out.push('\n');
    }

    out
}

fn write_symbol(out: &mut String, symbol: &SymbolOutline, depth: usize) {
    let indent = INDENT.repeat(depth);

    let _ = writeln!(
        out,
        "{indent}{} ({}) - line {}",
        symbol.name, symbol.kind_label, symbol.line
    );

    if let Some(detail) = symbol.detail.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "{indent}{INDENT}Detail: {detail}");
    }

    for child in &symbol.children {
        write_symbol(out, child, depth + 1);
    }
}
