use regex::Regex;
use std::fmt::Write;
use std::sync::LazyLock;

use super::TIMESTAMP_FORMAT;
use crate::domain::models::{OutlineDocument, SymbolOutline};

/// Heading level of top-level symbols inside a file section
const SYMBOL_BASE_LEVEL: usize = 3;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("valid regex"));
static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_-]+").expect("valid regex"));

/// Anchor slug for a heading: lowercase, punctuation dropped, whitespace,
/// underscore and hyphen runs collapsed to one hyphen, outer hyphens trimmed.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, "");
    let collapsed = SEPARATOR_RUN.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

/// Markdown report with a linked table of contents and one section per file
pub fn render_markdown(document: &OutlineDocument) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# {}\n", document.title);
    let _ = writeln!(
        out,
        "**Generated**: {}\n",
        document.generated_at.format(TIMESTAMP_FORMAT)
    );
    let _ = writeln!(out, "**Directory**: {}\n", document.root_directory.display());
    let _ = writeln!(
        out,
        "**Summary**: {} files, {} symbols\n",
        document.total_files, document.total_symbols
    );

    out.push_str("## Contents\n\n");
    for file in &document.files {
        let _ = writeln!(
            out,
            "- [{}](#{}) ({} symbols)",
            file.relative_path,
            slugify(&file.relative_path),
            file.symbol_count
        );
    }
    out.push_str("\n---\n\n");

    for file in &document.files {
        let _ = writeln!(out, "## {}\n", file.relative_path);
        let _ = writeln!(out, "**Full path**: `{}`\n", file.path.display());
        let _ = writeln!(out, "**Symbol count**: {}\n", file.symbol_count);

        for symbol in &file.symbols {
            write_symbol(&mut out, symbol, SYMBOL_BASE_LEVEL);
        }

        out.push_str("---\n\n");
    }

    out
}

fn write_symbol(out: &mut String, symbol: &SymbolOutline, level: usize) {
    let _ = writeln!(out, "{} {}\n", "#".repeat(level), symbol.name);
    let _ = writeln!(out, "- **Type**: {}", symbol.kind_label);

    let _ = write!(
        out,
        "- **Location**: line {}, column {}",
        symbol.line, symbol.column
    );
    if symbol.has_distinct_end() {
        let _ = write!(
            out,
            " - line {}, column {}",
            symbol.end_line, symbol.end_column
        );
    }
    out.push('\n');

    if let Some(detail) = symbol.detail.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "- **Detail**: {detail}");
    }
    out.push('\n');

    for child in &symbol.children {
        write_symbol(out, child, level + 1);
    }
}
