//! Table output formatting for CLI commands
//!
//! Summary tables for outline runs using comfy-table. Colors follow
//! `NO_COLOR` and `TERM=dumb`.

use comfy_table::{presets, Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use std::env;
use std::path::PathBuf;

use crate::domain::models::{FileRecord, OutlineDocument};
use crate::services::ConvergenceState;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    /// Create a new table formatter with custom settings
    pub const fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Key/value summary of a finished generate run
    pub fn format_run_summary(
        &self,
        document: &OutlineDocument,
        passes: u32,
        state: ConvergenceState,
        written: &[PathBuf],
    ) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("Field").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        let state_cell = if self.use_colors {
            Cell::new(state.to_string()).fg(state_color(state))
        } else {
            Cell::new(state.to_string())
        };

        table.add_row(vec![
            Cell::new("Directory"),
            Cell::new(document.root_directory.display()),
        ]);
        table.add_row(vec![Cell::new("Passes"), Cell::new(passes)]);
        table.add_row(vec![Cell::new("Termination"), state_cell]);
        table.add_row(vec![Cell::new("Files"), Cell::new(document.total_files)]);
        table.add_row(vec![Cell::new("Symbols"), Cell::new(document.total_symbols)]);

        let written_text = if written.is_empty() {
            "-".to_string()
        } else {
            written
                .iter()
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>()
                .join("\n")
        };
        table.add_row(vec![Cell::new("Written"), Cell::new(written_text)]);

        table.to_string()
    }

    /// Per-file symbol counts, in document order
    pub fn format_files(&self, files: &[FileRecord]) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("File").add_attribute(Attribute::Bold),
            Cell::new("Symbols").add_attribute(Attribute::Bold),
        ]);

        for file in files {
            let count_cell = Cell::new(file.symbol_count).set_alignment(CellAlignment::Right);
            let count_cell = if self.use_colors && file.symbol_count == 0 {
                count_cell.fg(Color::DarkGrey)
            } else {
                count_cell
            };

            table.add_row(vec![Cell::new(&file.relative_path), count_cell]);
        }

        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        // Use UTF-8 preset for nice borders
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        // Apply max width if set
        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if terminal supports colors
fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check for dumb terminal
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}

const fn state_color(state: ConvergenceState) -> Color {
    match state {
        ConvergenceState::Stabilized => Color::Green,
        ConvergenceState::Exhausted => Color::Yellow,
        ConvergenceState::Idle | ConvergenceState::Running => Color::Reset,
    }
}
