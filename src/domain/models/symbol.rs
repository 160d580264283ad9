//! Symbol model as reported by a symbol provider.
//!
//! Positions are zero-based throughout collection. One-based display
//! positions only exist on [`SymbolOutline`](super::outline::SymbolOutline).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Zero-based line/column position inside a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
}

impl SourcePosition {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl PartialOrd for SourcePosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SourcePosition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then(self.column.cmp(&other.column))
    }
}

/// Half-open source span; `end` is never before `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SourceRange {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl SourceRange {
    /// Build a range, swapping the endpoints if they arrive reversed.
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    /// Range covering whole lines `start_line..=end_line` (zero-based).
    pub fn lines(start_line: u32, end_line: u32) -> Self {
        Self::new(
            SourcePosition::new(start_line, 0),
            SourcePosition::new(end_line, 0),
        )
    }
}

/// Closed set of symbol kinds, numbered like the editor symbol protocol
/// (`File` = 0 … `TypeParameter` = 25).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    File,
    Module,
    Namespace,
    Package,
    Class,
    Method,
    Property,
    Field,
    Constructor,
    Enum,
    Interface,
    Function,
    Variable,
    Constant,
    String,
    Number,
    Boolean,
    Array,
    Object,
    Key,
    Null,
    EnumMember,
    Struct,
    Event,
    Operator,
    TypeParameter,
}

impl SymbolKind {
    /// Stable numeric code
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Stable human-readable label used by the report renderers
    pub const fn label(self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Module => "Module",
            Self::Namespace => "Namespace",
            Self::Package => "Package",
            Self::Class => "Class",
            Self::Method => "Method",
            Self::Property => "Property",
            Self::Field => "Field",
            Self::Constructor => "Constructor",
            Self::Enum => "Enum",
            Self::Interface => "Interface",
            Self::Function => "Function",
            Self::Variable => "Variable",
            Self::Constant => "Constant",
            Self::String => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Array => "Array",
            Self::Object => "Object",
            Self::Key => "Key",
            Self::Null => "Null",
            Self::EnumMember => "Enum Member",
            Self::Struct => "Struct",
            Self::Event => "Event",
            Self::Operator => "Operator",
            Self::TypeParameter => "Type Parameter",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A named code construct with its nested members.
///
/// A symbol tree is owned by the file that produced it and is built
/// bottom-up: children are complete before the parent is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Symbol name (may be empty)
    pub name: String,

    pub kind: SymbolKind,

    /// Zero-based source range
    pub range: SourceRange,

    /// Provider-specific extra text such as a signature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Symbol>,
}

impl Symbol {
    /// Create a leaf symbol
    pub fn new(name: impl Into<String>, kind: SymbolKind, range: SourceRange) -> Self {
        Self {
            name: name.into(),
            kind,
            range,
            detail: None,
            children: Vec::new(),
        }
    }

    /// Attach detail text
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attach a fully built child sequence
    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }

    /// Number of nodes in this subtree, the symbol itself included
    pub fn subtree_count(&self) -> usize {
        1 + count_forest(&self.children)
    }
}

/// Number of nodes in a forest (parents plus all descendants)
pub fn count_forest(forest: &[Symbol]) -> usize {
    forest.iter().map(Symbol::subtree_count).sum()
}
