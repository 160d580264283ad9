//! Universal Ctags symbol provider
//!
//! Shells out to `ctags` once per file and reads its JSON tag stream. Tags
//! carry their enclosing scope by name, so the flat stream is folded into a
//! forest by matching each tag's `scope` against the qualified names of the
//! other tags.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::domain::models::{ProviderConfig, SourcePosition, SourceRange, Symbol, SymbolKind};
use crate::domain::ports::{ProviderError, SymbolProvider};

/// Arguments placed before any configured extras
const BASE_ARGS: [&str; 3] = ["--output-format=json", "--fields=+neS", "--sort=no"];

/// Separator used for qualified names
const SCOPE_SEPARATOR: &str = "::";

/// One line of `ctags --output-format=json`
#[derive(Debug, Clone, Deserialize)]
struct CtagsTag {
    #[serde(rename = "_type", default)]
    entry_type: String,
    name: String,
    #[serde(default)]
    line: Option<u32>,
    #[serde(default)]
    end: Option<u32>,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    signature: Option<String>,
    #[serde(default)]
    typeref: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

impl CtagsTag {
    fn qualified_name(&self) -> String {
        match self.parent_key() {
            Some(scope) => format!("{scope}{SCOPE_SEPARATOR}{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Scope normalized to `::` separators; C struct scopes come as `a.b`
    fn parent_key(&self) -> Option<String> {
        self.scope
            .as_deref()
            .filter(|scope| !scope.is_empty())
            .map(|scope| scope.replace('.', SCOPE_SEPARATOR))
    }

    fn to_symbol(&self, children: Vec<Symbol>) -> Symbol {
        let start_line = self.line.unwrap_or(1).saturating_sub(1);
        let end_line = self
            .end
            .map_or(start_line, |end| end.saturating_sub(1).max(start_line));
        let range = SourceRange::new(
            SourcePosition::new(start_line, 0),
            SourcePosition::new(end_line, 0),
        );

        let kind = self.kind.as_deref().map_or(SymbolKind::Variable, map_kind);
        let mut symbol = Symbol::new(self.name.clone(), kind, range).with_children(children);

        let detail = self
            .signature
            .as_deref()
            .or_else(|| self.typeref.as_deref().map(strip_typeref))
            .filter(|detail| !detail.is_empty());
        if let Some(detail) = detail {
            symbol = symbol.with_detail(detail);
        }
        symbol
    }
}

/// `typename:int` → `int`
fn strip_typeref(typeref: &str) -> &str {
    typeref
        .split_once(':')
        .map_or(typeref, |(_, type_name)| type_name)
}

/// Map a ctags C/C++ kind name onto [`SymbolKind`]
pub fn map_kind(kind: &str) -> SymbolKind {
    match kind {
        "function" | "prototype" => SymbolKind::Function,
        "struct" | "union" => SymbolKind::Struct,
        "class" | "typedef" => SymbolKind::Class,
        "member" => SymbolKind::Field,
        "macro" => SymbolKind::Constant,
        "enum" => SymbolKind::Enum,
        "enumerator" => SymbolKind::EnumMember,
        "namespace" => SymbolKind::Namespace,
        "header" => SymbolKind::File,
        _ => SymbolKind::Variable,
    }
}

/// Parse the JSON-lines output of one ctags run into a symbol forest
pub fn parse_tags(output: &str) -> Result<Vec<Symbol>, ProviderError> {
    let mut tags = Vec::new();

    for (index, line) in output.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let tag: CtagsTag = serde_json::from_str(line).map_err(|e| {
            ProviderError::InvalidOutput(format!("line {}: {e}", index + 1))
        })?;
        if tag.entry_type == "tag" {
            tags.push(tag);
        }
    }

    Ok(build_forest(&tags))
}

/// Nest each tag under the first tag whose qualified name equals its scope.
/// Tags with an unknown scope stay at the top level.
fn build_forest(tags: &[CtagsTag]) -> Vec<Symbol> {
    let mut by_qualified_name: HashMap<String, usize> = HashMap::new();
    for (index, tag) in tags.iter().enumerate() {
        by_qualified_name.entry(tag.qualified_name()).or_insert(index);
    }

    let mut roots = Vec::new();
    let mut children_of: HashMap<usize, Vec<usize>> = HashMap::new();
    for (index, tag) in tags.iter().enumerate() {
        let parent = tag
            .parent_key()
            .and_then(|key| by_qualified_name.get(&key).copied())
            .filter(|&parent| parent != index);
        match parent {
            Some(parent) => children_of.entry(parent).or_default().push(index),
            None => roots.push(index),
        }
    }

    roots
        .into_iter()
        .map(|index| build_node(tags, &children_of, index))
        .collect()
}

// Qualified names strictly lengthen from parent to child, so this terminates.
fn build_node(tags: &[CtagsTag], children_of: &HashMap<usize, Vec<usize>>, index: usize) -> Symbol {
    let children = children_of
        .get(&index)
        .map(|child_indices| {
            child_indices
                .iter()
                .map(|&child| build_node(tags, children_of, child))
                .collect()
        })
        .unwrap_or_default();

    tags[index].to_symbol(children)
}

/// Symbol provider backed by the `ctags` executable
#[derive(Debug, Clone)]
pub struct CtagsSymbolProvider {
    ctags_path: String,
    extra_args: Vec<String>,
}

impl CtagsSymbolProvider {
    pub fn new(ctags_path: impl Into<String>) -> Self {
        Self {
            ctags_path: ctags_path.into(),
            extra_args: Vec::new(),
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        Self {
            ctags_path: config.ctags_path.clone(),
            extra_args: config.extra_args.clone(),
        }
    }

    pub fn ctags_path(&self) -> &str {
        &self.ctags_path
    }

    /// First line of `ctags --version`
    pub async fn version(&self) -> Result<String, ProviderError> {
        let output = Command::new(&self.ctags_path)
            .arg("--version")
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| self.spawn_error(&e))?;

        if !output.status.success() {
            return Err(ProviderError::Unavailable(format!(
                "{} --version exited with {}",
                self.ctags_path, output.status
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
    }

    /// Check if the ctags executable can be run
    pub async fn is_available(&self) -> bool {
        self.version().await.is_ok()
    }

    fn build_command(&self, path: &Path) -> Command {
        let mut cmd = Command::new(&self.ctags_path);
        cmd.args(BASE_ARGS)
            .args(&self.extra_args)
            .args(["-o", "-"])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    fn spawn_error(&self, err: &std::io::Error) -> ProviderError {
        if err.kind() == std::io::ErrorKind::NotFound {
            ProviderError::Unavailable(format!("ctags not found at: {}", self.ctags_path))
        } else {
            ProviderError::ExecutionFailed(format!("Failed to spawn {}: {err}", self.ctags_path))
        }
    }
}

impl Default for CtagsSymbolProvider {
    fn default() -> Self {
        Self::from_config(&ProviderConfig::default())
    }
}

#[async_trait]
impl SymbolProvider for CtagsSymbolProvider {
    fn provider_id(&self) -> &str {
        "ctags"
    }

    async fn provide_symbols(&self, path: &Path) -> Result<Vec<Symbol>, ProviderError> {
        let output = self
            .build_command(path)
            .output()
            .await
            .map_err(|e| self.spawn_error(&e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProviderError::ExecutionFailed(format!(
                "ctags exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let symbols = parse_tags(&stdout)?;
        debug!(path = %path.display(), count = symbols.len(), "ctags returned symbols");
        Ok(symbols)
    }
}
