//! Source-file and directory filtering rules for the scan.

use std::path::Path;

/// C/C++-family extensions, compared case-insensitively
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "c", "h", "cpp", "hpp", "cc", "cxx", "c++", "h++", "inl", "txx",
];

/// Directory names that are never descended into (exact, case-sensitive)
pub const IGNORED_DIRECTORIES: &[&str] = &[
    ".git",
    ".vscode",
    "node_modules",
    "build",
    "dist",
    "out",
    "__pycache__",
];

const HIDDEN_PREFIX: char = '.';

/// Whether `name` carries one of the C/C++ source extensions.
pub fn is_source_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SOURCE_EXTENSIONS
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(ext))
        })
}

/// Whether a directory named `name` should be pruned from the walk.
pub fn is_ignored_directory(name: &str) -> bool {
    IGNORED_DIRECTORIES.contains(&name) || name.starts_with(HIDDEN_PREFIX)
}
