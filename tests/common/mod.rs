//! Common test utilities for integration tests
//!
//! Provides a scripted symbol provider, temporary source trees and a
//! configuration with short delays.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

use driver_outline::domain::models::{Config, SourceRange, Symbol, SymbolKind};
use driver_outline::domain::ports::{ProviderError, SymbolProvider};

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Write `contents` to `root/relative`, creating parent directories
pub fn write_source(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
    }
    std::fs::write(&path, contents).expect("Failed to write source file");
    path
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Defaults with millisecond retry delays and no pause between passes
pub fn fast_config() -> Config {
    let mut config = Config::default();
    config.fetch.retry_delays_ms = vec![1, 2, 3];
    config.convergence.pass_delay_ms = 0;
    config
}

/// Function symbol spanning three lines from `line` (zero-based)
pub fn function(name: &str, line: u32) -> Symbol {
    Symbol::new(name, SymbolKind::Function, SourceRange::lines(line, line + 2))
}

/// `count` distinct top-level functions
pub fn functions(count: u32) -> Vec<Symbol> {
    (0..count)
        .map(|i| function(&format!("fn_{i}"), i * 4))
        .collect()
}

/// Provider that answers from per-file scripts.
///
/// Each call for a file consumes the next scripted answer; once the script
/// runs out the last answer repeats. Unscripted files answer empty.
#[derive(Default)]
pub struct ScriptedProvider {
    scripts: Mutex<HashMap<PathBuf, Vec<Vec<Symbol>>>>,
    calls: Mutex<HashMap<PathBuf, usize>>,
    latency: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call sleeps for `latency` before answering
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    pub fn script(&self, path: impl Into<PathBuf>, answers: Vec<Vec<Symbol>>) {
        self.scripts.lock().unwrap().insert(path.into(), answers);
    }

    pub fn always(&self, path: impl Into<PathBuf>, symbols: Vec<Symbol>) {
        self.script(path, vec![symbols]);
    }

    pub fn calls_for(&self, path: &Path) -> usize {
        self.calls.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SymbolProvider for ScriptedProvider {
    fn provider_id(&self) -> &str {
        "scripted"
    }

    async fn provide_symbols(&self, path: &Path) -> Result<Vec<Symbol>, ProviderError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let call = {
            let mut calls = self.calls.lock().unwrap();
            let count = calls.entry(path.to_path_buf()).or_insert(0);
            let call = *count;
            *count += 1;
            call
        };

        let answer = self
            .scripts
            .lock()
            .unwrap()
            .get(path)
            .and_then(|answers| answers.get(call.min(answers.len().saturating_sub(1))).cloned())
            .unwrap_or_default();

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(answer)
    }
}

/// Provider whose every call fails
pub struct FailingProvider;

#[async_trait]
impl SymbolProvider for FailingProvider {
    fn provider_id(&self) -> &str {
        "failing"
    }

    async fn provide_symbols(&self, path: &Path) -> Result<Vec<Symbol>, ProviderError> {
        Err(ProviderError::ExecutionFailed(format!(
            "cannot analyze {}",
            path.display()
        )))
    }
}
