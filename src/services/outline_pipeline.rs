//! One collection pass: walk, fetch with bounded concurrency, aggregate.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::domain::errors::{OutlineError, OutlineResult};
use crate::domain::models::{Config, OutlineDocument};
use crate::domain::ports::{ProgressSink, SymbolProvider};
use crate::services::bounded_scheduler::BoundedScheduler;
use crate::services::directory_walker::DirectoryWalker;
use crate::services::outline_aggregator::OutlineAggregator;
use crate::services::symbol_fetcher::{FetchPolicy, SymbolFetcher};

/// Runs single pipeline passes over a scan root
#[derive(Clone)]
pub struct OutlinePipeline {
    walker: DirectoryWalker,
    fetcher: SymbolFetcher,
    scheduler: BoundedScheduler,
    aggregator: OutlineAggregator,
}

impl OutlinePipeline {
    pub fn new(provider: Arc<dyn SymbolProvider>, config: &Config) -> Self {
        Self::with_parts(
            SymbolFetcher::new(provider, FetchPolicy::from(&config.fetch)),
            BoundedScheduler::from(&config.scan),
        )
    }

    pub const fn with_parts(fetcher: SymbolFetcher, scheduler: BoundedScheduler) -> Self {
        Self {
            walker: DirectoryWalker::new(),
            fetcher,
            scheduler,
            aggregator: OutlineAggregator::new(),
        }
    }

    /// Execute one pass and build a fresh document.
    ///
    /// Fails with [`OutlineError::NoSourceFiles`] when the walk finds
    /// nothing, and with [`OutlineError::PipelineFailure`] when a worker
    /// panics.
    #[instrument(skip_all, fields(root = %root.display(), pass))]
    pub async fn run_pass(
        &self,
        root: &Path,
        pass: u32,
        progress: &dyn ProgressSink,
    ) -> OutlineResult<OutlineDocument> {
        let walk = self.walker.walk(root).await?;

        if !walk.unreadable.is_empty() {
            warn!(count = walk.unreadable.len(), "some directories were skipped");
        }
        if walk.files.is_empty() {
            return Err(OutlineError::NoSourceFiles {
                root: root.to_path_buf(),
            });
        }

        let files: Vec<PathBuf> = walk.files.iter().cloned().collect();
        let fetcher = &self.fetcher;

        let fetched = self
            .scheduler
            .run_all(
                files,
                |path| async move {
                    let symbols = fetcher.fetch(&path).await;
                    (path, symbols)
                },
                progress,
            )
            .await
            .map_err(|panic| OutlineError::PipelineFailure {
                pass,
                message: panic.to_string(),
            })?;

        let symbols_by_file: HashMap<_, _> = fetched.into_iter().collect();
        let document = self.aggregator.aggregate(&walk.files, symbols_by_file, root);

        info!(
            files = document.total_files,
            symbols = document.total_symbols,
            "pass complete"
        );
        Ok(document)
    }
}
