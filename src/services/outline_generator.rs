//! Top-level entry point: validate the root, then converge.

use std::path::Path;
use std::sync::Arc;
use tracing::instrument;

use crate::domain::errors::{OutlineError, OutlineResult};
use crate::domain::models::{Config, ConvergenceConfig};
use crate::domain::ports::{ProgressSink, SymbolProvider};
use crate::services::convergence_controller::{ConvergenceController, ConvergenceOutcome};
use crate::services::outline_pipeline::OutlinePipeline;

/// Builds an outline document for a directory tree
#[derive(Clone)]
pub struct OutlineGenerator {
    pipeline: OutlinePipeline,
    convergence: ConvergenceConfig,
}

impl OutlineGenerator {
    pub fn new(provider: Arc<dyn SymbolProvider>, config: &Config) -> Self {
        Self {
            pipeline: OutlinePipeline::new(provider, config),
            convergence: config.convergence.clone(),
        }
    }

    pub const fn with_pipeline(pipeline: OutlinePipeline, convergence: ConvergenceConfig) -> Self {
        Self {
            pipeline,
            convergence,
        }
    }

    /// Run passes over `root` until the symbol total settles.
    ///
    /// `root` must be absolute; a relative path fails with
    /// [`OutlineError::InvalidInput`] before anything touches the disk.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub async fn generate(
        &self,
        root: &Path,
        progress: &dyn ProgressSink,
    ) -> OutlineResult<ConvergenceOutcome> {
        if !root.is_absolute() {
            return Err(OutlineError::InvalidInput(format!(
                "scan root must be an absolute path, got '{}'",
                root.display()
            )));
        }

        let pipeline = &self.pipeline;
        let mut controller = ConvergenceController::from(&self.convergence);

        controller
            .run(progress, move |pass| pipeline.run_pass(root, pass, progress))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Symbol;
    use crate::domain::ports::{NullProgress, ProviderError};
    use async_trait::async_trait;
    use std::path::PathBuf;

    struct UnreachableProvider;

    #[async_trait]
    impl SymbolProvider for UnreachableProvider {
        fn provider_id(&self) -> &str {
            "unreachable"
        }

        async fn provide_symbols(&self, path: &Path) -> Result<Vec<Symbol>, ProviderError> {
            panic!("provider called for {}", path.display());
        }
    }

    #[tokio::test]
    async fn test_relative_root_is_rejected_up_front() {
        let generator = OutlineGenerator::new(Arc::new(UnreachableProvider), &Config::default());

        let err = generator
            .generate(&PathBuf::from("drivers/net"), &NullProgress)
            .await
            .unwrap_err();

        assert!(matches!(err, OutlineError::InvalidInput(_)));
        assert!(err.to_string().contains("drivers/net"));
    }

    #[tokio::test]
    async fn test_empty_tree_reports_no_source_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.md"), "not a source").unwrap();

        let generator = OutlineGenerator::new(Arc::new(UnreachableProvider), &Config::default());
        let err = generator.generate(dir.path(), &NullProgress).await.unwrap_err();

        assert!(matches!(err, OutlineError::NoSourceFiles { .. }));
    }
}
