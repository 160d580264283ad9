//! Per-file symbol retrieval with warm-up retries.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::domain::models::{FetchConfig, Symbol};
use crate::domain::ports::SymbolProvider;

/// Retry schedule applied when a provider answers with an empty forest
///
/// Each entry is the pause before one more attempt, so a policy with
/// `n` delays makes at most `n + 1` provider calls per file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPolicy {
    retry_delays: Vec<Duration>,
}

impl FetchPolicy {
    /// Create a policy from an explicit delay schedule
    pub fn new(retry_delays: Vec<Duration>) -> Self {
        Self { retry_delays }
    }

    /// Single attempt, empty results accepted immediately
    pub const fn no_retry() -> Self {
        Self {
            retry_delays: Vec::new(),
        }
    }

    /// Maximum number of provider calls per file
    pub fn max_attempts(&self) -> usize {
        self.retry_delays.len() + 1
    }

    /// Delay before retrying after the zero-based `attempt` came back empty
    fn delay_after(&self, attempt: usize) -> Option<Duration> {
        self.retry_delays.get(attempt).copied()
    }
}

impl Default for FetchPolicy {
    /// 100ms, 300ms, 600ms
    fn default() -> Self {
        Self::from(&FetchConfig::default())
    }
}

impl From<&FetchConfig> for FetchPolicy {
    fn from(config: &FetchConfig) -> Self {
        Self::new(
            config
                .retry_delays_ms
                .iter()
                .map(|ms| Duration::from_millis(*ms))
                .collect(),
        )
    }
}

/// Obtains a file's symbol forest from a [`SymbolProvider`].
///
/// An empty answer is not trusted until the retry schedule is used up,
/// since the provider may still be indexing the file. Provider errors are
/// logged and count as an empty answer; they never escape `fetch`.
#[derive(Clone)]
pub struct SymbolFetcher {
    provider: Arc<dyn SymbolProvider>,
    policy: FetchPolicy,
}

impl SymbolFetcher {
    pub fn new(provider: Arc<dyn SymbolProvider>, policy: FetchPolicy) -> Self {
        Self { provider, policy }
    }

    /// Fetch the symbol forest for `path`.
    ///
    /// Returns exactly what the last attempt produced; attempts are never
    /// merged.
    pub async fn fetch(&self, path: &Path) -> Vec<Symbol> {
        let mut attempt = 0;

        loop {
            match self.provider.provide_symbols(path).await {
                Ok(symbols) if !symbols.is_empty() => {
                    if attempt > 0 {
                        debug!(
                            path = %path.display(),
                            attempt = attempt + 1,
                            count = symbols.len(),
                            "symbols available after retry"
                        );
                    }
                    return symbols;
                }
                Ok(_) => {
                    debug!(path = %path.display(), attempt = attempt + 1, "provider returned no symbols");
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        provider = self.provider.provider_id(),
                        attempt = attempt + 1,
                        error = %err,
                        "symbol provider failed"
                    );
                }
            }

            let Some(delay) = self.policy.delay_after(attempt) else {
                debug!(
                    path = %path.display(),
                    attempts = attempt + 1,
                    max_attempts = self.policy.max_attempts(),
                    "accepting empty symbol forest"
                );
                return Vec::new();
            };

            sleep(delay).await;
            attempt += 1;
        }
    }
}
