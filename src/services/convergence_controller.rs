//! ConvergenceController - repeat pipeline passes until the symbol total settles
//!
//! The provider behind the fetcher may still be indexing while the first
//! passes run. The controller re-runs whole passes, pausing between them,
//! and stops once two consecutive passes report the same total or the pass
//! ceiling is reached.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::errors::{OutlineError, OutlineResult};
use crate::domain::models::{ConvergenceConfig, OutlineDocument};
use crate::domain::ports::ProgressSink;

/// Controller lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvergenceState {
    Idle,
    Running,
    /// Two consecutive passes reported the same total
    Stabilized,
    /// The pass ceiling was reached first
    Exhausted,
}

impl ConvergenceState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Stabilized | Self::Exhausted)
    }
}

impl fmt::Display for ConvergenceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Stabilized => "stabilized",
            Self::Exhausted => "exhausted",
        };
        f.write_str(name)
    }
}

/// Result of a finished convergence run
#[derive(Debug, Clone)]
pub struct ConvergenceOutcome {
    pub run_id: Uuid,
    /// The document from the last pass
    pub document: OutlineDocument,
    pub passes: u32,
    pub state: ConvergenceState,
}

#[derive(Debug, Clone)]
pub struct ConvergenceController {
    max_passes: u32,
    pass_delay: Duration,
    state: ConvergenceState,
}

impl ConvergenceController {
    /// A ceiling of zero is treated as one pass.
    pub fn new(max_passes: u32, pass_delay: Duration) -> Self {
        Self {
            max_passes: max_passes.max(1),
            pass_delay,
            state: ConvergenceState::Idle,
        }
    }

    pub const fn state(&self) -> ConvergenceState {
        self.state
    }

    pub const fn max_passes(&self) -> u32 {
        self.max_passes
    }

    pub const fn pass_delay(&self) -> Duration {
        self.pass_delay
    }

    /// Drive `run_pass` until the total symbol count stabilizes or the
    /// ceiling is hit.
    ///
    /// `run_pass` receives the one-based pass number. An error from any
    /// pass aborts the run. Input errors (`InvalidInput`, `NoSourceFiles`)
    /// are returned as they are; anything else becomes
    /// [`OutlineError::PipelineFailure`] tagged with the failing pass.
    pub async fn run<F, Fut>(
        &mut self,
        progress: &dyn ProgressSink,
        mut run_pass: F,
    ) -> OutlineResult<ConvergenceOutcome>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = OutlineResult<OutlineDocument>>,
    {
        let run_id = Uuid::new_v4();
        self.state = ConvergenceState::Running;
        info!(%run_id, max_passes = self.max_passes, "starting convergence run");

        let mut previous_total: Option<usize> = None;
        let mut pass: u32 = 0;

        loop {
            pass += 1;
            progress.pass_started(pass, self.max_passes);

            let document = match run_pass(pass).await {
                Ok(document) => document,
                Err(err) => {
                    self.state = ConvergenceState::Idle;
                    warn!(%run_id, pass, error = %err, "pass failed, aborting run");
                    return Err(Self::surface(err, pass));
                }
            };

            let total = document.total_symbols;
            progress.pass_completed(pass, document.total_files, total);
            debug!(%run_id, pass, total, previous = ?previous_total, "pass finished");

            if previous_total == Some(total) {
                self.state = ConvergenceState::Stabilized;
            } else if pass >= self.max_passes {
                self.state = ConvergenceState::Exhausted;
            }

            if self.state.is_terminal() {
                info!(%run_id, passes = pass, state = %self.state, total, "convergence run finished");
                return Ok(ConvergenceOutcome {
                    run_id,
                    document,
                    passes: pass,
                    state: self.state,
                });
            }

            previous_total = Some(total);

            if !self.pass_delay.is_zero() {
                tokio::time::sleep(self.pass_delay).await;
            }
        }
    }

    fn surface(err: OutlineError, pass: u32) -> OutlineError {
        match err {
            err @ (OutlineError::InvalidInput(_)
            | OutlineError::NoSourceFiles { .. }
            | OutlineError::PipelineFailure { .. }) => err,
            other => OutlineError::PipelineFailure {
                pass,
                message: other.to_string(),
            },
        }
    }
}

impl Default for ConvergenceController {
    fn default() -> Self {
        Self::from(&ConvergenceConfig::default())
    }
}

impl From<&ConvergenceConfig> for ConvergenceController {
    fn from(config: &ConvergenceConfig) -> Self {
        Self::new(
            config.max_passes,
            Duration::from_millis(config.pass_delay_ms),
        )
    }
}
