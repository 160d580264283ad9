//! Bounded-concurrency execution of per-file work.

use futures::stream::{self, StreamExt};
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use thiserror::Error;
use tracing::{debug, error};

use crate::domain::models::ScanConfig;
use crate::domain::ports::ProgressSink;

/// A worker panicked while the scheduler was draining its batch
#[derive(Debug, Clone, Error)]
#[error("worker panicked: {message}")]
pub struct WorkerPanic {
    pub message: String,
}

/// Runs one async worker per item with a fixed concurrency ceiling.
///
/// Items are dispatched in input order; at most `concurrency_limit` workers
/// are unresolved at any moment and a new one is admitted only when a
/// running one finishes. Everything runs on the caller's task, so no
/// background work outlives [`run_all`](Self::run_all).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedScheduler {
    concurrency_limit: usize,
}

impl BoundedScheduler {
    /// Create a scheduler; a limit of zero is raised to one
    pub fn new(concurrency_limit: usize) -> Self {
        Self {
            concurrency_limit: concurrency_limit.max(1),
        }
    }

    pub const fn concurrency_limit(&self) -> usize {
        self.concurrency_limit
    }

    /// Invoke `worker` for every item and collect the outputs in completion order.
    ///
    /// `progress.file_completed` fires exactly once per item with a count
    /// rising from 1 to `items.len()`. A panicking worker still frees its
    /// slot and is counted; the remaining items are drained before the
    /// first panic is reported.
    pub async fn run_all<T, R, F, Fut>(
        &self,
        items: Vec<T>,
        worker: F,
        progress: &dyn ProgressSink,
    ) -> Result<Vec<R>, WorkerPanic>
    where
        F: Fn(T) -> Fut,
        Fut: Future<Output = R>,
    {
        let total = items.len();
        let mut completed = 0;
        let mut outputs = Vec::with_capacity(total);
        let mut first_panic: Option<WorkerPanic> = None;

        debug!(total, limit = self.concurrency_limit, "dispatching workers");

        let mut in_flight = stream::iter(items)
            .map(|item| AssertUnwindSafe(worker(item)).catch_unwind())
            .buffer_unordered(self.concurrency_limit);

        while let Some(result) = in_flight.next().await {
            completed += 1;
            match result {
                Ok(output) => outputs.push(output),
                Err(payload) => {
                    let panic = WorkerPanic {
                        message: panic_message(payload.as_ref()),
                    };
                    error!(error = %panic, "worker failed");
                    first_panic.get_or_insert(panic);
                }
            }
            progress.file_completed(completed, total);
        }

        match first_panic {
            Some(panic) => Err(panic),
            None => Ok(outputs),
        }
    }
}

impl Default for BoundedScheduler {
    fn default() -> Self {
        Self::from(&ScanConfig::default())
    }
}

impl From<&ScanConfig> for BoundedScheduler {
    fn from(config: &ScanConfig) -> Self {
        Self::new(config.concurrency_limit)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<(usize, usize)>>,
    }

    impl ProgressSink for RecordingProgress {
        fn file_completed(&self, completed: usize, total: usize) {
            self.events.lock().unwrap().push((completed, total));
        }
    }

    #[test]
    fn test_zero_limit_is_raised_to_one() {
        assert_eq!(BoundedScheduler::new(0).concurrency_limit(), 1);
        assert_eq!(BoundedScheduler::default().concurrency_limit(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_exceeds_concurrency_limit() {
        let scheduler = BoundedScheduler::new(3);
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let progress = RecordingProgress::default();

        let outputs = scheduler
            .run_all(
                (0..20u64).collect(),
                |i| {
                    let in_flight = Arc::clone(&in_flight);
                    let peak = Arc::clone(&peak);
                    async move {
                        let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                        peak.fetch_max(now, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(10 + (i * 7) % 13)).await;
                        in_flight.fetch_sub(1, Ordering::SeqCst);
                        i
                    }
                },
                &progress,
            )
            .await
            .unwrap();

        assert_eq!(peak.load(Ordering::SeqCst), 3);
        assert_eq!(in_flight.load(Ordering::SeqCst), 0);
        let mut sorted = outputs;
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_is_exactly_once_and_monotonic() {
        let scheduler = BoundedScheduler::new(4);
        let progress = RecordingProgress::default();

        scheduler
            .run_all(
                (0..9u64).rev().collect(),
                |i| async move {
                    tokio::time::sleep(Duration::from_millis(i * 5)).await;
                },
                &progress,
            )
            .await
            .unwrap();

        let events = progress.events.into_inner().unwrap();
        let expected: Vec<(usize, usize)> = (1..=9).map(|n| (n, 9)).collect();
        assert_eq!(events, expected);
    }

    #[tokio::test]
    async fn test_dispatch_follows_input_order() {
        let scheduler = BoundedScheduler::new(2);
        let started = Mutex::new(Vec::new());

        scheduler
            .run_all(
                vec!["a", "b", "c", "d", "e"],
                |name| {
                    started.lock().unwrap().push(name);
                    async {}
                },
                &crate::domain::ports::NullProgress,
            )
            .await
            .unwrap();

        assert_eq!(started.into_inner().unwrap(), vec!["a", "b", "c", "d", "e"]);
    }

    #[tokio::test]
    async fn test_empty_input_completes_without_progress() {
        let progress = RecordingProgress::default();
        let outputs: Vec<()> = BoundedScheduler::new(8)
            .run_all(Vec::<u8>::new(), |_| async {}, &progress)
            .await
            .unwrap();

        assert!(outputs.is_empty());
        assert!(progress.events.into_inner().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_panicking_worker_is_drained_and_reported() {
        let scheduler = BoundedScheduler::new(2);
        let progress = RecordingProgress::default();
        let finished = AtomicUsize::new(0);

        let result = scheduler
            .run_all(
                vec![1, 2, 3, 4],
                |i| {
                    let finished = &finished;
                    async move {
                        assert!(i != 2, "bad file {i}");
                        finished.fetch_add(1, Ordering::SeqCst);
                    }
                },
                &progress,
            )
            .await;

        let err = result.unwrap_err();
        assert!(err.message.contains("bad file 2"));
        assert_eq!(finished.load(Ordering::SeqCst), 3);
        assert_eq!(progress.events.into_inner().unwrap().len(), 4);
    }
}
