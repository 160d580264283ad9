/// Receiver for pipeline progress notifications.
///
/// All methods default to no-ops so sinks implement only what they display.
pub trait ProgressSink: Send + Sync {
    /// A pass is about to start (`pass` is one-based)
    fn pass_started(&self, _pass: u32, _max_passes: u32) {}

    /// One more file finished fetching; `completed` rises by one per call
    fn file_completed(&self, _completed: usize, _total: usize) {}

    /// A pass produced a document
    fn pass_completed(&self, _pass: u32, _files: usize, _symbols: usize) {}
}

/// Sink that discards every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {}
