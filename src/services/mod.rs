pub mod bounded_scheduler;
pub mod convergence_controller;
pub mod directory_walker;
pub mod outline_aggregator;
pub mod outline_generator;
pub mod outline_pipeline;
pub mod path_filter;
pub mod renderers;
pub mod symbol_fetcher;

pub use bounded_scheduler::{BoundedScheduler, WorkerPanic};
pub use convergence_controller::{ConvergenceController, ConvergenceOutcome, ConvergenceState};
pub use directory_walker::{DirectoryWalker, WalkOutcome};
pub use outline_aggregator::OutlineAggregator;
pub use outline_generator::OutlineGenerator;
pub use outline_pipeline::OutlinePipeline;
pub use renderers::ReportFormat;
pub use symbol_fetcher::{FetchPolicy, SymbolFetcher};
