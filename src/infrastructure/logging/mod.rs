//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - stderr output in JSON or pretty format
//! - optional rolling JSON log files

pub mod config;
pub mod logger;

pub use config::{LogConfig, LogFormat, RotationPolicy};
pub use logger::LoggerImpl;
