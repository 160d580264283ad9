//! Infrastructure layer module
//!
//! Adapters and external integrations:
//! - Configuration management
//! - Logging infrastructure
//! - The ctags-backed symbol provider
//! - Report artifact writing
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod logging;
pub mod output;
pub mod providers;
