use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for driver-outline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Directory scan and scheduling
    #[serde(default)]
    pub scan: ScanConfig,

    /// Per-file symbol fetch retries
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Outer stabilization loop
    #[serde(default)]
    pub convergence: ConvergenceConfig,

    /// External symbol provider
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScanConfig {
    /// Maximum number of files fetched concurrently
    #[serde(default = "default_concurrency_limit")]
    pub concurrency_limit: usize,
}

const fn default_concurrency_limit() -> usize {
    8
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: default_concurrency_limit(),
        }
    }
}

/// Fetch retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FetchConfig {
    /// Delay before each retry of an empty result, in milliseconds
    #[serde(default = "default_retry_delays_ms")]
    pub retry_delays_ms: Vec<u64>,
}

fn default_retry_delays_ms() -> Vec<u64> {
    vec![100, 300, 600]
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            retry_delays_ms: default_retry_delays_ms(),
        }
    }
}

/// Convergence loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ConvergenceConfig {
    /// Hard ceiling on the number of passes
    #[serde(default = "default_max_passes")]
    pub max_passes: u32,

    /// Pause between passes in milliseconds
    #[serde(default = "default_pass_delay_ms")]
    pub pass_delay_ms: u64,
}

const fn default_max_passes() -> u32 {
    15
}

const fn default_pass_delay_ms() -> u64 {
    500
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            max_passes: default_max_passes(),
            pass_delay_ms: default_pass_delay_ms(),
        }
    }
}

/// Symbol provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProviderConfig {
    /// Path to the Universal Ctags executable
    #[serde(default = "default_ctags_path")]
    pub ctags_path: String,

    /// Extra arguments passed before the file name
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_ctags_path() -> String {
    "ctags".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            ctags_path: default_ctags_path(),
            extra_args: Vec::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Optional directory for rolling log files
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Rotation for file logs: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
