use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project-local configuration directory
pub const CONFIG_DIR: &str = ".driver-outline";

/// Prefix for environment overrides, nested keys split on `__`
pub const ENV_PREFIX: &str = "DRIVER_OUTLINE_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid concurrency_limit: {0}. Must be at least 1")]
    InvalidConcurrency(usize),

    #[error("Invalid max_passes: {0}. Must be at least 1")]
    InvalidMaxPasses(u32),

    #[error("Invalid retry_delays_ms: {0:?}. Delays must not decrease")]
    InvalidRetryDelays(Vec<u64>),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("ctags_path cannot be empty")]
    EmptyCtagsPath,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for the current directory.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .driver-outline/config.yaml
    /// 3. .driver-outline/local.yaml (optional local overrides)
    /// 4. Environment variables (DRIVER_OUTLINE_* prefix)
    ///
    /// CLI flags are applied on top by the caller.
    pub fn load() -> Result<Config> {
        Self::load_from_project(Path::new("."))
    }

    /// Same as [`ConfigLoader::load`] with the config directory under `project_dir`
    pub fn load_from_project(project_dir: &Path) -> Result<Config> {
        let config_dir = project_dir.join(CONFIG_DIR);

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(config_dir.join("config.yaml")))
            .merge(Yaml::file(config_dir.join("local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file in place of the project files.
    /// Environment overrides still apply.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.is_file() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.scan.concurrency_limit == 0 {
            return Err(ConfigError::InvalidConcurrency(config.scan.concurrency_limit));
        }

        if config.convergence.max_passes == 0 {
            return Err(ConfigError::InvalidMaxPasses(config.convergence.max_passes));
        }

        let delays = &config.fetch.retry_delays_ms;
        if delays.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(ConfigError::InvalidRetryDelays(delays.clone()));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        if config.provider.ctags_path.trim().is_empty() {
            return Err(ConfigError::EmptyCtagsPath);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Keys the override tests set; unset elsewhere so loads stay isolated
    const OVERRIDE_KEYS: [&str; 3] = [
        "DRIVER_OUTLINE_CONVERGENCE__MAX_PASSES",
        "DRIVER_OUTLINE_PROVIDER__CTAGS_PATH",
        "DRIVER_OUTLINE_SCAN__CONCURRENCY_LIMIT",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scan.concurrency_limit, 8);
        assert_eq!(config.fetch.retry_delays_ms, vec![100, 300, 600]);
        assert_eq!(config.convergence.max_passes, 15);
        assert_eq!(config.convergence.pass_delay_ms, 500);
        assert_eq!(config.provider.ctags_path, "ctags");
        assert_eq!(config.logging.level, "warn");
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
scan:
  concurrency_limit: 2
fetch:
  retry_delays_ms: [50, 50, 200]
convergence:
  max_passes: 4
  pass_delay_ms: 0
provider:
  ctags_path: /opt/ctags/bin/ctags
  extra_args: ['--languages=C,C++']
logging:
  level: debug
  format: json
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.scan.concurrency_limit, 2);
        assert_eq!(config.fetch.retry_delays_ms, vec![50, 50, 200]);
        assert_eq!(config.convergence.max_passes, 4);
        assert_eq!(config.convergence.pass_delay_ms, 0);
        assert_eq!(config.provider.ctags_path, "/opt/ctags/bin/ctags");
        assert_eq!(config.provider.extra_args, vec!["--languages=C,C++"]);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.rotation, "daily");

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_zero_concurrency() {
        let mut config = Config::default();
        config.scan.concurrency_limit = 0;

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidConcurrency(0))
        ));
    }

    #[test]
    fn test_validate_zero_max_passes() {
        let mut config = Config::default();
        config.convergence.max_passes = 0;

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxPasses(0))
        ));
    }

    #[test]
    fn test_validate_decreasing_delays() {
        let mut config = Config::default();
        config.fetch.retry_delays_ms = vec![300, 100];

        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidRetryDelays(delays)) => assert_eq!(delays, vec![300, 100]),
            other => panic!("Expected InvalidRetryDelays error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_empty_delays_allowed() {
        let mut config = Config::default();
        config.fetch.retry_delays_ms = vec![];
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();

        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidLogLevel(level)) => assert_eq!(level, "verbose"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogFormat(_))
        ));
    }

    #[test]
    fn test_validate_invalid_rotation() {
        let mut config = Config::default();
        config.logging.rotation = "weekly".to_string();

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidRotation(_))
        ));
    }

    #[test]
    fn test_validate_empty_ctags_path() {
        let mut config = Config::default();
        config.provider.ctags_path = "  ".to_string();

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyCtagsPath)
        ));
    }

    #[test]
    fn test_project_files_merge_in_order() {
        let project = tempfile::tempdir().unwrap();
        let config_dir = project.path().join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("config.yaml"),
            "scan:\n  concurrency_limit: 3\nlogging:\n  level: info\n  format: json\n",
        )
        .unwrap();
        fs::write(config_dir.join("local.yaml"), "logging:\n  level: debug\n").unwrap();

        let config = temp_env::with_vars_unset(OVERRIDE_KEYS, || {
            ConfigLoader::load_from_project(project.path()).unwrap()
        });

        assert_eq!(config.scan.concurrency_limit, 3);
        assert_eq!(config.logging.level, "debug", "local.yaml should win");
        assert_eq!(
            config.logging.format, "json",
            "Base value should persist when not overridden"
        );
        assert_eq!(config.convergence.max_passes, 15);
    }

    #[test]
    fn test_missing_project_files_yield_defaults() {
        let project = tempfile::tempdir().unwrap();
        let config = temp_env::with_vars_unset(OVERRIDE_KEYS, || {
            ConfigLoader::load_from_project(project.path()).unwrap()
        });
        assert_eq!(config.scan.concurrency_limit, 8);
    }

    #[test]
    fn test_env_override() {
        let project = tempfile::tempdir().unwrap();

        temp_env::with_vars(
            [
                ("DRIVER_OUTLINE_CONVERGENCE__MAX_PASSES", Some("3")),
                ("DRIVER_OUTLINE_PROVIDER__CTAGS_PATH", Some("/usr/local/bin/uctags")),
            ],
            || {
                let config = ConfigLoader::load_from_project(project.path()).unwrap();
                assert_eq!(config.convergence.max_passes, 3);
                assert_eq!(config.provider.ctags_path, "/usr/local/bin/uctags");
            },
        );
    }

    #[test]
    fn test_invalid_env_value_fails_validation() {
        let project = tempfile::tempdir().unwrap();

        temp_env::with_var("DRIVER_OUTLINE_SCAN__CONCURRENCY_LIMIT", Some("0"), || {
            let err = ConfigLoader::load_from_project(project.path()).unwrap_err();
            assert!(err.to_string().contains("concurrency_limit"));
        });
    }

    #[test]
    fn test_load_from_file_replaces_project_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"convergence:\n  pass_delay_ms: 25\n").unwrap();

        let config = temp_env::with_vars_unset(OVERRIDE_KEYS, || {
            ConfigLoader::load_from_file(file.path()).unwrap()
        });
        assert_eq!(config.convergence.pass_delay_ms, 25);
        assert_eq!(config.convergence.max_passes, 15);
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let err = ConfigLoader::load_from_file("/nonexistent/driver-outline.yaml").unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }
}
