//! Domain errors for the outline pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building an outline.
///
/// Only `InvalidInput`, `NoSourceFiles` and `PipelineFailure` reach callers
/// of the convergence loop. Directory faults are contained where they
/// happen and only logged. Provider faults never become an `OutlineError`:
/// they stay a [`ProviderError`](super::ports::ProviderError) inside the
/// symbol fetcher.
#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No C/C++ source files found under {}", .root.display())]
    NoSourceFiles { root: PathBuf },

    #[error("Failed to read directory {}: {source}", .path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Outline pipeline failed on pass {pass}: {message}")]
    PipelineFailure { pass: u32, message: String },

    #[error("Failed to write {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl OutlineError {
    /// Whether the error stems from caller configuration rather than a fault
    pub const fn is_configuration_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::NoSourceFiles { .. })
    }
}

pub type OutlineResult<T> = Result<T, OutlineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_human_readable() {
        let err = OutlineError::NoSourceFiles {
            root: PathBuf::from("/src/driver"),
        };
        assert_eq!(
            err.to_string(),
            "No C/C++ source files found under /src/driver"
        );

        let err = OutlineError::PipelineFailure {
            pass: 3,
            message: "worker panicked".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Outline pipeline failed on pass 3: worker panicked"
        );
    }

    #[test]
    fn test_configuration_error_classification() {
        assert!(OutlineError::InvalidInput("relative".into()).is_configuration_error());
        assert!(OutlineError::NoSourceFiles {
            root: PathBuf::from("/tmp")
        }
        .is_configuration_error());
        assert!(!OutlineError::PipelineFailure {
            pass: 1,
            message: String::new()
        }
        .is_configuration_error());
    }

    #[test]
    fn test_directory_faults_are_not_configuration_errors() {
        let err = OutlineError::DirectoryRead {
            path: PathBuf::from("/src/driver/locked"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };

        assert!(!err.is_configuration_error());
        assert!(err.to_string().starts_with("Failed to read directory /src/driver/locked"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
