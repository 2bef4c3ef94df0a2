//! Library-level error taxonomy for revq.
//!
//! `RevqError` is the primary error type returned by revq library operations.
//! Errors are organized into categories:
//!
//! | Category | Description |
//! |----------|-------------|
//! | `Report` | Report ingestion, rendering, and persistence errors |
//! | `Pipeline` | Pipeline step resolution errors |
//! | `Config` | Configuration file or value errors |
//!
//! Every error is either fatal-and-propagated or an explicit, logged
//! control-flow decision (environment skips); nothing is swallowed.
//!
//! # Exit Code Mapping
//!
//! Use [`to_exit_code()`](RevqError::to_exit_code) to map errors to CLI exit
//! codes: configuration and format-selection mistakes exit with 2, everything
//! else with 1. Library code returns `RevqError` and does NOT call
//! `std::process::exit()`.

use thiserror::Error;

/// Top-level error type wrapping the per-subsystem taxonomies.
#[derive(Error, Debug)]
pub enum RevqError {
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RevqError {
    /// Map this error to a CLI process exit code.
    #[must_use]
    pub const fn to_exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Report(ReportError::UnsupportedFormat { .. }) => 2,
            _ => 1,
        }
    }
}

/// Errors raised by the report model: ingestion, rendering, persistence.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A raw issue entry did not deserialize; `reason` names the offending
    /// field. Fatal to the whole ingestion, never partially recovered.
    #[error("Malformed issue entry for {file}: {reason}")]
    MalformedIssue { file: String, reason: String },

    #[error("Unsupported report format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Report write failed at {path}: {reason}")]
    WriteFailed { path: String, reason: String },

    #[error("Report read failed at {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("Invalid report JSON at {path}: {reason}")]
    InvalidJson { path: String, reason: String },
}

/// Errors raised by the pipeline engine itself.
///
/// Failures inside a step's own invocation are not represented here; they
/// propagate to the pipeline caller untouched.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The step's callable reference matched nothing in the registry.
    #[error("Unknown pipeline step callable: {call}")]
    UnknownStep { call: String },
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration file {path}: {reason}")]
    InvalidFile { path: String, reason: String },

    #[error("Configuration file not found at {path}")]
    NotFound { path: String },

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_exit_with_two() {
        let err = RevqError::from(ConfigError::NotFound {
            path: "/tmp/.revq.toml".to_string(),
        });
        assert_eq!(err.to_exit_code(), 2);

        let err = RevqError::from(ReportError::UnsupportedFormat {
            format: "yaml".to_string(),
        });
        assert_eq!(err.to_exit_code(), 2);
    }

    #[test]
    fn test_other_errors_exit_with_one() {
        let err = RevqError::from(PipelineError::UnknownStep {
            call: "nope".to_string(),
        });
        assert_eq!(err.to_exit_code(), 1);

        let err = RevqError::from(ReportError::MalformedIssue {
            file: "main.py".to_string(),
            reason: "missing field `title`".to_string(),
        });
        assert_eq!(err.to_exit_code(), 1);
    }

    #[test]
    fn test_display_names_the_offender() {
        let err = ReportError::MalformedIssue {
            file: "main.py".to_string(),
            reason: "missing field `title`".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("main.py"));
        assert!(msg.contains("missing field `title`"));

        let err = PipelineError::UnknownStep {
            call: "post_comment".to_string(),
        };
        assert!(err.to_string().contains("post_comment"));
    }
}
