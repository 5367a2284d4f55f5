use crate::domain::model::{RunStatus, EXIT_NOT_FOUND, EXIT_STARTUP};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Duplicate example id: {id}")]
    DuplicateId { id: String },

    #[error("Example not found: {id}")]
    NotFound { id: String },

    #[error("Example '{id}' failed: {detail}")]
    ExampleExecution { id: String, detail: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Fixture file '{path}' could not be parsed: {message}")]
    FixtureParseError { path: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Registry,
    Lookup,
    Execution,
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CatalogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::DuplicateId { .. } => ErrorCategory::Registry,
            CatalogError::NotFound { .. } => ErrorCategory::Lookup,
            CatalogError::ExampleExecution { .. } => ErrorCategory::Execution,
            CatalogError::IoError(_) | CatalogError::SerializationError(_) => ErrorCategory::Io,
            CatalogError::FixtureParseError { .. }
            | CatalogError::ConfigError { .. }
            | CatalogError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    /// Registry and configuration problems stop the process before anything
    /// runs; a missing id or a broken example only affects its own result.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lookup => ErrorSeverity::Medium,
            ErrorCategory::Execution => ErrorSeverity::Medium,
            ErrorCategory::Io | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Registry => ErrorSeverity::Critical,
        }
    }

    /// Process exit code when this error ends a command.
    pub fn exit_code(&self) -> i32 {
        match self {
            CatalogError::NotFound { .. } => EXIT_NOT_FOUND,
            _ => match self.severity() {
                ErrorSeverity::Low | ErrorSeverity::Medium => RunStatus::Errored.exit_code(),
                ErrorSeverity::High | ErrorSeverity::Critical => EXIT_STARTUP,
            },
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CatalogError::DuplicateId { id } => {
                format!("The catalog registers '{}' more than once", id)
            }
            CatalogError::NotFound { id } => format!("No example is registered as '{}'", id),
            CatalogError::ExampleExecution { id, .. } => format!("Example '{}' did not complete", id),
            CatalogError::FixtureParseError { path, .. } => {
                format!("Fixture file '{}' is not valid TOML", path)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CatalogError::DuplicateId { .. } => "Give every example a unique '<pattern>/<variant>' id",
            CatalogError::NotFound { .. } => "Run 'gof-catalog list' to see the registered ids",
            CatalogError::ExampleExecution { .. } => "Re-run with --verbose to see the captured transcript",
            CatalogError::IoError(_) => "Check that the path exists and is readable",
            CatalogError::SerializationError(_) => "Check the output destination and retry",
            CatalogError::FixtureParseError { .. } => {
                "Regenerate the file with 'gof-catalog record --output <path>'"
            }
            CatalogError::ConfigError { .. } | CatalogError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command-line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_id_is_critical() {
        let err = CatalogError::DuplicateId { id: "a".to_string() };
        assert_eq!(err.category(), ErrorCategory::Registry);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("'a'"));
    }

    #[test]
    fn test_not_found_is_recoverable() {
        let err = CatalogError::NotFound { id: "missing".to_string() };
        assert_eq!(err.category(), ErrorCategory::Lookup);
        assert!(err.severity() < ErrorSeverity::High);
        assert_eq!(err.to_string(), "Example not found: missing");
    }

    #[test]
    fn test_exit_codes_by_error_kind() {
        assert_eq!(CatalogError::NotFound { id: "nope/x".to_string() }.exit_code(), 3);
        assert_eq!(CatalogError::DuplicateId { id: "a/b".to_string() }.exit_code(), 4);
        let config = CatalogError::ConfigError {
            message: "TOML parsing error".to_string(),
        };
        assert_eq!(config.exit_code(), 4);
        let execution = CatalogError::ExampleExecution {
            id: "a/b".to_string(),
            detail: "boom".to_string(),
        };
        assert_eq!(execution.exit_code(), 2);
    }
}
