//! Unified error hierarchy
//!
//! Top-level error type wrapping the per-subsystem errors, with severity
//! mapping for the tracing system and user-facing messages for the CLI.

use thiserror::Error;

use crate::builder::ValidationError;
use crate::export::ExportError;
use crate::store::StoreError;

/// Top-level error type for all intervalog operations
#[derive(Debug, Error)]
pub enum IntervalogError {
    /// Record construction rejected the input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Workout store operation failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Export operation failed
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for intervalog operations
pub type Result<T> = std::result::Result<T, IntervalogError>;

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Error,
    Warning,
}

impl ErrorSeverity {
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}

impl IntervalogError {
    /// Validation and not-found failures are correctable user input, not
    /// system faults.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            IntervalogError::Validation(_) => ErrorSeverity::Warning,
            IntervalogError::Store(StoreError::NotFound { .. }) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    /// User-friendly error message for CLI display
    pub fn user_message(&self) -> String {
        match self {
            IntervalogError::Validation(e) => {
                format!("{}. Correct the input and try again.", e)
            }
            IntervalogError::Store(StoreError::NotFound { id }) => {
                format!("No workout with id {} in the log.", id)
            }
            IntervalogError::Store(StoreError::Serde(_)) => {
                "The workout file could not be read. It may be corrupted.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_warning() {
        let err = IntervalogError::Validation(ValidationError::InvalidDistance);
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert!(err.user_message().contains("Correct the input"));
    }

    #[test]
    fn test_not_found_is_warning() {
        let err = IntervalogError::Store(StoreError::NotFound {
            id: "42".to_string(),
        });
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert!(err.user_message().contains("No workout with id 42"));
    }

    #[test]
    fn test_io_is_error() {
        let err = IntervalogError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }
}
