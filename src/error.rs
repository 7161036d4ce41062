//! Error types.
//!
//! Two layers with different propagation rules:
//!
//! - [`FitError`] describes why a single curve family failed. It is data: it
//!   lands inside that family's failure record and never aborts sibling
//!   families or the overall request.
//! - [`AppError`] is the binary's terminal-facing error (usage mistakes,
//!   unreadable files) and carries the process exit code.

use serde::{Serialize, Serializer};

/// Why one curve family could not be fitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FitError {
    /// The exponential model takes `ln(y)`, so every y must be positive.
    #[error("Exponential fit requires all y > 0 (log transform).")]
    NonPositiveY,
    /// The logarithmic model takes `ln(x)`, so every x must be positive.
    #[error("Logarithmic fit requires all x > 0 (log transform).")]
    NonPositiveX,
    /// The power model takes both logs, so every x and y must be positive.
    #[error("Power fit requires all x > 0 and y > 0 (log transform).")]
    NonPositiveXOrY,
    /// The two-parameter normal equations had a zero denominator
    /// (all independent values identical, or a single observation).
    #[error("Singular system (denominator zero) in the linear normal equations.")]
    SingularSystem,
    /// The quadratic 3×3 normal-equation matrix was not invertible.
    #[error("Singular system while solving the quadratic normal equations.")]
    SingularQuadratic,
    /// An unexpected fault caught at the per-family boundary.
    #[error("Internal error during fitting: {0}")]
    Internal(String),
}

impl Serialize for FitError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Terminal-facing application error with a process exit code.
#[derive(Debug, Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    /// Invalid command-line usage or a malformed request.
    pub fn usage(message: impl Into<String>) -> Self {
        Self {
            exit_code: 2,
            message: message.into(),
        }
    }

    /// A file could not be read or written.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            exit_code: 2,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_error_serializes_as_message_string() {
        let json = serde_json::to_value(FitError::NonPositiveY).unwrap();
        assert_eq!(
            json,
            serde_json::Value::String(
                "Exponential fit requires all y > 0 (log transform).".to_string()
            )
        );
    }

    #[test]
    fn app_error_carries_exit_code() {
        let err = AppError::usage("bad flags");
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "bad flags");
        assert_eq!(AppError::io("no file").exit_code(), 2);
    }
}
