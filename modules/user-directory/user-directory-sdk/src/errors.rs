//! Public error types for the `user_directory` module.

use thiserror::Error;

/// Errors surfaced by directory operations.
///
/// Every variant is shown to the user as a blocking notification; none is
/// retried automatically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// Transport or status failure on a remote call.
    #[error("Network error: {message}")]
    Network { message: String },

    /// A required field was blank or malformed.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The operation referenced an id that is not in the directory.
    #[error("User not found: {id}")]
    NotFound { id: u64 },
}

impl DirectoryError {
    /// Create a `Network` error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a `Validation` error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a `NotFound` error.
    #[must_use]
    pub fn not_found(id: u64) -> Self {
        Self::NotFound { id }
    }

    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            DirectoryError::not_found(4).to_string(),
            "User not found: 4"
        );
        assert_eq!(
            DirectoryError::network("HTTP 500").to_string(),
            "Network error: HTTP 500"
        );
        assert!(DirectoryError::network("x").is_network());
        assert!(!DirectoryError::validation("x").is_network());
    }
}
