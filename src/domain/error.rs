use thiserror::Error;

use super::ledger::LedgerError;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid ID format: {message}")]
    InvalidId { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Version conflict: {message}")]
    VersionConflict { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Storage unavailable: {message}")]
    Storage { message: String },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn version_conflict(message: impl Into<String>) -> Self {
        Self::VersionConflict {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// True for optimistic-concurrency losses that may be retried against a fresh snapshot
    pub fn is_version_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Account 'user-1' not found");
        assert_eq!(error.to_string(), "Not found: Account 'user-1' not found");
    }

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("Invalid input");
        assert_eq!(error.to_string(), "Validation error: Invalid input");
    }

    #[test]
    fn test_storage_error_names_kind() {
        let error = DomainError::storage("connection refused");
        assert_eq!(error.to_string(), "Storage unavailable: connection refused");
    }

    #[test]
    fn test_ledger_error_is_transparent() {
        let error: DomainError = LedgerError::SameKey.into();
        assert_eq!(error.to_string(), LedgerError::SameKey.to_string());
    }

    #[test]
    fn test_version_conflict_detection() {
        assert!(DomainError::version_conflict("stale").is_version_conflict());
        assert!(!DomainError::conflict("exists").is_version_conflict());
    }
}
