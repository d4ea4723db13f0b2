//! Ledger rule errors

use thiserror::Error;

/// Local validation failures of the balance ledger rule.
///
/// Any of these aborts the mutation before anything is written.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Maximum number of API keys reached ({max})")]
    CapacityExceeded { max: usize },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("API key '{key}' not found")]
    NotFound { key: String },

    #[error("Source and destination API keys must differ")]
    SameKey,

    #[error("Insufficient balance: {available} available, {requested} requested")]
    InsufficientBalance { available: u64, requested: u64 },
}

impl LedgerError {
    pub fn invalid_amount(reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            reason: reason.into(),
        }
    }

    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Stable machine-readable name of the failure kind
    pub fn code(&self) -> &'static str {
        match self {
            Self::CapacityExceeded { .. } => "capacity_exceeded",
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::NotFound { .. } => "key_not_found",
            Self::SameKey => "same_key",
            Self::InsufficientBalance { .. } => "insufficient_balance",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failure() {
        assert_eq!(
            LedgerError::CapacityExceeded { max: 10 }.to_string(),
            "Maximum number of API keys reached (10)"
        );
        assert_eq!(
            LedgerError::InsufficientBalance {
                available: 5,
                requested: 10
            }
            .to_string(),
            "Insufficient balance: 5 available, 10 requested"
        );
    }

    #[test]
    fn test_codes() {
        assert_eq!(LedgerError::SameKey.code(), "same_key");
        assert_eq!(LedgerError::not_found("k").code(), "key_not_found");
        assert_eq!(LedgerError::invalid_amount("x").code(), "invalid_amount");
    }
}
