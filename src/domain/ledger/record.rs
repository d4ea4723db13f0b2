//! API key record held inside an account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::LedgerError;

const MAX_KEY_TOKEN_LENGTH: usize = 128;

/// Opaque API key token - URL-safe characters only, max 128 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyToken(String);

impl KeyToken {
    /// Create a new KeyToken after validation
    pub fn new(token: impl Into<String>) -> Result<Self, LedgerError> {
        let token = token.into();

        if token.is_empty() {
            return Err(LedgerError::not_found(""));
        }

        if token.len() > MAX_KEY_TOKEN_LENGTH
            || !token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(LedgerError::not_found(token));
        }

        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form used in logs
    pub fn abbreviated(&self) -> &str {
        &self.0[..8.min(self.0.len())]
    }
}

impl TryFrom<String> for KeyToken {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<KeyToken> for String {
    fn from(token: KeyToken) -> Self {
        token.0
    }
}

impl std::fmt::Display for KeyToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A token-balance-holding API key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyRecord {
    key: KeyToken,
    balance: u64,
    created_at: DateTime<Utc>,
}

impl ApiKeyRecord {
    /// A freshly issued key always starts with a zero balance
    pub fn issue(key: KeyToken, created_at: DateTime<Utc>) -> Self {
        Self {
            key,
            balance: 0,
            created_at,
        }
    }

    /// Rebuild a record from stored parts
    pub fn from_parts(key: KeyToken, balance: u64, created_at: DateTime<Utc>) -> Self {
        Self {
            key,
            balance,
            created_at,
        }
    }

    pub fn key(&self) -> &KeyToken {
        &self.key
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn with_balance(&self, balance: u64) -> Self {
        Self {
            balance,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_token_valid() {
        let token = KeyToken::new("tk_AbC-123_xyz").unwrap();
        assert_eq!(token.as_str(), "tk_AbC-123_xyz");
        assert_eq!(token.abbreviated(), "tk_AbC-1");
    }

    #[test]
    fn test_key_token_invalid() {
        assert!(KeyToken::new("").is_err());
        assert!(KeyToken::new("has space").is_err());
        assert!(KeyToken::new("a/b").is_err());
        assert!(KeyToken::new("x".repeat(129)).is_err());
    }

    #[test]
    fn test_issue_starts_at_zero() {
        let record = ApiKeyRecord::issue(KeyToken::new("k1").unwrap(), Utc::now());
        assert_eq!(record.balance(), 0);
    }

    #[test]
    fn test_record_serialization_shape() {
        let created = Utc::now();
        let record = ApiKeyRecord::from_parts(KeyToken::new("k1").unwrap(), 42, created);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["key"], "k1");
        assert_eq!(json["balance"], 42);

        let back: ApiKeyRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_deserialize_rejects_negative_balance() {
        let json = serde_json::json!({
            "key": "k1",
            "balance": -1,
            "created_at": "2024-01-01T00:00:00Z"
        });
        assert!(serde_json::from_value::<ApiKeyRecord>(json).is_err());
    }
}
