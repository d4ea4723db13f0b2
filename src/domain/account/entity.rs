//! Account entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_account_id, AccountValidationError};
use crate::domain::ledger::ApiKeyRecord;

/// Account identifier as issued by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Create a new AccountId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, AccountValidationError> {
        let id = id.into();
        validate_account_id(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccountId {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user account: identity, role flag and the ordered list of API keys.
///
/// `version` increases by one on every committed write and is the basis of
/// the compare-and-swap performed by account repositories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    id: AccountId,
    email: String,
    is_admin: bool,
    api_keys: Vec<ApiKeyRecord>,
    version: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserAccount {
    /// Create a new, non-admin account with no keys
    pub fn new(id: AccountId, email: impl Into<String>) -> Self {
        let now = Utc::now();

        Self {
            id,
            email: email.into(),
            is_admin: false,
            api_keys: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild an account from stored parts
    pub fn from_parts(
        id: AccountId,
        email: String,
        is_admin: bool,
        api_keys: Vec<ApiKeyRecord>,
        version: u64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            is_admin,
            api_keys,
            version,
            created_at,
            updated_at,
        }
    }

    pub fn with_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }

    pub fn with_api_keys(mut self, api_keys: Vec<ApiKeyRecord>) -> Self {
        self.api_keys = api_keys;
        self
    }

    // Getters

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn api_keys(&self) -> &[ApiKeyRecord] {
        &self.api_keys
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    /// Replace the key list and advance the version.
    ///
    /// Only repositories call this, after checking the expected version.
    pub(crate) fn commit_api_keys(&mut self, api_keys: Vec<ApiKeyRecord>) {
        self.api_keys = api_keys;
        self.version += 1;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger::KeyToken;

    fn account() -> UserAccount {
        UserAccount::new(AccountId::new("user-1").unwrap(), "user@example.com")
    }

    #[test]
    fn test_account_id_valid() {
        let id = AccountId::new("abc_DEF-123").unwrap();
        assert_eq!(id.as_str(), "abc_DEF-123");
        assert_eq!(id.to_string(), "abc_DEF-123");
    }

    #[test]
    fn test_account_id_invalid() {
        assert!(AccountId::new("").is_err());
        assert!(AccountId::new("a b").is_err());
    }

    #[test]
    fn test_new_account_defaults() {
        let account = account();

        assert_eq!(account.email(), "user@example.com");
        assert!(!account.is_admin());
        assert!(account.api_keys().is_empty());
        assert_eq!(account.version(), 0);
    }

    #[test]
    fn test_commit_bumps_version() {
        let mut account = account();
        let record = ApiKeyRecord::issue(KeyToken::new("k1").unwrap(), Utc::now());

        account.commit_api_keys(vec![record]);
        assert_eq!(account.version(), 1);
        assert_eq!(account.api_keys().len(), 1);

        account.commit_api_keys(Vec::new());
        assert_eq!(account.version(), 2);
        assert!(account.api_keys().is_empty());
    }

    #[test]
    fn test_account_id_deserialization_validates() {
        let result: Result<AccountId, _> = serde_json::from_str("\"bad id\"");
        assert!(result.is_err());
    }
}
