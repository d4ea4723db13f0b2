//! Account repository trait

use async_trait::async_trait;

use super::entity::{AccountId, UserAccount};
use crate::domain::ledger::ApiKeyRecord;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Repository for account persistence
///
/// Key lists are only ever written whole, and only through
/// [`AccountRepository::replace_api_keys`], which is conditional on the
/// version the caller read.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync + std::fmt::Debug {
    /// Get an account by its ID
    async fn get(&self, id: &AccountId) -> Result<Option<UserAccount>, DomainError>;

    /// List all accounts, oldest first
    async fn list(&self) -> Result<Vec<UserAccount>, DomainError>;

    /// Create a new account, returns a conflict if the ID is taken
    async fn create(&self, account: UserAccount) -> Result<UserAccount, DomainError>;

    /// Delete an account, returns true if it existed
    async fn delete(&self, id: &AccountId) -> Result<bool, DomainError>;

    /// Replace the key list if the stored version still equals `expected_version`.
    ///
    /// Returns the committed account with its version advanced by one.
    /// Fails with `VersionConflict` if another write got there first and with
    /// `NotFound` if the account no longer exists.
    async fn replace_api_keys(
        &self,
        id: &AccountId,
        expected_version: u64,
        api_keys: Vec<ApiKeyRecord>,
    ) -> Result<UserAccount, DomainError>;

    /// Count accounts
    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }
}
