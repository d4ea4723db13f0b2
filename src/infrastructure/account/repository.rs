//! In-memory account repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::{AccountId, AccountRepository, UserAccount};
use crate::domain::ledger::ApiKeyRecord;
use crate::domain::DomainError;

/// In-memory implementation of AccountRepository
///
/// The version check and the write happen under one write lock, which makes
/// `replace_api_keys` a true compare-and-swap.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<String, UserAccount>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial accounts
    pub fn with_accounts(accounts: Vec<UserAccount>) -> Self {
        let map = accounts
            .into_iter()
            .map(|account| (account.id().as_str().to_string(), account))
            .collect();

        Self {
            accounts: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn get(&self, id: &AccountId) -> Result<Option<UserAccount>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(id.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<UserAccount>, DomainError> {
        let accounts = self.accounts.read().await;

        let mut result: Vec<UserAccount> = accounts.values().cloned().collect();
        result.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().as_str().cmp(b.id().as_str()))
        });

        Ok(result)
    }

    async fn create(&self, account: UserAccount) -> Result<UserAccount, DomainError> {
        let mut accounts = self.accounts.write().await;
        let id = account.id().as_str().to_string();

        if accounts.contains_key(&id) {
            return Err(DomainError::conflict(format!(
                "Account '{}' already exists",
                id
            )));
        }

        accounts.insert(id, account.clone());
        Ok(account)
    }

    async fn delete(&self, id: &AccountId) -> Result<bool, DomainError> {
        let mut accounts = self.accounts.write().await;
        Ok(accounts.remove(id.as_str()).is_some())
    }

    async fn replace_api_keys(
        &self,
        id: &AccountId,
        expected_version: u64,
        api_keys: Vec<ApiKeyRecord>,
    ) -> Result<UserAccount, DomainError> {
        let mut accounts = self.accounts.write().await;

        let account = accounts
            .get_mut(id.as_str())
            .ok_or_else(|| DomainError::not_found(format!("Account '{}' not found", id)))?;

        if account.version() != expected_version {
            return Err(DomainError::version_conflict(format!(
                "Account '{}' is at version {}, expected {}",
                id,
                account.version(),
                expected_version
            )));
        }

        account.commit_api_keys(api_keys);
        Ok(account.clone())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.accounts.read().await.len())
    }
}
