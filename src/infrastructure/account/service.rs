//! Account service: registration, admin reads and key-list mutations

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::account::{validate_email, AccountId, AccountRepository, UserAccount};
use crate::domain::ledger::{Amount, ApiKeyRecord, BalanceLedger, KeyToken, LedgerMutation};
use crate::domain::DomainError;
use crate::infrastructure::api_key::KeyTokenGenerator;

const DEFAULT_MAX_CONFLICT_RETRIES: u32 = 3;

/// Account service
///
/// Every key-list change goes through [`AccountService::apply`]: read the
/// account, run the ledger rule, then compare-and-swap the result. A lost
/// race re-reads and re-applies the same mutation.
#[derive(Debug)]
pub struct AccountService<R: AccountRepository + ?Sized> {
    repository: Arc<R>,
    ledger: BalanceLedger,
    generator: KeyTokenGenerator,
    max_conflict_retries: u32,
}

impl<R: AccountRepository + ?Sized> AccountService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            ledger: BalanceLedger::default(),
            generator: KeyTokenGenerator::default(),
            max_conflict_retries: DEFAULT_MAX_CONFLICT_RETRIES,
        }
    }

    pub fn with_ledger(mut self, ledger: BalanceLedger) -> Self {
        self.ledger = ledger;
        self
    }

    pub fn with_max_conflict_retries(mut self, retries: u32) -> Self {
        self.max_conflict_retries = retries;
        self
    }

    /// Create the caller's account with no keys
    pub async fn register(&self, id: &str, email: &str) -> Result<UserAccount, DomainError> {
        let account_id = parse_account_id(id)?;
        validate_email(email).map_err(|e| DomainError::validation(e.to_string()))?;

        let account = self
            .repository
            .create(UserAccount::new(account_id, email))
            .await?;

        info!(account_id = %account.id(), "Account registered");
        Ok(account)
    }

    /// Create the bootstrap admin unless it already exists.
    ///
    /// An existing account without the admin flag is reported as a conflict
    /// rather than silently promoted.
    pub async fn ensure_admin(&self, id: &str, email: &str) -> Result<UserAccount, DomainError> {
        let account_id = parse_account_id(id)?;

        if let Some(existing) = self.repository.get(&account_id).await? {
            if existing.is_admin() {
                debug!(account_id = %account_id, "Bootstrap admin already present");
                return Ok(existing);
            }

            return Err(DomainError::conflict(format!(
                "Account '{}' exists but is not an administrator",
                account_id
            )));
        }

        validate_email(email).map_err(|e| DomainError::validation(e.to_string()))?;

        let admin = UserAccount::new(account_id, email).with_admin(true);
        let admin = self.repository.create(admin).await?;

        info!(account_id = %admin.id(), "Bootstrap admin account created");
        Ok(admin)
    }

    pub async fn get(&self, id: &str) -> Result<Option<UserAccount>, DomainError> {
        let account_id = parse_account_id(id)?;
        self.repository.get(&account_id).await
    }

    /// Get an account, returning an error if not found
    pub async fn get_required(&self, id: &str) -> Result<UserAccount, DomainError> {
        self.get(id).await?.ok_or_else(|| account_not_found(id))
    }

    pub async fn list(&self) -> Result<Vec<UserAccount>, DomainError> {
        self.repository.list().await
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }

    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let account_id = parse_account_id(id)?;
        let deleted = self.repository.delete(&account_id).await?;

        if deleted {
            info!(account_id = %account_id, "Account deleted");
        }

        Ok(deleted)
    }

    /// Issue a new zero-balance key. Returns the committed account and the new record.
    pub async fn create_api_key(
        &self,
        id: &str,
    ) -> Result<(UserAccount, ApiKeyRecord), DomainError> {
        let account_id = parse_account_id(id)?;
        // Generated once so a retried write appends the same token
        let record = ApiKeyRecord::issue(self.generator.generate()?, Utc::now());

        let account = self
            .apply(&account_id, LedgerMutation::Create(record.clone()))
            .await?;

        info!(account_id = %account_id, key = record.key().abbreviated(), "API key created");
        Ok((account, record))
    }

    /// Remove a key. Identifiers that could never have been issued are absent
    /// by definition, so they leave the account unchanged like any other miss.
    pub async fn delete_api_key(&self, id: &str, key: &str) -> Result<UserAccount, DomainError> {
        let account_id = parse_account_id(id)?;

        let Ok(key) = KeyToken::new(key) else {
            debug!(account_id = %account_id, "Delete of malformed key left account unchanged");
            return self.get_required(account_id.as_str()).await;
        };

        self.apply(&account_id, LedgerMutation::Delete { key }).await
    }

    pub async fn set_balance(
        &self,
        id: &str,
        key: &str,
        balance: Amount,
    ) -> Result<UserAccount, DomainError> {
        let account_id = parse_account_id(id)?;
        let key = KeyToken::new(key)?;

        self.apply(&account_id, LedgerMutation::SetBalance { key, balance })
            .await
    }

    pub async fn transfer(
        &self,
        id: &str,
        from: &str,
        to: &str,
        amount: Amount,
    ) -> Result<UserAccount, DomainError> {
        let account_id = parse_account_id(id)?;
        let from = KeyToken::new(from)?;
        let to = KeyToken::new(to)?;

        self.apply(&account_id, LedgerMutation::Transfer { from, to, amount })
            .await
    }

    /// Read, apply and conditionally write one mutation.
    ///
    /// Ledger errors return before any write. Version conflicts are retried
    /// against a fresh read up to `max_conflict_retries` times; every other
    /// repository error is returned as is.
    pub async fn apply(
        &self,
        id: &AccountId,
        mutation: LedgerMutation,
    ) -> Result<UserAccount, DomainError> {
        let mut conflicts = 0;

        loop {
            let account = self
                .repository
                .get(id)
                .await?
                .ok_or_else(|| account_not_found(id.as_str()))?;

            let next = match self.ledger.apply(account.api_keys(), &mutation) {
                Ok(next) => next,
                Err(e) => {
                    debug!(account_id = %id, mutation = mutation.kind(), error = %e, "Mutation rejected");
                    return Err(e.into());
                }
            };

            if next.as_slice() == account.api_keys() {
                debug!(account_id = %id, mutation = mutation.kind(), "Mutation left keys unchanged");
                return Ok(account);
            }

            match self
                .repository
                .replace_api_keys(id, account.version(), next)
                .await
            {
                Ok(updated) => {
                    debug!(
                        account_id = %id,
                        mutation = mutation.kind(),
                        version = updated.version(),
                        "Mutation committed"
                    );
                    return Ok(updated);
                }
                Err(e) if e.is_version_conflict() && conflicts < self.max_conflict_retries => {
                    conflicts += 1;
                    warn!(
                        account_id = %id,
                        mutation = mutation.kind(),
                        attempt = conflicts,
                        "Concurrent account write, retrying"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn parse_account_id(id: &str) -> Result<AccountId, DomainError> {
    AccountId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))
}

fn account_not_found(id: &str) -> DomainError {
    DomainError::not_found(format!("Account '{}' not found", id))
}
