//! PostgreSQL account repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::account::{AccountId, AccountRepository, UserAccount};
use crate::domain::ledger::ApiKeyRecord;
use crate::domain::DomainError;
use crate::infrastructure::storage::is_unique_violation;

const ACCOUNT_COLUMNS: &str = "id, email, is_admin, api_keys, version, created_at, updated_at";

/// PostgreSQL implementation of AccountRepository
///
/// Key lists live in a JSONB column. Writes are conditional on the `version`
/// column, which the update itself advances.
#[derive(Debug, Clone)]
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: &AccountId) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE id = $1)")
            .bind(id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check account: {}", e)))
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn get(&self, id: &AccountId) -> Result<Option<UserAccount>, DomainError> {
        let query = format!("SELECT {} FROM accounts WHERE id = $1", ACCOUNT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get account: {}", e)))?;

        row.as_ref().map(row_to_account).transpose()
    }

    async fn list(&self) -> Result<Vec<UserAccount>, DomainError> {
        let query = format!(
            "SELECT {} FROM accounts ORDER BY created_at, id",
            ACCOUNT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list accounts: {}", e)))?;

        rows.iter().map(row_to_account).collect()
    }

    async fn create(&self, account: UserAccount) -> Result<UserAccount, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, email, is_admin, api_keys, version, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(account.id().as_str())
        .bind(account.email())
        .bind(account.is_admin())
        .bind(Json(account.api_keys()))
        .bind(version_to_db(account.version())?)
        .bind(account.created_at())
        .bind(account.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict(format!("Account '{}' already exists", account.id()))
            } else {
                DomainError::storage(format!("Failed to create account: {}", e))
            }
        })?;

        Ok(account)
    }

    async fn delete(&self, id: &AccountId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete account: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn replace_api_keys(
        &self,
        id: &AccountId,
        expected_version: u64,
        api_keys: Vec<ApiKeyRecord>,
    ) -> Result<UserAccount, DomainError> {
        let query = format!(
            r#"
            UPDATE accounts
            SET api_keys = $3, version = version + 1, updated_at = NOW()
            WHERE id = $1 AND version = $2
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(id.as_str())
            .bind(version_to_db(expected_version)?)
            .bind(Json(&api_keys))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to update api keys: {}", e)))?;

        match row {
            Some(row) => row_to_account(&row),
            // Zero rows: either the account is gone or someone else committed first
            None if self.exists(id).await? => Err(DomainError::version_conflict(format!(
                "Account '{}' changed since version {}",
                id, expected_version
            ))),
            None => Err(DomainError::not_found(format!("Account '{}' not found", id))),
        }
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count accounts: {}", e)))?;

        Ok(usize::try_from(count).unwrap_or_default())
    }
}

fn version_to_db(version: u64) -> Result<i64, DomainError> {
    i64::try_from(version)
        .map_err(|_| DomainError::internal(format!("Account version {} out of range", version)))
}

fn row_to_account(row: &sqlx::postgres::PgRow) -> Result<UserAccount, DomainError> {
    let read = |e: sqlx::Error| DomainError::storage(format!("Failed to read account row: {}", e));

    let id: String = row.try_get("id").map_err(read)?;
    let email: String = row.try_get("email").map_err(read)?;
    let is_admin: bool = row.try_get("is_admin").map_err(read)?;
    let Json(api_keys): Json<Vec<ApiKeyRecord>> = row.try_get("api_keys").map_err(read)?;
    let version: i64 = row.try_get("version").map_err(read)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(read)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(read)?;

    let id = AccountId::new(id)
        .map_err(|e| DomainError::internal(format!("Stored account ID is invalid: {}", e)))?;
    let version = u64::try_from(version)
        .map_err(|_| DomainError::internal(format!("Stored account version {} is negative", version)))?;

    Ok(UserAccount::from_parts(
        id, email, is_admin, api_keys, version, created_at, updated_at,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_to_db() {
        assert_eq!(version_to_db(7).unwrap(), 7);
        assert!(matches!(
            version_to_db(u64::MAX),
            Err(DomainError::Internal { .. })
        ));
    }
}
