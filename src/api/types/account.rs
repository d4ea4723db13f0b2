//! Account and API key payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ledger::total_balance;
use crate::domain::{ApiKeyRecord, UserAccount};

#[derive(Debug, Clone, Serialize)]
pub struct ApiKeyResponse {
    pub key: String,
    pub balance: u64,
    pub created_at: String,
}

impl From<&ApiKeyRecord> for ApiKeyResponse {
    fn from(record: &ApiKeyRecord) -> Self {
        Self {
            key: record.key().as_str().to_string(),
            balance: record.balance(),
            created_at: record.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
    pub is_admin: bool,
    /// Keys in creation order
    pub api_keys: Vec<ApiKeyResponse>,
    pub total_balance: u128,
    pub version: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&UserAccount> for AccountResponse {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: account.id().as_str().to_string(),
            email: account.email().to_string(),
            is_admin: account.is_admin(),
            api_keys: account.api_keys().iter().map(ApiKeyResponse::from).collect(),
            total_balance: total_balance(account.api_keys()),
            version: account.version(),
            created_at: account.created_at().to_rfc3339(),
            updated_at: account.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListAccountsResponse {
    pub accounts: Vec<AccountResponse>,
    pub total: usize,
}

/// Response to issuing a key: the new key plus the committed account
#[derive(Debug, Clone, Serialize)]
pub struct CreateApiKeyResponse {
    pub api_key: ApiKeyResponse,
    pub account: AccountResponse,
}

/// Body of `POST /v1/api-keys/transfer`.
///
/// `amount` stays a raw JSON value so fractions and negatives surface as
/// `invalid_amount` rather than a body parse error.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferRequest {
    pub from: String,
    pub to: String,
    pub amount: Value,
}

/// Body of the admin balance override
#[derive(Debug, Clone, Deserialize)]
pub struct SetBalanceRequest {
    pub balance: Value,
}
