//! Endpoints acting on the caller's own account

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{
    AccountResponse, ApiError, ApiKeyResponse, CreateApiKeyResponse, Json, TransferRequest,
};
use crate::domain::ledger::amount_from_json;

/// GET /v1/account
pub async fn get_account(RequireUser(account): RequireUser) -> Json<AccountResponse> {
    Json(AccountResponse::from(&account))
}

/// Issue a new zero-balance key
///
/// POST /v1/api-keys
pub async fn create_api_key(
    State(state): State<AppState>,
    RequireUser(account): RequireUser,
) -> Result<(StatusCode, Json<CreateApiKeyResponse>), ApiError> {
    let (account, record) = state
        .account_service
        .create_api_key(account.id().as_str())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateApiKeyResponse {
            api_key: ApiKeyResponse::from(&record),
            account: AccountResponse::from(&account),
        }),
    ))
}

/// Remove a key; removing an absent key leaves the account unchanged
///
/// DELETE /v1/api-keys/{key}
pub async fn delete_api_key(
    State(state): State<AppState>,
    RequireUser(account): RequireUser,
    Path(key): Path<String>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state
        .account_service
        .delete_api_key(account.id().as_str(), &key)
        .await?;

    Ok(Json(AccountResponse::from(&account)))
}

/// Move tokens between two of the caller's keys
///
/// POST /v1/api-keys/transfer
pub async fn transfer(
    State(state): State<AppState>,
    RequireUser(account): RequireUser,
    Json(request): Json<TransferRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let amount = amount_from_json(&request.amount)?;

    let account = state
        .account_service
        .transfer(account.id().as_str(), &request.from, &request.to, amount)
        .await?;

    info!(account_id = %account.id(), amount = %amount, "Transfer committed");
    Ok(Json(AccountResponse::from(&account)))
}
