//! Account administration endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{
    AccountResponse, ApiError, Json, ListAccountsResponse, SetBalanceRequest,
};
use crate::domain::ledger::amount_from_json;

/// GET /admin/accounts
pub async fn list_accounts(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<ListAccountsResponse>, ApiError> {
    let accounts: Vec<AccountResponse> = state
        .account_service
        .list()
        .await?
        .iter()
        .map(AccountResponse::from)
        .collect();
    let total = accounts.len();

    Ok(Json(ListAccountsResponse { accounts, total }))
}

/// GET /admin/accounts/{account_id}
pub async fn get_account(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(account_id): Path<String>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state
        .account_service
        .get(&account_id)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!("Account '{}' not found", account_id))
                .with_code("not_found")
        })?;

    Ok(Json(AccountResponse::from(&account)))
}

/// DELETE /admin/accounts/{account_id}
pub async fn delete_account(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(account_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !state.account_service.delete(&account_id).await? {
        return Err(
            ApiError::not_found(format!("Account '{}' not found", account_id))
                .with_code("not_found"),
        );
    }

    info!(admin_id = %admin.id(), account_id = %account_id, "Account deleted by admin");
    Ok(StatusCode::NO_CONTENT)
}

/// Override the balance of one key
///
/// PUT /admin/accounts/{account_id}/api-keys/{key}/balance
pub async fn set_balance(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path((account_id, key)): Path<(String, String)>,
    Json(request): Json<SetBalanceRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let balance = amount_from_json(&request.balance)?;

    let account = state
        .account_service
        .set_balance(&account_id, &key, balance)
        .await?;

    info!(
        admin_id = %admin.id(),
        account_id = %account_id,
        balance = %balance,
        "Balance overridden"
    );
    Ok(Json(AccountResponse::from(&account)))
}
