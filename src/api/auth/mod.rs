//! Authentication API endpoints
//!
//! Tokens are minted by the identity provider; this service only verifies
//! them. Registration turns a verified identity into an account.

use axum::{extract::State, http::StatusCode, routing::post, Router};

use crate::api::middleware::RequireIdentity;
use crate::api::state::AppState;
use crate::api::types::{AccountResponse, ApiError, Json};

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new().route("/register", post(register))
}

/// Register the caller's account from its token claims
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    RequireIdentity(claims): RequireIdentity,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let account = state
        .account_service
        .register(&claims.sub, &claims.email)
        .await?;

    Ok((StatusCode::CREATED, Json(AccountResponse::from(&account))))
}
