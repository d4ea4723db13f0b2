//! User authentication extractors using JWT bearer tokens

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::UserAccount;
use crate::infrastructure::auth::JwtClaims;

/// Extractor for a verified identity, whether or not it has an account yet.
///
/// Used by registration, which is the one call allowed before the account exists.
#[derive(Debug, Clone)]
pub struct RequireIdentity(pub JwtClaims);

impl FromRequestParts<AppState> for RequireIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_jwt_token(&parts.headers)?;

        let claims = state
            .jwt_service
            .validate(&token)
            .map_err(|e| ApiError::unauthorized(format!("Invalid token: {}", e)))?;

        Ok(RequireIdentity(claims))
    }
}

/// Extractor that requires a valid JWT whose subject has a registered account
#[derive(Debug, Clone)]
pub struct RequireUser(pub UserAccount);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireIdentity(claims) = RequireIdentity::from_request_parts(parts, state).await?;

        debug!(account_id = %claims.account_id(), "Resolving account for token");

        let account = state
            .account_service
            .get(claims.account_id())
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| {
                ApiError::forbidden("Account is not registered. Call POST /auth/register first")
                    .with_code("account_not_registered")
            })?;

        Ok(RequireUser(account))
    }
}

/// Extract JWT token from Authorization header
pub fn extract_jwt_token(headers: &HeaderMap) -> Result<String, ApiError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::bad_request("Invalid Authorization header encoding"))?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }
    }

    Err(ApiError::unauthorized(
        "Authentication required. Provide JWT token via 'Authorization: Bearer <token>' header",
    ))
}
