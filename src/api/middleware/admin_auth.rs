//! Admin capability gate
//!
//! The admin flag is read from the caller's stored account, never from the
//! token, so revoking it takes effect on the next request.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::UserAccount;

use super::user_auth::RequireUser;

/// Extractor that requires an authenticated account with `is_admin = true`
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub UserAccount);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireUser(account) = RequireUser::from_request_parts(parts, state).await?;

        if !account.is_admin() {
            warn!(account_id = %account.id(), "Admin access denied");
            return Err(ApiError::forbidden("Admin access required").with_code("admin_required"));
        }

        debug!(account_id = %account.id(), "Admin access granted");
        Ok(RequireAdmin(account))
    }
}
