//! Public and account-holder API
//!
//! Post listing is public; everything else acts on the caller's own account.

pub mod account;
pub mod posts;

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::state::AppState;

/// Create the v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/account", get(account::get_account))
        .route("/api-keys", post(account::create_api_key))
        .route("/api-keys/transfer", post(account::transfer))
        .route("/api-keys/{key}", delete(account::delete_api_key))
        .route("/posts", get(posts::list_posts))
}
