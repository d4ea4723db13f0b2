//! Admin API endpoints
//!
//! Every handler here takes [`RequireAdmin`](crate::api::middleware::RequireAdmin).

pub mod accounts;
pub mod posts;

use axum::{
    routing::{get, put},
    Router,
};

use super::state::AppState;

/// Create admin API router
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        // Account management
        .route("/accounts", get(accounts::list_accounts))
        .route(
            "/accounts/{account_id}",
            get(accounts::get_account).delete(accounts::delete_account),
        )
        .route(
            "/accounts/{account_id}/api-keys/{key}/balance",
            put(accounts::set_balance),
        )
        // Blog post management
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/posts/{post_id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
}
