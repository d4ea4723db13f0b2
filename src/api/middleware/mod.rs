//! API middleware components

pub mod admin_auth;
pub mod user_auth;

pub use admin_auth::RequireAdmin;
pub use user_auth::{extract_jwt_token, RequireIdentity, RequireUser};
