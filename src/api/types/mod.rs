//! Request and response types shared by the HTTP handlers

pub mod account;
pub mod error;
pub mod json;
pub mod post;

pub use account::{
    AccountResponse, ApiKeyResponse, CreateApiKeyResponse, ListAccountsResponse,
    SetBalanceRequest, TransferRequest,
};
pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
pub use post::{BlogPostResponse, ListBlogPostsResponse};
