//! Public blog post listing

use axum::extract::State;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, ListBlogPostsResponse};

/// GET /v1/posts
pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<ListBlogPostsResponse>, ApiError> {
    let posts = state.blog_post_service.list().await?;

    Ok(Json(ListBlogPostsResponse::from(posts)))
}
