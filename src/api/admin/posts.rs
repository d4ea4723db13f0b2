//! Blog post administration endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, BlogPostResponse, Json, ListBlogPostsResponse};
use crate::infrastructure::services::{CreateBlogPostRequest, UpdateBlogPostRequest};

/// GET /admin/posts
pub async fn list_posts(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<ListBlogPostsResponse>, ApiError> {
    let posts = state.blog_post_service.list().await?;

    Ok(Json(ListBlogPostsResponse::from(posts)))
}

/// GET /admin/posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(post_id): Path<String>,
) -> Result<Json<BlogPostResponse>, ApiError> {
    let post = state
        .blog_post_service
        .get(&post_id)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!("Blog post '{}' not found", post_id)).with_code("not_found")
        })?;

    Ok(Json(BlogPostResponse::from(&post)))
}

/// POST /admin/posts
pub async fn create_post(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(request): Json<CreateBlogPostRequest>,
) -> Result<(StatusCode, Json<BlogPostResponse>), ApiError> {
    let post = state.blog_post_service.create(request).await?;

    Ok((StatusCode::CREATED, Json(BlogPostResponse::from(&post))))
}

/// PUT /admin/posts/{post_id}
pub async fn update_post(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(post_id): Path<String>,
    Json(request): Json<UpdateBlogPostRequest>,
) -> Result<Json<BlogPostResponse>, ApiError> {
    let post = state.blog_post_service.update(&post_id, request).await?;

    Ok(Json(BlogPostResponse::from(&post)))
}

/// DELETE /admin/posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(post_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !state.blog_post_service.delete(&post_id).await? {
        return Err(
            ApiError::not_found(format!("Blog post '{}' not found", post_id)).with_code("not_found"),
        );
    }

    Ok(StatusCode::NO_CONTENT)
}
