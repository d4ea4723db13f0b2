//! Blog post service - CRUD operations over post storage

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::domain::storage::Storage;
use crate::domain::{BlogPost, BlogPostId, DomainError};

/// Request to create a new post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBlogPostRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
    #[validate(url)]
    pub url: String,
}

/// Request to update an existing post; absent fields are left alone
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBlogPostRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
}

#[derive(Debug)]
pub struct BlogPostService<S: Storage<BlogPost> + ?Sized> {
    storage: Arc<S>,
}

impl<S: Storage<BlogPost> + ?Sized> BlogPostService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    pub async fn get(&self, id: &str) -> Result<Option<BlogPost>, DomainError> {
        let post_id = BlogPostId::new(id)?;
        self.storage.get(&post_id).await
    }

    /// All posts, newest first
    pub async fn list(&self) -> Result<Vec<BlogPost>, DomainError> {
        let mut posts = self.storage.list().await?;
        posts.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(posts)
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }

    pub async fn create(&self, request: CreateBlogPostRequest) -> Result<BlogPost, DomainError> {
        request
            .validate()
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let post = BlogPost::new(
            BlogPostId::generate(),
            request.title,
            request.description,
            request.url,
        );
        let post = self.storage.create(post).await?;

        info!(post_id = %post.id(), "Blog post created");
        Ok(post)
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdateBlogPostRequest,
    ) -> Result<BlogPost, DomainError> {
        request
            .validate()
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let mut post = self
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Blog post '{}' not found", id)))?;

        if let Some(title) = request.title {
            post.set_title(title);
        }

        if let Some(description) = request.description {
            post.set_description(description);
        }

        if let Some(url) = request.url {
            post.set_url(url);
        }

        self.storage.update(post).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let post_id = BlogPostId::new(id)?;
        let deleted = self.storage.delete(&post_id).await?;

        if deleted {
            info!(post_id = %post_id, "Blog post deleted");
        }

        Ok(deleted)
    }
}
