//! Blog post payloads

use serde::Serialize;

use crate::domain::BlogPost;

#[derive(Debug, Clone, Serialize)]
pub struct BlogPostResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&BlogPost> for BlogPostResponse {
    fn from(post: &BlogPost) -> Self {
        Self {
            id: post.id().as_str().to_string(),
            title: post.title().to_string(),
            description: post.description().to_string(),
            url: post.url().to_string(),
            created_at: post.created_at().to_rfc3339(),
            updated_at: post.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListBlogPostsResponse {
    pub posts: Vec<BlogPostResponse>,
    pub total: usize,
}

impl From<Vec<BlogPost>> for ListBlogPostsResponse {
    fn from(posts: Vec<BlogPost>) -> Self {
        let posts: Vec<BlogPostResponse> = posts.iter().map(BlogPostResponse::from).collect();
        let total = posts.len();

        Self { posts, total }
    }
}
