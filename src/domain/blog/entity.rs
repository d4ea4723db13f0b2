//! Blog post entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Blog post identifier - a UUID in its hyphenated string form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlogPostId(String);

impl BlogPostId {
    /// Parse an existing identifier
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let parsed = Uuid::parse_str(&id)
            .map_err(|_| DomainError::invalid_id(format!("Invalid blog post ID '{}'", id)))?;
        Ok(Self(parsed.hyphenated().to_string()))
    }

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BlogPostId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BlogPostId> for String {
    fn from(id: BlogPostId) -> Self {
        id.0
    }
}

impl std::fmt::Display for BlogPostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for BlogPostId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// A public blog post linking to external content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    id: BlogPostId,
    title: String,
    description: String,
    url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StorageEntity for BlogPost {
    type Key = BlogPostId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

impl BlogPost {
    pub fn new(
        id: BlogPostId,
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            title: title.into(),
            description: description.into(),
            url: url.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &BlogPostId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.touch();
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_post_id_roundtrip_normalizes() {
        let id = BlogPostId::new("67E55044-10B1-426F-9247-BB680E5FE0C8").unwrap();
        assert_eq!(id.as_str(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn test_blog_post_id_invalid() {
        assert!(matches!(
            BlogPostId::new("not-a-uuid"),
            Err(DomainError::InvalidId { .. })
        ));
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(BlogPostId::generate(), BlogPostId::generate());
    }

    #[test]
    fn test_setters_touch_updated_at() {
        let mut post = BlogPost::new(BlogPostId::generate(), "T", "D", "https://example.com");
        let before = post.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(5));
        post.set_title("New title");

        assert_eq!(post.title(), "New title");
        assert!(post.updated_at() > before);
        assert_eq!(post.created_at(), before);
    }

    #[test]
    fn test_storage_key() {
        let post = BlogPost::new(BlogPostId::generate(), "T", "D", "https://example.com");
        assert_eq!(post.key().as_str(), post.id().as_str());
    }
}
