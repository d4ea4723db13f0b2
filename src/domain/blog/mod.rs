//! Blog post domain

mod entity;

pub use entity::{BlogPost, BlogPostId};
