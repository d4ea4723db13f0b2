//! Storage domain - Generic storage abstraction layer

mod entity;
mod repository;

pub use entity::{StorageEntity, StorageKey};
pub(crate) use repository::describe_key;
pub use repository::Storage;
