//! Domain layer - Core business logic and entities

pub mod account;
pub mod blog;
pub mod error;
pub mod ledger;
pub mod storage;

pub use account::{AccountId, AccountRepository, UserAccount};
pub use blog::{BlogPost, BlogPostId};
pub use error::DomainError;
pub use ledger::{
    ApiKeyRecord, BalanceLedger, KeyToken, LedgerError, LedgerMutation, SameKeyPolicy,
    MAX_API_KEYS,
};
pub use storage::{Storage, StorageEntity, StorageKey};
