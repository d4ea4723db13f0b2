//! Account domain
//!
//! User accounts as stored in the account store, their validation rules and
//! the repository contract used to read and conditionally rewrite them.

mod entity;
mod repository;
mod validation;

pub use entity::{AccountId, UserAccount};
pub use repository::AccountRepository;
pub use validation::{validate_account_id, validate_email, AccountValidationError};

#[cfg(test)]
pub use repository::MockAccountRepository;
