//! Account infrastructure
//!
//! Account repositories (in-memory and PostgreSQL) and the service that
//! runs ledger mutations against them.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresAccountRepository;
pub use repository::InMemoryAccountRepository;
pub use service::AccountService;
