//! Balance ledger domain
//!
//! The per-account API key list and the rules that mutate it: create,
//! delete, balance override and zero-sum transfer between keys.

mod amount;
mod error;
mod mutation;
mod record;
mod rules;

pub use amount::{amount_from_json, Amount};
pub use error::LedgerError;
pub use mutation::{BalanceLedger, LedgerMutation};
pub use record::{ApiKeyRecord, KeyToken};
pub use rules::{create, delete, set_balance, total_balance, transfer, SameKeyPolicy, MAX_API_KEYS};
