//! Replayable ledger mutations

use super::amount::Amount;
use super::error::LedgerError;
use super::record::{ApiKeyRecord, KeyToken};
use super::rules::{self, SameKeyPolicy};

/// A requested change to an account's key list.
///
/// Carries everything needed to recompute the result, so the same mutation
/// can be applied again to a fresher snapshot after a lost write race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerMutation {
    Create(ApiKeyRecord),
    Delete { key: KeyToken },
    SetBalance { key: KeyToken, balance: Amount },
    Transfer { from: KeyToken, to: KeyToken, amount: Amount },
}

impl LedgerMutation {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Create(_) => "create",
            Self::Delete { .. } => "delete",
            Self::SetBalance { .. } => "set_balance",
            Self::Transfer { .. } => "transfer",
        }
    }
}

/// Ledger rule configured with its policies
#[derive(Debug, Clone, Copy, Default)]
pub struct BalanceLedger {
    same_key: SameKeyPolicy,
}

impl BalanceLedger {
    pub fn new(same_key: SameKeyPolicy) -> Self {
        Self { same_key }
    }

    /// Compute the next key list, or fail without touching the input
    pub fn apply(
        &self,
        keys: &[ApiKeyRecord],
        mutation: &LedgerMutation,
    ) -> Result<Vec<ApiKeyRecord>, LedgerError> {
        match mutation {
            LedgerMutation::Create(record) => rules::create(keys, record.clone()),
            LedgerMutation::Delete { key } => Ok(rules::delete(keys, key)),
            LedgerMutation::SetBalance { key, balance } => rules::set_balance(keys, key, *balance),
            LedgerMutation::Transfer { from, to, amount } => {
                rules::transfer(keys, from, to, *amount, self.same_key)
            }
        }
    }
}
