//! Balance ledger rule
//!
//! Pure functions from the current key list of one account and a request to
//! the next key list. Nothing here performs I/O or keeps state: callers read
//! the account, apply one of these, and persist the whole returned list.

use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::error::LedgerError;
use super::record::{ApiKeyRecord, KeyToken};

/// Maximum number of API keys a single account may hold
pub const MAX_API_KEYS: usize = 10;

/// How a transfer whose source and destination are the same key is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SameKeyPolicy {
    /// Fail with `SameKey`
    #[default]
    Reject,
    /// Validate as usual, then return the keys unchanged
    NoOp,
}

/// Append a freshly issued record.
///
/// Capacity is only checked here; the identifier is trusted to be unique.
pub fn create(
    keys: &[ApiKeyRecord],
    record: ApiKeyRecord,
) -> Result<Vec<ApiKeyRecord>, LedgerError> {
    if keys.len() >= MAX_API_KEYS {
        return Err(LedgerError::CapacityExceeded { max: MAX_API_KEYS });
    }

    let mut next = Vec::with_capacity(keys.len() + 1);
    next.extend_from_slice(keys);
    next.push(record);

    Ok(next)
}

/// Remove a record. Absent keys are a no-op.
pub fn delete(keys: &[ApiKeyRecord], key: &KeyToken) -> Vec<ApiKeyRecord> {
    keys.iter().filter(|r| r.key() != key).cloned().collect()
}

/// Override the balance of one record
pub fn set_balance(
    keys: &[ApiKeyRecord],
    key: &KeyToken,
    new_balance: Amount,
) -> Result<Vec<ApiKeyRecord>, LedgerError> {
    if new_balance < 0 {
        return Err(LedgerError::invalid_amount("balance cannot be negative"));
    }
    let new_balance = u64::try_from(new_balance)
        .map_err(|_| LedgerError::invalid_amount("balance is out of range"))?;

    find(keys, key)?;

    Ok(keys
        .iter()
        .map(|r| {
            if r.key() == key {
                r.with_balance(new_balance)
            } else {
                r.clone()
            }
        })
        .collect())
}

/// Move `amount` tokens from one key to another of the same account
pub fn transfer(
    keys: &[ApiKeyRecord],
    from: &KeyToken,
    to: &KeyToken,
    amount: Amount,
    policy: SameKeyPolicy,
) -> Result<Vec<ApiKeyRecord>, LedgerError> {
    if amount <= 0 {
        return Err(LedgerError::invalid_amount("transfer amount must be positive"));
    }
    let amount = u64::try_from(amount)
        .map_err(|_| LedgerError::invalid_amount("amount is out of range"))?;

    let source = find(keys, from)?;
    let destination = find(keys, to)?;

    if from == to && policy == SameKeyPolicy::Reject {
        return Err(LedgerError::SameKey);
    }

    if source.balance() < amount {
        return Err(LedgerError::InsufficientBalance {
            available: source.balance(),
            requested: amount,
        });
    }

    if from == to {
        return Ok(keys.to_vec());
    }

    let debited = source.balance() - amount;
    let credited = destination
        .balance()
        .checked_add(amount)
        .ok_or_else(|| LedgerError::invalid_amount("destination balance would overflow"))?;

    Ok(keys
        .iter()
        .map(|r| {
            if r.key() == from {
                r.with_balance(debited)
            } else if r.key() == to {
                r.with_balance(credited)
            } else {
                r.clone()
            }
        })
        .collect())
}

/// Sum of all balances of an account
pub fn total_balance(keys: &[ApiKeyRecord]) -> u128 {
    keys.iter().map(|r| u128::from(r.balance())).sum()
}

fn find<'a>(keys: &'a [ApiKeyRecord], key: &KeyToken) -> Result<&'a ApiKeyRecord, LedgerError> {
    keys.iter()
        .find(|r| r.key() == key)
        .ok_or_else(|| LedgerError::not_found(key.as_str()))
}
