//! Parsing of client-supplied token amounts

use serde_json::Value;

use super::error::LedgerError;

/// Signed amount as requested by a client.
///
/// Wide enough for every `u64` balance and its negation, so range and sign
/// checks stay with the individual ledger operations.
pub type Amount = i128;

/// Largest float that still holds every integer below it exactly (2^53)
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Read an integer amount from a JSON value.
///
/// Any JSON integer in the `i64` or `u64` range is accepted, as is a float
/// with no fractional part such as `30.0`. Fractions, strings and other
/// values fail with `InvalidAmount`.
pub fn amount_from_json(value: &Value) -> Result<Amount, LedgerError> {
    let Value::Number(number) = value else {
        return Err(LedgerError::invalid_amount("amount must be a number"));
    };

    if let Some(n) = number.as_i64() {
        return Ok(Amount::from(n));
    }
    if let Some(n) = number.as_u64() {
        return Ok(Amount::from(n));
    }

    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT => Ok(f as Amount),
        Some(f) if f.fract() == 0.0 => Err(LedgerError::invalid_amount("amount is out of range")),
        _ => Err(LedgerError::invalid_amount("amount must be an integer")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integers_accepted() {
        assert_eq!(amount_from_json(&json!(30)), Ok(30));
        assert_eq!(amount_from_json(&json!(-5)), Ok(-5));
        assert_eq!(amount_from_json(&json!(0)), Ok(0));
    }

    #[test]
    fn test_full_u64_range_accepted() {
        assert_eq!(
            amount_from_json(&json!(u64::MAX)),
            Ok(Amount::from(u64::MAX))
        );
        assert_eq!(
            amount_from_json(&json!(i64::MIN)),
            Ok(Amount::from(i64::MIN))
        );
    }

    #[test]
    fn test_integral_floats_accepted() {
        assert_eq!(amount_from_json(&json!(30.0)), Ok(30));
        assert_eq!(amount_from_json(&json!(-2.0)), Ok(-2));
    }

    #[test]
    fn test_fractions_rejected() {
        assert_eq!(
            amount_from_json(&json!(1.5)),
            Err(LedgerError::invalid_amount("amount must be an integer"))
        );
    }

    #[test]
    fn test_huge_floats_rejected() {
        assert_eq!(
            amount_from_json(&json!(1e30)),
            Err(LedgerError::invalid_amount("amount is out of range"))
        );
    }

    #[test]
    fn test_non_numbers_rejected() {
        for value in [json!("10"), json!(null), json!([1]), json!(true)] {
            assert!(amount_from_json(&value).is_err());
        }
    }
}
