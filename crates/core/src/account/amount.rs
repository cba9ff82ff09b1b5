//! Parsing raw request amounts into decimals.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Number, Value};

use super::error::{AccountError, AmountRejection};

/// Parses a JSON number or numeric string into a `Decimal`.
///
/// Sign is not checked here; deposit and withdraw reject non-positive values
/// with their own message.
///
/// # Errors
///
/// - `AmountRejection::NotANumber` for booleans, null, containers, and strings
///   that are not finite decimals (`"NaN"`, `"inf"`, `"abc"`)
/// - `AmountRejection::OutOfRange` for numbers too large for `Decimal`
pub fn parse_amount(value: &Value) -> Result<Decimal, AccountError> {
    match value {
        Value::Number(n) => from_number(n),
        Value::String(s) => from_text(s.trim()).ok_or(AccountError::InvalidAmount(
            AmountRejection::NotANumber,
        )),
        _ => Err(AccountError::InvalidAmount(AmountRejection::NotANumber)),
    }
}

fn from_number(n: &Number) -> Result<Decimal, AccountError> {
    if let Some(i) = n.as_i64() {
        return Ok(Decimal::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Decimal::from(u));
    }
    // JSON numbers are always finite, so a failure here is magnitude.
    from_text(&n.to_string()).ok_or(AccountError::InvalidAmount(AmountRejection::OutOfRange))
}

fn from_text(text: &str) -> Option<Decimal> {
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
