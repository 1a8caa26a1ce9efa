use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce an untrusted JSON value into a monetary amount.
///
/// Order records and persisted cart rows arrive from collaborators that do
/// not guarantee field types: amounts show up as numbers, numeric strings,
/// null, or garbage. Anything that does not parse to a finite, non-negative
/// decimal becomes zero. This is the single place the zero-default policy
/// lives.
pub fn coerce_amount(value: Option<&Value>) -> Decimal {
    let amount = match value {
        Some(Value::Number(n)) => n
            .as_f64()
            .and_then(Decimal::from_f64_retain)
            .unwrap_or(Decimal::ZERO),
        Some(Value::String(s)) => s.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    };

    // Amounts are non-negative by contract; a negative value is as malformed
    // as a non-numeric one.
    if amount.is_sign_negative() {
        Decimal::ZERO
    } else {
        amount
    }
}

/// Coerce an untrusted JSON value into a quantity, falling back to `default`
/// when the value is missing, non-integral, or out of range.
pub fn coerce_quantity(value: Option<&Value>, default: u32) -> u32 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|q| u32::try_from(q).ok())
            .unwrap_or(default),
        Some(Value::String(s)) => s.trim().parse::<u32>().unwrap_or(default),
        _ => default,
    }
}

/// Coerce an untrusted JSON value into an epoch-millisecond timestamp.
/// Unlike amounts there is no safe default; a malformed timestamp reads as
/// absent.
pub fn coerce_epoch_millis(value: Option<&Value>) -> Option<i64> {
    match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Serde adapter applying [`coerce_amount`] during deserialization, so typed
/// models never see a malformed amount.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_amount(raw.as_ref()))
}

/// Serde adapter for cart quantities. A malformed quantity contributes zero
/// to totals rather than corrupting them.
pub fn deserialize_cart_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_quantity(raw.as_ref(), 0))
}
