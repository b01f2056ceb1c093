//! JSON number encoding for [`Decimal`] amounts.
//!
//! Whole amounts are written as integers and everything else as the shortest
//! float that reads back to the same value, so a loaded list saves to the
//! same bytes it was read from.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;
use std::str::FromStr;

pub(crate) fn serialize<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    if amount.fract().is_zero() {
        if let Some(whole) = amount.to_i64() {
            return serializer.serialize_i64(whole);
        }
    }
    match amount.to_f64() {
        Some(f) => serializer.serialize_f64(f),
        None => Err(serde::ser::Error::custom(format!(
            "amount {amount} is not representable as a JSON number"
        ))),
    }
}

/// Whether `amount` reads back unchanged after a trip through [`serialize`]
/// and [`deserialize`].
///
/// Whole amounts outside `i64` and fractions with more digits than an `f64`
/// carries fail this check.
pub(crate) fn survives_json(amount: Decimal) -> bool {
    if amount.fract().is_zero() && amount.to_i64().is_some() {
        return true;
    }
    amount
        .to_f64()
        .and_then(|f| Decimal::from_str(&f.to_string()).ok())
        == Some(amount)
}

pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    deserializer.deserialize_any(AmountVisitor)
}

struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = Decimal;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON number")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
        Decimal::from_u64(v).ok_or_else(|| E::custom(format!("amount {v} out of range")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
        // `f64`'s Display is the shortest round-tripping form, so 0.1 stays 0.1.
        Decimal::from_str(&v.to_string()).map_err(|e| E::custom(format!("amount {v}: {e}")))
    }
}
