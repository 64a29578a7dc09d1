//! # Numeric Normalization
//!
//! The record store rejects native floating-point numbers, so every float in
//! an analysis bundle is converted to an exact [`Decimal`] before the record
//! is written. The blob written to object storage keeps the original floats.
//!
//! ## Conversion rule
//!
//! A float is converted through its shortest round-trip text, never through
//! its binary expansion: `0.1` becomes `Decimal("0.1")`, not
//! `0.1000000000000000055511151231257827`. The text is the same one Rust's
//! `Debug` formatting produces, so `3.0` keeps its scale (`3.0`) and very
//! small or very large magnitudes use scientific notation (`1e-7`).
//!
//! A float whose exact value does not fit in a 96-bit decimal with at most 28
//! fractional digits is kept as its numeric text ([`RecordValue::BigNumber`]),
//! so the walk never fails. Record stores receive numbers as text anyway and
//! decide themselves whether to accept such a value.
//!
//! The walk is plain recursion with no cycle detection; JSON trees are
//! acyclic by construction.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Number, Value};

/// A JSON-like tree whose numbers are integers or exact decimals.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    Null,
    Bool(bool),
    /// Integral JSON number, signed or unsigned 64-bit.
    Integer(i128),
    /// Former float, exact.
    Decimal(Decimal),
    /// Former float outside [`Decimal`]'s range, as shortest numeric text.
    BigNumber(String),
    String(String),
    List(Vec<RecordValue>),
    Map(BTreeMap<String, RecordValue>),
}

impl RecordValue {
    /// Look up a key when this value is a map.
    pub fn get(&self, key: &str) -> Option<&RecordValue> {
        match self {
            Self::Map(entries) => entries.get(key),
            _ => None,
        }
    }

    /// The items when this value is a list.
    pub fn as_list(&self) -> Option<&[RecordValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The decimal when this value is a converted float.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }
}

/// Normalize a JSON tree for the record store.
///
/// Objects keep every key, arrays keep order and length, floats become
/// decimals, and every other leaf passes through unchanged.
pub fn normalize(value: &Value) -> RecordValue {
    match value {
        Value::Null => RecordValue::Null,
        Value::Bool(b) => RecordValue::Bool(*b),
        Value::Number(n) => normalize_number(n),
        Value::String(s) => RecordValue::String(s.clone()),
        Value::Array(items) => RecordValue::List(items.iter().map(normalize).collect()),
        Value::Object(entries) => RecordValue::Map(
            entries
                .iter()
                .map(|(key, item)| (key.clone(), normalize(item)))
                .collect(),
        ),
    }
}

/// Normalize every item of a fetched collection.
pub fn normalize_items(items: &[Value]) -> RecordValue {
    RecordValue::List(items.iter().map(normalize).collect())
}

fn normalize_number(n: &Number) -> RecordValue {
    if let Some(i) = n.as_i64() {
        return RecordValue::Integer(i.into());
    }
    if let Some(u) = n.as_u64() {
        return RecordValue::Integer(u.into());
    }
    match n.as_f64() {
        Some(f) => float_to_decimal(f),
        None => RecordValue::BigNumber(n.to_string()),
    }
}

/// Convert one float via its shortest round-trip text.
pub fn float_to_decimal(f: f64) -> RecordValue {
    let text = shortest_text(f);
    let parsed = if text.contains('e') {
        Decimal::from_scientific(&text)
    } else {
        Decimal::from_str(&text)
    };
    match parsed {
        Ok(d) => RecordValue::Decimal(d),
        Err(_) => RecordValue::BigNumber(text),
    }
}

/// Shortest text that parses back to the same `f64`.
///
/// `Debug` rather than `Display`: `Display` prints `3.0` as `3` and expands
/// `1e300` into three hundred digits.
pub fn shortest_text(f: f64) -> String {
    format!("{f:?}")
}
