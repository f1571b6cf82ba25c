//! Structural equality over JSON values.
//!
//! Differs from `Value`'s `PartialEq` in that numbers compare by numeric
//! value (`1` equals `1.0`). A `null` member is a value of its own and never
//! matches an absent key.

use serde_json::{Number, Value};

/// Compare two JSON values structurally.
#[must_use]
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| deep_equal(l, r))
        }
        (Value::Object(x), Value::Object(y)) => x.keys().chain(y.keys()).all(|key| match (x.get(key), y.get(key)) {
            (Some(l), Some(r)) => deep_equal(l, r),
            (None, None) => true,
            _ => false,
        }),
        _ => false,
    }
}

#[allow(clippy::float_cmp)]
fn numbers_equal(x: &Number, y: &Number) -> bool {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return a == b;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
#[path = "deep_equal_test.rs"]
mod tests;
