//! Reshapes a parsed JSON tree into the shapes the codec expects.

use serde_json::{Map, Number, Value};

/// Fields whose values the codec expects as lists of strings.
pub const STRING_LIST_FIELDS: [&str; 4] = ["Indexes", "Hashes", "Amendments", "Nftokenoffers"];

/// Normalizes `value` in place.
///
/// Every number becomes an integer (fractions truncate toward zero). Lists under
/// the [`STRING_LIST_FIELDS`] keys keep only their string elements; other
/// elements are dropped. Everything else is walked recursively.
pub fn normalize_fields(value: &mut Value) {
    match value {
        Value::Number(n) => {
            if let Some(int) = truncate_number(n) {
                *n = int;
            }
        }
        Value::Object(map) => normalize_record(map),
        Value::Array(items) => {
            for item in items {
                normalize_fields(item);
            }
        }
        Value::Null | Value::Bool(_) | Value::String(_) => {}
    }
}

/// Normalizes the fields of a top-level record object in place.
pub fn normalize_record(map: &mut Map<String, Value>) {
    for (key, child) in map.iter_mut() {
        if STRING_LIST_FIELDS.contains(&key.as_str()) {
            if let Value::Array(items) = child {
                retain_strings(items);
            }
        } else {
            normalize_fields(child);
        }
    }
}

/// Returns the truncated integer for a float, or `None` if already integral.
fn truncate_number(n: &Number) -> Option<Number> {
    if n.is_i64() || n.is_u64() {
        return None;
    }
    let f = n.as_f64()?;
    // `as` saturates at the i64 bounds and maps NaN to zero.
    Some(Number::from(f.trunc() as i64))
}

fn retain_strings(items: &mut Vec<Value>) {
    let before = items.len();
    items.retain(Value::is_string);
    if items.len() != before {
        tracing::debug!(dropped = before - items.len(), "dropped non-string list elements");
    }
}
