//! Hex canonicalization so codec formatting differences compare equal.
//!
//! The codec renders hex in upper case and `UInt64` fields as 16 hex digits,
//! while hand-written JSON often uses lower case and drops leading zeros. Both
//! sides of a comparison are passed through [`canonicalize_hex`] first.

use crate::registry::FieldTypeRegistry;
use serde_json::Value;

/// Minimum width of a rendered `UInt64` field.
pub const UINT64_HEX_WIDTH: usize = 16;

/// Canonicalizer bound to a field type registry.
pub struct HexCanonicalizer<R> {
    registry: R,
}

impl<R: FieldTypeRegistry> HexCanonicalizer<R> {
    /// Creates a canonicalizer that consults `registry` for `UInt64` fields.
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Rewrites `value` in place into canonical form.
    pub fn canonicalize(&self, value: &mut Value) {
        canonicalize_hex(value, &self.registry);
    }
}

/// Rewrites `value` in place into canonical form.
///
/// - strings of at least two ASCII hex digits become upper case;
/// - string values of `UInt64` fields are first left-padded with `'0'` to
///   [`UINT64_HEX_WIDTH`] characters;
/// - arrays and objects are walked recursively, other scalars are untouched.
pub fn canonicalize_hex<R: FieldTypeRegistry + ?Sized>(value: &mut Value, registry: &R) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                if registry.is_uint64_field(key) {
                    if let Value::String(s) = &mut *child {
                        *s = pad_uint64(s);
                    }
                }
                canonicalize_hex(child, registry);
            }
        }
        Value::Array(items) => {
            for item in items {
                canonicalize_hex(item, registry);
            }
        }
        Value::String(s) => {
            if looks_like_hex(s) {
                s.make_ascii_uppercase();
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// Whether `s` is at least two characters, all ASCII hex digits.
///
/// Single characters are excluded; they are too ambiguous to treat as hex.
pub fn looks_like_hex(s: &str) -> bool {
    s.len() >= 2 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

fn pad_uint64(s: &str) -> String {
    format!("{:0>width$}", s, width = UINT64_HEX_WIDTH)
}
