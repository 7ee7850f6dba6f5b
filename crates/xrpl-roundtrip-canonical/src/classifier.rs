//! Raw input classification: hex record or JSON object.

use crate::errors::HarnessError;
use serde_json::{Map, Value};

/// One unit of work, in whichever representation the user supplied.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// Serialized record as a hex string (exactly as supplied, wrappers stripped).
    Hex(String),
    /// Record as a JSON object.
    Json(Map<String, Value>),
}

impl Record {
    /// Short label for the representation, used in logs and output.
    pub fn kind(&self) -> &'static str {
        match self {
            Record::Hex(_) => "hex",
            Record::Json(_) => "json",
        }
    }
}

fn is_wrapper(c: char) -> bool {
    c == '`' || c == '"'
}

/// Trims whitespace and removes wrapping backticks or double quotes.
///
/// A matching pair loses one character on each side. A wrapper present on only
/// one side is removed from that side alone, leading side first.
pub fn strip_wrapping(raw: &str) -> &str {
    let trimmed = raw.trim();
    let first = trimmed.chars().next();
    let last = trimmed.chars().next_back();

    match (first, last) {
        (Some(f), Some(l)) if trimmed.len() >= 2 && is_wrapper(f) && f == l => {
            &trimmed[1..trimmed.len() - 1]
        }
        (Some(f), _) if is_wrapper(f) => &trimmed[1..],
        (_, Some(l)) if is_wrapper(l) => &trimmed[..trimmed.len() - 1],
        _ => trimmed,
    }
}

/// Classifies raw input into a [`Record`].
///
/// Anything that hex-decodes is a hex record; everything else must be a JSON
/// object.
///
/// # Errors
///
/// - [`HarnessError::EmptyInput`] when nothing is left after trimming/stripping.
/// - [`HarnessError::InvalidJson`] when the payload is neither hex nor a JSON object.
pub fn classify(raw: &str) -> Result<Record, HarnessError> {
    if raw.trim().is_empty() {
        return Err(HarnessError::EmptyInput);
    }
    let payload = strip_wrapping(raw);
    if payload.is_empty() {
        return Err(HarnessError::EmptyInput);
    }

    if hex::decode(payload).is_ok() {
        tracing::debug!(len = payload.len(), "classified input as hex");
        return Ok(Record::Hex(payload.to_string()));
    }

    let object: Map<String, Value> = serde_json::from_str(payload)?;
    tracing::debug!(fields = object.len(), "classified input as JSON");
    Ok(Record::Json(object))
}
