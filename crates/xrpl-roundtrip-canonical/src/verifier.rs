//! Round-trip verification over an external codec.

use crate::canonicalizer::canonicalize_hex;
use crate::classifier::{classify, Record};
use crate::codec::Codec;
use crate::equality::structurally_equal;
use crate::errors::HarnessError;
use crate::normalizer::normalize_record;
use crate::registry::FieldTypeRegistry;
use serde_json::{Map, Value};

/// Direction of a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundTripMode {
    /// JSON was encoded to hex and decoded back.
    JsonHexJson,
    /// Hex was decoded to JSON and encoded back.
    HexJsonHex,
}

/// Outcome of comparing the original with the re-produced representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Both sides matched.
    Success,
    /// The re-produced representation differs from the original.
    Mismatch,
}

/// Everything a caller needs to report a finished round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundTripReport {
    /// Direction of the round trip.
    pub mode: RoundTripMode,
    /// The converted representation: encoded hex, or pretty-printed decoded JSON.
    pub converted: String,
    /// The re-produced original: re-decoded JSON (pretty) or re-encoded hex.
    pub reproduced: String,
    /// Comparison result.
    pub verdict: Verdict,
}

impl RoundTripReport {
    /// Whether the round trip was lossless.
    pub fn is_success(&self) -> bool {
        self.verdict == Verdict::Success
    }
}

/// Runs round trips for a codec and field type registry pair.
pub struct RoundTrip<C, R> {
    codec: C,
    registry: R,
}

impl<C: Codec, R: FieldTypeRegistry> RoundTrip<C, R> {
    /// Creates a verifier.
    pub fn new(codec: C, registry: R) -> Self {
        Self { codec, registry }
    }

    /// Returns the registry used for canonicalization.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Classifies raw input and runs the matching round trip.
    ///
    /// # Errors
    ///
    /// Classification errors ([`HarnessError::EmptyInput`],
    /// [`HarnessError::InvalidJson`]) and codec failures.
    pub fn run(&self, raw: &str) -> Result<RoundTripReport, HarnessError> {
        let record = classify(raw)?;
        tracing::debug!(kind = record.kind(), "running round trip");
        self.verify(record)
    }

    /// Runs the round trip matching the record's representation.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Codec`] if either codec call fails. A mismatch is
    /// reported through [`Verdict::Mismatch`], not as an error.
    pub fn verify(&self, record: Record) -> Result<RoundTripReport, HarnessError> {
        match record {
            Record::Json(object) => self.verify_json(object),
            Record::Hex(hex) => self.verify_hex(&hex),
        }
    }

    /// JSON → hex → JSON.
    pub fn verify_json(
        &self,
        original: Map<String, Value>,
    ) -> Result<RoundTripReport, HarnessError> {
        let mut normalized = original.clone();
        normalize_record(&mut normalized);

        let encoded = self.codec.encode(&normalized)?;
        tracing::debug!(len = encoded.len(), "encoded record");
        let decoded = self.codec.decode(&encoded)?;
        let reproduced = serde_json::to_string_pretty(&decoded)?;

        let mut expected = Value::Object(original);
        let mut actual = Value::Object(decoded);
        canonicalize_hex(&mut expected, &self.registry);
        canonicalize_hex(&mut actual, &self.registry);

        let verdict = if structurally_equal(&expected, &actual) {
            Verdict::Success
        } else {
            Verdict::Mismatch
        };
        tracing::debug!(?verdict, "json round trip finished");

        Ok(RoundTripReport {
            mode: RoundTripMode::JsonHexJson,
            converted: encoded,
            reproduced,
            verdict,
        })
    }

    /// Hex → JSON → hex. The comparison is byte-exact.
    pub fn verify_hex(&self, original: &str) -> Result<RoundTripReport, HarnessError> {
        let decoded = self.codec.decode(original)?;
        let converted = serde_json::to_string_pretty(&decoded)?;
        let reencoded = self.codec.encode(&decoded)?;

        let verdict = if reencoded == original {
            Verdict::Success
        } else {
            Verdict::Mismatch
        };
        tracing::debug!(?verdict, "hex round trip finished");

        Ok(RoundTripReport {
            mode: RoundTripMode::HexJsonHex,
            converted,
            reproduced: reencoded,
            verdict,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CodecError;
    use crate::registry::BuiltinRegistry;
    use serde_json::json;
    use std::cell::RefCell;

    /// Codec that replays canned responses and records what it was given.
    struct Scripted {
        hex: Result<String, CodecError>,
        object: Result<Value, CodecError>,
        encoded_inputs: RefCell<Vec<Value>>,
    }

    impl Scripted {
        fn new(hex: &str, object: Value) -> Self {
            Self {
                hex: Ok(hex.to_string()),
                object: Ok(object),
                encoded_inputs: RefCell::new(Vec::new()),
            }
        }
    }

    impl Codec for Scripted {
        fn encode(&self, record: &Map<String, Value>) -> Result<String, CodecError> {
            self.encoded_inputs.borrow_mut().push(Value::Object(record.clone()));
            self.hex.clone()
        }

        fn decode(&self, _hex: &str) -> Result<Map<String, Value>, CodecError> {
            self.object
                .clone()
                .map(|v| v.as_object().cloned().unwrap_or_default())
        }
    }

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn json_round_trip_succeeds_when_decoded_matches() {
        let codec = Scripted::new("DEADBEEF", json!({"Account": "rEXAMPLE", "Amount": "100"}));
        let verifier = RoundTrip::new(&codec, BuiltinRegistry);
        let report = verifier
            .verify_json(object(json!({"Account": "rEXAMPLE", "Amount": "100"})))
            .unwrap();
        assert_eq!(report.mode, RoundTripMode::JsonHexJson);
        assert_eq!(report.verdict, Verdict::Success);
        assert_eq!(report.converted, "DEADBEEF");
    }

    #[test]
    fn json_round_trip_ignores_hex_case_and_uint64_padding() {
        let codec = Scripted::new(
            "00",
            json!({"OwnerNode": "0000000000000001", "SigningPubKey": "ABCDEF", "Fee": "10"}),
        );
        let verifier = RoundTrip::new(&codec, BuiltinRegistry);
        let report = verifier
            .verify_json(object(json!({"OwnerNode": "1", "SigningPubKey": "abcdef", "Fee": "10"})))
            .unwrap();
        assert!(report.is_success());
    }

    #[test]
    fn json_round_trip_encodes_normalized_record() {
        let codec = Scripted::new("00", json!({"Sequence": 5, "Hashes": ["AA"]}));
        let verifier = RoundTrip::new(&codec, BuiltinRegistry);
        verifier
            .verify_json(object(json!({"Sequence": 5.0, "Hashes": ["AA", 3]})))
            .unwrap();
        assert_eq!(
            codec.encoded_inputs.borrow()[0],
            json!({"Sequence": 5, "Hashes": ["AA"]})
        );
    }

    #[test]
    fn json_round_trip_reports_dropped_fields_as_mismatch() {
        let codec = Scripted::new("00", json!({"Account": "rEXAMPLE"}));
        let verifier = RoundTrip::new(&codec, BuiltinRegistry);
        let report = verifier
            .verify_json(object(json!({"Account": "rEXAMPLE", "hash": "AB"})))
            .unwrap();
        assert_eq!(report.verdict, Verdict::Mismatch);
        let reproduced: Value = serde_json::from_str(&report.reproduced).unwrap();
        assert_eq!(reproduced, json!({"Account": "rEXAMPLE"}));
    }

    #[test]
    fn hex_round_trip_is_byte_exact() {
        let codec = Scripted::new("1200", json!({"TransactionType": "Payment"}));
        let verifier = RoundTrip::new(&codec, BuiltinRegistry);

        let report = verifier.verify(Record::Hex("1200".to_string())).unwrap();
        assert_eq!(report.mode, RoundTripMode::HexJsonHex);
        assert!(report.is_success());
        let converted: Value = serde_json::from_str(&report.converted).unwrap();
        assert_eq!(converted, json!({"TransactionType": "Payment"}));

        let report = verifier.verify(Record::Hex("1201".to_string())).unwrap();
        assert_eq!(report.verdict, Verdict::Mismatch);
        assert_eq!(report.reproduced, "1200");

        // Lowercase input is not canonicalized on the hex path.
        let report = verifier.verify(Record::Hex("12ab".to_string())).unwrap();
        assert_eq!(report.verdict, Verdict::Mismatch);
    }

    #[test]
    fn codec_failures_are_errors() {
        let codec = Scripted {
            hex: Err(CodecError::Encode("unknown field".into())),
            object: Ok(json!({})),
            encoded_inputs: RefCell::new(Vec::new()),
        };
        let verifier = RoundTrip::new(&codec, BuiltinRegistry);
        let err = verifier.verify_json(object(json!({"Bogus": 1}))).unwrap_err();
        assert!(matches!(err, HarnessError::Codec(CodecError::Encode(_))));

        let codec = Scripted {
            hex: Ok("00".into()),
            object: Err(CodecError::Decode("truncated".into())),
            encoded_inputs: RefCell::new(Vec::new()),
        };
        let verifier = RoundTrip::new(&codec, BuiltinRegistry);
        let err = verifier.verify_hex("00").unwrap_err();
        assert!(matches!(err, HarnessError::Codec(CodecError::Decode(_))));
    }
}
