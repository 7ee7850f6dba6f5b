//! Canonicalization and round-trip verification for serialized ledger records.
//!
//! A record arrives as hex or as a JSON object. It is converted to the other
//! representation with an external [`Codec`] and back again, and the two ends
//! are compared after [`canonicalize_hex`] has removed formatting differences
//! the codec is known to introduce.
//!
//! ```rust
//! use serde_json::{json, Map, Value};
//! use xrpl_roundtrip_canonical::{BuiltinRegistry, Codec, CodecError, RoundTrip, Verdict};
//!
//! struct Echo;
//!
//! impl Codec for Echo {
//!     fn encode(&self, _record: &Map<String, Value>) -> Result<String, CodecError> {
//!         Ok("AB".to_string())
//!     }
//!     fn decode(&self, _hex: &str) -> Result<Map<String, Value>, CodecError> {
//!         Ok(json!({"Account": "rEXAMPLE"}).as_object().cloned().unwrap_or_default())
//!     }
//! }
//!
//! let report = RoundTrip::new(Echo, BuiltinRegistry).run(r#"{"Account":"rEXAMPLE"}"#)?;
//! assert_eq!(report.verdict, Verdict::Success);
//! assert_eq!(report.converted, "AB");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]

/// Hex canonicalization of JSON trees.
pub mod canonicalizer;
/// Hex/JSON input classification.
pub mod classifier;
/// Codec seam and process-backed adapter.
pub mod codec;
/// Structural equality for JSON trees.
pub mod equality;
/// Error types.
pub mod errors;
/// Non-colliding output file naming.
pub mod namer;
/// Field shape normalization ahead of encoding.
pub mod normalizer;
/// Field type registries.
pub mod registry;
/// Round-trip verification.
pub mod verifier;

pub use canonicalizer::{canonicalize_hex, looks_like_hex, HexCanonicalizer};
pub use classifier::{classify, strip_wrapping, Record};
pub use codec::{Codec, CommandCodec, UnavailableCodec};
pub use equality::structurally_equal;
pub use errors::{CodecError, HarnessError};
pub use namer::{output_extension, resolve_output_path, write_output, DEFAULT_OUTPUT_NAME};
pub use normalizer::{normalize_fields, normalize_record, STRING_LIST_FIELDS};
pub use registry::{BuiltinRegistry, DefinitionsRegistry, FieldTypeRegistry, UINT64_TYPE};
pub use verifier::{RoundTrip, RoundTripMode, RoundTripReport, Verdict};
