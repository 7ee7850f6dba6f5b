//! Field type lookups used to special-case 64-bit unsigned integer fields.

use crate::errors::HarnessError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Type name the canonicalizer treats as a zero-padded 64-bit hex integer.
pub const UINT64_TYPE: &str = "UInt64";

/// Read-only mapping from field name to declared type name.
pub trait FieldTypeRegistry {
    /// Returns the declared type of `field`, if known.
    fn type_name_for_field(&self, field: &str) -> Option<&str>;

    /// Whether `field` is declared as [`UINT64_TYPE`].
    fn is_uint64_field(&self, field: &str) -> bool {
        self.type_name_for_field(field) == Some(UINT64_TYPE)
    }
}

impl<R: FieldTypeRegistry + ?Sized> FieldTypeRegistry for &R {
    fn type_name_for_field(&self, field: &str) -> Option<&str> {
        (**self).type_name_for_field(field)
    }
}

impl<R: FieldTypeRegistry + ?Sized> FieldTypeRegistry for Box<R> {
    fn type_name_for_field(&self, field: &str) -> Option<&str> {
        (**self).type_name_for_field(field)
    }
}

const BUILTIN_UINT64_FIELDS: &[&str] = &[
    "IndexNext",
    "IndexPrevious",
    "BookNode",
    "OwnerNode",
    "BaseFee",
    "ExchangeRate",
    "LowNode",
    "HighNode",
    "DestinationNode",
    "Cookie",
    "ServerVersion",
    "NFTokenOfferNode",
    "EmitBurden",
    "HookOn",
    "HookInstructionCount",
    "HookReturnCode",
    "ReferenceCount",
    "XChainClaimID",
    "XChainAccountCreateCount",
    "XChainAccountClaimCount",
    "AssetPrice",
    "MaximumAmount",
    "OutstandingAmount",
    "MPTAmount",
];

/// Registry of the XRPL `UInt64` fields known at build time.
///
/// Only `UInt64` membership matters to canonicalization, so other types are not
/// tracked; unknown fields resolve to `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinRegistry;

impl FieldTypeRegistry for BuiltinRegistry {
    fn type_name_for_field(&self, field: &str) -> Option<&str> {
        BUILTIN_UINT64_FIELDS
            .contains(&field)
            .then_some(UINT64_TYPE)
    }
}

/// Registry loaded from a codec `definitions.json`.
///
/// The expected layout is the one shipped with ripple-binary-codec:
/// `{"FIELDS": [["Account", {"type": "AccountID", ...}], ...], ...}`.
#[derive(Debug, Clone, Default)]
pub struct DefinitionsRegistry {
    types: HashMap<String, String>,
}

#[derive(Deserialize)]
struct DefinitionsFile {
    #[serde(rename = "FIELDS")]
    fields: Vec<(String, FieldInfo)>,
}

#[derive(Deserialize)]
struct FieldInfo {
    #[serde(rename = "type")]
    type_name: String,
}

impl DefinitionsRegistry {
    /// Builds a registry from explicit `(field, type)` pairs.
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            types: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parses definitions JSON text.
    pub fn from_json(text: &str) -> Result<Self, HarnessError> {
        let file: DefinitionsFile = serde_json::from_str(text)
            .map_err(|e| HarnessError::InvalidDefinitions(e.to_string()))?;
        Ok(Self::from_fields(
            file.fields
                .into_iter()
                .map(|(name, info)| (name, info.type_name)),
        ))
    }

    /// Reads and parses a definitions file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, HarnessError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
        let registry = Self::from_json(&text)?;
        tracing::debug!(
            path = %path.display(),
            fields = registry.len(),
            "loaded field definitions"
        );
        Ok(registry)
    }

    /// Number of known fields.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no fields are known.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl FieldTypeRegistry for DefinitionsRegistry {
    fn type_name_for_field(&self, field: &str) -> Option<&str> {
        self.types.get(field).map(String::as_str)
    }
}
