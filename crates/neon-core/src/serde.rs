//! Canonical JSON for artifact digests.
//!
//! Two artifacts that differ only in the insertion order of their object
//! keys must hash identically, so every digest input is rendered through
//! [`canonicalize`] first.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::errors::{codes, ErrorInfo, GenieError};

/// Rebuilds `value` with object keys in byte order at every depth. Array
/// order is significant and is kept.
pub fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(fields) => {
            let mut entries: Vec<(String, Value)> = fields.into_iter().collect();
            entries.sort_by(|(left, _), (right, _)| left.cmp(right));
            let mut sorted = Map::new();
            for (key, field) in entries {
                sorted.insert(key, canonicalize(field));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        scalar => scalar,
    }
}

/// Compact canonical rendering of a prompt, artifact or any other
/// serializable value; this is the byte string [`crate::content_hash`]
/// digests.
pub fn to_canonical_json_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, GenieError> {
    let tree = serde_json::to_value(value).map_err(serialize_failed)?;
    serde_json::to_vec(&canonicalize(tree)).map_err(serialize_failed)
}

/// Decodes a request or stored document, tagging syntax and shape errors
/// as `MalformedPayload`.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, GenieError> {
    serde_json::from_slice(data).map_err(|err| {
        GenieError::Serde(ErrorInfo::new(codes::MALFORMED_PAYLOAD, err.to_string()))
    })
}

fn serialize_failed(err: serde_json::Error) -> GenieError {
    GenieError::Serde(ErrorInfo::new(codes::SERIALIZE_FAILED, err.to_string()))
}
