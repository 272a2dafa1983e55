//! Content hashing and provenance-derived identifiers.
//!
//! Every identifier in a deterministic run is a SHA-256 digest of an ordered
//! tuple of strings joined with [`ID_DELIMITER`]. Digests are rendered as
//! lowercase hex so they compare equal across platforms.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::{codes, ErrorInfo, GenieError};
use crate::serde::to_canonical_json_bytes;

/// Separator placed between identifier components before hashing.
pub const ID_DELIMITER: &str = "::";

/// Number of hex characters kept by [`deterministic_id`].
pub const ID_LENGTH: usize = 16;

/// Prefix applied to every artifact identifier.
pub const ARTIFACT_ID_PREFIX: &str = "idea_";

/// Hashes a string literal as-is.
pub fn content_hash_str(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

/// Hashes an arbitrary serializable value.
///
/// Strings are hashed verbatim. Every other value is first rendered as
/// canonical JSON with object keys sorted, so key insertion order never
/// changes the digest.
pub fn content_hash<T: Serialize + ?Sized>(content: &T) -> Result<String, GenieError> {
    let value = serde_json::to_value(content).map_err(|err| {
        GenieError::Serde(ErrorInfo::new(codes::SERIALIZE_FAILED, err.to_string()))
    })?;
    if let serde_json::Value::String(text) = &value {
        return Ok(content_hash_str(text));
    }
    let bytes = to_canonical_json_bytes(&value)?;
    Ok(hex::encode(Sha256::digest(bytes)))
}

/// Derives a short order-sensitive identifier from the supplied components.
pub fn deterministic_id<S: AsRef<str>>(parts: &[S]) -> String {
    let joined = parts
        .iter()
        .map(|part| part.as_ref())
        .collect::<Vec<_>>()
        .join(ID_DELIMITER);
    let mut digest = content_hash_str(&joined);
    digest.truncate(ID_LENGTH);
    digest
}

/// Builds an `idea_<16 hex>` identifier from run provenance.
///
/// The seed component is omitted when absent or empty.
pub fn generate_artifact_id(run_id: &str, timestamp_iso: &str, seed: Option<&str>) -> String {
    let mut parts = vec![run_id, timestamp_iso];
    if let Some(seed) = seed.filter(|seed| !seed.is_empty()) {
        parts.push(seed);
    }
    format!("{ARTIFACT_ID_PREFIX}{}", deterministic_id(&parts))
}

/// Returns the explicit seed verbatim, or the content hash of `run_id::timestamp_iso`.
pub fn derive_seed(run_id: &str, timestamp_iso: &str, explicit_seed: Option<&str>) -> String {
    match explicit_seed.filter(|seed| !seed.is_empty()) {
        Some(seed) => seed.to_string(),
        None => content_hash_str(&format!("{run_id}{ID_DELIMITER}{timestamp_iso}")),
    }
}
