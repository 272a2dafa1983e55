#![deny(missing_docs)]
#![doc = "Deterministic primitives for Neon Genie: content hashing, provenance-derived identifiers and a seeded sequence generator."]

pub mod errors;
pub mod hash;
pub mod provenance;
pub mod rng;
pub mod serde;
pub mod time;

pub use errors::{codes, ErrorInfo, GenieError};
pub use hash::{
    content_hash, content_hash_str, derive_seed, deterministic_id, generate_artifact_id,
    ARTIFACT_ID_PREFIX, ID_DELIMITER, ID_LENGTH,
};
pub use provenance::Provenance;
pub use rng::{SeededRandom, ALPHANUMERIC};
pub use crate::serde::{canonicalize, from_json_slice, to_canonical_json_bytes};
pub use time::{iso_to_millis, parse_timestamp, validate_timestamp};
