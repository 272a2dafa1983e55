//! Deterministic process bridge for Neon Genie.
//!
//! The binary reads one JSON request from standard input, runs it against a
//! [`DeterministicGenie`] built from the request's provenance, and writes one
//! JSON response to standard output.

pub mod bridge;
pub mod deterministic;
pub mod logging;
pub mod protocol;

pub use bridge::{sentinel_provenance, Bridge, BridgeConfig, BridgeExit, BridgeState, UNKNOWN_RUN_ID};
pub use deterministic::{DeterministicGenie, ProvenanceIdentity, OVERLAY_RUN_PREFIX};
pub use logging::{init_tracing, LOG_ENV};
pub use protocol::{parse_request, ErrorBody, Operation, Request, Response};
