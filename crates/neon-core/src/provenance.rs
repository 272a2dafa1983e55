//! Provenance identifying one deterministic execution.

use serde::{Deserialize, Serialize};

use crate::hash::derive_seed;

/// Identity of one deterministic execution.
///
/// Two executions with identical provenance and identical request payloads
/// produce identical identifiers, timestamps and derived content. The value
/// is attached to artifacts and responses but never rewritten by them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Provenance {
    /// Unique identifier for this execution run.
    pub run_id: String,
    /// ISO-8601 timestamp literal for this execution.
    pub timestamp_iso: String,
    /// Optional explicit seed overriding the derived one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
}

impl Provenance {
    /// Creates provenance without an explicit seed.
    pub fn new(run_id: impl Into<String>, timestamp_iso: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            timestamp_iso: timestamp_iso.into(),
            seed: None,
        }
    }

    /// Attaches an explicit seed.
    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Returns the explicit seed when one was supplied and is non-empty.
    pub fn explicit_seed(&self) -> Option<&str> {
        self.seed.as_deref().filter(|seed| !seed.is_empty())
    }

    /// Computes the seed that drives all deterministic draws for this run.
    pub fn derived_seed(&self) -> String {
        derive_seed(&self.run_id, &self.timestamp_iso, self.explicit_seed())
    }
}
