//! Identifier and clock hook consulted by the engine.

use chrono::{SecondsFormat, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Source of artifact identifiers and timestamps.
///
/// The engine never reads the clock or an entropy source directly; every
/// identifier and timestamp it records comes from this hook, so replacing
/// the hook is enough to make the engine reproducible.
pub trait IdentitySource {
    /// Identifier for the next artifact or report.
    fn artifact_id(&self) -> String;

    /// Timestamp recorded on artifacts produced now.
    fn timestamp(&self) -> String;
}

/// Wall-clock identities: `idea_<unix millis>_<six base-36 chars>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl IdentitySource for WallClock {
    fn artifact_id(&self) -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(6)
            .map(|byte| (byte as char).to_ascii_lowercase())
            .collect();
        format!("idea_{}_{suffix}", Utc::now().timestamp_millis())
    }

    fn timestamp(&self) -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
