//! Structured error types shared across Neon Genie crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable symbolic error kinds surfaced to hosts through `ErrorInfo::code`.
pub mod codes {
    /// Standard input closed without any content, or a draw from an empty sequence.
    pub const EMPTY_INPUT: &str = "EmptyInput";
    /// Request bytes did not parse as JSON, or a field had the wrong shape.
    pub const MALFORMED_PAYLOAD: &str = "MalformedPayload";
    /// Request carried no `operation`.
    pub const MISSING_OPERATION: &str = "MissingOperation";
    /// Request carried no `provenance`, `run_id`, `timestamp_iso` or `payload`.
    pub const MISSING_FIELD: &str = "MissingField";
    /// Deterministic engine constructed without provenance.
    pub const MISSING_PROVENANCE: &str = "MissingProvenance";
    /// Timestamp literal does not denote a calendar instant.
    pub const INVALID_TIMESTAMP: &str = "InvalidTimestamp";
    /// Operation name does not match any handler.
    pub const UNKNOWN_OPERATION: &str = "UnknownOperation";
    /// Operation payload does not decode into the handler's input type.
    pub const INVALID_PAYLOAD: &str = "InvalidPayload";
    /// Filesystem failure inside the corpus store.
    pub const CORPUS_IO: &str = "CorpusIo";
    /// Stored artifact could not be decoded.
    pub const CORPUS_DECODE: &str = "CorpusDecode";
    /// Value could not be serialized.
    pub const SERIALIZE_FAILED: &str = "SerializeFailed";
}

/// What went wrong, in the shape a bridge error response reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// One of the symbolic kinds in [`codes`]; becomes `error.code`.
    pub code: String,
    /// Text for the host operator; becomes `error.message`.
    pub message: String,
    /// Offending request field, artifact id, corpus path or timestamp literal.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// How a host can correct the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Starts an error of kind `code` with no context.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records one piece of request or corpus state.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attaches a correction hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the Neon Genie workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum GenieError {
    /// Request framing errors raised before dispatch.
    #[error("protocol error: {0}")]
    Protocol(ErrorInfo),
    /// Provenance validation errors raised while building a deterministic engine.
    #[error("provenance error: {0}")]
    Provenance(ErrorInfo),
    /// Routing and payload decoding errors.
    #[error("dispatch error: {0}")]
    Dispatch(ErrorInfo),
    /// Errors raised by the generation engine.
    #[error("engine error: {0}")]
    Engine(ErrorInfo),
    /// Corpus persistence errors.
    #[error("corpus error: {0}")]
    Corpus(ErrorInfo),
    /// Seeded sequence errors.
    #[error("rng error: {0}")]
    Rng(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            write!(f, " | context: [{}]", pairs.join(", "))?;
        }
        match &self.hint {
            Some(hint) => write!(f, " | hint: {hint}"),
            None => Ok(()),
        }
    }
}

impl GenieError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            GenieError::Protocol(info)
            | GenieError::Provenance(info)
            | GenieError::Dispatch(info)
            | GenieError::Engine(info)
            | GenieError::Corpus(info)
            | GenieError::Rng(info)
            | GenieError::Serde(info) => info,
        }
    }

    /// Returns the lowercase family label used in serialized diagnostics.
    pub fn family(&self) -> &'static str {
        match self {
            GenieError::Protocol(_) => "protocol",
            GenieError::Provenance(_) => "provenance",
            GenieError::Dispatch(_) => "dispatch",
            GenieError::Engine(_) => "engine",
            GenieError::Corpus(_) => "corpus",
            GenieError::Rng(_) => "rng",
            GenieError::Serde(_) => "serde",
        }
    }

    /// Returns the symbolic kind stored in the payload.
    pub fn code(&self) -> &str {
        &self.info().code
    }
}
