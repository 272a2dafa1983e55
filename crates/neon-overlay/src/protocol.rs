//! Request and response envelopes of the bridge protocol.

use std::fmt;
use std::str::FromStr;

use neon_core::errors::{codes, ErrorInfo, GenieError};
use neon_core::Provenance;
use neon_engine::ExportFormat;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Operations the bridge can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Generate,
    Analyze,
    Evolve,
    Search,
    FindSimilar,
    Export,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Generate,
        Operation::Analyze,
        Operation::Evolve,
        Operation::Search,
        Operation::FindSimilar,
        Operation::Export,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Generate => "generate",
            Operation::Analyze => "analyze",
            Operation::Evolve => "evolve",
            Operation::Search => "search",
            Operation::FindSimilar => "findSimilar",
            Operation::Export => "export",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = GenieError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|operation| operation.as_str() == value)
            .ok_or_else(|| {
                GenieError::Dispatch(
                    ErrorInfo::new(
                        codes::UNKNOWN_OPERATION,
                        format!("Unknown operation: {value}"),
                    )
                    .with_context("operation", value),
                )
            })
    }
}

/// A request that passed pre-dispatch validation.
///
/// `operation` is kept as received; routing it happens during dispatch so an
/// unknown name is reported against the request's own provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub operation: String,
    pub provenance: Provenance,
    pub payload: Value,
}

impl Request {
    pub fn operation(&self) -> Result<Operation, GenieError> {
        self.operation.parse()
    }

    /// Decodes the payload into an operation's input type.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, GenieError> {
        T::deserialize(&self.payload).map_err(|err| {
            GenieError::Dispatch(
                ErrorInfo::new(
                    codes::INVALID_PAYLOAD,
                    format!("Invalid payload for {}: {err}", self.operation),
                )
                .with_context("operation", self.operation.clone()),
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolvePayload {
    pub parent_id: String,
    #[serde(default)]
    pub feedback: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPayload {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindSimilarPayload {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPayload {
    pub id: String,
    pub format: ExportFormat,
}

fn protocol_error(code: &str, message: impl Into<String>) -> GenieError {
    GenieError::Protocol(ErrorInfo::new(code, message))
}

fn wrong_shape(field: &str, expected: &str) -> GenieError {
    GenieError::Protocol(
        ErrorInfo::new(
            codes::MALFORMED_PAYLOAD,
            format!("Field {field} must be {expected}"),
        )
        .with_context("field", field),
    )
}

fn missing_field(field: &str) -> GenieError {
    GenieError::Protocol(
        ErrorInfo::new(
            codes::MISSING_FIELD,
            format!("Missing required field: {field}"),
        )
        .with_context("field", field),
    )
}

/// A required field is missing when it is absent or holds a falsy value:
/// `null`, `false`, `0` or `""`. Objects and arrays, even empty ones, are
/// present.
fn present<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    match object.get(key)? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        Value::String(text) if text.is_empty() => None,
        value => Some(value),
    }
}

fn required_string(
    object: &Map<String, Value>,
    key: &str,
    field: &str,
) -> Result<String, GenieError> {
    match present(object, key) {
        None => Err(missing_field(field)),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(wrong_shape(field, "a string")),
    }
}

/// Validates raw standard input into a [`Request`].
///
/// Checks run in a fixed order and the first failure wins: empty input,
/// JSON syntax, `operation`, `provenance`, `provenance.run_id`,
/// `provenance.timestamp_iso`, `payload`. Every error returned here is fatal
/// to the invocation.
pub fn parse_request(input: &str) -> Result<Request, GenieError> {
    if input.trim().is_empty() {
        return Err(protocol_error(
            codes::EMPTY_INPUT,
            "Empty input received from stdin",
        ));
    }
    let document: Value = serde_json::from_str(input).map_err(|err| {
        protocol_error(codes::MALFORMED_PAYLOAD, format!("Invalid JSON input: {err}"))
    })?;
    let empty = Map::new();
    let object = document.as_object().unwrap_or(&empty);

    let operation = match present(object, "operation") {
        None => {
            return Err(protocol_error(
                codes::MISSING_OPERATION,
                "Missing required field: operation",
            ))
        }
        Some(Value::String(name)) => name.clone(),
        Some(other) => other.to_string(),
    };

    let provenance = match present(object, "provenance") {
        None => return Err(missing_field("provenance")),
        Some(Value::Object(fields)) => fields,
        Some(_) => return Err(wrong_shape("provenance", "an object")),
    };
    let run_id = required_string(provenance, "run_id", "provenance.run_id")?;
    let timestamp_iso = required_string(provenance, "timestamp_iso", "provenance.timestamp_iso")?;
    // Kept as sent, `""` included, so the response echoes it; an empty
    // seed is ignored when the seed is derived.
    let seed = match provenance.get("seed") {
        None | Some(Value::Null) => None,
        Some(Value::String(seed)) => Some(seed.clone()),
        Some(_) => return Err(wrong_shape("provenance.seed", "a string")),
    };

    let payload = present(object, "payload")
        .cloned()
        .ok_or_else(|| missing_field("payload"))?;

    Ok(Request {
        operation,
        provenance: Provenance {
            run_id,
            timestamp_iso,
            seed,
        },
        payload,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<&GenieError> for ErrorBody {
    fn from(err: &GenieError) -> Self {
        let info = err.info();
        let mut details = json!({
            "family": err.family(),
            "context": info.context,
        });
        if let Some(hint) = &info.hint {
            details["hint"] = Value::String(hint.clone());
        }
        Self {
            code: info.code.clone(),
            message: info.message.clone(),
            details: Some(details),
        }
    }
}

/// The single document written to standard output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Success {
        success: bool,
        result: Value,
        provenance: Provenance,
    },
    Error {
        success: bool,
        error: ErrorBody,
        provenance: Provenance,
    },
}

impl Response {
    pub fn success(result: Value, provenance: Provenance) -> Self {
        Response::Success {
            success: true,
            result,
            provenance,
        }
    }

    pub fn error(err: &GenieError, provenance: Provenance) -> Self {
        Response::Error {
            success: false,
            error: ErrorBody::from(err),
            provenance,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success { .. })
    }

    pub fn provenance(&self) -> &Provenance {
        match self {
            Response::Success { provenance, .. } | Response::Error { provenance, .. } => provenance,
        }
    }

    /// Pretty-printed JSON followed by a newline.
    pub fn to_wire(&self) -> Result<String, GenieError> {
        let mut body = serde_json::to_string_pretty(self).map_err(|err| {
            GenieError::Serde(ErrorInfo::new(codes::SERIALIZE_FAILED, err.to_string()))
        })?;
        body.push('\n');
        Ok(body)
    }
}
