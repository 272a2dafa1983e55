//! Single-shot stdin/stdout bridge.
//!
//! One [`Bridge::run`] call handles exactly one request and moves through
//! `AwaitingInput -> Dispatching -> Responding -> Terminated`. A failure
//! while awaiting input is fatal and answered with a sentinel provenance; a
//! failure while dispatching is answered with the request's own provenance
//! and the run still completes.

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{SecondsFormat, Utc};
use neon_core::errors::{codes, ErrorInfo, GenieError};
use neon_core::Provenance;
use neon_engine::{GenieConfig, IdeaEngine, IdeationPrompt, DEFAULT_CORPUS_PATH, DEFAULT_MODE};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::deterministic::DeterministicGenie;
use crate::protocol::{
    parse_request, EvolvePayload, ExportPayload, FindSimilarPayload, Operation, Request,
    Response, SearchPayload,
};

/// Run identifier reported when no provenance could be read.
pub const UNKNOWN_RUN_ID: &str = "unknown";

/// Host-supplied settings; never part of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    pub corpus_path: PathBuf,
    pub mode: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            corpus_path: PathBuf::from(DEFAULT_CORPUS_PATH),
            mode: DEFAULT_MODE.to_string(),
        }
    }
}

impl BridgeConfig {
    fn genie_config(&self) -> GenieConfig {
        GenieConfig {
            corpus_path: self.corpus_path.clone(),
            mode: self.mode.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    AwaitingInput,
    Dispatching,
    Responding,
    Terminated,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeExit {
    /// A response carrying the request's provenance was written, whether or
    /// not the operation succeeded.
    Completed,
    /// The request could not be validated.
    Fatal,
}

impl BridgeExit {
    pub fn code(self) -> u8 {
        match self {
            BridgeExit::Completed => 0,
            BridgeExit::Fatal => 1,
        }
    }
}

impl From<BridgeExit> for ExitCode {
    fn from(exit: BridgeExit) -> Self {
        ExitCode::from(exit.code())
    }
}

/// Provenance used when the request never yielded one. Reads the wall clock.
pub fn sentinel_provenance() -> Provenance {
    Provenance::new(
        UNKNOWN_RUN_ID,
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

#[derive(Debug)]
pub struct Bridge {
    config: BridgeConfig,
    state: BridgeState,
}

impl Bridge {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            state: BridgeState::AwaitingInput,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }

    /// Reads `reader` to the end, handles the request and writes one
    /// response to `writer`.
    ///
    /// The returned error covers only failures to write the response.
    pub fn run<R: Read, W: Write>(&mut self, reader: R, writer: W) -> io::Result<BridgeExit> {
        let (response, exit) = match self.await_input(reader) {
            Ok(request) => {
                self.state = BridgeState::Dispatching;
                (self.dispatch(&request), BridgeExit::Completed)
            }
            Err(err) => {
                error!(code = err.code(), message = %err.info().message, "rejected request");
                (Response::error(&err, sentinel_provenance()), BridgeExit::Fatal)
            }
        };
        self.state = BridgeState::Responding;
        let written = Self::respond(writer, &response);
        self.state = BridgeState::Terminated;
        written.map(|()| exit)
    }

    fn await_input<R: Read>(&mut self, mut reader: R) -> Result<Request, GenieError> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw).map_err(|err| {
            GenieError::Protocol(ErrorInfo::new(
                codes::MALFORMED_PAYLOAD,
                format!("Failed to read stdin: {err}"),
            ))
        })?;
        let text = String::from_utf8(raw).map_err(|err| {
            GenieError::Protocol(ErrorInfo::new(
                codes::MALFORMED_PAYLOAD,
                format!("Invalid JSON input: {err}"),
            ))
        })?;
        parse_request(&text)
    }

    /// Builds the response for a validated request. Never fatal.
    fn dispatch(&self, request: &Request) -> Response {
        info!(
            operation = %request.operation,
            run_id = %request.provenance.run_id,
            "dispatching request"
        );
        match self.execute(request) {
            Ok(result) => Response::success(result, request.provenance.clone()),
            Err(err) => {
                warn!(
                    operation = %request.operation,
                    code = err.code(),
                    "operation failed"
                );
                Response::error(&err, request.provenance.clone())
            }
        }
    }

    fn execute(&self, request: &Request) -> Result<Value, GenieError> {
        let mut genie = DeterministicGenie::open(
            Some(request.provenance.clone()),
            &self.config.genie_config(),
        )?;
        match request.operation()? {
            Operation::Generate => {
                let prompt: IdeationPrompt = request.payload_as()?;
                to_result(&genie.generate(&prompt)?)
            }
            Operation::Analyze => {
                let prompt: IdeationPrompt = request.payload_as()?;
                to_result(&genie.analyze(&prompt)?)
            }
            Operation::Evolve => {
                let payload: EvolvePayload = request.payload_as()?;
                to_result(&genie.evolve(&payload.parent_id, &payload.feedback)?)
            }
            Operation::Search => {
                let payload: SearchPayload = request.payload_as()?;
                to_result(&genie.search(&payload.query)?)
            }
            Operation::FindSimilar => {
                let payload: FindSimilarPayload = request.payload_as()?;
                to_result(&genie.find_similar(&payload.id)?)
            }
            Operation::Export => {
                let payload: ExportPayload = request.payload_as()?;
                to_result(&genie.export(&payload.id, payload.format)?)
            }
        }
    }

    fn respond<W: Write>(mut writer: W, response: &Response) -> io::Result<()> {
        let body = response
            .to_wire()
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        writer.write_all(body.as_bytes())?;
        writer.flush()
    }
}

fn to_result<T: Serialize>(value: &T) -> Result<Value, GenieError> {
    serde_json::to_value(value).map_err(|err| {
        GenieError::Serde(ErrorInfo::new(codes::SERIALIZE_FAILED, err.to_string()))
    })
}
