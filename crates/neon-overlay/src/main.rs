use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use neon_engine::{DEFAULT_CORPUS_PATH, DEFAULT_MODE};
use neon_overlay::{init_tracing, Bridge, BridgeConfig, LOG_ENV};
use tracing::error;

#[derive(Parser, Debug)]
#[command(
    name = "neon-overlay",
    version,
    about = "Answer one deterministic Neon Genie request read from stdin"
)]
struct Cli {
    /// Directory holding stored artifacts.
    #[arg(long, env = "NEON_CORPUS_PATH", default_value = DEFAULT_CORPUS_PATH)]
    corpus_path: PathBuf,
    /// Execution mode recorded on generated artifacts.
    #[arg(long, env = "NEON_MODE", default_value = DEFAULT_MODE)]
    mode: String,
    /// Log filter directive; logs are written to stderr.
    #[arg(long, env = LOG_ENV)]
    log_filter: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_filter.as_deref());

    let mut bridge = Bridge::new(BridgeConfig {
        corpus_path: cli.corpus_path,
        mode: cli.mode,
    });
    match bridge.run(io::stdin().lock(), io::stdout().lock()) {
        Ok(exit) => exit.into(),
        Err(err) => {
            error!(%err, "failed to write response");
            ExitCode::FAILURE
        }
    }
}
