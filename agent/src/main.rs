//! DataGen entry point: loads configuration, wires the Gemini adapter and
//! runs the interactive loop on stdin and stdout.
//!
//! Diagnostics go to stderr through `tracing`, filtered by `RUST_LOG`.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use datagen::config::{AgentSettings, SettingsError};
use datagen::domain::{ConversationService, ToolRegistry};
use datagen::inbound::cli::Repl;
use datagen::outbound::gemini::{GeminiClientError, GeminiOrchestrator};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// Failures that stop the agent before or while it runs.
#[derive(Debug, Error)]
enum StartupError {
    #[error("failed to load configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Client(#[from] GeminiClientError),
    #[error("failed to create Tokio runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("terminal I/O failed: {0}")]
    Terminal(#[source] io::Error),
}

fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    init_tracing();
    if let Err(error) = dotenv {
        if !error.not_found() {
            warn!(%error, "ignoring unreadable .env file");
        }
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "datagen: {err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

fn run() -> Result<(), StartupError> {
    let settings = AgentSettings::load().map_err(|error| StartupError::Config(error.to_string()))?;
    let gemini = settings.gemini_settings()?;
    info!(model = %gemini.model, max_steps = gemini.max_steps, "starting DataGen");

    let registry = Arc::new(ToolRegistry::new(settings.seed, Arc::new(DefaultClock)));
    let orchestrator = Arc::new(GeminiOrchestrator::new(&gemini, registry)?);
    let repl = Repl::new(ConversationService::new(orchestrator));

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(StartupError::Runtime)?;
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    runtime
        .block_on(repl.run(stdin, &mut stdout))
        .map_err(StartupError::Terminal)?;
    Ok(())
}
