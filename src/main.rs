//! Commentary server entrypoint.

use std::process::ExitCode;
use std::sync::Arc;

use commentary::{
    AppState, CommentaryConfig, FetchError, KeywordTopicExtractor, OctocrabCommentGateway,
    ServerError, server, telemetry,
};
use ortho_config::OrthoConfig;
use thiserror::Error;

/// Failures that abort startup before the server is running.
#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Server(#[from] ServerError),
}

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init_tracing();
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "startup failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = load_config()?;

    let token = config.resolve_token()?;
    let api_base = config.api_base()?;
    let gateway = OctocrabCommentGateway::for_token(&token, &api_base)?;

    let state = AppState::new(Arc::new(gateway), Arc::new(KeywordTopicExtractor::new()));
    server::run(config.bind_address(), state).await?;
    Ok(())
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`FetchError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<CommentaryConfig, FetchError> {
    CommentaryConfig::load().map_err(|error| FetchError::Configuration {
        message: error.to_string(),
    })
}
