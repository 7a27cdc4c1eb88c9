//! Error types for the serving layer.

use thiserror::Error;

use crate::github::FetchError;
use crate::relay::RelayError;
use crate::topics::ExtractError;

/// Internal failures during request orchestration.
///
/// The handler maps every variant onto the same generic 500 response;
/// the variants exist so the per-request log line can name the failing
/// collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Fetching the issue's comments failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Topic extraction failed.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// The comment delivery channel rejected an operation.
    #[error(transparent)]
    Relay(#[from] RelayError),
}

/// Failures that stop the server itself rather than one request.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listen address could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// The configured listen address.
        addr: String,
        /// The underlying socket error.
        source: std::io::Error,
    },

    /// The accept loop exited with an error.
    #[error("server exited unexpectedly: {0}")]
    Serve(#[source] std::io::Error),
}
