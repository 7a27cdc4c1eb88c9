//! HTTP serving layer: accept loop, routing, and request orchestration.
//!
//! The accept loop hands every inbound connection to its own tokio task;
//! a slow or hung request never blocks the listener. Route matching is
//! owned by [`router::route`] behind a single fallback handler so the
//! 404/400 taxonomy stays under this crate's control.

pub mod error;
pub mod handler;
pub mod report;
pub mod router;

use axum::Router;
use tokio::net::TcpListener;

pub use error::{ServerError, ServiceError};
pub use handler::AppState;
pub use report::render_report;
pub use router::{Route, RouteError, route};

/// Builds the application router: every request funnels through
/// [`handler::dispatch`].
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new().fallback(handler::dispatch).with_state(state)
}

/// Binds the listen address and serves until shutdown.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] when the address cannot be bound (for
/// example when the port is already in use) and [`ServerError::Serve`]
/// when the accept loop exits with an error.
pub async fn run(addr: &str, state: AppState) -> Result<(), ServerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.to_owned(),
            source,
        })?;
    let local_addr = listener.local_addr().map_err(ServerError::Serve)?;
    tracing::info!(%local_addr, "listening");

    serve(listener, state).await
}

/// Serves requests on an already-bound listener until ctrl-c.
///
/// # Errors
///
/// Returns [`ServerError::Serve`] when the accept loop exits with an
/// error.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), ServerError> {
    axum::serve(listener, app(state))
        .with_graceful_shutdown(async {
            let _ignored = tokio::signal::ctrl_c().await;
        })
        .await
        .map_err(ServerError::Serve)
}
