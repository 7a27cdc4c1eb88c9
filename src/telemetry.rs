//! Tracing initialisation.
//!
//! One outcome line is logged per request, plus startup and shutdown
//! events; `RUST_LOG` controls the filter and `info` is the default.

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// Safe to call more than once; later calls are no-ops, which keeps test
/// binaries that initialise telemetry per-case well behaved.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ignored = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
