// SPDX-License-Identifier: PMPL-1.0-or-later

//! Diagnostic logging setup for the `kwoon` binary.
//!
//! Logs go to stderr so reports on stdout stay machine-readable. The filter
//! comes from `KWOON_LOG` (same syntax as `RUST_LOG`), defaulting to `warn`;
//! `--verbose` raises the default to `debug`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "KWOON_LOG";

/// Initialise the global subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}
