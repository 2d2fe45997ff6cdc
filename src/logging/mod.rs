//! Diagnostic logging.
//!
//! Diagnostics go to stderr through `tracing` so they never interleave with
//! the chat transcript on stdout. `RUST_LOG` takes precedence; otherwise the
//! level is `warn`, or `debug` with `--verbose`.

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) {
    let default_directive = if verbose { "crablet=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into());

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
