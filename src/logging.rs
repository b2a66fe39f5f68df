//! Diagnostics on stderr.
//!
//! Stdout carries rendered rows only, so every log line goes to stderr.
//! The level defaults to `warn` (`debug` with `--verbose`) and can be
//! overridden with `RUST_LOG`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .compact()
        .with_ansi(atty::is(atty::Stream::Stderr));

    // A second init (e.g. from an embedding test harness) is not an error.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
