//! Logging infrastructure for revq.
//!
//! Structured logging via `tracing`, initialized once from the CLI entry
//! point. Verbose mode widens the filter and keeps event targets; the default
//! is a compact human-readable format.

use std::io::IsTerminal;
use tracing_subscriber::{
    EnvFilter,
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Check if colored output should be used.
///
/// Returns true only if:
/// - stdout is a terminal (TTY)
/// - NO_COLOR environment variable is not set
fn use_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Initialize the tracing subscriber.
///
/// The filter honors `RUST_LOG` when set and otherwise defaults to debug for
/// the revq crates (verbose) or info for them and warn for everything else.
///
/// # Errors
///
/// Returns an error when a subscriber is already installed for this process.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            if verbose {
                EnvFilter::try_new("revq=debug,revq_pipeline=debug,info")
            } else {
                EnvFilter::try_new("revq=info,revq_pipeline=info,warn")
            }
        })
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_ansi(use_color())
                .with_target(verbose)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_line_number(false)
                .with_file(false)
                .compact(),
        )
        .try_init()?;

    Ok(())
}
