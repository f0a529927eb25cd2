//! Diagnostic logging for both binaries. Events go to standard error, so they
//! never mix with a report or a GIF on standard output. `RUST_LOG` overrides
//! the default filter, e.g. `RUST_LOG=dups=debug`.
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber. `default` is the filter used
/// when `RUST_LOG` is unset or unparsable.
pub fn init(default: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second call (or a subscriber installed by a test harness) is not an error
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
