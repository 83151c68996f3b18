use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// Log lines go to stderr so they never interleave with the interactive menu
/// on stdout. Verbosity follows `RUST_LOG` (for example
/// `RUST_LOG=hotel_reservation=debug`) and defaults to `info`.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // a second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
