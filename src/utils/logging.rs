use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber that honors `RUST_LOG`, defaulting to `info`.
///
/// Safe to call more than once; subsequent calls are no-ops. Used by the demo binaries and
/// handy in tests.
pub fn setup_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
