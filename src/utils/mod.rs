//! Utility functions for the extraction pipeline.

/// Initializes the global tracing subscriber.
///
/// Honors `RUST_LOG` when set and defaults to `info` otherwise. Safe to call
/// more than once; only the first call installs a subscriber.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
