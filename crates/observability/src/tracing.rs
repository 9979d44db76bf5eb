//! Tracing/logging initialization.
//!
//! The engine itself only emits `tracing` events; whatever hosts it (a
//! desktop shell, a test harness) decides where they go. This module gives
//! hosts a one-call JSON setup.

use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging for the process, honoring `RUST_LOG`.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    init_filtered(filter);
}

/// Initialize with an explicit filter directive, e.g. `"varia_session=debug"`.
pub fn init_with_filter(directives: &str) {
    init_filtered(EnvFilter::new(directives));
}

fn init_filtered(filter: EnvFilter) {
    // JSON logs + timestamps; repeated init attempts are ignored.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
