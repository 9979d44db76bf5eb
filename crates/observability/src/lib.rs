//! `varia-observability` — tracing/logging initialization for hosts of the
//! variant engine.

pub mod tracing;

pub use tracing::{init, init_with_filter};
