//! Variant editing session: lifecycle orchestration over one product's
//! variant collection.
//!
//! The session enforces the single-unsaved-variant and
//! single-in-flight-operation policies, runs the duplicate and consistency
//! checks from `varia-variants` before any save reaches the network, and
//! talks to the backend through the [`VariantGateway`] trait.

pub mod gateway;
pub mod in_memory;
pub mod session;

pub use gateway::VariantGateway;
pub use in_memory::InMemoryVariantGateway;
pub use session::{Processing, VariantEditingSession};
