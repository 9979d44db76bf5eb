//! `varia-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers, the engine error taxonomy, and the
//! entity/value-object marker traits shared by the variant engine.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{EngineError, EngineResult, GatewayError};
pub use id::{DraftId, ProductId, VariantId};
pub use value_object::ValueObject;
