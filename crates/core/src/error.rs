//! Engine error taxonomy.
//!
//! Validation and state errors are resolved locally (no network call is
//! made) and returned synchronously; gateway errors are awaited and
//! propagated verbatim. No error here is fatal: every rejection leaves the
//! variant collection in its last-known-good state.

use thiserror::Error;

/// Result type used across the engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// Failure surfaced to the editing UI.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The candidate's differentiator set equals another variant's.
    #[error("duplicate variant: differentiator values for [{}] match an existing variant", .labels.join(", "))]
    DuplicateVariant { labels: Vec<String> },

    /// The candidate's differentiator labels diverge from another variant's.
    #[error("inconsistent differentiators: attribute(s) [{}] must be declared on every variant", .missing.join(", "))]
    InconsistentDifferentiators { missing: Vec<String> },

    /// A second mutation was attempted while one is in flight.
    ///
    /// A normal user-timing race, not a bug; callers should surface it as a
    /// warning and let the user retry once the in-flight operation settles.
    #[error("another variant operation is still in progress")]
    OperationInProgress,

    /// Add/clone attempted while an unsaved variant is present.
    #[error("an unsaved variant already exists; save or remove it first")]
    UnsavedVariantExists,

    /// Variant mutation attempted before the parent product was saved.
    #[error("the product must be saved before variants can be added")]
    ProductNotPersisted,

    /// The addressed variant is not part of the collection.
    #[error("no variant with the requested identifier")]
    UnknownVariant,

    /// An identifier failed to parse.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Network/backend failure, propagated verbatim.
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Failure reported by the persistence gateway.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
}

impl EngineError {
    /// True for rejections the engine resolved locally, without a network call.
    pub fn is_local(&self) -> bool {
        !matches!(self, EngineError::Gateway(_))
    }
}
