//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Variants keep their identity while the user edits them; two variants with
/// the same identifier are the same variant regardless of field values.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
