//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Attributes, attribute groups and attribute values are compared purely by
/// their contents — two `Color = Red` attributes are the same attribute.
/// Value objects are immutable: to "modify" one, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
