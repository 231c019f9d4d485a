//! Value object marker: equality by value, not identity.

/// Marker trait for value objects.
///
/// Everything in the typed access-policy model is a value: built fresh by a
/// decode call, compared field by field, never mutated in place after it has
/// been handed on.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
