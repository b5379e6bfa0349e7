//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity** of their own; they are defined entirely
/// by their attribute values. A movie's identity key is one: two keys built
/// from the same title and year are the same key, and a transaction only ever
/// stores the key, never the movie itself.
///
/// The trait requires:
/// - **Clone**: keys are copied into every transaction that refers to a movie
/// - **Eq + Ord**: keys are compared and ordered by value
/// - **Debug**: keys show up in logs
pub trait ValueObject: Clone + Eq + Ord + core::fmt::Debug {}
