//! Value object trait: equality by value, not identity.
//!
//! `Title` is the value object in this domain: two titles are the same title
//! exactly when their strings are equal, which is what uniqueness checks
//! compare.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify"
/// one, construct a new value.
///
/// ```ignore
/// let a = Title::parse("Buy milk")?;
/// let b = Title::parse("Buy milk")?;
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
