//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Reconciliation code (replace-by-id, remove-by-id) only needs this much.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
