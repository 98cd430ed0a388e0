//! Entity trait: identity + continuity across state changes.
//!
//! Entities live *inside* an aggregate (curriculum items, switches) and are never
//! loaded or saved on their own.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Two entities are the same entity when their identifiers match, whatever
    /// their attributes.
    fn same_identity_as(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
