//! Aggregate root trait for state-stored domain models.

use crate::id::SurrogateId;

/// Aggregate root marker + minimal interface.
///
/// Aggregates carry two identities:
///
/// - the **external** identifier (`id()`), assigned at creation, immutable, and the
///   only identifier other aggregates and HTTP clients ever see;
/// - the **surrogate** identifier, assigned by the repository on first save.
///
/// Mutation methods live on the concrete aggregate and enforce their own guarded
/// transitions; this trait stays small so each module decides how it models state.
pub trait AggregateRoot: Clone + Send + Sync + 'static {
    /// Strongly-typed external identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display + Send + Sync;

    /// Returns the external identifier.
    fn id(&self) -> &Self::Id;

    /// Surrogate key, `None` until the aggregate has been saved once.
    fn surrogate_id(&self) -> Option<SurrogateId>;

    /// Called by repositories when the aggregate is first persisted.
    fn assign_surrogate_id(&mut self, id: SurrogateId);

    /// Whether the aggregate has been persisted at least once.
    fn is_persisted(&self) -> bool {
        self.surrogate_id().is_some()
    }
}
