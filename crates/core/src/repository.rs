//! Repository port: lookup/save of aggregates by external identifier.

use std::sync::Arc;

use crate::aggregate::AggregateRoot;
use crate::error::DomainResult;

/// Simple lookup/save abstraction over aggregate storage.
///
/// Implementations key rows by the aggregate's **external** identifier and assign a
/// surrogate key on first save. Consistency guarantees are those of the backend;
/// there is no custom transaction orchestration.
pub trait Repository<A: AggregateRoot>: Send + Sync {
    /// Load an aggregate by external identifier.
    fn find_by_id(&self, id: &A::Id) -> DomainResult<Option<A>>;

    /// Insert or replace an aggregate, returning it with its surrogate id assigned.
    fn save(&self, aggregate: A) -> DomainResult<A>;

    /// All aggregates, ordered by surrogate id (insertion order).
    fn list(&self) -> DomainResult<Vec<A>>;

    /// Remove an aggregate; `false` when nothing was stored under `id`.
    fn remove(&self, id: &A::Id) -> DomainResult<bool>;

    /// Insert a new aggregate unless one is already stored under its id or a
    /// stored one `clashes` with it. The check and the insert happen as one
    /// step. `None` when refused.
    fn insert_unless(&self, aggregate: A, clashes: &dyn Fn(&A) -> bool) -> DomainResult<Option<A>>;

    /// Whether an aggregate exists under `id`.
    fn exists(&self, id: &A::Id) -> DomainResult<bool> {
        Ok(self.find_by_id(id)?.is_some())
    }
}

impl<A, R> Repository<A> for Arc<R>
where
    A: AggregateRoot,
    R: Repository<A> + ?Sized,
{
    fn find_by_id(&self, id: &A::Id) -> DomainResult<Option<A>> {
        (**self).find_by_id(id)
    }

    fn save(&self, aggregate: A) -> DomainResult<A> {
        (**self).save(aggregate)
    }

    fn list(&self) -> DomainResult<Vec<A>> {
        (**self).list()
    }

    fn insert_unless(&self, aggregate: A, clashes: &dyn Fn(&A) -> bool) -> DomainResult<Option<A>> {
        (**self).insert_unless(aggregate, clashes)
    }

    fn remove(&self, id: &A::Id) -> DomainResult<bool> {
        (**self).remove(id)
    }
}
