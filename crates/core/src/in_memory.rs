//! In-memory repository for tests/dev and the single-process server.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::aggregate::AggregateRoot;
use crate::error::{DomainError, DomainResult};
use crate::id::SurrogateId;
use crate::repository::Repository;

/// `RwLock<HashMap>` repository keyed by external identifier.
///
/// - Surrogate ids are assigned on first save, starting at 1
/// - `save` upserts; the last write wins
/// - A poisoned lock surfaces as `DomainError::Storage`
#[derive(Debug)]
pub struct InMemoryRepository<A: AggregateRoot> {
    rows: RwLock<HashMap<A::Id, A>>,
    next_surrogate: AtomicU64,
}

impl<A: AggregateRoot> InMemoryRepository<A> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            next_surrogate: AtomicU64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<A: AggregateRoot> Default for InMemoryRepository<A> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> DomainError {
    DomainError::storage("repository lock poisoned")
}

impl<A: AggregateRoot> Repository<A> for InMemoryRepository<A> {
    fn find_by_id(&self, id: &A::Id) -> DomainResult<Option<A>> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows.get(id).cloned())
    }

    fn save(&self, mut aggregate: A) -> DomainResult<A> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;

        if aggregate.surrogate_id().is_none() {
            // Re-saving a fresh copy of a stored aggregate keeps the stored key.
            let surrogate = match rows.get(aggregate.id()).and_then(|stored| stored.surrogate_id()) {
                Some(existing) => existing,
                None => SurrogateId::new(self.next_surrogate.fetch_add(1, Ordering::Relaxed)),
            };
            aggregate.assign_surrogate_id(surrogate);
        }

        rows.insert(aggregate.id().clone(), aggregate.clone());
        Ok(aggregate)
    }

    fn list(&self) -> DomainResult<Vec<A>> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        let mut all: Vec<A> = rows.values().cloned().collect();
        all.sort_by_key(|a| a.surrogate_id());
        Ok(all)
    }

    fn remove(&self, id: &A::Id) -> DomainResult<bool> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        Ok(rows.remove(id).is_some())
    }

    fn insert_unless(&self, mut aggregate: A, clashes: &dyn Fn(&A) -> bool) -> DomainResult<Option<A>> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        if rows.contains_key(aggregate.id()) || rows.values().any(clashes) {
            return Ok(None);
        }

        aggregate.assign_surrogate_id(SurrogateId::new(self.next_surrogate.fetch_add(1, Ordering::Relaxed)));
        rows.insert(aggregate.id().clone(), aggregate.clone());
        Ok(Some(aggregate))
    }
}
