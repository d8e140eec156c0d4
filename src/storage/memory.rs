//! In-memory repository: the baseline backend, and the store the
//! file-backed variants wrap.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::Result;
use crate::storage::traits::{require_assigned, Entity, Repository, SaveOutcome, UpdateOutcome};

/// Map-backed repository. Each operation locks the map for its own
/// duration only; check-then-act sequences spanning two calls still need a
/// single-writer discipline from the caller.
pub struct InMemoryRepository<E: Entity> {
    entities: RwLock<HashMap<E::Id, E>>,
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }

    // A poisoned lock only means a panicking writer released it mid-call;
    // the map itself is still the last consistent state.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<E::Id, E>> {
        self.entities.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<E::Id, E>> {
        self.entities.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    fn find_one(&self, id: E::Id) -> Result<Option<E>> {
        require_assigned(id)?;
        Ok(self.read().get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<E>> {
        Ok(self.read().values().cloned().collect())
    }

    fn save(&self, entity: E) -> Result<SaveOutcome<E>> {
        require_assigned(entity.id())?;
        match self.write().entry(entity.id()) {
            Entry::Occupied(slot) => Ok(SaveOutcome::Conflict(slot.get().clone())),
            Entry::Vacant(slot) => {
                slot.insert(entity);
                Ok(SaveOutcome::Inserted)
            }
        }
    }

    fn delete(&self, id: E::Id) -> Result<Option<E>> {
        require_assigned(id)?;
        Ok(self.write().remove(&id))
    }

    fn update(&self, entity: E) -> Result<UpdateOutcome<E>> {
        require_assigned(entity.id())?;
        match self.write().get_mut(&entity.id()) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(UpdateOutcome::Updated(entity))
            }
            None => Ok(UpdateOutcome::NotFound),
        }
    }
}
