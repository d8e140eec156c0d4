//! # Storage Traits
//!
//! The repository abstraction that lets the domain layer run unchanged over
//! in-memory maps, flat files, XML documents, or a relational database.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use crate::error::{BookstoreError, Result};

/// Identifier type usable as a repository key.
///
/// `nil` is the unassigned value; repositories reject it before touching
/// the backend.
pub trait EntityId:
    Copy + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static
{
    fn is_nil(&self) -> bool;
}

/// Ids are assigned from 1, so 0 marks an entity that was never stored.
impl EntityId for u32 {
    fn is_nil(&self) -> bool {
        *self == 0
    }
}

/// A record with a unique identifier and business fields.
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: EntityId;

    fn id(&self) -> Self::Id;
}

/// Result of [`Repository::save`].
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome<E> {
    /// The entity was inserted.
    Inserted,
    /// An entity with the same id already exists; nothing was written.
    Conflict(E),
}

impl<E> SaveOutcome<E> {
    pub fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted)
    }

    /// The already-stored entity, when the save conflicted.
    pub fn conflicting(self) -> Option<E> {
        match self {
            Self::Conflict(existing) => Some(existing),
            Self::Inserted => None,
        }
    }
}

/// Result of [`Repository::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome<E> {
    /// The stored entity was replaced with this value.
    Updated(E),
    /// No entity with that id exists; nothing was written.
    NotFound,
}

impl<E> UpdateOutcome<E> {
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated(_))
    }

    pub fn updated(self) -> Option<E> {
        match self {
            Self::Updated(entity) => Some(entity),
            Self::NotFound => None,
        }
    }
}

/// Uniform CRUD contract over one entity kind.
///
/// Every backend implements the same semantics: `save` never overwrites,
/// `update` never inserts, `delete` returns what it removed. Operations are
/// synchronous and atomic with respect to their own backend; there is no
/// cross-entity transaction.
pub trait Repository<E: Entity>: Send + Sync {
    /// The entity with the given id, if any.
    fn find_one(&self, id: E::Id) -> Result<Option<E>>;

    /// All entities, unordered, no duplicates.
    fn find_all(&self) -> Result<Vec<E>>;

    /// Insert the entity unless its id is already taken.
    fn save(&self, entity: E) -> Result<SaveOutcome<E>>;

    /// Remove and return the entity with the given id.
    fn delete(&self, id: E::Id) -> Result<Option<E>>;

    /// Replace the stored entity sharing this entity's id.
    fn update(&self, entity: E) -> Result<UpdateOutcome<E>>;
}

/// Fail fast on a nil id before any backend work happens.
pub(crate) fn require_assigned<I: EntityId>(id: I) -> Result<()> {
    if id.is_nil() {
        Err(BookstoreError::IllegalArgument("id must be assigned"))
    } else {
        Ok(())
    }
}
