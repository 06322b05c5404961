//! Generic per-kind entity store.
//!
//! [`EntityStore`] wraps an `IndexMap` so lookup is by id while iteration
//! preserves insertion order, which is what "list all" output relies on.
//! One store instance exists per entity kind inside
//! [`Campus`](crate::campus::Campus); cascading removals are driven there,
//! not here.

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;

use crate::error::DomainError;

/// The entity kinds held by the stores, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Course,
    Enrollment,
    Assignment,
    Grade,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::User => "user",
            EntityKind::Course => "course",
            EntityKind::Enrollment => "enrollment",
            EntityKind::Assignment => "assignment",
            EntityKind::Grade => "grade",
        };
        write!(f, "{name}")
    }
}

/// An id-keyed collection of entities of one kind.
#[derive(Debug, Clone)]
pub struct EntityStore<I, T> {
    kind: EntityKind,
    items: IndexMap<I, T>,
}

impl<I, T> EntityStore<I, T>
where
    I: Hash + Eq + Clone + fmt::Display,
{
    /// Creates an empty store for the given kind.
    pub fn new(kind: EntityKind) -> Self {
        EntityStore {
            kind,
            items: IndexMap::new(),
        }
    }

    /// The kind of entity this store holds.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Inserts an entity under `id`.
    ///
    /// Returns [`DomainError::IdCollision`] if the id is already present.
    pub fn insert(&mut self, id: I, entity: T) -> Result<(), DomainError> {
        if self.items.contains_key(&id) {
            return Err(DomainError::IdCollision {
                kind: self.kind,
                id: id.to_string(),
            });
        }
        self.items.insert(id, entity);
        Ok(())
    }

    /// Removes and returns the entity under `id`.
    ///
    /// Returns [`DomainError::NotFound`] if absent. Uses a shifting removal
    /// so the remaining entities keep their insertion order.
    pub fn remove(&mut self, id: &I) -> Result<T, DomainError> {
        self.items
            .shift_remove(id)
            .ok_or_else(|| DomainError::NotFound {
                kind: self.kind,
                id: id.to_string(),
            })
    }

    /// Looks up an entity by id.
    pub fn get(&self, id: &I) -> Option<&T> {
        self.items.get(id)
    }

    /// Looks up an entity by id, mutably.
    pub fn get_mut(&mut self, id: &I) -> Option<&mut T> {
        self.items.get_mut(id)
    }

    /// Looks up an entity by id, or fails with [`DomainError::NotFound`].
    pub fn require(&self, id: &I) -> Result<&T, DomainError> {
        self.items.get(id).ok_or_else(|| DomainError::NotFound {
            kind: self.kind,
            id: id.to_string(),
        })
    }

    /// Mutable variant of [`require`](Self::require).
    pub fn require_mut(&mut self, id: &I) -> Result<&mut T, DomainError> {
        let kind = self.kind;
        self.items.get_mut(id).ok_or_else(|| DomainError::NotFound {
            kind,
            id: id.to_string(),
        })
    }

    /// Returns `true` if an entity with this id exists.
    pub fn contains(&self, id: &I) -> bool {
        self.items.contains_key(id)
    }

    /// Number of stored entities.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the store holds nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over `(id, entity)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&I, &T)> {
        self.items.iter()
    }

    /// Iterates over entities mutably, in insertion order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.values_mut()
    }

    /// Lazily yields the entities matching `predicate`, in insertion order.
    pub fn filter<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a T>
    where
        P: Fn(&T) -> bool + 'a,
    {
        self.items.values().filter(move |entity| predicate(entity))
    }

    /// Keeps only the entities matching `predicate`, preserving order.
    pub fn retain<P>(&mut self, predicate: P)
    where
        P: FnMut(&I, &mut T) -> bool,
    {
        self.items.retain(predicate);
    }
}
