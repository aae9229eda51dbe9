//! Typed references used by the legacy REST-style API surface

use std::fmt;
use std::marker::PhantomData;

/// Reference to a node by id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeReference(i64);

impl NodeReference {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> i64 {
        self.0
    }
}

impl From<i64> for NodeReference {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Reference to a relationship whose payload deserializes into `T`
pub struct RelationshipReference<T = ()> {
    id: i64,
    _payload: PhantomData<fn() -> T>,
}

impl<T> RelationshipReference<T> {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            _payload: PhantomData,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }
}

impl<T> Clone for RelationshipReference<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RelationshipReference<T> {}

impl<T> PartialEq for RelationshipReference<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for RelationshipReference<T> {}

impl<T> fmt::Debug for RelationshipReference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RelationshipReference").field(&self.id).finish()
    }
}

/// Which kind of entity a legacy index covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexFor {
    Node,
    Relationship,
}

/// Legacy delete behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    NodeOnly,
    NodeAndRelationships,
}
