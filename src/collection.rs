//! Owned entity collections with member validation
//!
//! A collection belongs to exactly one parent object and stores its child
//! entities by value. Membership is checked synchronously inside [`add`]
//! against a filter fixed at construction, so an invalid child is rejected
//! before it is ever inserted.
//!
//! [`add`]: CadObjectCollection::add

use crate::entities::{EntityType, Seqend};
use crate::error::{CadError, Result};
use crate::types::Handle;

/// Which entity subtypes a collection accepts
///
/// Matching is by subclass marker, the format's per-subtype discriminator.
#[derive(Debug, Clone, Copy)]
pub struct MemberFilter {
    description: &'static str,
    markers: Option<&'static [&'static str]>,
}

impl MemberFilter {
    /// Accept any entity subtype
    pub const ANY: MemberFilter = MemberFilter {
        description: "any entity",
        markers: None,
    };

    /// Accept only entities whose subclass marker is in `markers`
    pub const fn only(description: &'static str, markers: &'static [&'static str]) -> Self {
        MemberFilter {
            description,
            markers: Some(markers),
        }
    }

    /// Check a candidate's subclass marker against the filter
    pub fn accepts(&self, marker: &str) -> bool {
        match self.markers {
            None => true,
            Some(markers) => markers.iter().any(|m| *m == marker),
        }
    }

    /// Human-readable description of the accepted set
    pub fn description(&self) -> &'static str {
        self.description
    }
}

/// Ordered collection of entities owned by a single parent
#[derive(Debug, Clone)]
pub struct CadObjectCollection {
    filter: MemberFilter,
    /// Handle of the owning parent, mirrored onto every item
    pub(crate) owner: Handle,
    pub(crate) items: Vec<EntityType>,
}

impl CadObjectCollection {
    /// Create an empty collection with the given member filter
    pub fn new(filter: MemberFilter) -> Self {
        CadObjectCollection {
            filter,
            owner: Handle::NULL,
            items: Vec::new(),
        }
    }

    /// The collection's member filter
    pub fn filter(&self) -> &MemberFilter {
        &self.filter
    }

    /// Append an entity, validating its subtype first
    ///
    /// On success the item's owner back-reference is set to the collection's
    /// parent. A rejected item is handed back untouched inside the error
    /// path; the collection is unchanged.
    pub fn add(&mut self, mut entity: EntityType) -> Result<()> {
        let marker = entity.as_entity().subclass_marker();
        if !self.filter.accepts(marker) {
            return Err(CadError::InvalidMemberType {
                expected: self.filter.description,
                found: marker,
            });
        }
        entity.as_entity_mut().set_owner(self.owner);
        self.items.push(entity);
        Ok(())
    }

    /// Remove the entity at `index`, clearing its owner back-reference
    pub fn remove(&mut self, index: usize) -> Option<EntityType> {
        if index >= self.items.len() {
            return None;
        }
        let mut entity = self.items.remove(index);
        entity.as_entity_mut().set_owner(Handle::NULL);
        Some(entity)
    }

    /// Index of the first item with the given handle
    pub fn position_of(&self, handle: Handle) -> Option<usize> {
        self.items
            .iter()
            .position(|e| e.as_entity().handle() == handle)
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the collection holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item at `index`
    pub fn get(&self, index: usize) -> Option<&EntityType> {
        self.items.get(index)
    }

    /// Mutable access to the item at `index`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut EntityType> {
        self.items.get_mut(index)
    }

    /// Iterate over the items in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, EntityType> {
        self.items.iter()
    }

    /// Iterate mutably over the items
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, EntityType> {
        self.items.iter_mut()
    }

    /// Swap the entire item list, returning the previous one
    pub(crate) fn replace_all(&mut self, items: Vec<EntityType>) -> Vec<EntityType> {
        let owner = self.owner;
        let mut previous = std::mem::replace(&mut self.items, items);
        for item in &mut self.items {
            item.as_entity_mut().set_owner(owner);
        }
        for item in &mut previous {
            item.as_entity_mut().set_owner(Handle::NULL);
        }
        previous
    }

    /// Update the parent handle on the collection and every item
    pub(crate) fn set_owner(&mut self, owner: Handle) {
        self.owner = owner;
        for item in &mut self.items {
            item.as_entity_mut().set_owner(owner);
        }
    }
}

impl<'a> IntoIterator for &'a CadObjectCollection {
    type Item = &'a EntityType;
    type IntoIter = std::slice::Iter<'a, EntityType>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Collection closed by a sequence-end terminator
///
/// The terminator is owned by the collection for its whole lifetime, so it
/// exists whenever the collection is attached regardless of how many items
/// remain. It receives its handle and document membership when the parent
/// entity is attached.
#[derive(Debug, Clone)]
pub struct SeqendCollection {
    pub(crate) inner: CadObjectCollection,
    pub(crate) seqend: Seqend,
}

impl SeqendCollection {
    /// Create an empty terminated collection with the given member filter
    pub fn new(filter: MemberFilter) -> Self {
        SeqendCollection {
            inner: CadObjectCollection::new(filter),
            seqend: Seqend::new(),
        }
    }

    /// Append an entity, validating its subtype first
    pub fn add(&mut self, entity: EntityType) -> Result<()> {
        self.inner.add(entity)
    }

    /// Remove the entity at `index`; the terminator always stays
    pub fn remove(&mut self, index: usize) -> Option<EntityType> {
        self.inner.remove(index)
    }

    /// Index of the first item with the given handle
    pub fn position_of(&self, handle: Handle) -> Option<usize> {
        self.inner.position_of(handle)
    }

    /// Number of items, not counting the terminator
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if the collection holds no items
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// The item at `index`
    pub fn get(&self, index: usize) -> Option<&EntityType> {
        self.inner.get(index)
    }

    /// Mutable access to the item at `index`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut EntityType> {
        self.inner.get_mut(index)
    }

    /// Iterate over the items in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, EntityType> {
        self.inner.iter()
    }

    /// Iterate mutably over the items
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, EntityType> {
        self.inner.iter_mut()
    }

    /// The terminator entity
    pub fn seqend(&self) -> &Seqend {
        &self.seqend
    }

    /// Update the parent handle on the items and the terminator
    pub(crate) fn set_owner(&mut self, owner: Handle) {
        self.inner.set_owner(owner);
        self.seqend.common.owner = owner;
    }
}

impl<'a> IntoIterator for &'a SeqendCollection {
    type Item = &'a EntityType;
    type IntoIter = std::slice::Iter<'a, EntityType>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
