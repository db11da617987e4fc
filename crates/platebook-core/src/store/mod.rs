//! Entity store abstraction.
//!
//! The [`CatalogStore`] trait owns the canonical restaurant list and the
//! named collections that reference it. The facet engine and the
//! collection resolver only read through this trait, so a different
//! backend can replace [`memory::InMemoryCatalog`] without touching them.
//!
//! All operations are synchronous and run to completion on the caller's
//! thread. Implementations notify subscribers after each effective mutation.

pub mod memory;

use crate::error::{CatalogError, ResourceKind, Result};
use crate::models::{Collection, CollectionId, EntityId, Restaurant};

/// Storage backend for catalog entities and collections.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`add`](CatalogStore::add) | Insert an entity; re-adding is a no-op |
/// | [`remove`](CatalogStore::remove) | Delete an entity if present |
/// | [`all`](CatalogStore::all) | Iterate entities in insertion order |
/// | [`get`](CatalogStore::get) | Look up one entity |
/// | [`create_collection`](CatalogStore::create_collection) | New empty collection |
/// | [`add_to_collection`](CatalogStore::add_to_collection) | Append a member |
/// | [`rename_collection`](CatalogStore::rename_collection) | Change a display name |
pub trait CatalogStore: Send + Sync {
    /// Insert `entity` unless its identity is already stored.
    ///
    /// Returns `false` when the identity was present; the stored record is
    /// left untouched in that case.
    fn add(&mut self, entity: Restaurant) -> bool;

    /// Remove and return the entity, or `None` if it was not stored.
    ///
    /// Collections that reference it keep the dangling id.
    fn remove(&mut self, id: &EntityId) -> Option<Restaurant>;

    /// Every entity, in insertion order. Each call starts a fresh pass.
    fn all(&self) -> Box<dyn Iterator<Item = &Restaurant> + '_>;

    fn get(&self, id: &EntityId) -> Result<&Restaurant>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, id: &EntityId) -> bool {
        self.get(id).is_ok()
    }

    /// Create an empty collection with a fresh identity.
    fn create_collection(&mut self, name: &str) -> Collection;

    /// Append `entity` to the collection's membership if not already there.
    ///
    /// Returns whether the membership changed. Fails with `NotFound` when
    /// either identity is unknown.
    fn add_to_collection(&mut self, entity: &EntityId, collection: &CollectionId) -> Result<bool>;

    fn rename_collection(&mut self, collection: &CollectionId, name: &str) -> Result<()>;

    fn collection(&self, id: &CollectionId) -> Result<&Collection>;

    /// Every collection, in creation order.
    fn collections(&self) -> Box<dyn Iterator<Item = &Collection> + '_>;

    /// First collection whose name matches, ignoring ASCII case.
    fn collection_by_name(&self, name: &str) -> Option<&Collection> {
        self.collections()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Create a collection pre-populated with `members`, in order.
    ///
    /// Every member must exist; nothing is created if one is missing.
    /// Duplicate ids are kept once.
    fn create_collection_with(&mut self, name: &str, members: &[EntityId]) -> Result<Collection> {
        if let Some(missing) = members.iter().find(|id| !self.contains(id)) {
            return Err(CatalogError::not_found(ResourceKind::Entity, missing));
        }
        let created = self.create_collection(name);
        for id in members {
            self.add_to_collection(id, &created.id)?;
        }
        Ok(self.collection(&created.id)?.clone())
    }
}
