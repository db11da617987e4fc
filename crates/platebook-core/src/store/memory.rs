//! In-memory [`CatalogStore`] implementation.
//!
//! Entities and collections live in insertion-ordered `Vec`s. Lookups are
//! linear scans, which is fine for catalogs in the low hundreds.

use tracing::debug;

use crate::error::{CatalogError, ResourceKind, Result};
use crate::models::{Collection, CollectionId, EntityId, Restaurant};
use crate::observe::{CatalogEvent, Observers, SubscriptionId};

use super::CatalogStore;

/// Single-owner catalog held in memory for one session.
#[derive(Default)]
pub struct InMemoryCatalog {
    entities: Vec<Restaurant>,
    collections: Vec<Collection>,
    observers: Observers<CatalogEvent>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from `entities`, skipping repeated identities.
    pub fn with_entities(entities: impl IntoIterator<Item = Restaurant>) -> Self {
        let mut catalog = Self::new();
        for e in entities {
            catalog.add(e);
        }
        catalog
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&CatalogEvent) + Send + Sync + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn collection_mut(&mut self, id: &CollectionId) -> Result<&mut Collection> {
        self.collections
            .iter_mut()
            .find(|c| c.id == *id)
            .ok_or_else(|| CatalogError::not_found(ResourceKind::Collection, id))
    }
}

impl CatalogStore for InMemoryCatalog {
    fn add(&mut self, entity: Restaurant) -> bool {
        if self.entities.iter().any(|e| e.id == entity.id) {
            debug!(entity = %entity.id, "entity already stored, ignoring re-add");
            return false;
        }
        let id = entity.id;
        debug!(entity = %id, name = %entity.name, "entity added");
        self.entities.push(entity);
        self.observers.publish(&CatalogEvent::EntityAdded(id));
        true
    }

    fn remove(&mut self, id: &EntityId) -> Option<Restaurant> {
        let pos = self.entities.iter().position(|e| e.id == *id)?;
        let removed = self.entities.remove(pos);
        debug!(entity = %id, name = %removed.name, "entity removed");
        self.observers.publish(&CatalogEvent::EntityRemoved(*id));
        Some(removed)
    }

    fn all(&self) -> Box<dyn Iterator<Item = &Restaurant> + '_> {
        Box::new(self.entities.iter())
    }

    fn get(&self, id: &EntityId) -> Result<&Restaurant> {
        self.entities
            .iter()
            .find(|e| e.id == *id)
            .ok_or_else(|| CatalogError::not_found(ResourceKind::Entity, id))
    }

    fn len(&self) -> usize {
        self.entities.len()
    }

    fn create_collection(&mut self, name: &str) -> Collection {
        let collection = Collection::new(name);
        debug!(collection = %collection.id, name, "collection created");
        self.collections.push(collection.clone());
        self.observers
            .publish(&CatalogEvent::CollectionCreated(collection.id));
        collection
    }

    fn add_to_collection(&mut self, entity: &EntityId, collection: &CollectionId) -> Result<bool> {
        if !self.contains(entity) {
            return Err(CatalogError::not_found(ResourceKind::Entity, entity));
        }
        let target = self.collection_mut(collection)?;
        let added = target.push(*entity);
        if added {
            debug!(collection = %collection, entity = %entity, "member added");
            self.observers.publish(&CatalogEvent::MemberAdded {
                collection: *collection,
                entity: *entity,
            });
        }
        Ok(added)
    }

    fn rename_collection(&mut self, collection: &CollectionId, name: &str) -> Result<()> {
        let target = self.collection_mut(collection)?;
        if target.name == name {
            return Ok(());
        }
        target.name = name.to_string();
        self.observers
            .publish(&CatalogEvent::CollectionRenamed(*collection));
        Ok(())
    }

    fn collection(&self, id: &CollectionId) -> Result<&Collection> {
        self.collections
            .iter()
            .find(|c| c.id == *id)
            .ok_or_else(|| CatalogError::not_found(ResourceKind::Collection, id))
    }

    fn collections(&self) -> Box<dyn Iterator<Item = &Collection> + '_> {
        Box::new(self.collections.iter())
    }
}
