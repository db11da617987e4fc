//! Synchronous change notification for the stores.
//!
//! A presentation layer subscribes a callback and re-renders when it fires.
//! Callbacks run on the caller's thread, after the mutation has completed,
//! before the mutating method returns.

use crate::models::{CollectionId, EntityId, VisitStatus};

/// Handle returned by `subscribe`; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<E> = Box<dyn Fn(&E) + Send + Sync>;

/// Ordered list of subscriber callbacks for one event type.
pub struct Observers<E> {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback<E>)>,
}

impl<E> Observers<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            callbacks: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sid, _)| *sid != id);
        self.callbacks.len() != before
    }

    pub fn publish(&self, event: &E) {
        for (_, cb) in &self.callbacks {
            cb(event);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutations of the entity store.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEvent {
    EntityAdded(EntityId),
    EntityRemoved(EntityId),
    CollectionCreated(CollectionId),
    CollectionRenamed(CollectionId),
    MemberAdded {
        collection: CollectionId,
        entity: EntityId,
    },
}

/// Mutations of the overlay store.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    StatusChanged {
        entity: EntityId,
        status: VisitStatus,
    },
    Rated {
        entity: EntityId,
        rating: f64,
    },
    Forgotten(EntityId),
}
