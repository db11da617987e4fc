//! Per-viewer annotations on catalog entities.
//!
//! The [`OverlayStore`] records visit status, personal rating, and visit
//! date keyed by entity identity, without touching the canonical
//! [`Restaurant`](crate::models::Restaurant) records. Overlays are created
//! lazily on first interaction and are not checked against the entity
//! store: an overlay may outlive the entity it annotates.
//!
//! Two rules shape every write:
//!
//! * Moving to any status other than `Visited` discards the rating and the
//!   visit date.
//! * Rating a place marks it `Visited`.

use std::collections::HashMap;

use chrono::Utc;
use tracing::debug;

use crate::error::Result;
use crate::models::{check_rating, EntityId, UserOverlay, VisitStatus};
use crate::observe::{Observers, OverlayEvent, SubscriptionId};

#[derive(Default)]
pub struct OverlayStore {
    overlays: HashMap<EntityId, UserOverlay>,
    observers: Observers<OverlayEvent>,
}

impl OverlayStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&OverlayEvent) + Send + Sync + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// The recorded overlay, or `None` if the viewer never interacted.
    pub fn get_overlay(&self, id: &EntityId) -> Option<&UserOverlay> {
        self.overlays.get(id)
    }

    /// The recorded overlay, or the unvisited default.
    pub fn overlay_or_default(&self, id: &EntityId) -> UserOverlay {
        self.overlays
            .get(id)
            .cloned()
            .unwrap_or_else(|| UserOverlay::unvisited(*id))
    }

    pub fn set_visit_status(&mut self, id: EntityId, status: VisitStatus) -> &UserOverlay {
        let overlay = self
            .overlays
            .entry(id)
            .or_insert_with(|| UserOverlay::unvisited(id));
        overlay.status = status;
        if status == VisitStatus::Visited {
            if overlay.visited_at.is_none() {
                overlay.visited_at = Some(Utc::now());
            }
        } else {
            overlay.rating = 0.0;
            overlay.visited_at = None;
        }
        debug!(entity = %id, %status, "visit status set");
        self.observers
            .publish(&OverlayEvent::StatusChanged { entity: id, status });
        &self.overlays[&id]
    }

    /// Record a personal rating in `[0, 5]`, marking the place visited.
    pub fn set_rating(&mut self, id: EntityId, rating: f64) -> Result<&UserOverlay> {
        check_rating(rating)?;
        let overlay = self
            .overlays
            .entry(id)
            .or_insert_with(|| UserOverlay::unvisited(id));
        overlay.status = VisitStatus::Visited;
        overlay.rating = rating;
        if overlay.visited_at.is_none() {
            overlay.visited_at = Some(Utc::now());
        }
        debug!(entity = %id, rating, "rating set");
        self.observers
            .publish(&OverlayEvent::Rated { entity: id, rating });
        Ok(&self.overlays[&id])
    }

    /// Drop the overlay for `id`. Entity removal never does this on its own.
    pub fn forget(&mut self, id: &EntityId) -> Option<UserOverlay> {
        let removed = self.overlays.remove(id)?;
        self.observers.publish(&OverlayEvent::Forgotten(*id));
        Some(removed)
    }

    /// Ids of every overlay currently in `status`.
    pub fn with_status(&self, status: VisitStatus) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self
            .overlays
            .values()
            .filter(|o| o.status == status)
            .map(|o| o.entity_id)
            .collect();
        ids.sort();
        ids
    }

    pub fn visited(&self) -> Vec<EntityId> {
        self.with_status(VisitStatus::Visited)
    }

    pub fn want_to_visit(&self) -> Vec<EntityId> {
        self.with_status(VisitStatus::WantToVisit)
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}
