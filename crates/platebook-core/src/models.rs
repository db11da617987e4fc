//! Core data models for the catalog.
//!
//! These types are the canonical restaurant records, the named collections
//! that group them, and the per-viewer overlay that annotates them. Entities
//! are immutable once created; everything a viewer changes lives in
//! [`UserOverlay`] instead.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CatalogError, Result};

/// Highest rating a restaurant or a viewer can give.
pub const MAX_RATING: f64 = 5.0;

/// Stable identity of a catalog entity. Never reused once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Stable identity of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(Uuid);

impl CollectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CollectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Kind of place. `All` exists so the category facet can offer a
/// "show everything" option from the same closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    All,
    Restaurants,
    Cafe,
    Bars,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::All,
        Category::Restaurants,
        Category::Cafe,
        Category::Bars,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Restaurants => "Restaurants",
            Category::Cafe => "Cafe",
            Category::Bars => "Bars",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Price tier, serialized as its dollar-sign label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriceTier {
    #[serde(rename = "$")]
    Budget,
    #[serde(rename = "$$")]
    Moderate,
    #[serde(rename = "$$$")]
    Upscale,
    #[serde(rename = "$$$$")]
    Luxury,
}

impl PriceTier {
    pub const ALL: [PriceTier; 4] = [
        PriceTier::Budget,
        PriceTier::Moderate,
        PriceTier::Upscale,
        PriceTier::Luxury,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PriceTier::Budget => "$",
            PriceTier::Moderate => "$$",
            PriceTier::Upscale => "$$$",
            PriceTier::Luxury => "$$$$",
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a saved place was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourcePlatform {
    Instagram,
    Tiktok,
    Web,
}

impl SourcePlatform {
    pub fn label(&self) -> &'static str {
        match self {
            SourcePlatform::Instagram => "instagram",
            SourcePlatform::Tiktok => "tiktok",
            SourcePlatform::Web => "web",
        }
    }
}

impl fmt::Display for SourcePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    const EARTH_RADIUS_MILES: f64 = 3958.8;

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Great-circle (haversine) distance in miles.
    pub fn distance_miles(&self, other: &Coordinates) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        Self::EARTH_RADIUS_MILES * c
    }
}

/// A saved place. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(default)]
    pub id: EntityId,
    pub name: String,
    pub category: Category,
    pub rating: f64,
    pub price: PriceTier,
    pub address: String,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub tags: Vec<String>,
    pub source: SourcePlatform,
}

impl Restaurant {
    /// Build a restaurant with a fresh identity and neutral defaults.
    /// Fields are public; callers adjust what they need before inserting.
    pub fn new(name: impl Into<String>, category: Category, price: PriceTier) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            category,
            rating: 0.0,
            price,
            address: String::new(),
            coordinates: Coordinates::new(0.0, 0.0),
            tags: Vec::new(),
            source: SourcePlatform::Web,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::invalid("restaurant name must not be empty"));
        }
        check_rating(self.rating)?;
        if !self.coordinates.is_valid() {
            return Err(CatalogError::invalid(format!(
                "coordinates out of range for '{}': ({}, {})",
                self.name, self.coordinates.latitude, self.coordinates.longitude
            )));
        }
        Ok(())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Reject ratings outside `[0, MAX_RATING]`, including NaN.
pub(crate) fn check_rating(rating: f64) -> Result<()> {
    if (0.0..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CatalogError::invalid(format!(
            "rating must be within [0, {}], got {}",
            MAX_RATING, rating
        )))
    }
}

/// A named, ordered group of entity references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
    pub members: Vec<EntityId>,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CollectionId::new(),
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.members.contains(id)
    }

    /// Append `id` unless already present. Returns whether it was added.
    pub fn push(&mut self, id: EntityId) -> bool {
        if self.contains(&id) {
            false
        } else {
            self.members.push(id);
            true
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VisitStatus {
    #[default]
    Unvisited,
    WantToVisit,
    Visited,
}

impl fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VisitStatus::Unvisited => "unvisited",
            VisitStatus::WantToVisit => "want to visit",
            VisitStatus::Visited => "visited",
        })
    }
}

impl std::str::FromStr for VisitStatus {
    type Err = CatalogError;

    /// Accepts `unvisited`, `visited`, and `want-to-visit` in any case,
    /// with `-`, `_`, or a space between words (or none, as serialized).
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "unvisited" => Ok(VisitStatus::Unvisited),
            "wanttovisit" => Ok(VisitStatus::WantToVisit),
            "visited" => Ok(VisitStatus::Visited),
            _ => Err(CatalogError::invalid(format!("unknown visit status '{}'", s))),
        }
    }
}

/// Viewer-specific state for one entity.
///
/// `rating` and `visited_at` are only meaningful while `status` is
/// [`VisitStatus::Visited`]; any other status keeps them cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserOverlay {
    pub entity_id: EntityId,
    pub status: VisitStatus,
    pub rating: f64,
    pub visited_at: Option<DateTime<Utc>>,
}

impl UserOverlay {
    /// The state an entity has when no overlay was ever recorded.
    pub fn unvisited(entity_id: EntityId) -> Self {
        Self {
            entity_id,
            status: VisitStatus::Unvisited,
            rating: 0.0,
            visited_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_tier_serializes_as_dollar_signs() {
        let json = serde_json::to_string(&PriceTier::Upscale).unwrap();
        assert_eq!(json, "\"$$$\"");
        let back: PriceTier = serde_json::from_str("\"$\"").unwrap();
        assert_eq!(back, PriceTier::Budget);
    }

    #[test]
    fn test_restaurant_from_fixture_json_gets_fresh_id() {
        let json = r#"{
            "name": "Blue Bottle",
            "category": "Cafe",
            "rating": 4.4,
            "price": "$$",
            "address": "66 Mint St",
            "coordinates": { "latitude": 37.78, "longitude": -122.40 },
            "tags": ["coffee", "pastries"],
            "source": "instagram"
        }"#;
        let a: Restaurant = serde_json::from_str(json).unwrap();
        let b: Restaurant = serde_json::from_str(json).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.source, SourcePlatform::Instagram);
        assert!(a.has_tag("Coffee"));
        assert!(a.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_rating_and_coordinates() {
        let mut r = Restaurant::new("Nope", Category::Bars, PriceTier::Budget);
        r.rating = 5.5;
        assert!(matches!(r.validate(), Err(CatalogError::InvalidArgument(_))));

        r.rating = f64::NAN;
        assert!(r.validate().is_err());

        r.rating = 3.0;
        r.coordinates = Coordinates::new(91.0, 0.0);
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_haversine_known_distance() {
        // San Francisco to Oakland city halls is roughly 8.3 miles.
        let sf = Coordinates::new(37.7793, -122.4193);
        let oak = Coordinates::new(37.8053, -122.2727);
        let d = sf.distance_miles(&oak);
        assert!((d - 8.3).abs() < 0.5, "unexpected distance {}", d);
        assert!(sf.distance_miles(&sf) < 1e-9);
    }

    #[test]
    fn test_collection_push_rejects_duplicates() {
        let mut c = Collection::new("date night");
        let id = EntityId::new();
        assert!(c.push(id));
        assert!(!c.push(id));
        assert_eq!(c.members, vec![id]);
    }

    #[test]
    fn test_visit_status_parses_loose_spellings() {
        for s in ["visited", "Visited"] {
            assert_eq!(s.parse::<VisitStatus>().unwrap(), VisitStatus::Visited);
        }
        for s in ["want-to-visit", "want_to_visit", "wantToVisit", "want to visit"] {
            assert_eq!(s.parse::<VisitStatus>().unwrap(), VisitStatus::WantToVisit);
        }
        assert!("been there".parse::<VisitStatus>().is_err());
    }
}
