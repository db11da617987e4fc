//! Facet filter engine.
//!
//! A [`FacetSet`] holds every filter dimension the catalog exposes,
//! including category, which sits alongside the others rather than in a
//! separate selection. Each [`Facet`] has a fixed, ordered option domain, a
//! selection mode, and a current selection. An empty selection imposes no
//! constraint.
//!
//! # Evaluation
//!
//! [`FacetSet::evaluate`] keeps an entity when it satisfies every
//! constraining facet (AND across facets) and, within a facet, at least one
//! selected option (OR within a facet). The output is a subsequence of the
//! input in its original order. Evaluation depends only on the entities and
//! the facet state, so repeated calls give identical results.
//!
//! | Facet | Mode | Match rule |
//! |-------|------|------------|
//! | `category` | multi | category label equals an option, `All` matches anything |
//! | `cuisine` | multi | some tag equals an option, ignoring case |
//! | `distance` | single | within the bucket's miles of the origin; no origin, no constraint |
//! | `price` | multi | price tier label equals an option |
//! | `open_now` | single | always matches; no hours data exists yet |
//! | `saved` | single | member of the named collection at the last [`FacetSet::sync_collections`] |

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::models::{Category, Coordinates, EntityId, PriceTier, Restaurant};
use crate::store::CatalogStore;

pub const DEFAULT_CUISINES: &[&str] = &[
    "American",
    "Chinese",
    "French",
    "Indian",
    "Italian",
    "Japanese",
    "Korean",
    "Mediterranean",
    "Mexican",
    "Thai",
];

pub const DEFAULT_DISTANCE_BUCKETS_MILES: &[f64] = &[1.0, 5.0, 10.0, 25.0];

pub const OPEN_NOW_OPTION: &str = "Open now";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetId {
    Category,
    Cuisine,
    Distance,
    Price,
    OpenNow,
    Saved,
}

impl FacetId {
    pub const ALL: [FacetId; 6] = [
        FacetId::Category,
        FacetId::Cuisine,
        FacetId::Distance,
        FacetId::Price,
        FacetId::OpenNow,
        FacetId::Saved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FacetId::Category => "category",
            FacetId::Cuisine => "cuisine",
            FacetId::Distance => "distance",
            FacetId::Price => "price",
            FacetId::OpenNow => "open_now",
            FacetId::Saved => "saved",
        }
    }
}

impl fmt::Display for FacetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FacetId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        FacetId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| CatalogError::invalid(format!("unknown facet: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Single,
    Multi,
}

/// Where a facet's selection stands. `FullySelected` filters exactly like
/// `Empty`; it exists so a UI can render "all chosen" differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Empty,
    PartiallySelected,
    FullySelected,
    SingleSelected,
}

/// One filter dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Facet {
    id: FacetId,
    label: String,
    options: Vec<String>,
    mode: SelectionMode,
    // Always a subset of `options`, kept in option order.
    selected: Vec<String>,
}

impl Facet {
    pub fn new(
        id: FacetId,
        label: impl Into<String>,
        options: Vec<String>,
        mode: SelectionMode,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        for o in &options {
            if !seen.insert(o.to_lowercase()) {
                return Err(CatalogError::invalid(format!(
                    "duplicate option '{}' in facet {}",
                    o, id
                )));
            }
        }
        Ok(Self {
            id,
            label: label.into(),
            options,
            mode,
            selected: Vec::new(),
        })
    }

    pub fn id(&self) -> FacetId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, option: &str) -> bool {
        self.selected.iter().any(|s| s == option)
    }

    pub fn is_active(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn state(&self) -> SelectionState {
        match (self.mode, self.selected.len()) {
            (_, 0) => SelectionState::Empty,
            (SelectionMode::Single, _) => SelectionState::SingleSelected,
            (SelectionMode::Multi, n) if n == self.options.len() => SelectionState::FullySelected,
            (SelectionMode::Multi, _) => SelectionState::PartiallySelected,
        }
    }

    /// Whether this facet removes anything during evaluation.
    fn constrains(&self) -> bool {
        !matches!(
            self.state(),
            SelectionState::Empty | SelectionState::FullySelected
        )
    }

    /// Canonical spelling of `option`, matched without regard to case.
    fn resolve(&self, option: &str) -> Result<String> {
        self.options
            .iter()
            .find(|o| o.eq_ignore_ascii_case(option))
            .cloned()
            .ok_or_else(|| {
                CatalogError::invalid(format!("unknown option '{}' for facet {}", option, self.id))
            })
    }

    /// Multi: flip membership. Single: re-selecting clears, anything else replaces.
    pub fn toggle(&mut self, option: &str) -> Result<()> {
        let option = self.resolve(option)?;
        let was_selected = self.is_selected(&option);
        match self.mode {
            SelectionMode::Multi if was_selected => self.selected.retain(|s| *s != option),
            SelectionMode::Multi => {
                self.selected.push(option);
                self.reorder();
            }
            SelectionMode::Single if was_selected => self.selected.clear(),
            SelectionMode::Single => self.selected = vec![option],
        }
        Ok(())
    }

    /// Ensure `option` is selected. Single mode replaces any other choice.
    pub fn select(&mut self, option: &str) -> Result<()> {
        let option = self.resolve(option)?;
        if self.is_selected(&option) {
            return Ok(());
        }
        match self.mode {
            SelectionMode::Multi => {
                self.selected.push(option);
                self.reorder();
            }
            SelectionMode::Single => self.selected = vec![option],
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    fn reorder(&mut self) {
        let ordered: Vec<String> = self
            .options
            .iter()
            .filter(|o| self.selected.contains(o))
            .cloned()
            .collect();
        self.selected = ordered;
    }

    /// Swap the option domain, keeping selections that still exist.
    fn replace_options(&mut self, options: Vec<String>) {
        self.options = options;
        let options = &self.options;
        self.selected.retain(|s| options.contains(s));
    }
}

/// The complete set of filter dimensions plus the context some of them need.
#[derive(Debug, Clone)]
pub struct FacetSet {
    facets: Vec<Facet>,
    // Parallel to the distance facet's options.
    distance_buckets: Vec<f64>,
    origin: Option<Coordinates>,
    // Collection name -> member ids, captured by `sync_collections`.
    saved_members: HashMap<String, HashSet<EntityId>>,
}

impl FacetSet {
    /// Build the standard facets with the given cuisine list and distance
    /// buckets (in miles, each > 0).
    pub fn new(cuisines: &[String], distance_buckets_miles: &[f64]) -> Result<Self> {
        if let Some(bad) = distance_buckets_miles
            .iter()
            .find(|m| !m.is_finite() || **m <= 0.0)
        {
            return Err(CatalogError::invalid(format!(
                "distance bucket must be a positive number of miles, got {}",
                bad
            )));
        }

        let facets = vec![
            Facet::new(
                FacetId::Category,
                "Category",
                Category::ALL.iter().map(|c| c.label().to_string()).collect(),
                SelectionMode::Multi,
            )?,
            Facet::new(
                FacetId::Cuisine,
                "Cuisine",
                cuisines.to_vec(),
                SelectionMode::Multi,
            )?,
            Facet::new(
                FacetId::Distance,
                "Distance",
                distance_buckets_miles
                    .iter()
                    .map(|m| distance_label(*m))
                    .collect(),
                SelectionMode::Single,
            )?,
            Facet::new(
                FacetId::Price,
                "Price",
                PriceTier::ALL.iter().map(|p| p.label().to_string()).collect(),
                SelectionMode::Multi,
            )?,
            Facet::new(
                FacetId::OpenNow,
                "Open now",
                vec![OPEN_NOW_OPTION.to_string()],
                SelectionMode::Single,
            )?,
            Facet::new(FacetId::Saved, "Saved", Vec::new(), SelectionMode::Single)?,
        ];

        Ok(Self {
            facets,
            distance_buckets: distance_buckets_miles.to_vec(),
            origin: None,
            saved_members: HashMap::new(),
        })
    }

    pub fn facet(&self, id: FacetId) -> &Facet {
        self.facets
            .iter()
            .find(|f| f.id == id)
            .unwrap_or_else(|| unreachable!("facet set always holds {}", id))
    }

    fn facet_mut(&mut self, id: FacetId) -> &mut Facet {
        self.facets
            .iter_mut()
            .find(|f| f.id == id)
            .unwrap_or_else(|| unreachable!("facet set always holds {}", id))
    }

    pub fn facets(&self) -> impl Iterator<Item = &Facet> {
        self.facets.iter()
    }

    pub fn origin(&self) -> Option<Coordinates> {
        self.origin
    }

    /// Set the viewer location used by the distance facet.
    pub fn set_origin(&mut self, origin: Option<Coordinates>) {
        self.origin = origin;
    }

    /// Toggle `option` on the facet named `facet` (e.g. `"price"`).
    pub fn toggle_option(&mut self, facet: &str, option: &str) -> Result<()> {
        let id: FacetId = facet.parse()?;
        self.toggle(id, option)
    }

    pub fn toggle(&mut self, id: FacetId, option: &str) -> Result<()> {
        self.facet_mut(id).toggle(option)?;
        debug!(facet = %id, option, selected = ?self.facet(id).selected(), "facet toggled");
        Ok(())
    }

    pub fn select(&mut self, id: FacetId, option: &str) -> Result<()> {
        self.facet_mut(id).select(option)
    }

    pub fn clear(&mut self, id: FacetId) {
        self.facet_mut(id).clear();
    }

    pub fn clear_all(&mut self) {
        for f in &mut self.facets {
            f.clear();
        }
        debug!("all facets cleared");
    }

    pub fn has_active_filters(&self) -> bool {
        self.facets.iter().any(Facet::is_active)
    }

    pub fn state(&self, id: FacetId) -> SelectionState {
        self.facet(id).state()
    }

    /// Refresh the `saved` facet from the store's collections.
    ///
    /// Options become the collection names in creation order (the first
    /// wins when names repeat). A selected collection that no longer exists
    /// is deselected.
    pub fn sync_collections<S: CatalogStore + ?Sized>(&mut self, store: &S) {
        let mut names: Vec<String> = Vec::new();
        let mut members: HashMap<String, HashSet<EntityId>> = HashMap::new();
        for c in store.collections() {
            if names.iter().any(|n| n.eq_ignore_ascii_case(&c.name)) {
                continue;
            }
            names.push(c.name.clone());
            members.insert(c.name.clone(), c.members.iter().copied().collect());
        }
        self.facet_mut(FacetId::Saved).replace_options(names);
        self.saved_members = members;
    }

    /// The order-preserving subsequence of `entities` that passes every
    /// constraining facet.
    pub fn evaluate<'a, I>(&self, entities: I) -> Vec<&'a Restaurant>
    where
        I: IntoIterator<Item = &'a Restaurant>,
    {
        let active: Vec<&Facet> = self.facets.iter().filter(|f| f.constrains()).collect();
        entities
            .into_iter()
            .filter(|e| active.iter().all(|f| self.matches(f, e)))
            .collect()
    }

    fn matches(&self, facet: &Facet, entity: &Restaurant) -> bool {
        match facet.id {
            FacetId::Category => facet
                .selected
                .iter()
                .any(|o| o == Category::All.label() || o == entity.category.label()),
            FacetId::Cuisine => facet.selected.iter().any(|o| entity.has_tag(o)),
            FacetId::Price => facet.selected.iter().any(|o| o == entity.price.label()),
            FacetId::Distance => match (self.origin, self.selected_bucket(facet)) {
                (Some(origin), Some(limit)) => origin.distance_miles(&entity.coordinates) <= limit,
                _ => true,
            },
            FacetId::OpenNow => true,
            FacetId::Saved => facet.selected.iter().any(|name| {
                self.saved_members
                    .get(name)
                    .is_some_and(|m| m.contains(&entity.id))
            }),
        }
    }

    fn selected_bucket(&self, facet: &Facet) -> Option<f64> {
        let chosen = facet.selected.first()?;
        let idx = facet.options.iter().position(|o| o == chosen)?;
        self.distance_buckets.get(idx).copied()
    }
}

impl Default for FacetSet {
    fn default() -> Self {
        let cuisines: Vec<String> = DEFAULT_CUISINES.iter().map(|c| c.to_string()).collect();
        Self::new(&cuisines, DEFAULT_DISTANCE_BUCKETS_MILES)
            .unwrap_or_else(|e| unreachable!("default facets are valid: {}", e))
    }
}

/// Option label for a distance bucket, e.g. `5 mi`.
pub fn distance_label(miles: f64) -> String {
    format!("{} mi", miles)
}
