//! Catalog seeding from a JSON fixture.
//!
//! The seed file is a JSON array of restaurants (see
//! `config/seed.example.json`). Ids are optional in the file; records
//! without one get a fresh id on load. Collections come from
//! `[catalog.collections]` and viewer state from `[catalog.overlays]`;
//! both reference restaurants by name.

use anyhow::{bail, Context, Result};
use platebook_core::models::{EntityId, Restaurant};
use platebook_core::overlay::OverlayStore;
use platebook_core::store::memory::InMemoryCatalog;
use platebook_core::store::CatalogStore;
use std::path::Path;
use tracing::info;

use crate::config::Config;

/// Read and validate every restaurant in the seed file.
pub fn load_seed(path: &Path) -> Result<Vec<Restaurant>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file: {}", path.display()))?;
    let places: Vec<Restaurant> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse seed file: {}", path.display()))?;

    for (i, p) in places.iter().enumerate() {
        p.validate()
            .with_context(|| format!("Invalid seed entry #{} ({})", i, p.name))?;
    }
    Ok(places)
}

/// Build the session catalog: seed entities, then configured collections.
pub fn build_catalog(config: &Config) -> Result<InMemoryCatalog> {
    let places = load_seed(&config.catalog.seed)?;
    let total = places.len();
    let mut catalog = InMemoryCatalog::with_entities(places);
    if catalog.len() != total {
        info!(
            skipped = total - catalog.len(),
            "seed contained repeated ids; kept the first of each"
        );
    }

    for (name, members) in &config.catalog.collections {
        let ids = members
            .iter()
            .map(|member| {
                id_by_name(&catalog, member).with_context(|| format!("In collection '{}'", name))
            })
            .collect::<Result<Vec<_>>>()?;
        catalog.create_collection_with(name, &ids)?;
    }

    info!(
        entities = catalog.len(),
        collections = catalog.collections().count(),
        "catalog seeded"
    );
    Ok(catalog)
}

/// Viewer state declared in `[catalog.overlays]`, keyed by `catalog` ids.
pub fn build_overlays(config: &Config, catalog: &InMemoryCatalog) -> Result<OverlayStore> {
    let mut overlays = OverlayStore::new();
    for (name, declared) in &config.catalog.overlays {
        let id = id_by_name(catalog, name).context("In [catalog.overlays]")?;
        match (declared.status, declared.rating) {
            (_, Some(rating)) => {
                overlays.set_rating(id, rating)?;
            }
            (Some(status), None) => {
                overlays.set_visit_status(id, status);
            }
            (None, None) => {}
        }
    }
    info!(
        visited = overlays.visited().len(),
        want_to_visit = overlays.want_to_visit().len(),
        "overlays applied"
    );
    Ok(overlays)
}

fn id_by_name(catalog: &InMemoryCatalog, name: &str) -> Result<EntityId> {
    match catalog.all().find(|r| r.name.eq_ignore_ascii_case(name)) {
        Some(r) => Ok(r.id),
        None => bail!("Unknown restaurant '{}'", name),
    }
}
