//! `plate list` and `plate facets`: filtered views over the seeded catalog.

use anyhow::{bail, Result};
use platebook_core::facet::{distance_label, FacetId, FacetSet, SelectionMode, OPEN_NOW_OPTION};
use platebook_core::models::{Restaurant, VisitStatus};
use platebook_core::overlay::OverlayStore;
use platebook_core::resolver::intersect_with_facets;
use platebook_core::store::memory::InMemoryCatalog;
use platebook_core::store::CatalogStore;
use tracing::warn;

use crate::config::Config;
use crate::seed::{build_catalog, build_overlays};

/// Facet choices gathered from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct ListFilters {
    pub categories: Vec<String>,
    pub prices: Vec<String>,
    pub cuisines: Vec<String>,
    /// Distance bucket in miles; must be one of the configured buckets.
    pub within: Option<f64>,
    pub open_now: bool,
    /// Scope the listing to this collection, in its order.
    pub collection: Option<String>,
    /// Keep only places the viewer has in this visit state.
    pub status: Option<VisitStatus>,
}

/// Facets configured from `config`, synced to `catalog`, with `filters` applied.
pub fn build_facets(
    config: &Config,
    catalog: &InMemoryCatalog,
    filters: &ListFilters,
) -> Result<FacetSet> {
    let mut facets = FacetSet::new(
        &config.facets.cuisines,
        &config.facets.distance_buckets_miles,
    )?;
    facets.set_origin(config.location.map(|l| l.coordinates()));
    facets.sync_collections(catalog);

    for c in &filters.categories {
        facets.select(FacetId::Category, c)?;
    }
    for p in &filters.prices {
        facets.select(FacetId::Price, p)?;
    }
    for c in &filters.cuisines {
        facets.select(FacetId::Cuisine, c)?;
    }
    if let Some(miles) = filters.within {
        if facets.origin().is_none() {
            warn!("no [location] configured; distance filter has no effect");
        }
        facets.select(FacetId::Distance, &distance_label(miles))?;
    }
    if filters.open_now {
        facets.select(FacetId::OpenNow, OPEN_NOW_OPTION)?;
    }
    Ok(facets)
}

/// The entities a listing shows, in display order.
pub fn filtered_view<'a>(
    catalog: &'a InMemoryCatalog,
    facets: &FacetSet,
    collection: Option<&str>,
) -> Result<Vec<&'a Restaurant>> {
    match collection {
        Some(name) => {
            let Some(c) = catalog.collection_by_name(name) else {
                bail!("Unknown collection: '{}'", name);
            };
            Ok(intersect_with_facets(catalog, &c.id, facets)?)
        }
        None => Ok(facets.evaluate(catalog.all())),
    }
}

/// Narrow `view` to places in `status`. Places without an overlay are unvisited.
pub fn with_visit_status<'a>(
    view: Vec<&'a Restaurant>,
    overlays: &OverlayStore,
    status: VisitStatus,
) -> Vec<&'a Restaurant> {
    let ids = match status {
        VisitStatus::Visited => overlays.visited(),
        VisitStatus::WantToVisit => overlays.want_to_visit(),
        VisitStatus::Unvisited => {
            return view
                .into_iter()
                .filter(|r| overlays.overlay_or_default(&r.id).status == VisitStatus::Unvisited)
                .collect();
        }
    };
    view.into_iter()
        .filter(|r| ids.binary_search(&r.id).is_ok())
        .collect()
}

pub fn run_list(config: &Config, filters: &ListFilters, json: bool) -> Result<()> {
    let catalog = build_catalog(config)?;
    let facets = build_facets(config, &catalog, filters)?;
    let mut view = filtered_view(&catalog, &facets, filters.collection.as_deref())?;
    if let Some(status) = filters.status {
        let overlays = build_overlays(config, &catalog)?;
        view = with_visit_status(view, &overlays, status);
    }
    print_places(&view, json)
}

pub fn run_facets(config: &Config) -> Result<()> {
    let catalog = build_catalog(config)?;
    let facets = build_facets(config, &catalog, &ListFilters::default())?;

    println!("{:<10} {:<7} OPTIONS", "FACET", "MODE");
    for f in facets.facets() {
        let mode = match f.mode() {
            SelectionMode::Single => "single",
            SelectionMode::Multi => "multi",
        };
        let options = if f.options().is_empty() {
            "(none)".to_string()
        } else {
            f.options().join(", ")
        };
        println!("{:<10} {:<7} {}", f.id(), mode, options);
    }
    Ok(())
}

/// Print places as numbered entries, or as a JSON array with `json`.
pub fn print_places(places: &[&Restaurant], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(places)?);
        return Ok(());
    }

    if places.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, r) in places.iter().enumerate() {
        println!(
            "{}. {} / {} [{}] {:.1}",
            i + 1,
            r.category,
            r.name,
            r.price,
            r.rating
        );
        println!("    address: {}", r.address);
        if !r.tags.is_empty() {
            println!("    tags: {}", r.tags.join(", "));
        }
        println!("    source: {}", r.source);
        println!("    id: {}", r.id);
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use platebook_core::models::{Category, Coordinates, PriceTier};

    fn catalog() -> InMemoryCatalog {
        let mut a = Restaurant::new("Cafe A", Category::Cafe, PriceTier::Moderate);
        a.coordinates = Coordinates::new(37.7793, -122.4193);
        a.tags = vec!["French".into()];
        let mut b = Restaurant::new("Bar B", Category::Bars, PriceTier::Upscale);
        b.coordinates = Coordinates::new(37.8053, -122.2727);
        let mut cat = InMemoryCatalog::with_entities(vec![a.clone(), b.clone()]);
        cat.create_collection_with("Favorites", &[b.id, a.id]).unwrap();
        cat
    }

    fn names(rs: &[&Restaurant]) -> Vec<String> {
        rs.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_filters_apply_to_whole_catalog() {
        let cat = catalog();
        let filters = ListFilters {
            cuisines: vec!["french".into()],
            ..Default::default()
        };
        let facets = build_facets(&Config::minimal(), &cat, &filters).unwrap();
        assert_eq!(
            names(&filtered_view(&cat, &facets, None).unwrap()),
            vec!["Cafe A"]
        );
    }

    #[test]
    fn test_collection_scope_keeps_collection_order() {
        let cat = catalog();
        let facets = build_facets(&Config::minimal(), &cat, &ListFilters::default()).unwrap();
        assert_eq!(
            names(&filtered_view(&cat, &facets, Some("favorites")).unwrap()),
            vec!["Bar B", "Cafe A"]
        );
        assert!(filtered_view(&cat, &facets, Some("nope")).is_err());
    }

    #[test]
    fn test_within_uses_configured_location() {
        let cat = catalog();
        let mut cfg = Config::minimal();
        cfg.location = Some(crate::config::LocationConfig {
            latitude: 37.7749,
            longitude: -122.4194,
        });
        let filters = ListFilters {
            within: Some(5.0),
            ..Default::default()
        };
        let facets = build_facets(&cfg, &cat, &filters).unwrap();
        assert_eq!(
            names(&filtered_view(&cat, &facets, None).unwrap()),
            vec!["Cafe A"]
        );
    }

    #[test]
    fn test_visit_status_narrows_view() {
        let cat = catalog();
        let ids: Vec<_> = cat.all().map(|r| r.id).collect();
        let mut overlays = OverlayStore::new();
        overlays.set_rating(ids[1], 4.0).unwrap();

        let facets = build_facets(&Config::minimal(), &cat, &ListFilters::default()).unwrap();
        let view = || filtered_view(&cat, &facets, None).unwrap();

        assert_eq!(
            names(&with_visit_status(view(), &overlays, VisitStatus::Visited)),
            vec!["Bar B"]
        );
        assert_eq!(
            names(&with_visit_status(view(), &overlays, VisitStatus::Unvisited)),
            vec!["Cafe A"]
        );
        assert!(with_visit_status(view(), &overlays, VisitStatus::WantToVisit).is_empty());
    }

    #[test]
    fn test_unknown_bucket_rejected() {
        let cat = catalog();
        let filters = ListFilters {
            within: Some(3.0),
            ..Default::default()
        };
        assert!(build_facets(&Config::minimal(), &cat, &filters).is_err());
    }
}
