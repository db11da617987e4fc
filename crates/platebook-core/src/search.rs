//! Place search provider abstraction.
//!
//! Looking up a place by free text (e.g. "ramen near mission") belongs to
//! an external service. The [`SearchProvider`] trait is the seam where such
//! a service plugs in. [`FixtureSearchProvider`] answers from a fixed list
//! and exists for tests, demos, and offline use; it is not a search engine.
//!
//! Providers are async (via `async-trait`) so a networked implementation
//! fits the same interface. The fixture returns immediately-ready futures.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::Restaurant;

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Short identifier used in logs (e.g. `"fixture"`).
    fn name(&self) -> &str;

    /// Up to `limit` places matching `query`, best first.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Restaurant>>;
}

/// Provider that answers from an in-memory fixture list.
///
/// Ranks by how many query terms appear in a place's name, tags, or
/// address. Ties keep fixture order.
pub struct FixtureSearchProvider {
    places: Vec<Restaurant>,
}

impl FixtureSearchProvider {
    pub fn new(places: Vec<Restaurant>) -> Self {
        Self { places }
    }

    fn haystack(r: &Restaurant) -> String {
        let mut text = format!("{} {}", r.name, r.address);
        for t in &r.tags {
            text.push(' ');
            text.push_str(t);
        }
        text.to_lowercase()
    }
}

#[async_trait]
impl SearchProvider for FixtureSearchProvider {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Restaurant>> {
        let query_lower = query.to_lowercase();
        let terms: Vec<&str> = query_lower.split_whitespace().collect();
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(usize, &Restaurant)> = self
            .places
            .iter()
            .filter_map(|r| {
                let text = Self::haystack(r);
                let hits = terms.iter().filter(|t| text.contains(*t)).count();
                (hits > 0).then_some((hits, r))
            })
            .collect();
        // Stable sort keeps fixture order among equal scores.
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(limit)
            .map(|(_, r)| r.clone())
            .collect())
    }
}
