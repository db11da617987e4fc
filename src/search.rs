//! `plate search`: free-text place lookup through a [`SearchProvider`].
//!
//! The CLI wires the fixture provider over the seed file and waits out the
//! simulated latency. A networked provider would slot in at
//! [`provider_for`] without changing the rest.

use anyhow::Result;
use platebook_core::search::{FixtureSearchProvider, SearchProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::latency::spawn_delayed_search;
use crate::list::print_places;
use crate::seed::load_seed;

pub fn provider_for(config: &Config) -> Result<Arc<dyn SearchProvider>> {
    let places = load_seed(&config.catalog.seed)?;
    Ok(Arc::new(FixtureSearchProvider::new(places)))
}

pub async fn run_search(
    config: &Config,
    query: &str,
    limit: Option<usize>,
    latency_ms: Option<u64>,
    json: bool,
) -> Result<()> {
    if query.trim().is_empty() {
        return print_places(&[], json);
    }

    let provider = provider_for(config)?;
    let limit = limit.unwrap_or(config.search.default_limit);
    let delay = Duration::from_millis(latency_ms.unwrap_or(config.search.latency_ms));

    info!(provider = provider.name(), query, ?delay, "searching");
    let results = spawn_delayed_search(provider, query, limit, delay)
        .finish()
        .await?;

    let refs: Vec<_> = results.iter().collect();
    print_places(&refs, json)
}
