//! TOML configuration for the `plate` CLI.
//!
//! Only `[catalog].seed` is required; every other section has defaults.
//! A relative seed path is resolved against the config file's directory.

use anyhow::{bail, Context, Result};
use platebook_core::facet::{DEFAULT_CUISINES, DEFAULT_DISTANCE_BUCKETS_MILES};
use indexmap::IndexMap;
use platebook_core::models::{Coordinates, VisitStatus, MAX_RATING};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub facets: FacetsConfig,
    #[serde(default)]
    pub location: Option<LocationConfig>,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// JSON array of restaurants loaded at startup.
    pub seed: PathBuf,
    /// Collection name -> restaurant names, in display order. Collections
    /// are created in file order.
    #[serde(default)]
    pub collections: IndexMap<String, Vec<String>>,
    /// Restaurant name -> the viewer's visit state for it.
    #[serde(default)]
    pub overlays: IndexMap<String, OverlayConfig>,
}

/// A viewer annotation declared up front. A rating alone implies `visited`.
#[derive(Debug, Deserialize, Clone, Copy, Default)]
pub struct OverlayConfig {
    /// `unvisited`, `wantToVisit`, or `visited`.
    #[serde(default)]
    pub status: Option<VisitStatus>,
    #[serde(default)]
    pub rating: Option<f64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FacetsConfig {
    #[serde(default = "default_cuisines")]
    pub cuisines: Vec<String>,
    #[serde(default = "default_distance_buckets")]
    pub distance_buckets_miles: Vec<f64>,
}

impl Default for FacetsConfig {
    fn default() -> Self {
        Self {
            cuisines: default_cuisines(),
            distance_buckets_miles: default_distance_buckets(),
        }
    }
}

fn default_cuisines() -> Vec<String> {
    DEFAULT_CUISINES.iter().map(|c| c.to_string()).collect()
}
fn default_distance_buckets() -> Vec<f64> {
    DEFAULT_DISTANCE_BUCKETS_MILES.to_vec()
}

/// Viewer location for the distance facet.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationConfig {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Simulated provider latency.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            default_limit: default_limit(),
        }
    }
}

fn default_latency_ms() -> u64 {
    400
}
fn default_limit() -> usize {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Defaults with an empty seed path, for commands that never touch the catalog.
    pub fn minimal() -> Self {
        Self {
            catalog: CatalogConfig {
                seed: PathBuf::new(),
                collections: IndexMap::new(),
                overlays: IndexMap::new(),
            },
            facets: FacetsConfig::default(),
            location: None,
            search: SearchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.catalog.seed.as_os_str().is_empty() {
        bail!("catalog.seed must be set");
    }
    if config.catalog.seed.is_relative() {
        if let Some(dir) = path.parent() {
            config.catalog.seed = dir.join(&config.catalog.seed);
        }
    }

    // Validate facets
    if config
        .facets
        .distance_buckets_miles
        .iter()
        .any(|m| !m.is_finite() || *m <= 0.0)
    {
        bail!("facets.distance_buckets_miles must all be > 0");
    }
    if config.facets.cuisines.iter().any(|c| c.trim().is_empty()) {
        bail!("facets.cuisines must not contain empty names");
    }

    // Validate overlays
    for (name, overlay) in &config.catalog.overlays {
        match (overlay.status, overlay.rating) {
            (None, None) => bail!("catalog.overlays.'{}' needs a status or a rating", name),
            (Some(status), Some(_)) if status != VisitStatus::Visited => {
                bail!(
                    "catalog.overlays.'{}': a rating requires status visited, got {}",
                    name,
                    status
                )
            }
            (_, Some(r)) if !(0.0..=MAX_RATING).contains(&r) => {
                bail!("catalog.overlays.'{}': rating must be in [0, {}]", name, MAX_RATING)
            }
            _ => {}
        }
    }

    // Validate location
    if let Some(loc) = &config.location {
        if !loc.coordinates().is_valid() {
            bail!(
                "location must be a valid latitude/longitude, got ({}, {})",
                loc.latitude,
                loc.longitude
            );
        }
    }

    if config.search.default_limit == 0 {
        bail!("search.default_limit must be >= 1");
    }

    Ok(config)
}
