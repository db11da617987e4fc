//! # Platebook Core
//!
//! Shared, WASM-safe logic for Platebook: catalog models, the entity and
//! overlay stores, the facet filter engine, collection resolution, and the
//! search provider trait.
//!
//! This crate contains no tokio runtime, filesystem I/O, or other
//! native-only dependencies.
//!
//! ```text
//!  CatalogStore ──┐
//!  OverlayStore ──┼──▶ FacetSet::evaluate / resolver ──▶ Vec<&Restaurant>
//!  FacetSet ──────┘
//! ```

pub mod error;
pub mod facet;
pub mod models;
pub mod observe;
pub mod overlay;
pub mod resolver;
pub mod search;
pub mod share;
pub mod store;
