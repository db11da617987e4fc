//! # Platebook
//!
//! A local-first catalog of food places saved from social media, with
//! faceted filtering, ordered collections, and per-viewer visit state.
//!
//! The engine lives in [`platebook_core`]; this crate adds configuration,
//! fixture seeding, simulated provider latency, and the `plate` CLI.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌──────────────────┐
//! │ seed.json   │──▶│ InMemory     │──▶│ FacetSet /       │
//! │ plate.toml  │   │ Catalog      │   │ resolver         │
//! └─────────────┘   └──────────────┘   └────────┬─────────┘
//!                                               ▼
//!                                        ┌──────────┐
//!                                        │   CLI    │
//!                                        │ (plate)  │
//!                                        └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! plate facets                              # show facet domains
//! plate list --category Cafe --price '$$'   # filtered view
//! plate list --collection "Date night"      # collection-scoped view
//! plate search "ramen"                      # fixture search with latency
//! plate detect https://vm.tiktok.com/ZM1/   # share-link provenance
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`seed`] | JSON fixture loading and collection setup |
//! | [`list`] | Filtered listings and facet overview |
//! | [`search`] | Provider-backed place search |
//! | [`latency`] | Cancelable delayed provider calls |
//! | [`logging`] | `tracing` subscriber setup |

pub mod config;
pub mod latency;
pub mod list;
pub mod logging;
pub mod search;
pub mod seed;
