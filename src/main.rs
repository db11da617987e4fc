//! # Platebook CLI (`plate`)
//!
//! Seeds an in-memory catalog from the configured fixture and runs one
//! query against it. Nothing is persisted between runs.
//!
//! ## Usage
//!
//! ```bash
//! plate --config ./config/plate.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `plate facets` | List every facet with its mode and options |
//! | `plate list` | Print the catalog filtered by facet flags and visit state |
//! | `plate search "<query>"` | Look up places through the search provider |
//! | `plate detect <url>` | Classify a shared link as instagram, tiktok, or web |

use clap::{Parser, Subcommand};
use platebook::config::{self, Config};
use platebook::list::{self, ListFilters};
use platebook::{logging, search};
use platebook_core::models::{SourcePlatform, VisitStatus};
use std::path::PathBuf;

/// Platebook CLI — filter and organize food places saved from social media.
#[derive(Parser)]
#[command(
    name = "plate",
    about = "Platebook — filter and organize food places saved from social media",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/plate.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List facets, their selection mode, and their options.
    Facets,

    /// Print catalog entries that pass the given filters.
    ///
    /// Repeat a multi-select flag to OR its values, e.g.
    /// `--price '$' --price '$$'`. Different flags AND together.
    List {
        /// Category: All, Restaurants, Cafe, or Bars.
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Price tier: $, $$, $$$, or $$$$.
        #[arg(long = "price")]
        prices: Vec<String>,

        /// Cuisine, matched against place tags.
        #[arg(long = "cuisine")]
        cuisines: Vec<String>,

        /// Distance bucket in miles (one of `[facets].distance_buckets_miles`).
        #[arg(long)]
        within: Option<f64>,

        /// Only places open now (no hours data yet, so this matches everything).
        #[arg(long)]
        open_now: bool,

        /// Restrict to a collection, shown in the collection's order.
        #[arg(long)]
        collection: Option<String>,

        /// Visit state from `[catalog.overlays]`: unvisited, want-to-visit, or visited.
        #[arg(long)]
        status: Option<String>,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Search places by free text.
    Search {
        query: String,

        /// Maximum number of results.
        #[arg(long)]
        limit: Option<usize>,

        /// Override `[search].latency_ms`.
        #[arg(long)]
        latency_ms: Option<u64>,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Detect which platform a shared link came from.
    Detect { url: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Commands that don't require config
    if let Commands::Detect { url } = &cli.command {
        logging::init_logging(&Config::minimal().logging)?;
        println!("{}", SourcePlatform::detect(url));
        return Ok(());
    }

    let cfg = config::load_config(&cli.config)?;
    logging::init_logging(&cfg.logging)?;

    match cli.command {
        Commands::Facets => {
            list::run_facets(&cfg)?;
        }
        Commands::List {
            categories,
            prices,
            cuisines,
            within,
            open_now,
            collection,
            status,
            json,
        } => {
            let status: Option<VisitStatus> = status.map(|s| s.parse()).transpose()?;
            let filters = ListFilters {
                categories,
                prices,
                cuisines,
                within,
                open_now,
                collection,
                status,
            };
            list::run_list(&cfg, &filters, json)?;
        }
        Commands::Search {
            query,
            limit,
            latency_ms,
            json,
        } => {
            search::run_search(&cfg, &query, limit, latency_ms, json).await?;
        }
        Commands::Detect { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
