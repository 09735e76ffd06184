//! # Agrimart CLI Module
//!
//! This module implements the CLI interface for Agrimart.
//!
//! ## Available Commands
//!
//! - `serve` - Start the HTTP server over one browsing session
//! - `search` - Evaluate a query against the catalog (default)
//! - `facets` - Show category and location buckets
//! - `validate` - Check a catalog file, optionally writing a normalized copy

mod commands;

use crate::config::AppConfig;
use agrimart_core::{FilterChange, MarketError, QueryConfig, SortKey};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Agrimart - farm produce catalog search
///
/// Filters and sorts a product catalog the way the storefront does.
#[derive(Parser, Debug)]
#[command(name = "agrimart")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the catalog JSON file
    #[arg(short = 'C', long, global = true, default_value = "catalog.json")]
    pub catalog: PathBuf,

    /// Path to a TOML config file (default: ./agrimart.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Seed the session's category, as when arriving from a category link
        #[arg(long)]
        seed_category: Option<String>,
    },

    /// Filter and sort the catalog
    Search(SearchArgs),

    /// Show category and location counts under the given filters
    Facets(SearchArgs),

    /// Validate a catalog file
    Validate {
        /// Write the validated catalog, pretty-printed, to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Query flags shared by `search` and `facets`.
#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Free-text search over name, seller and location
    #[arg(short = 's', long)]
    pub text: Option<String>,

    /// Exact category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Exact location tag
    #[arg(short, long)]
    pub location: Option<String>,

    /// Lower price bound
    #[arg(long)]
    pub min_price: Option<u64>,

    /// Upper price bound
    #[arg(long)]
    pub max_price: Option<u64>,

    /// Sort order (newest, price-asc, price-desc, rating-desc, popularity-desc)
    #[arg(long)]
    pub sort: Option<String>,

    /// Only organic products
    #[arg(long)]
    pub organic: bool,

    /// Only products with stock
    #[arg(long)]
    pub in_stock: bool,

    /// Maximum number of rows to print
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

impl SearchArgs {
    /// The filter changes these flags describe, in application order.
    ///
    /// A single price flag keeps the configured bound for the other end.
    pub fn to_changes(&self, config: &QueryConfig) -> Vec<FilterChange> {
        let mut changes = Vec::new();
        if let Some(text) = &self.text {
            changes.push(FilterChange::SearchText(text.clone()));
        }
        if let Some(category) = &self.category {
            changes.push(FilterChange::Category(category.clone()));
        }
        if let Some(location) = &self.location {
            changes.push(FilterChange::Location(location.clone()));
        }
        if self.min_price.is_some() || self.max_price.is_some() {
            let (floor, ceiling) = config.bounds();
            changes.push(FilterChange::PriceRange(
                self.min_price.unwrap_or(floor),
                self.max_price.unwrap_or(ceiling),
            ));
        }
        if let Some(sort) = &self.sort {
            changes.push(FilterChange::Sort(SortKey::parse_lossy(sort)));
        }
        if self.organic {
            changes.push(FilterChange::OrganicOnly(true));
        }
        if self.in_stock {
            changes.push(FilterChange::InStockOnly(true));
        }
        changes
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), MarketError> {
    let config = AppConfig::load(cli.config.as_deref())?.with_env_overrides();
    let json_mode = cli.json_mode;

    if cli.verbose {
        tracing::info!(catalog = %cli.catalog.display(), ?config, "Resolved configuration");
    }

    match cli.command {
        Some(Commands::Serve {
            host,
            port,
            seed_category,
        }) => {
            cmd_serve(
                &cli.catalog,
                config,
                host,
                port,
                seed_category.as_deref(),
            )
            .await
        }
        Some(Commands::Search(args)) => cmd_search(&cli.catalog, &config, json_mode, &args),
        Some(Commands::Facets(args)) => cmd_facets(&cli.catalog, &config, json_mode, &args),
        Some(Commands::Validate { output }) => {
            cmd_validate(&cli.catalog, json_mode, output.as_deref())
        }
        None => {
            // No subcommand - list the catalog with default filters
            cmd_search(&cli.catalog, &config, json_mode, &SearchArgs::default())
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
