//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::SearchArgs;
use crate::api::{self, AppState};
use crate::config::AppConfig;
use agrimart_core::{
    Catalog, CatalogItem, FacetField, MarketError, QueryConfig, QueryStateHolder, Session,
    catalog_from_json, catalog_to_json, evaluate, facet_counts,
    primitives::MAX_CATALOG_PAYLOAD_SIZE,
};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE HELPERS
// =============================================================================

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), MarketError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| MarketError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(MarketError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve an input path to an existing regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, MarketError> {
    let canonical = path.canonicalize().map_err(|e| {
        MarketError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(MarketError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Resolve an output path whose parent directory must exist.
fn validate_output_path(path: &Path) -> Result<PathBuf, MarketError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        MarketError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(MarketError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| MarketError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

/// Read and validate a catalog file.
pub fn load_catalog(path: &Path) -> Result<Catalog, MarketError> {
    let validated_path = validate_file_path(path)?;
    validate_file_size(&validated_path, MAX_CATALOG_PAYLOAD_SIZE as u64)?;

    let bytes = std::fs::read(&validated_path)
        .map_err(|e| MarketError::IoError(format!("Read catalog: {}", e)))?;
    let catalog = catalog_from_json(&bytes)?;

    tracing::info!(
        items = catalog.len(),
        "Loaded catalog from {}",
        validated_path.display()
    );
    Ok(catalog)
}

fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn holder_for(args: &SearchArgs, config: &QueryConfig) -> QueryStateHolder {
    let mut holder = QueryStateHolder::new(config.clone());
    for change in args.to_changes(config) {
        holder.set_filter(change);
    }
    holder
}

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_serve(
    catalog_path: &Path,
    config: AppConfig,
    host: Option<String>,
    port: Option<u16>,
    seed_category: Option<&str>,
) -> Result<(), MarketError> {
    let catalog = load_catalog(catalog_path)?;
    let session = Session::with_category_seed(catalog, config.pricing.clone(), seed_category);

    let host = host.unwrap_or(config.server.host);
    let port = port.unwrap_or(config.server.port);

    println!("Agrimart Catalog Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:       {}", host);
    println!("  Port:       {}", port);
    println!("  Catalog:    {} ({} items)", catalog_path.display(), session.catalog().len());
    println!("  Rate limit: {} req/s", config.server.rate_limit);
    println!();
    println!("Endpoints:");
    println!("  GET  /products           - Current result");
    println!("  POST /products/search    - One-off query");
    println!("  POST /filters            - Apply a filter change");
    println!("  POST /filters/clear      - Clear a filter by label");
    println!("  POST /filters/clear-all  - Reset all filters");
    println!("  GET  /facets             - Category and location counts");
    println!("  GET  /health             - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    let state = AppState::new(session).with_rate_limit(config.server.rate_limit);
    api::run_server(&addr, state).await
}

// =============================================================================
// SEARCH COMMAND
// =============================================================================

/// Evaluate a query and print the matching products.
pub fn cmd_search(
    catalog_path: &Path,
    config: &AppConfig,
    json_mode: bool,
    args: &SearchArgs,
) -> Result<(), MarketError> {
    let catalog = load_catalog(catalog_path)?;
    let holder = holder_for(args, &config.pricing);
    let results = evaluate(catalog.items(), holder.state());
    let limit = args.limit.unwrap_or(results.len());

    if json_mode {
        let products: Vec<&CatalogItem> = results.iter().take(limit).copied().collect();
        let output = serde_json::json!({
            "count": results.len(),
            "active_filters": holder.active_filters(),
            "state": holder.state(),
            "products": products,
        });
        print_json(&output);
        return Ok(());
    }

    let symbol = &config.pricing.currency_symbol;
    println!("{} of {} products", results.len(), catalog.len());
    if !holder.active_filters().is_empty() {
        println!("Filters: {}", holder.active_filters().join(" | "));
    }
    println!();

    for item in results.iter().take(limit) {
        println!(
            "{:<28} {:<12} {}{:>6}  {:<14} {} ({}){}{}",
            item.name,
            item.category,
            symbol,
            item.price.value(),
            item.location_tag,
            item.seller_name,
            item.seller_rating,
            if item.is_organic { "  organic" } else { "" },
            if item.in_stock() { "" } else { "  out of stock" },
        );
    }

    if limit < results.len() {
        println!("... {} more", results.len() - limit);
    }

    Ok(())
}

// =============================================================================
// FACETS COMMAND
// =============================================================================

/// Print category and location counts under the given filters.
pub fn cmd_facets(
    catalog_path: &Path,
    config: &AppConfig,
    json_mode: bool,
    args: &SearchArgs,
) -> Result<(), MarketError> {
    let catalog = load_catalog(catalog_path)?;
    let holder = holder_for(args, &config.pricing);
    let categories = facet_counts(catalog.items(), holder.state(), FacetField::Category);
    let locations = facet_counts(catalog.items(), holder.state(), FacetField::Location);

    if json_mode {
        let output = serde_json::json!({
            "categories": categories,
            "locations": locations,
        });
        print_json(&output);
        return Ok(());
    }

    println!("Categories");
    println!("==========");
    for facet in &categories {
        println!("  {:<20} {}", facet.value, facet.count);
    }
    println!();
    println!("Locations");
    println!("=========");
    for facet in &locations {
        println!("  {:<20} {}", facet.value, facet.count);
    }

    Ok(())
}

// =============================================================================
// VALIDATE COMMAND
// =============================================================================

/// Check a catalog file and optionally write a normalized copy.
pub fn cmd_validate(
    catalog_path: &Path,
    json_mode: bool,
    output: Option<&Path>,
) -> Result<(), MarketError> {
    let catalog = load_catalog(catalog_path)?;

    if let Some(output) = output {
        let validated = validate_output_path(output)?;
        let bytes = catalog_to_json(&catalog)?;
        std::fs::write(&validated, bytes)
            .map_err(|e| MarketError::IoError(format!("Write catalog: {}", e)))?;
        tracing::info!("Wrote normalized catalog to {}", validated.display());
    }

    if json_mode {
        let output = serde_json::json!({
            "valid": true,
            "items": catalog.len(),
            "categories": catalog.categories(),
            "locations": catalog.locations(),
        });
        print_json(&output);
        return Ok(());
    }

    println!("Catalog OK: {} items", catalog.len());
    println!("Categories: {}", catalog.categories().join(", "));
    println!("Locations:  {}", catalog.locations().join(", "));
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
