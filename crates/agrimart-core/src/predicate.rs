//! # Predicate Builder
//!
//! Converts a [`QueryState`] into a single item predicate.
//!
//! The predicate is the logical AND of six independent checks:
//!
//! 1. Text: empty search, or case-insensitive substring of the item name,
//!    seller name, or location
//! 2. Category: empty filter, or exact (case-sensitive) match
//! 3. Location: empty filter, or exact match against `location_tag`
//! 4. Price: inclusive on both ends
//! 5. Organic: off, or item is organic
//! 6. Stock: off, or `quantity_available > 0`
//!
//! Checks are ordered cheapest first; short-circuiting never changes the
//! result. The returned closure only reads shared data and is
//! `Send + Sync`, so it may be applied to items in parallel.

use crate::query_state::QueryState;
use crate::CatalogItem;

/// Build the composed predicate for a query.
///
/// The search text is lowercased once here, not per item.
pub fn build_predicate(query: &QueryState) -> impl Fn(&CatalogItem) -> bool + Send + Sync + '_ {
    let needle = query.search_text.to_lowercase();

    move |item: &CatalogItem| {
        matches_organic(query, item)
            && matches_stock(query, item)
            && query.price_range.contains(item.price)
            && matches_category(query, item)
            && matches_location(query, item)
            && matches_text(&needle, item)
    }
}

fn matches_text(needle: &str, item: &CatalogItem) -> bool {
    if needle.is_empty() {
        return true;
    }
    [&item.name, &item.seller_name, &item.location_tag]
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}

fn matches_category(query: &QueryState, item: &CatalogItem) -> bool {
    query.category.is_empty() || item.category == query.category
}

fn matches_location(query: &QueryState, item: &CatalogItem) -> bool {
    query.location.is_empty() || item.location_tag == query.location
}

fn matches_organic(query: &QueryState, item: &CatalogItem) -> bool {
    !query.organic_only || item.is_organic
}

fn matches_stock(query: &QueryState, item: &CatalogItem) -> bool {
    !query.in_stock_only || item.in_stock()
}

// =============================================================================
// TESTS
// =============================================================================
