//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use agrimart_core::{
    CatalogItem, FacetValue, FilterChange, MarketError, QueryConfig, QueryState,
    QueryStateHolder, Session, SortKey,
    primitives::{MAX_FIELD_LENGTH, MAX_SEARCH_TEXT_LENGTH},
};
use serde::{Deserialize, Serialize};

/// Upper bound for `limit` on search requests.
pub const MAX_RESULT_LIMIT: usize = 1000;

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// STATUS RESPONSE
// =============================================================================

/// Session status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub catalog_items: usize,
    pub result_count: usize,
    pub revision: u64,
    pub active_filters: Vec<String>,
}

impl StatusResponse {
    pub fn from_session(session: &Session) -> Self {
        Self {
            catalog_items: session.catalog().len(),
            result_count: session.result_count(),
            revision: session.revision(),
            active_filters: session.active_filters().to_vec(),
        }
    }
}

// =============================================================================
// PRODUCT JSON
// =============================================================================

/// Product listing as rendered by the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductJson {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: u64,
    pub quantity_available: u32,
    pub in_stock: bool,
    pub location: String,
    pub seller_name: String,
    /// Rating in tenths of a star.
    pub seller_rating: u8,
    /// Rating formatted for display, e.g. "4.8".
    pub seller_rating_display: String,
    pub is_organic: bool,
}

impl From<&CatalogItem> for ProductJson {
    fn from(item: &CatalogItem) -> Self {
        Self {
            id: item.id.0.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            price: item.price.value(),
            quantity_available: item.quantity_available,
            in_stock: item.in_stock(),
            location: item.location_tag.clone(),
            seller_name: item.seller_name.clone(),
            seller_rating: item.seller_rating.tenths(),
            seller_rating_display: item.seller_rating.to_string(),
            is_organic: item.is_organic,
        }
    }
}

// =============================================================================
// PRODUCTS RESPONSE
// =============================================================================

/// Evaluated result plus the state that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsResponse {
    pub success: bool,
    /// Whether the request changed the query state.
    pub changed: bool,
    pub revision: u64,
    pub count: usize,
    pub active_filters: Vec<String>,
    pub state: Option<QueryState>,
    pub products: Vec<ProductJson>,
    pub error: Option<String>,
}

impl ProductsResponse {
    /// Snapshot of a session's current result.
    pub fn from_session(session: &Session, changed: bool) -> Self {
        let products: Vec<ProductJson> = session.results().into_iter().map(ProductJson::from).collect();
        Self {
            success: true,
            changed,
            revision: session.revision(),
            count: products.len(),
            active_filters: session.active_filters().to_vec(),
            state: Some(session.state().clone()),
            products,
            error: None,
        }
    }

    /// Result of a stateless search.
    pub fn from_search(holder: &QueryStateHolder, items: &[&CatalogItem], limit: usize) -> Self {
        Self {
            success: true,
            changed: false,
            revision: 0,
            count: items.len(),
            active_filters: holder.active_filters().to_vec(),
            state: Some(holder.state().clone()),
            products: items.iter().take(limit).map(|item| ProductJson::from(*item)).collect(),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            changed: false,
            revision: 0,
            count: 0,
            active_filters: vec![],
            state: None,
            products: vec![],
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// SEARCH REQUEST
// =============================================================================

/// Stateless search request. Every field is optional; omitted fields keep
/// their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub search_text: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub price_range: Option<[u64; 2]>,
    /// Sort key name; unknown names fall back to "newest".
    pub sort: Option<String>,
    pub organic_only: bool,
    pub in_stock_only: bool,
    pub limit: Option<usize>,
}

impl SearchRequest {
    /// Validate field sizes and build the equivalent list of changes.
    pub fn to_changes(&self) -> Result<Vec<FilterChange>, MarketError> {
        let mut changes = Vec::new();

        if let Some(text) = &self.search_text {
            changes.push(FilterChange::SearchText(text.clone()));
        }
        if let Some(category) = &self.category {
            changes.push(FilterChange::Category(category.clone()));
        }
        if let Some(location) = &self.location {
            changes.push(FilterChange::Location(location.clone()));
        }
        if let Some([min, max]) = self.price_range {
            changes.push(FilterChange::PriceRange(min, max));
        }
        if let Some(sort) = &self.sort {
            changes.push(FilterChange::Sort(SortKey::parse_lossy(sort)));
        }
        if self.organic_only {
            changes.push(FilterChange::OrganicOnly(true));
        }
        if self.in_stock_only {
            changes.push(FilterChange::InStockOnly(true));
        }

        for change in &changes {
            validate_change(change)?;
        }
        Ok(changes)
    }

    /// Build a query state holder for this request.
    pub fn to_holder(&self, config: &QueryConfig) -> Result<QueryStateHolder, MarketError> {
        let mut holder = QueryStateHolder::new(config.clone());
        for change in self.to_changes()? {
            holder.set_filter(change);
        }
        Ok(holder)
    }

    /// Effective result limit.
    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(MAX_RESULT_LIMIT).min(MAX_RESULT_LIMIT)
    }
}

/// Reject oversized string payloads at the API boundary.
///
/// The core would truncate or simply never match them; refusing them here
/// keeps request bodies small.
pub fn validate_change(change: &FilterChange) -> Result<(), MarketError> {
    let (field, value, max) = match change {
        FilterChange::SearchText(text) => ("search_text", text, MAX_SEARCH_TEXT_LENGTH * 4),
        FilterChange::Category(category) => ("category", category, MAX_FIELD_LENGTH),
        FilterChange::Location(location) => ("location", location, MAX_FIELD_LENGTH),
        _ => return Ok(()),
    };
    if value.len() > max {
        return Err(MarketError::InvalidRequest(format!(
            "{} length {} exceeds maximum {} bytes",
            field,
            value.len(),
            max
        )));
    }
    Ok(())
}

// =============================================================================
// FILTER MUTATION REQUESTS
// =============================================================================

/// Request to clear one active filter by its label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearFilterRequest {
    pub label: String,
}

/// Request to re-seed the category from a navigational parameter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedRequest {
    #[serde(default)]
    pub category: Option<String>,
}

// =============================================================================
// FACETS & SORT OPTIONS
// =============================================================================

/// Facet buckets for the selector controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetsResponse {
    pub categories: Vec<FacetValue>,
    pub locations: Vec<FacetValue>,
}

/// One entry of the sort dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOptionJson {
    pub value: String,
    pub label: String,
}

impl From<SortKey> for SortOptionJson {
    fn from(key: SortKey) -> Self {
        Self {
            value: key.as_str().to_string(),
            label: key.label().to_string(),
        }
    }
}
