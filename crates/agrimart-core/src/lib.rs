//! # agrimart-core
//!
//! The deterministic catalog query engine for Agrimart - THE LOGIC.
//!
//! Given an in-memory catalog and a query state, this crate filters,
//! searches and sorts the catalog and derives the labels a storefront
//! shows for the active filters.
//!
//! ## Pipeline
//!
//! ```text
//! FilterChange ──▶ QueryStateHolder ──▶ build_predicate ──┐
//!                        │                                ├──▶ evaluate ──▶ results
//!                        │             build_comparator ──┘
//!                        └──▶ active filter labels
//! ```
//!
//! ## Architectural Constraints
//!
//! - Has NO async, NO network dependencies (pure Rust)
//! - Never mutates the catalog; every evaluation builds a new result
//! - Sorting is stable; equal keys keep catalog order
//! - Query operations are total: bad input is clamped, never rejected

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod comparator;
pub mod config;
pub mod evaluator;
pub mod facets;
pub mod formats;
pub mod predicate;
pub mod primitives;
pub mod query_state;
pub mod session;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{CatalogItem, ItemId, MarketError, Price, Rating};

// =============================================================================
// RE-EXPORTS: Query Engine
// =============================================================================

pub use catalog::Catalog;
pub use comparator::{Comparator, SortKey, build_comparator};
pub use config::QueryConfig;
pub use evaluator::{evaluate, evaluate_indices};
pub use facets::{FacetField, FacetValue, facet_counts};
pub use predicate::build_predicate;
pub use query_state::{FilterChange, PriceRange, QueryState, QueryStateHolder, active_filter_labels};
pub use session::Session;

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{catalog_from_json, catalog_to_json};
