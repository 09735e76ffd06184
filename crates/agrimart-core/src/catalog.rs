//! # Catalog Module
//!
//! A validated, read-only collection of [`CatalogItem`]s.
//!
//! Validation happens once, at construction. After that the query engine
//! can rely on:
//! - Unique item ids
//! - Non-empty names and categories
//! - Ratings within the five-star scale
//! - Bounded field lengths and item count
//!
//! The catalog preserves insertion order; that order is the tiebreak for
//! every stable sort.

use crate::primitives::{MAX_CATALOG_ITEMS, MAX_FIELD_LENGTH};
use crate::{CatalogItem, ItemId, MarketError};
use std::collections::BTreeSet;

/// An immutable, validated list of catalog items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, validating every item.
    ///
    /// Fails on the first violation; the error names the offending item.
    pub fn from_items(items: Vec<CatalogItem>) -> Result<Self, MarketError> {
        if items.len() > MAX_CATALOG_ITEMS {
            return Err(MarketError::InvalidCatalog(format!(
                "Item count {} exceeds maximum {}",
                items.len(),
                MAX_CATALOG_ITEMS
            )));
        }

        let mut seen: BTreeSet<&ItemId> = BTreeSet::new();
        for item in &items {
            Self::validate_item(item)?;
            if !seen.insert(&item.id) {
                return Err(MarketError::DuplicateItemId(item.id.clone()));
            }
        }

        Ok(Self { items })
    }

    /// Check a single item against the field constraints.
    pub fn validate_item(item: &CatalogItem) -> Result<(), MarketError> {
        let invalid = |reason: String| MarketError::InvalidItem {
            id: item.id.clone(),
            reason,
        };

        if item.id.as_str().is_empty() {
            return Err(invalid("empty id".to_string()));
        }
        if item.name.trim().is_empty() {
            return Err(invalid("empty name".to_string()));
        }
        if item.category.trim().is_empty() {
            return Err(invalid("empty category".to_string()));
        }
        if !item.seller_rating.is_valid() {
            return Err(invalid(format!(
                "seller rating {} is outside 0.0..=5.0",
                item.seller_rating
            )));
        }

        for (field, value) in [
            ("id", item.id.as_str()),
            ("name", item.name.as_str()),
            ("category", item.category.as_str()),
            ("location_tag", item.location_tag.as_str()),
            ("seller_name", item.seller_name.as_str()),
        ] {
            if value.len() > MAX_FIELD_LENGTH {
                return Err(invalid(format!(
                    "{} length {} exceeds maximum {} bytes",
                    field,
                    value.len(),
                    MAX_FIELD_LENGTH
                )));
            }
        }

        Ok(())
    }

    /// All items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        Self::distinct(self.items.iter().map(|item| item.category.as_str()))
    }

    /// Distinct non-empty locations in first-seen order.
    #[must_use]
    pub fn locations(&self) -> Vec<&str> {
        Self::distinct(
            self.items
                .iter()
                .map(|item| item.location_tag.as_str())
                .filter(|loc| !loc.is_empty()),
        )
    }

    fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
        let mut seen = BTreeSet::new();
        values.filter(|value| seen.insert(*value)).collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
