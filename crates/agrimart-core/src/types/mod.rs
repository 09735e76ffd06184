//! # Core Type Definitions
//!
//! This module contains the data model shared by every query component:
//! - Item identifiers and scalar newtypes (`ItemId`, `Price`, `Rating`)
//! - The canonical catalog record (`CatalogItem`)
//! - Error types (`MarketError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` where they participate in sorting
//! - Are immutable once handed to the query engine

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::primitives::MAX_RATING_TENTHS;

// =============================================================================
// IDENTIFIERS & SCALARS
// =============================================================================

/// Opaque unique identifier of a catalog item.
///
/// Ids are compared for equality only. Recency is carried by
/// [`CatalogItem::created_order`], never derived from the id text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    /// Create a new item id.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Price in the smallest display currency unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(pub u64);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the raw amount.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Seller rating in tenths of a star.
///
/// `Rating(48)` is 4.8 stars. Valid values are `0..=MAX_RATING_TENTHS`;
/// the catalog rejects anything above that.
///
/// Serializes as the integer tenths. Deserialization also accepts a
/// decimal star value with at most one fractional digit, so `4.8` and
/// `48` both read as `Rating(48)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
#[serde(transparent)]
pub struct Rating(pub u8);

impl Rating {
    /// Create a rating from tenths of a star.
    #[must_use]
    pub const fn from_tenths(tenths: u8) -> Self {
        Self(tenths)
    }

    /// Get the raw value in tenths.
    #[must_use]
    pub const fn tenths(self) -> u8 {
        self.0
    }

    /// Whether the rating lies within the 0 to 5 star scale.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 <= MAX_RATING_TENTHS
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RatingVisitor)
    }
}

struct RatingVisitor;

impl Visitor<'_> for RatingVisitor {
    type Value = Rating;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("integer tenths or a star value with one decimal place")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Rating, E> {
        u8::try_from(v)
            .map(Rating)
            .map_err(|_| E::custom(format!("rating {} out of range", v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Rating, E> {
        u64::try_from(v)
            .map_err(|_| E::custom(format!("rating {} is negative", v)))
            .and_then(|v| self.visit_u64(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Rating, E> {
        if v.is_sign_negative() {
            return Err(E::custom(format!("rating {} is negative", v)));
        }
        // Parse the shortest decimal form so 4.8 is exact
        let text = v.to_string();
        let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
        let fraction = fraction.trim_end_matches('0');
        if fraction.len() > 1 {
            return Err(E::custom(format!(
                "rating {} has more than one decimal place",
                text
            )));
        }
        let tenth = fraction.parse::<u8>().unwrap_or(0);
        whole
            .parse::<u8>()
            .ok()
            .and_then(|w| w.checked_mul(10))
            .and_then(|w| w.checked_add(tenth))
            .map(Rating)
            .ok_or_else(|| E::custom(format!("rating {} out of range", text)))
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

// =============================================================================
// CATALOG ITEM
// =============================================================================

/// A single product listing as supplied by the data source.
///
/// The query engine reads only the core fields. The trailing optional
/// fields exist so that richer listings (descriptions, tags) deserialize
/// into the same shape without a second item type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub price: Price,
    pub quantity_available: u32,
    pub location_tag: String,
    pub seller_name: String,
    pub seller_rating: Rating,
    #[serde(default)]
    pub is_organic: bool,
    /// Monotonic insertion counter; larger is newer.
    pub created_order: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl CatalogItem {
    /// Create an item with the fields the query engine reads.
    ///
    /// Seller name, rating, organic flag and extension fields start empty;
    /// use the `with_*` builders to fill them.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Price,
        quantity_available: u32,
        created_order: u64,
    ) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            category: category.into(),
            price,
            quantity_available,
            location_tag: String::new(),
            seller_name: String::new(),
            seller_rating: Rating::default(),
            is_organic: false,
            created_order,
            description: None,
            unit: None,
            tags: Vec::new(),
        }
    }

    /// Set the seller name, region and rating.
    #[must_use]
    pub fn with_seller(
        mut self,
        name: impl Into<String>,
        location: impl Into<String>,
        rating: Rating,
    ) -> Self {
        self.seller_name = name.into();
        self.location_tag = location.into();
        self.seller_rating = rating;
        self
    }

    /// Mark the item as organic (or not).
    #[must_use]
    pub fn with_organic(mut self, organic: bool) -> Self {
        self.is_organic = organic;
        self
    }

    /// Whether at least one unit can be ordered.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.quantity_available > 0
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while loading catalogs or configuration.
///
/// Query evaluation itself never fails: out-of-domain inputs are clamped
/// or fall back to defaults.
#[derive(Debug, Error)]
pub enum MarketError {
    /// The catalog as a whole is unusable.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Two items share the same id.
    #[error("Duplicate item id: {0}")]
    DuplicateItemId(ItemId),

    /// A single item violates a field constraint.
    #[error("Invalid item {id}: {reason}")]
    InvalidItem { id: ItemId, reason: String },

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A request carries a value the API refuses to process.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A configuration value is out of range or malformed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
