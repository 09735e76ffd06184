//! # Comparator Builder
//!
//! Maps a [`SortKey`] to a comparator over catalog items.
//!
//! Comparators only describe the key order. Ties are resolved by the
//! caller's stable sort, which keeps catalog insertion order for items with
//! equal keys; the evaluator always sorts with `sort_by` for that reason.

use crate::CatalogItem;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A comparator over catalog items, suitable for `slice::sort_by`.
pub type Comparator = fn(&CatalogItem, &CatalogItem) -> Ordering;

// =============================================================================
// SORT KEY
// =============================================================================

/// The closed set of result orderings.
///
/// Parsing never fails: unknown strings become [`SortKey::Newest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum SortKey {
    /// Descending `created_order`.
    #[default]
    Newest,
    /// Ascending price.
    PriceAsc,
    /// Descending price.
    PriceDesc,
    /// Descending seller rating.
    RatingDesc,
    /// Descending available quantity.
    ///
    /// "Popularity" is measured by stock on hand, not by sales. The
    /// storefront has always labelled it this way and callers rely on it.
    PopularityDesc,
}

impl SortKey {
    /// Every sort key, in dropdown order.
    pub const ALL: [SortKey; 5] = [
        SortKey::Newest,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::RatingDesc,
        SortKey::PopularityDesc,
    ];

    /// Parse a sort key, accepting legacy spellings.
    ///
    /// Unrecognized input falls back to [`SortKey::Newest`].
    #[must_use]
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim() {
            "price-asc" | "price-low" => SortKey::PriceAsc,
            "price-desc" | "price-high" => SortKey::PriceDesc,
            "rating-desc" | "rating" => SortKey::RatingDesc,
            "popularity-desc" | "popular" => SortKey::PopularityDesc,
            _ => SortKey::Newest,
        }
    }

    /// Canonical wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::RatingDesc => "rating-desc",
            SortKey::PopularityDesc => "popularity-desc",
        }
    }

    /// Human-readable dropdown label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            SortKey::Newest => "Newest First",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::RatingDesc => "Highest Rated",
            SortKey::PopularityDesc => "Most Popular",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for SortKey {
    fn from(s: &str) -> Self {
        Self::parse_lossy(s)
    }
}

impl From<String> for SortKey {
    fn from(s: String) -> Self {
        Self::parse_lossy(&s)
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lossy(s))
    }
}

// =============================================================================
// COMPARATORS
// =============================================================================

fn by_newest(a: &CatalogItem, b: &CatalogItem) -> Ordering {
    b.created_order.cmp(&a.created_order)
}

fn by_price_asc(a: &CatalogItem, b: &CatalogItem) -> Ordering {
    a.price.cmp(&b.price)
}

fn by_price_desc(a: &CatalogItem, b: &CatalogItem) -> Ordering {
    b.price.cmp(&a.price)
}

fn by_rating_desc(a: &CatalogItem, b: &CatalogItem) -> Ordering {
    b.seller_rating.cmp(&a.seller_rating)
}

fn by_quantity_desc(a: &CatalogItem, b: &CatalogItem) -> Ordering {
    b.quantity_available.cmp(&a.quantity_available)
}

/// Build the comparator for a sort key.
#[must_use]
pub fn build_comparator(sort_key: SortKey) -> Comparator {
    match sort_key {
        SortKey::Newest => by_newest,
        SortKey::PriceAsc => by_price_asc,
        SortKey::PriceDesc => by_price_desc,
        SortKey::RatingDesc => by_rating_desc,
        SortKey::PopularityDesc => by_quantity_desc,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Price, Rating};

    fn item(id: &str, price: u64, qty: u32, rating: u8, order: u64) -> CatalogItem {
        CatalogItem::new(id, id, "Vegetables", Price::new(price), qty, order).with_seller(
            "Seller",
            "Punjab",
            Rating::from_tenths(rating),
        )
    }

    fn sorted_ids(mut items: Vec<CatalogItem>, key: SortKey) -> Vec<String> {
        items.sort_by(build_comparator(key));
        items.into_iter().map(|i| i.id.0).collect()
    }

    #[test]
    fn parse_canonical_and_legacy_names() {
        assert_eq!(SortKey::parse_lossy("price-asc"), SortKey::PriceAsc);
        assert_eq!(SortKey::parse_lossy("price-low"), SortKey::PriceAsc);
        assert_eq!(SortKey::parse_lossy("price-high"), SortKey::PriceDesc);
        assert_eq!(SortKey::parse_lossy("rating"), SortKey::RatingDesc);
        assert_eq!(SortKey::parse_lossy("popular"), SortKey::PopularityDesc);
        assert_eq!(SortKey::parse_lossy("newest"), SortKey::Newest);
    }

    #[test]
    fn unknown_sort_falls_back_to_newest() {
        assert_eq!(SortKey::parse_lossy("cheapest"), SortKey::Newest);
        assert_eq!(SortKey::parse_lossy(""), SortKey::Newest);
        let key: SortKey = serde_json::from_str("\"garbage\"").expect("lossy");
        assert_eq!(key, SortKey::Newest);
    }

    #[test]
    fn serializes_kebab_case() {
        let json = serde_json::to_string(&SortKey::PopularityDesc).expect("serialize");
        assert_eq!(json, "\"popularity-desc\"");
        for key in SortKey::ALL {
            assert_eq!(SortKey::parse_lossy(key.as_str()), key);
        }
    }

    #[test]
    fn price_orders() {
        let items = vec![item("a", 120, 1, 40, 1), item("b", 30, 1, 40, 2), item("c", 45, 1, 40, 3)];
        assert_eq!(sorted_ids(items.clone(), SortKey::PriceAsc), vec!["b", "c", "a"]);
        assert_eq!(sorted_ids(items, SortKey::PriceDesc), vec!["a", "c", "b"]);
    }

    #[test]
    fn newest_uses_created_order() {
        let items = vec![item("old", 1, 1, 40, 1), item("new", 1, 1, 40, 9), item("mid", 1, 1, 40, 5)];
        assert_eq!(sorted_ids(items, SortKey::Newest), vec!["new", "mid", "old"]);
    }

    #[test]
    fn popularity_is_stock_on_hand() {
        let items = vec![item("few", 1, 2, 40, 1), item("many", 1, 200, 40, 2)];
        assert_eq!(sorted_ids(items, SortKey::PopularityDesc), vec!["many", "few"]);
    }

    #[test]
    fn rating_ties_keep_input_order() {
        let items = vec![item("A", 1, 1, 48, 1), item("low", 1, 1, 30, 2), item("B", 1, 1, 48, 3)];
        assert_eq!(sorted_ids(items, SortKey::RatingDesc), vec!["A", "B", "low"]);
    }
}
