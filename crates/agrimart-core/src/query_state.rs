//! # Query State
//!
//! The single source of truth for the current filter/search/sort selection.
//!
//! - [`QueryState`] is the plain selection read by the predicate and
//!   comparator builders.
//! - [`FilterChange`] is a typed mutation request, one variant per field.
//! - [`QueryStateHolder`] owns a `QueryState`, applies changes with
//!   clamping, and keeps the derived active-filter labels current.
//!
//! ## Active filter labels
//!
//! One label per non-default field, always in this order:
//!
//! | Field        | Label                          |
//! |--------------|--------------------------------|
//! | category     | `Category: <category>`         |
//! | location     | `Location: <location>`         |
//! | price range  | `Price: ₹<min> - ₹<max>`       |
//! | sort         | `Sort: <sort-key>`             |
//! | search text  | `Search: <text>`               |
//! | organic      | `Organic only`                 |
//! | in stock     | `In stock only`                |
//!
//! Passing a label back to [`QueryStateHolder::clear_filter`] resets the
//! field it came from.

use crate::comparator::SortKey;
use crate::config::QueryConfig;
use crate::primitives::MAX_SEARCH_TEXT_LENGTH;
use crate::Price;
use serde::{Deserialize, Serialize};

const CATEGORY_PREFIX: &str = "Category:";
const LOCATION_PREFIX: &str = "Location:";
const PRICE_PREFIX: &str = "Price:";
const SORT_PREFIX: &str = "Sort:";
const SEARCH_PREFIX: &str = "Search:";
const ORGANIC_LABEL: &str = "Organic only";
const IN_STOCK_LABEL: &str = "In stock only";

// =============================================================================
// PRICE RANGE
// =============================================================================

/// Inclusive price range with `min <= max`.
///
/// Serialized as a two-element array `[min, max]`. Construction orders the
/// ends, so a reversed pair is never observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u64; 2]", into = "[u64; 2]")]
pub struct PriceRange {
    min: Price,
    max: Price,
}

impl PriceRange {
    /// Create a range from two ends in either order.
    #[must_use]
    pub fn new(a: u64, b: u64) -> Self {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        Self {
            min: Price::new(min),
            max: Price::new(max),
        }
    }

    /// Clamp both ends into `[floor, ceiling]`, then order them.
    ///
    /// `[2000, 500]` within `[0, 1000]` becomes `[500, 1000]`.
    #[must_use]
    pub fn clamped(a: u64, b: u64, (floor, ceiling): (u64, u64)) -> Self {
        Self::new(a.clamp(floor, ceiling), b.clamp(floor, ceiling))
    }

    #[must_use]
    pub const fn min(&self) -> Price {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> Price {
        self.max
    }

    /// Inclusive on both ends.
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        price >= self.min && price <= self.max
    }
}

impl From<[u64; 2]> for PriceRange {
    fn from([a, b]: [u64; 2]) -> Self {
        Self::new(a, b)
    }
}

impl From<PriceRange> for [u64; 2] {
    fn from(range: PriceRange) -> Self {
        [range.min.value(), range.max.value()]
    }
}

// =============================================================================
// QUERY STATE
// =============================================================================

/// The current selection. Empty strings mean "no filter".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub search_text: String,
    pub category: String,
    pub location: String,
    pub price_range: PriceRange,
    pub sort_key: SortKey,
    pub organic_only: bool,
    pub in_stock_only: bool,
}

impl QueryState {
    /// The default selection for the given config.
    #[must_use]
    pub fn defaults(config: &QueryConfig) -> Self {
        let (floor, ceiling) = config.bounds();
        Self {
            search_text: String::new(),
            category: String::new(),
            location: String::new(),
            price_range: PriceRange::new(floor, ceiling),
            sort_key: SortKey::Newest,
            organic_only: false,
            in_stock_only: false,
        }
    }

    /// Copy of this state without the category filter.
    #[must_use]
    pub fn without_category(&self) -> Self {
        Self {
            category: String::new(),
            ..self.clone()
        }
    }

    /// Copy of this state without the location filter.
    #[must_use]
    pub fn without_location(&self) -> Self {
        Self {
            location: String::new(),
            ..self.clone()
        }
    }
}

impl Default for QueryState {
    fn default() -> Self {
        Self::defaults(&QueryConfig::default())
    }
}

// =============================================================================
// FILTER CHANGE
// =============================================================================

/// A typed request to replace one field of the query state.
///
/// JSON form: `{"field": "price_range", "value": [0, 500]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FilterChange {
    SearchText(String),
    Category(String),
    Location(String),
    /// Ends in either order; clamped to the configured bounds.
    PriceRange(u64, u64),
    Sort(SortKey),
    OrganicOnly(bool),
    InStockOnly(bool),
}

// =============================================================================
// QUERY STATE HOLDER
// =============================================================================

/// Owns a [`QueryState`] and its derived active-filter labels.
///
/// Every mutation leaves the state valid and the labels current. No
/// mutation can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryStateHolder {
    state: QueryState,
    config: QueryConfig,
    active_filters: Vec<String>,
}

impl QueryStateHolder {
    /// Create a holder with default state.
    #[must_use]
    pub fn new(config: QueryConfig) -> Self {
        let state = QueryState::defaults(&config);
        let mut holder = Self {
            state,
            config,
            active_filters: Vec::new(),
        };
        holder.refresh_active_filters();
        holder
    }

    /// Create a holder whose category is seeded from a navigational
    /// parameter (e.g. `?category=Fruits`).
    #[must_use]
    pub fn with_category_seed(config: QueryConfig, seed: Option<&str>) -> Self {
        let mut holder = Self::new(config);
        holder.seed_category(seed);
        holder
    }

    /// Current selection.
    #[must_use]
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// The config this holder clamps against.
    #[must_use]
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Labels for every non-default field, in display order.
    #[must_use]
    pub fn active_filters(&self) -> &[String] {
        &self.active_filters
    }

    /// Number of active filters.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        self.active_filters.len()
    }

    /// Apply a change, clamping out-of-domain values.
    ///
    /// Returns whether the state actually changed.
    pub fn set_filter(&mut self, change: FilterChange) -> bool {
        let before = self.state.clone();
        match change {
            FilterChange::SearchText(text) => {
                self.state.search_text = normalize_search_text(&text);
            }
            FilterChange::Category(category) => self.state.category = category,
            FilterChange::Location(location) => self.state.location = location,
            FilterChange::PriceRange(a, b) => {
                self.state.price_range = PriceRange::clamped(a, b, self.config.bounds());
            }
            FilterChange::Sort(key) => self.state.sort_key = key,
            FilterChange::OrganicOnly(on) => self.state.organic_only = on,
            FilterChange::InStockOnly(on) => self.state.in_stock_only = on,
        }
        self.refresh_active_filters();
        self.state != before
    }

    /// Reset the field a label was generated from.
    ///
    /// Returns `false` when the label matches no known prefix or its field
    /// already holds the default.
    pub fn clear_filter(&mut self, label: &str) -> bool {
        let before = self.state.clone();
        let defaults = QueryState::defaults(&self.config);
        let label = label.trim();

        if label.starts_with(CATEGORY_PREFIX) {
            self.state.category = defaults.category;
        } else if label.starts_with(LOCATION_PREFIX) {
            self.state.location = defaults.location;
        } else if label.starts_with(PRICE_PREFIX) {
            self.state.price_range = defaults.price_range;
        } else if label.starts_with(SORT_PREFIX) {
            self.state.sort_key = defaults.sort_key;
        } else if label.starts_with(SEARCH_PREFIX) {
            self.state.search_text = defaults.search_text;
        } else if label == ORGANIC_LABEL {
            self.state.organic_only = defaults.organic_only;
        } else if label == IN_STOCK_LABEL {
            self.state.in_stock_only = defaults.in_stock_only;
        } else {
            return false;
        }

        self.refresh_active_filters();
        self.state != before
    }

    /// Reset every field in one step.
    pub fn clear_all(&mut self) {
        self.state = QueryState::defaults(&self.config);
        self.active_filters.clear();
    }

    /// Re-seed the category from an external parameter.
    ///
    /// `None`, an empty string, or the category already selected leaves
    /// the state untouched and returns `false`.
    pub fn seed_category(&mut self, seed: Option<&str>) -> bool {
        match seed.filter(|s| !s.is_empty()) {
            Some(category) => self.set_filter(FilterChange::Category(category.to_string())),
            None => false,
        }
    }

    fn refresh_active_filters(&mut self) {
        self.active_filters = active_filter_labels(&self.state, &self.config);
    }
}

/// Labels for every field of `state` that differs from its default.
#[must_use]
pub fn active_filter_labels(state: &QueryState, config: &QueryConfig) -> Vec<String> {
    let defaults = QueryState::defaults(config);
    let symbol = &config.currency_symbol;
    let mut labels = Vec::new();

    if !state.category.is_empty() {
        labels.push(format!("{} {}", CATEGORY_PREFIX, state.category));
    }
    if !state.location.is_empty() {
        labels.push(format!("{} {}", LOCATION_PREFIX, state.location));
    }
    if state.price_range != defaults.price_range {
        labels.push(format!(
            "{} {}{} - {}{}",
            PRICE_PREFIX,
            symbol,
            state.price_range.min(),
            symbol,
            state.price_range.max()
        ));
    }
    if state.sort_key != SortKey::Newest {
        labels.push(format!("{} {}", SORT_PREFIX, state.sort_key));
    }
    if !state.search_text.is_empty() {
        labels.push(format!("{} {}", SEARCH_PREFIX, state.search_text));
    }
    if state.organic_only {
        labels.push(ORGANIC_LABEL.to_string());
    }
    if state.in_stock_only {
        labels.push(IN_STOCK_LABEL.to_string());
    }

    labels
}

/// Trim and cap search input at `MAX_SEARCH_TEXT_LENGTH` characters.
fn normalize_search_text(text: &str) -> String {
    text.trim().chars().take(MAX_SEARCH_TEXT_LENGTH).collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn holder() -> QueryStateHolder {
        QueryStateHolder::new(QueryConfig::default())
    }

    #[test]
    fn fresh_holder_has_no_active_filters() {
        let h = holder();
        assert_eq!(h.state(), &QueryState::default());
        assert!(h.active_filters().is_empty());
        assert_eq!(h.state().price_range, PriceRange::new(0, 1000));
    }

    #[test]
    fn labels_follow_fixed_order() {
        let mut h = holder();
        h.set_filter(FilterChange::InStockOnly(true));
        h.set_filter(FilterChange::Sort(SortKey::PriceDesc));
        h.set_filter(FilterChange::SearchText("tom".to_string()));
        h.set_filter(FilterChange::PriceRange(10, 200));
        h.set_filter(FilterChange::OrganicOnly(true));
        h.set_filter(FilterChange::Location("Punjab".to_string()));
        h.set_filter(FilterChange::Category("Fruits".to_string()));

        assert_eq!(
            h.active_filters(),
            [
                "Category: Fruits",
                "Location: Punjab",
                "Price: ₹10 - ₹200",
                "Sort: price-desc",
                "Search: tom",
                "Organic only",
                "In stock only",
            ]
        );
        assert_eq!(h.active_filter_count(), 7);
    }

    #[test]
    fn reversed_price_range_is_clamped_then_ordered() {
        let mut h = holder();
        h.set_filter(FilterChange::PriceRange(0, 1000));
        h.set_filter(FilterChange::PriceRange(2000, 500));
        assert_eq!(h.state().price_range, PriceRange::new(500, 1000));
    }

    #[test]
    fn price_range_clamps_to_custom_bounds() {
        let mut h = QueryStateHolder::new(QueryConfig::with_price_bounds(10, 500));
        h.set_filter(FilterChange::PriceRange(0, 9000));
        assert_eq!(h.state().price_range, PriceRange::new(10, 500));
        assert!(h.active_filters().is_empty());
    }

    #[test]
    fn clear_filter_resets_matching_field() {
        let mut h = holder();
        h.set_filter(FilterChange::Category("Vegetables".to_string()));
        h.set_filter(FilterChange::Location("Karnataka".to_string()));

        assert!(h.clear_filter("Category: Vegetables"));
        assert_eq!(h.state().category, "");
        assert_eq!(h.active_filters(), ["Location: Karnataka"]);
    }

    #[test]
    fn clear_filter_ignores_unknown_labels() {
        let mut h = holder();
        h.set_filter(FilterChange::Category("Herbs".to_string()));
        let before = h.clone();

        assert!(!h.clear_filter("Colour: Red"));
        assert_eq!(h, before);
    }

    #[test]
    fn clearing_a_default_field_reports_no_change() {
        let mut h = holder();
        let before = h.clone();

        assert!(!h.clear_filter("Organic only"));
        assert!(!h.clear_filter("Category: Fruits"));
        assert_eq!(h, before);
    }

    #[test]
    fn set_filter_reports_change() {
        let mut h = holder();
        assert!(h.set_filter(FilterChange::Location("Punjab".to_string())));
        assert!(!h.set_filter(FilterChange::Location("Punjab".to_string())));
        assert!(!h.set_filter(FilterChange::PriceRange(0, 5000)));
    }

    #[test]
    fn reseeding_same_category_is_no_change() {
        let mut h = QueryStateHolder::with_category_seed(QueryConfig::default(), Some("Dairy"));
        assert!(!h.seed_category(Some("Dairy")));
        assert!(h.seed_category(Some("Seeds")));
    }

    #[test]
    fn clear_all_restores_defaults() {
        let mut h = holder();
        h.set_filter(FilterChange::Category("Herbs".to_string()));
        h.set_filter(FilterChange::PriceRange(5, 6));
        h.set_filter(FilterChange::OrganicOnly(true));

        h.clear_all();
        assert_eq!(h.state(), &QueryState::default());
        assert!(h.active_filters().is_empty());
    }

    #[test]
    fn search_text_is_trimmed_and_capped() {
        let mut h = holder();
        h.set_filter(FilterChange::SearchText("  tom  ".to_string()));
        assert_eq!(h.state().search_text, "tom");

        h.set_filter(FilterChange::SearchText("x".repeat(MAX_SEARCH_TEXT_LENGTH + 10)));
        assert_eq!(h.state().search_text.chars().count(), MAX_SEARCH_TEXT_LENGTH);
    }

    #[test]
    fn category_seed_ignores_empty_values() {
        let mut h = QueryStateHolder::with_category_seed(QueryConfig::default(), Some("Seeds"));
        assert_eq!(h.state().category, "Seeds");

        assert!(!h.seed_category(None));
        assert!(!h.seed_category(Some("")));
        assert_eq!(h.state().category, "Seeds");

        assert!(h.seed_category(Some("Dairy")));
        assert_eq!(h.active_filters(), ["Category: Dairy"]);
    }

    #[test]
    fn filter_change_json_shape() {
        let change: FilterChange =
            serde_json::from_str(r#"{"field": "price_range", "value": [2000, 500]}"#).expect("parse");
        assert_eq!(change, FilterChange::PriceRange(2000, 500));

        let sort: FilterChange =
            serde_json::from_str(r#"{"field": "sort", "value": "price-low"}"#).expect("parse");
        assert_eq!(sort, FilterChange::Sort(SortKey::PriceAsc));
    }

    #[test]
    fn price_range_deserializes_ordered() {
        let range: PriceRange = serde_json::from_str("[900, 100]").expect("parse");
        assert_eq!(range.min(), Price::new(100));
        assert_eq!(range.max(), Price::new(900));
        assert_eq!(serde_json::to_string(&range).expect("serialize"), "[100,900]");
    }
}
