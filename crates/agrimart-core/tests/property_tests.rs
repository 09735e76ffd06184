//! # Property-Based Tests
//!
//! Determinism and invariant checks for the query engine using proptest.

use agrimart_core::{
    CatalogItem, FilterChange, Price, QueryConfig, QueryState, QueryStateHolder, Rating, SortKey,
    evaluate,
};
use proptest::collection::vec;
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

const CATEGORIES: [&str; 4] = ["Vegetables", "Fruits", "Grains", "Herbs"];
const LOCATIONS: [&str; 3] = ["Maharashtra", "Karnataka", "Punjab"];

fn arb_item() -> impl Strategy<Value = (usize, u64, u32, u8, bool, usize, u64)> {
    (
        0..CATEGORIES.len(),
        0u64..1500,
        0u32..200,
        0u8..=50,
        any::<bool>(),
        0..LOCATIONS.len(),
        0u64..1000,
    )
}

fn build_items(raw: Vec<(usize, u64, u32, u8, bool, usize, u64)>) -> Vec<CatalogItem> {
    raw.into_iter()
        .enumerate()
        .map(|(idx, (cat, price, qty, rating, organic, loc, order))| {
            CatalogItem::new(
                format!("item-{}", idx),
                format!("Produce {}", idx),
                CATEGORIES[cat],
                Price::new(price),
                qty,
                order,
            )
            .with_seller("Farmer", LOCATIONS[loc], Rating::from_tenths(rating))
            .with_organic(organic)
        })
        .collect()
}

fn arb_sort_key() -> impl Strategy<Value = SortKey> {
    prop::sample::select(SortKey::ALL.to_vec())
}

fn arb_change() -> impl Strategy<Value = FilterChange> {
    prop_oneof![
        prop::sample::select(vec!["", "tom", "prod", "FARM", "1"])
            .prop_map(|s| FilterChange::SearchText(s.to_string())),
        prop::sample::select(vec!["", "Vegetables", "Fruits", "Dairy"])
            .prop_map(|s| FilterChange::Category(s.to_string())),
        prop::sample::select(vec!["", "Punjab", "Karnataka"])
            .prop_map(|s| FilterChange::Location(s.to_string())),
        (0u64..3000, 0u64..3000).prop_map(|(a, b)| FilterChange::PriceRange(a, b)),
        arb_sort_key().prop_map(FilterChange::Sort),
        any::<bool>().prop_map(FilterChange::OrganicOnly),
        any::<bool>().prop_map(FilterChange::InStockOnly),
    ]
}

fn ids(result: &[&CatalogItem]) -> Vec<String> {
    result.iter().map(|item| item.id.0.clone()).collect()
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Same items and query produce the same result, in the same order.
    #[test]
    fn evaluation_is_deterministic(
        raw in vec(arb_item(), 0..60),
        changes in vec(arb_change(), 0..8)
    ) {
        let items = build_items(raw);
        let mut holder = QueryStateHolder::new(QueryConfig::default());
        for change in changes {
            holder.set_filter(change);
        }

        let first = ids(&evaluate(&items, holder.state()));
        let second = ids(&evaluate(&items, holder.state()));
        prop_assert_eq!(first, second);
    }

    /// Clearing twice is the same as clearing once.
    #[test]
    fn clear_all_is_idempotent(changes in vec(arb_change(), 0..10)) {
        let mut holder = QueryStateHolder::new(QueryConfig::default());
        for change in changes {
            holder.set_filter(change);
        }

        holder.clear_all();
        let once = holder.clone();
        holder.clear_all();
        prop_assert_eq!(holder, once);
    }

    /// Tightening any filter never grows the result.
    #[test]
    fn restrictive_filters_never_grow_results(
        raw in vec(arb_item(), 0..60),
        changes in vec(arb_change(), 0..6),
        restriction in prop_oneof![
            Just(FilterChange::OrganicOnly(true)),
            Just(FilterChange::InStockOnly(true)),
            Just(FilterChange::Category("Fruits".to_string())),
            Just(FilterChange::Location("Punjab".to_string())),
            (0u64..1200, 0u64..1200).prop_map(|(a, b)| FilterChange::PriceRange(a, b)),
            "[a-z0-9]{1,4}".prop_map(FilterChange::SearchText),
        ]
    ) {
        let items = build_items(raw);
        let mut holder = QueryStateHolder::new(QueryConfig::default());
        for change in changes {
            holder.set_filter(change);
        }
        let before = evaluate(&items, holder.state()).len();

        let mut restricted = holder.clone();
        // Only tighten fields that are currently unrestricted.
        let tightens = match &restriction {
            FilterChange::Category(_) => holder.state().category.is_empty(),
            FilterChange::Location(_) => holder.state().location.is_empty(),
            FilterChange::SearchText(_) => holder.state().search_text.is_empty(),
            _ => true,
        };
        prop_assume!(tightens);
        restricted.set_filter(restriction);

        // A price change only tightens when the new range sits inside the old one.
        let (old, new) = (holder.state().price_range, restricted.state().price_range);
        prop_assume!(new.min() >= old.min() && new.max() <= old.max());

        prop_assert!(evaluate(&items, restricted.state()).len() <= before);
    }

    /// Items with equal sort keys keep their input order.
    #[test]
    fn sorting_is_stable(raw in vec(arb_item(), 0..60), key in arb_sort_key()) {
        let items = build_items(raw);
        let query = QueryState { sort_key: key, ..QueryState::default() };
        let result = evaluate(&items, &query);

        let position = |item: &CatalogItem| {
            items.iter().position(|candidate| candidate.id == item.id).unwrap_or(usize::MAX)
        };
        for pair in result.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let same_key = match key {
                SortKey::Newest => a.created_order == b.created_order,
                SortKey::PriceAsc | SortKey::PriceDesc => a.price == b.price,
                SortKey::RatingDesc => a.seller_rating == b.seller_rating,
                SortKey::PopularityDesc => a.quantity_available == b.quantity_available,
            };
            if same_key {
                prop_assert!(position(a) < position(b));
            }
        }
    }

    /// After any sequence of price updates, min <= max within the bounds.
    #[test]
    fn price_range_stays_ordered_and_bounded(
        updates in vec((0u64..5000, 0u64..5000), 1..20),
        floor in 0u64..200,
        span in 0u64..2000
    ) {
        let config = QueryConfig::with_price_bounds(floor, floor + span);
        let mut holder = QueryStateHolder::new(config);
        for (a, b) in updates {
            holder.set_filter(FilterChange::PriceRange(a, b));
            let range = holder.state().price_range;
            prop_assert!(range.min() <= range.max());
            prop_assert!(range.min().value() >= floor);
            prop_assert!(range.max().value() <= floor + span);
        }
    }

    /// Each active label resets exactly the field it was generated from.
    #[test]
    fn active_labels_round_trip(changes in vec(arb_change(), 1..10)) {
        let config = QueryConfig::default();
        let defaults = QueryState::defaults(&config);
        let mut holder = QueryStateHolder::new(config);
        for change in changes {
            holder.set_filter(change);
        }

        for label in holder.active_filters().to_vec() {
            let mut expected = holder.state().clone();
            if label.starts_with("Category:") {
                expected.category = defaults.category.clone();
            } else if label.starts_with("Location:") {
                expected.location = defaults.location.clone();
            } else if label.starts_with("Price:") {
                expected.price_range = defaults.price_range;
            } else if label.starts_with("Sort:") {
                expected.sort_key = defaults.sort_key;
            } else if label.starts_with("Search:") {
                expected.search_text = defaults.search_text.clone();
            } else if label == "Organic only" {
                expected.organic_only = defaults.organic_only;
            } else if label == "In stock only" {
                expected.in_stock_only = defaults.in_stock_only;
            } else {
                prop_assert!(false, "unexpected label {}", label);
            }

            let mut cleared = holder.clone();
            prop_assert!(cleared.clear_filter(&label));
            prop_assert_eq!(cleared.state(), &expected);
            prop_assert!(!cleared.active_filters().contains(&label));
            prop_assert_eq!(cleared.active_filter_count() + 1, holder.active_filter_count());
        }
    }

    /// Every result item satisfies the filters that were set.
    #[test]
    fn results_satisfy_query(raw in vec(arb_item(), 0..60), changes in vec(arb_change(), 0..8)) {
        let items = build_items(raw);
        let mut holder = QueryStateHolder::new(QueryConfig::default());
        for change in changes {
            holder.set_filter(change);
        }
        let state = holder.state();

        for item in evaluate(&items, state) {
            prop_assert!(state.price_range.contains(item.price));
            prop_assert!(!state.organic_only || item.is_organic);
            prop_assert!(!state.in_stock_only || item.quantity_available > 0);
            prop_assert!(state.category.is_empty() || item.category == state.category);
            prop_assert!(state.location.is_empty() || item.location_tag == state.location);
        }
    }
}
