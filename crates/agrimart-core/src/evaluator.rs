//! # Query Evaluator
//!
//! Filter, then stable sort. The source slice is never touched; each call
//! builds a fresh result.
//!
//! Evaluation is a pure function of `(items, query)`: identical inputs
//! always produce identical output, element for element and in the same
//! order. An empty result is a normal outcome.

use crate::comparator::build_comparator;
use crate::predicate::build_predicate;
use crate::query_state::QueryState;
use crate::CatalogItem;

/// Evaluate a query, returning references into `items`.
pub fn evaluate<'a>(items: &'a [CatalogItem], query: &QueryState) -> Vec<&'a CatalogItem> {
    evaluate_indices(items, query)
        .into_iter()
        .map(|idx| &items[idx])
        .collect()
}

/// Evaluate a query, returning positions into `items`.
///
/// Used by callers that cache results alongside the catalog they own.
pub fn evaluate_indices(items: &[CatalogItem], query: &QueryState) -> Vec<usize> {
    let predicate = build_predicate(query);
    let compare = build_comparator(query.sort_key);

    let mut matched: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| predicate(*item))
        .map(|(idx, _)| idx)
        .collect();

    // `sort_by` is stable: equal keys keep their catalog order.
    matched.sort_by(|&a, &b| compare(&items[a], &items[b]));
    matched
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::SortKey;
    use crate::{Price, Rating};

    fn catalog() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new("1", "Organic Tomatoes", "Vegetables", Price::new(45), 50, 1)
                .with_seller("Ramesh Kumar", "Maharashtra", Rating::from_tenths(48))
                .with_organic(true),
            CatalogItem::new("2", "Fresh Onions", "Vegetables", Price::new(30), 100, 2)
                .with_seller("Suresh Patil", "Karnataka", Rating::from_tenths(45)),
            CatalogItem::new("3", "Organic Apples", "Fruits", Price::new(120), 25, 3)
                .with_seller("Harpreet Singh", "Punjab", Rating::from_tenths(49))
                .with_organic(true),
        ]
    }

    fn ids(result: &[&CatalogItem]) -> Vec<String> {
        result.iter().map(|item| item.id.0.clone()).collect()
    }

    #[test]
    fn default_query_orders_newest_first() {
        let items = catalog();
        let result = evaluate(&items, &QueryState::default());
        assert_eq!(ids(&result), vec!["3", "2", "1"]);
    }

    #[test]
    fn filters_before_sorting() {
        let items = catalog();
        let query = QueryState {
            organic_only: true,
            sort_key: SortKey::PriceAsc,
            ..QueryState::default()
        };
        assert_eq!(ids(&evaluate(&items, &query)), vec!["1", "3"]);
    }

    #[test]
    fn source_is_left_untouched() {
        let items = catalog();
        let before = items.clone();
        let query = QueryState {
            sort_key: SortKey::PriceDesc,
            ..QueryState::default()
        };
        let _ = evaluate(&items, &query);
        assert_eq!(items, before);
    }

    #[test]
    fn empty_result_is_valid() {
        let items = catalog();
        let query = QueryState {
            category: "Dairy".to_string(),
            ..QueryState::default()
        };
        assert!(evaluate(&items, &query).is_empty());
        assert!(evaluate(&[], &QueryState::default()).is_empty());
    }

    #[test]
    fn indices_point_into_source() {
        let items = catalog();
        let query = QueryState {
            sort_key: SortKey::PopularityDesc,
            ..QueryState::default()
        };
        assert_eq!(evaluate_indices(&items, &query), vec![1, 0, 2]);
    }
}
