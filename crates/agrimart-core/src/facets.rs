//! # Facets
//!
//! Distinct category/location values with match counts, for populating
//! filter selectors from data.
//!
//! A facet is counted with its own filter removed: with `category =
//! "Fruits"` selected, the category facet still lists every category the
//! other filters admit, so the user can switch between them.

use crate::evaluator::evaluate;
use crate::query_state::QueryState;
use crate::CatalogItem;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A field that can be faceted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetField {
    Category,
    Location,
}

/// One facet bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValue {
    pub value: String,
    pub count: usize,
}

/// Count items per distinct value of `field` under `query`.
///
/// Ordered by count descending, then value ascending. Items with an empty
/// location are not bucketed.
pub fn facet_counts(items: &[CatalogItem], query: &QueryState, field: FacetField) -> Vec<FacetValue> {
    let relaxed = match field {
        FacetField::Category => query.without_category(),
        FacetField::Location => query.without_location(),
    };

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for item in evaluate(items, &relaxed) {
        let value = match field {
            FacetField::Category => item.category.as_str(),
            FacetField::Location => item.location_tag.as_str(),
        };
        if value.is_empty() {
            continue;
        }
        *counts.entry(value).or_default() += 1;
    }

    let mut facets: Vec<FacetValue> = counts
        .into_iter()
        .map(|(value, count)| FacetValue {
            value: value.to_string(),
            count,
        })
        .collect();
    // BTreeMap order is the tiebreak.
    facets.sort_by(|a, b| b.count.cmp(&a.count));
    facets
}
