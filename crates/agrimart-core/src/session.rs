//! # Session Module
//!
//! A browsing session: one catalog, one query state, and the current
//! result.
//!
//! The session is the single writer of its [`QueryStateHolder`]. Each
//! mutation runs to completion before returning:
//! - the state is updated and clamped
//! - the active-filter labels are recomputed
//! - the result is re-evaluated
//! - the revision counter advances by exactly one
//!
//! `clear_all` is one mutation, not one per field, so observers polling the
//! revision never see a half-reset state. Filter changes, clears and seeds
//! that change nothing (an unknown label, a field already at its default,
//! the value already selected) leave the revision alone.

use crate::config::QueryConfig;
use crate::evaluator::evaluate_indices;
use crate::facets::{FacetField, FacetValue, facet_counts};
use crate::query_state::{FilterChange, QueryState, QueryStateHolder};
use crate::{Catalog, CatalogItem};

/// Catalog plus query state, with results kept in sync.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    holder: QueryStateHolder,
    /// Positions into `catalog.items()`, in result order.
    results: Vec<usize>,
    revision: u64,
}

impl Session {
    /// Create a session with default query state.
    #[must_use]
    pub fn new(catalog: Catalog, config: QueryConfig) -> Self {
        Self::from_holder(catalog, QueryStateHolder::new(config))
    }

    /// Create a session whose category is seeded from a navigational
    /// parameter.
    #[must_use]
    pub fn with_category_seed(catalog: Catalog, config: QueryConfig, seed: Option<&str>) -> Self {
        Self::from_holder(catalog, QueryStateHolder::with_category_seed(config, seed))
    }

    fn from_holder(catalog: Catalog, holder: QueryStateHolder) -> Self {
        let mut session = Self {
            catalog,
            holder,
            results: Vec::new(),
            revision: 0,
        };
        session.results = evaluate_indices(session.catalog.items(), session.holder.state());
        session
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Apply a filter change and re-evaluate.
    ///
    /// Returns `false` when the change left the state as it was.
    pub fn apply(&mut self, change: FilterChange) -> bool {
        let changed = self.holder.set_filter(change);
        if changed {
            self.refresh();
        }
        changed
    }

    /// Reset the field a label came from.
    ///
    /// Returns `false` for unrecognized labels and for fields already at
    /// their default.
    pub fn clear_filter(&mut self, label: &str) -> bool {
        let cleared = self.holder.clear_filter(label);
        if cleared {
            self.refresh();
        }
        cleared
    }

    /// Reset every field in a single update.
    pub fn clear_all(&mut self) {
        self.holder.clear_all();
        self.refresh();
    }

    /// Re-seed the category after the navigational parameter changed.
    pub fn seed_category(&mut self, seed: Option<&str>) -> bool {
        let seeded = self.holder.seed_category(seed);
        if seeded {
            self.refresh();
        }
        seeded
    }

    fn refresh(&mut self) {
        self.results = evaluate_indices(self.catalog.items(), self.holder.state());
        self.revision = self.revision.saturating_add(1);
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Current result, in display order.
    #[must_use]
    pub fn results(&self) -> Vec<&CatalogItem> {
        let items = self.catalog.items();
        self.results.iter().map(|&idx| &items[idx]).collect()
    }

    #[must_use]
    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    /// Labels for the non-default fields.
    #[must_use]
    pub fn active_filters(&self) -> &[String] {
        self.holder.active_filters()
    }

    #[must_use]
    pub fn state(&self) -> &QueryState {
        self.holder.state()
    }

    #[must_use]
    pub fn config(&self) -> &QueryConfig {
        self.holder.config()
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Number of mutations applied since creation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Facet counts for `field` under the current query.
    #[must_use]
    pub fn facets(&self, field: FacetField) -> Vec<FacetValue> {
        facet_counts(self.catalog.items(), self.holder.state(), field)
    }
}

// =============================================================================
// TESTS
// =============================================================================
