//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{
        ClearFilterRequest, FacetsResponse, HealthResponse, ProductsResponse, SearchRequest,
        SeedRequest, SortOptionJson, StatusResponse, validate_change,
    },
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use agrimart_core::{FacetField, FilterChange, SortKey, evaluate};

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// STATUS HANDLER
// =============================================================================

/// Get session status.
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.read().await;
    (StatusCode::OK, Json(StatusResponse::from_session(&session)))
}

// =============================================================================
// PRODUCTS HANDLERS
// =============================================================================

/// Current result of the shared session.
pub async fn products_handler(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.read().await;
    (StatusCode::OK, Json(ProductsResponse::from_session(&session, false)))
}

/// Evaluate a one-off query against the catalog without touching the
/// session.
pub async fn search_handler(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> impl IntoResponse {
    let session = state.session.read().await;

    let holder = match request.to_holder(session.config()) {
        Ok(holder) => holder,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ProductsResponse::error(format!("Invalid search: {}", e))),
            );
        }
    };

    let results = evaluate(session.catalog().items(), holder.state());
    tracing::debug!(matches = results.len(), "Stateless search evaluated");
    (
        StatusCode::OK,
        Json(ProductsResponse::from_search(
            &holder,
            &results,
            request.effective_limit(),
        )),
    )
}

// =============================================================================
// FILTER HANDLERS
// =============================================================================

/// Apply one filter change to the session.
pub async fn apply_filter_handler(
    State(state): State<AppState>,
    Json(change): Json<FilterChange>,
) -> impl IntoResponse {
    if let Err(e) = validate_change(&change) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ProductsResponse::error(format!("Invalid filter: {}", e))),
        );
    }

    let mut session = state.session.write().await;
    tracing::info!(change = ?change, "Applying filter change");
    let changed = session.apply(change);
    (StatusCode::OK, Json(ProductsResponse::from_session(&session, changed)))
}

/// Clear one filter by its active label.
///
/// An unknown label is not an error; the response reports `changed: false`.
pub async fn clear_filter_handler(
    State(state): State<AppState>,
    Json(request): Json<ClearFilterRequest>,
) -> impl IntoResponse {
    let mut session = state.session.write().await;
    let changed = session.clear_filter(&request.label);
    if changed {
        tracing::info!(label = %request.label, "Cleared filter");
    } else {
        tracing::debug!(label = %request.label, "No active filter with this label");
    }
    (StatusCode::OK, Json(ProductsResponse::from_session(&session, changed)))
}

/// Reset every filter to its default.
pub async fn clear_all_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut session = state.session.write().await;
    session.clear_all();
    tracing::info!("Cleared all filters");
    (StatusCode::OK, Json(ProductsResponse::from_session(&session, true)))
}

/// Seed the category from a navigational parameter.
pub async fn seed_handler(
    State(state): State<AppState>,
    Json(request): Json<SeedRequest>,
) -> impl IntoResponse {
    if let Some(category) = &request.category {
        if let Err(e) = validate_change(&FilterChange::Category(category.clone())) {
            return (
                StatusCode::BAD_REQUEST,
                Json(ProductsResponse::error(format!("Invalid seed: {}", e))),
            );
        }
    }

    let mut session = state.session.write().await;
    let changed = session.seed_category(request.category.as_deref());
    (StatusCode::OK, Json(ProductsResponse::from_session(&session, changed)))
}

// =============================================================================
// FACETS & SORT OPTIONS
// =============================================================================

/// Category and location buckets under the session's other filters.
pub async fn facets_handler(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.read().await;
    let response = FacetsResponse {
        categories: session.facets(FacetField::Category),
        locations: session.facets(FacetField::Location),
    };
    (StatusCode::OK, Json(response))
}

/// Sort dropdown entries in display order.
pub async fn sort_options_handler() -> impl IntoResponse {
    let options: Vec<SortOptionJson> = SortKey::ALL.into_iter().map(SortOptionJson::from).collect();
    Json(options)
}
