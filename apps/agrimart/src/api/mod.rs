//! # Agrimart HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /status` - Session status
//! - `GET /products` - Current session result
//! - `POST /products/search` - Stateless one-off query
//! - `POST /filters` - Apply one filter change
//! - `POST /filters/clear` - Clear a filter by its active label
//! - `POST /filters/clear-all` - Reset every filter
//! - `POST /filters/seed` - Seed the category from navigation
//! - `GET /facets` - Category and location buckets
//! - `GET /sort-options` - Sort dropdown entries
//!
//! ## Configuration (Environment Variables)
//!
//! - `AGRIMART_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `AGRIMART_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)

mod handlers;
mod middleware;
mod types;

pub use crate::config::DEFAULT_RATE_LIMIT;
pub use middleware::create_rate_limiter;
#[allow(unused_imports)]
pub use handlers::{
    apply_filter_handler, clear_all_handler, clear_filter_handler, facets_handler,
    health_handler, products_handler, search_handler, seed_handler, sort_options_handler,
    status_handler,
};
#[allow(unused_imports)]
pub use types::{
    ClearFilterRequest, FacetsResponse, HealthResponse, MAX_RESULT_LIMIT, ProductJson,
    ProductsResponse, SearchRequest, SeedRequest, SortOptionJson, StatusResponse,
};

use agrimart_core::{MarketError, Session};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Maximum accepted request body (256 KB).
const MAX_BODY_SIZE: usize = 256 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the browsing session.
#[derive(Clone)]
pub struct AppState {
    /// The session holding catalog, query state and result.
    pub session: Arc<RwLock<Session>>,
    /// Requests per second; 0 disables rate limiting.
    pub rate_limit: u32,
}

impl AppState {
    /// Create new app state with a session and the default rate limit.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            rate_limit: DEFAULT_RATE_LIMIT,
        }
    }

    #[must_use]
    pub fn with_rate_limit(mut self, rate_limit: u32) -> Self {
        self.rate_limit = rate_limit;
        self
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from `AGRIMART_CORS_ORIGINS`.
///
/// - `*`: allows all origins
/// - unset: localhost only
/// - otherwise: comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("AGRIMART_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins (AGRIMART_CORS_ORIGINS=*)");
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in AGRIMART_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE])
            }
        }
        None => {
            tracing::debug!("CORS: No AGRIMART_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Restrictive CORS layer for local storefront development.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:5173",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:5173",
    ]
    .into_iter()
    .filter_map(|origin| origin.parse::<HeaderValue>().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate limiting (if enabled)
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/status", get(handlers::status_handler))
        .route("/products", get(handlers::products_handler))
        .route("/products/search", post(handlers::search_handler))
        .route("/filters", post(handlers::apply_filter_handler))
        .route("/filters/clear", post(handlers::clear_filter_handler))
        .route("/filters/clear-all", post(handlers::clear_all_handler))
        .route("/filters/seed", post(handlers::seed_handler))
        .route("/facets", get(handlers::facets_handler))
        .route("/sort-options", get(handlers::sort_options_handler));

    if state.rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", state.rate_limit);
        router = router.layer(axum_middleware::from_fn_with_state(
            create_rate_limiter(state.rate_limit),
            middleware::rate_limit_middleware,
        ));
    } else {
        tracing::info!("Rate limiting disabled");
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer())
                .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and run until Ctrl-C.
pub async fn run_server(addr: &str, state: AppState) -> Result<(), MarketError> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| MarketError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("Agrimart HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| MarketError::IoError(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
