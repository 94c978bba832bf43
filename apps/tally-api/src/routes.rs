//! API Routes
//!
//! ```text
//! POST /receipts/process       → process_receipt   (API key)
//! GET  /receipts/{id}/points   → get_points        (API key)
//! *                            → 404 not found     (no key needed)
//! ```
//!
//! The key check wraps each route's whole method router, so a wrong method
//! on a known path answers 401 without a key and 405 with one.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::auth::require_api_key;
use crate::handlers::{get_points, process_receipt, route_not_found};
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/{id}/points", get(get_points));

    // Route layer: only matched routes are checked, the fallback is not
    if state.auth.enabled {
        router = router.route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));
    }

    router
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
