//! Route definitions for the admin API.

use crate::handlers;
use crate::state::AppState;
use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the admin router.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/resources/{resourceId}/search", get(handlers::search_all))
        .route("/resources/{resourceId}/search/{query}", get(handlers::search))
        .route(
            "/resources/{resourceId}/actions/{action}",
            get(handlers::resource_action).post(handlers::resource_action),
        )
        .route(
            "/resources/{resourceId}/records/{recordId}/{action}",
            get(handlers::record_action).post(handlers::record_action),
        )
        .route("/dashboard", get(handlers::dashboard));

    Router::new()
        .nest("/api", api)
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
