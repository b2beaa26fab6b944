//! Axum router construction.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::FoundingsQuery;

/// Build the router for the query server.
///
/// CORS allows any origin: the endpoints are read-only JSON meant to be
/// fetched by separately hosted pages.
pub fn build_router<Q: FoundingsQuery>(state: Arc<Q>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/foundings.json", get(handlers::foundings::<Q>))
        .route("/regions.json", get(handlers::regions::<Q>))
        .route("/summary.json", get(handlers::summary::<Q>))
        .route("/health", get(handlers::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
