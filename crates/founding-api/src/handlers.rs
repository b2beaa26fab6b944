//! Endpoint handlers.
//!
//! Each data handler assembles the window through [`FoundingsQuery`] and
//! serializes the result. Any failure becomes an [`ApiError`] response.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use founding_types::{Founding, RegionCount, WindowSummary};

use crate::error::ApiError;
use crate::state::FoundingsQuery;

/// `GET /foundings.json` -- every founding in the window.
pub async fn foundings<Q: FoundingsQuery>(
    State(state): State<Arc<Q>>,
) -> Result<Json<Vec<Founding>>, ApiError> {
    Ok(Json(state.recent_foundings().await?))
}

/// `GET /regions.json` -- foundings per region.
pub async fn regions<Q: FoundingsQuery>(
    State(state): State<Arc<Q>>,
) -> Result<Json<Vec<RegionCount>>, ApiError> {
    Ok(Json(state.region_counts().await?))
}

/// `GET /summary.json` -- sample size and time span.
pub async fn summary<Q: FoundingsQuery>(
    State(state): State<Arc<Q>>,
) -> Result<Json<WindowSummary>, ApiError> {
    Ok(Json(state.summary().await?))
}

/// `GET /health` -- liveness probe. Never touches upstream.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
