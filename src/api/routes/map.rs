//! Map Routes
//!
//! GET /api/v1/map?metric=<tag> - Choropleth descriptor for a metric

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{MapParams, MapResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::map::MapMetric;

/// GET /api/v1/map
pub async fn get_map(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MapParams>,
) -> ApiResult<Json<MapResponse>> {
    let metric = match params.metric.as_deref() {
        None | Some("") => MapMetric::default(),
        Some(tag) => tag
            .parse::<MapMetric>()
            .map_err(|e| ApiError::Validation(e.to_string()))?,
    };

    Ok(Json(MapResponse {
        metric,
        figure: state.dashboard.map(metric),
    }))
}
