//! Catalog Routes
//!
//! Static option lists for the dashboard controls.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{CountryListResponse, MetricListResponse};
use crate::api::state::AppState;
use crate::map::{metric_options, MapMetric};

/// GET /api/v1/countries
///
/// Country dropdown options, `Mundo` first.
pub async fn list_countries(State(state): State<Arc<AppState>>) -> Json<CountryListResponse> {
    let countries = state.dashboard.country_options();
    Json(CountryListResponse {
        total: countries.len(),
        countries,
    })
}

/// GET /api/v1/map/metrics
pub async fn list_metrics() -> Json<MetricListResponse> {
    Json(MetricListResponse {
        metrics: metric_options(),
        default: MapMetric::default(),
    })
}
