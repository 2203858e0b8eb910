//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::charts::Figure;
use crate::map::{MapMetric, MetricOption};
use crate::session::{CountryOption, DashboardView, ViewUpdate};

// ============================================
// SESSION DTOs
// ============================================

/// Response to session creation and lookup
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub view: DashboardView,
}

/// Response to an applied event
#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub update: ViewUpdate,
}

// ============================================
// CATALOG DTOs
// ============================================

/// Country dropdown options
#[derive(Debug, Serialize)]
pub struct CountryListResponse {
    pub countries: Vec<CountryOption>,
    pub total: usize,
}

/// Map metric radio options
#[derive(Debug, Serialize)]
pub struct MetricListResponse {
    pub metrics: Vec<MetricOption>,
    pub default: MapMetric,
}

// ============================================
// MAP DTOs
// ============================================

/// Query parameters for the choropleth
#[derive(Debug, Deserialize)]
pub struct MapParams {
    /// Metric tag; defaults to `idh`
    #[serde(default)]
    pub metric: Option<String>,
}

/// Choropleth descriptor
#[derive(Debug, Serialize)]
pub struct MapResponse {
    pub metric: MapMetric,
    pub figure: Figure,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy"
    pub status: String,
    /// Number of countries loaded
    pub countries: usize,
    /// Number of live sessions
    pub sessions: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Service version
    pub version: String,
}
