//! # Info Mundo
//!
//! Reactive backend for a world development indicators dashboard: a
//! choropleth map, a country picker, detail cards and a chart selector kept
//! mutually consistent per browser session.
//!
//! ## Features
//!
//! - **Dataset**: HDI, income and life expectancy series joined with regions
//!   and population snapshots, loaded once at startup
//! - **Charts**: Plotly-compatible figure descriptors for eight chart kinds
//! - **Map**: choropleth over the country polygons, colored by one metric
//! - **Sessions**: one selection state per session, driven by UI events
//! - **Real-time**: WebSocket channel carrying events and view updates
//!
//! ## Modules
//!
//! - [`data`]: dataset loading, joins and the country registry
//! - [`format`]: card text formatting
//! - [`charts`]: chart kinds and figure construction
//! - [`map`]: choropleth rendering
//! - [`session`]: selection state machine and session store
//! - [`api`]: REST API server with Axum
//! - [`websocket`]: WebSocket channel
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use infomundo::config::Config;
//! use infomundo::data::Dataset;
//! use infomundo::session::{Dashboard, DashboardEvent, SelectionState};
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let dataset = Arc::new(Dataset::load(&config.data, &config.assets)?);
//!     let dashboard = Dashboard::new(dataset);
//!
//!     let mut state = SelectionState::default();
//!     dashboard.apply(
//!         &mut state,
//!         DashboardEvent::SelectCountry { value: Some("Brazil".to_string()) },
//!     );
//!
//!     let view = dashboard.view(&state);
//!     println!("{}: {}", view.selection_label, view.cards.population);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod charts;
pub mod config;
pub mod data;
pub mod format;
pub mod map;
pub mod session;
pub mod websocket;

// Re-export top-level types for convenience
pub use api::{build_router, serve, ApiError, AppState};

pub use charts::{build_chart, ChartError, ChartKind, ChartOption, Figure, Scope};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, SessionConfig};

pub use data::{CountryRecord, CountryRegistry, DataError, Dataset, IndicatorStore};

pub use map::{build_choropleth, MapMetric};

pub use session::{
    Dashboard, DashboardEvent, DashboardView, SelectionState, SessionError, SessionStore,
    ViewUpdate,
};

pub use websocket::{websocket_handler, ClientMessage, ServerMessage};
