//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::{ApiConfig, SessionConfig};
use crate::data::Dataset;
use crate::session::{Dashboard, SessionStore};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Event processor over the immutable dataset
    pub dashboard: Dashboard,
    /// Live sessions
    pub sessions: Arc<SessionStore>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, config: ApiConfig, sessions: SessionConfig) -> Self {
        Self {
            dashboard: Dashboard::new(dataset),
            sessions: Arc::new(SessionStore::new(sessions)),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        self.dashboard.dataset()
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
