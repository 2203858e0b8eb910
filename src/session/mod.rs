//! Sessions
//!
//! Per-browser dashboard state and the engine that reacts to UI events.
//!
//! ## Architecture
//!
//! - **SelectionState**: country/world selection, chart kind and map metric
//! - **Dashboard**: applies [`DashboardEvent`]s and derives the [`DashboardView`]
//! - **SessionStore**: owns one state per session, with a cap and idle sweep

mod engine;
mod events;
mod state;
mod store;
mod view;

pub use engine::{CountryOption, Dashboard};
pub use events::{ClickOrigin, DashboardEvent};
pub use state::{ScopeMismatch, Selection, SelectionState, WORLD};
pub use store::{Session, SessionHandle, SessionStore};
pub use view::{ChartView, DashboardView, DetailCards, ViewUpdate};

use thiserror::Error;
use uuid::Uuid;

/// Errors raised by the session store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(Uuid),

    #[error("Too many sessions (limit: {0})")]
    TooManySessions(usize),
}
