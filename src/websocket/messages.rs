//! WebSocket Message Types
//!
//! Defines all message types for WebSocket communication between
//! the dashboard page and the server.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::{DashboardEvent, DashboardView, ViewUpdate};

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A UI event for this connection's session
    Event {
        event: DashboardEvent,
    },
    /// Ask for the full current view
    GetView,
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established, session opened
    Connected {
        session_id: Uuid,
        view: DashboardView,
    },
    /// Full view, answer to `get_view`
    View { view: DashboardView },
    /// Outcome of an event
    Update { update: ViewUpdate },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
}
