//! WebSocket Handler
//!
//! Handles WebSocket upgrade requests and manages the connection lifecycle.
//! Each connection owns one session; it is opened on connect and closed on
//! disconnect. Messages are processed one at a time, in arrival order.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{
    stream::{SplitSink, StreamExt},
    SinkExt,
};
use std::sync::Arc;
use uuid::Uuid;

use super::messages::{ClientMessage, ServerMessage};
use crate::api::AppState;
use crate::session::SessionHandle;

type Sender = SplitSink<WebSocket, Message>;

/// WebSocket upgrade handler
///
/// This is the entry point for WebSocket connections.
/// It upgrades the HTTP connection to WebSocket and starts message handling.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    let handle = match state.sessions.create_for_connection().await {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!(error = %e, "Failed to open WebSocket session");
            // Send error message before closing
            let _ = send(&mut sender, &ServerMessage::Error {
                message: e.to_string(),
            })
            .await;
            return;
        }
    };

    let (session_id, view) = {
        let session = handle.lock().await;
        (session.id, state.dashboard.view(&session.state))
    };
    tracing::info!(session_id = %session_id, "WebSocket connected");

    if send(&mut sender, &ServerMessage::Connected { session_id, view })
        .await
        .is_ok()
    {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(msg) => {
                    let reply = match handle_ws_message(&state, &handle, session_id, msg).await {
                        Reply::Send(reply) => reply,
                        Reply::None => continue,
                        Reply::Close => break,
                    };
                    if send(&mut sender, &reply).await.is_err() {
                        tracing::debug!(
                            session_id = %session_id,
                            "WebSocket send failed, closing connection"
                        );
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        session_id = %session_id,
                        error = %e,
                        "WebSocket receive error"
                    );
                    break;
                }
            }
        }
    } else {
        tracing::error!(session_id = %session_id, "Failed to send connected message");
    }

    // Cleanup: the session lives only as long as the connection
    state.sessions.remove(session_id).await;
    tracing::info!(session_id = %session_id, "WebSocket disconnected");
}

enum Reply {
    Send(ServerMessage),
    None,
    Close,
}

async fn send(sender: &mut Sender, message: &ServerMessage) -> Result<(), axum::Error> {
    match serde_json::to_string(message) {
        Ok(text) => sender.send(Message::Text(text)).await,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize message");
            Ok(())
        }
    }
}

/// Handle a received WebSocket message
async fn handle_ws_message(
    state: &AppState,
    handle: &SessionHandle,
    session_id: Uuid,
    message: Message,
) -> Reply {
    match message {
        Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
            Ok(client_msg) => Reply::Send(handle_client_message(state, handle, client_msg).await),
            Err(e) => {
                tracing::debug!(
                    session_id = %session_id,
                    error = %e,
                    text = %text,
                    "Invalid client message"
                );
                // Send error but keep connection open
                Reply::Send(ServerMessage::Error {
                    message: format!("Invalid message format: {}", e),
                })
            }
        },
        Message::Binary(_) => Reply::Send(ServerMessage::Error {
            message: "Binary messages not supported".to_string(),
        }),
        // Axum answers pings itself; they still count as activity
        Message::Ping(_) | Message::Pong(_) => {
            handle.lock().await.touch();
            Reply::None
        }
        Message::Close(_) => {
            tracing::debug!(session_id = %session_id, "Client requested close");
            Reply::Close
        }
    }
}

/// Handle a parsed client message
async fn handle_client_message(
    state: &AppState,
    handle: &SessionHandle,
    message: ClientMessage,
) -> ServerMessage {
    let mut session = handle.lock().await;
    session.touch();

    match message {
        ClientMessage::Event { event } => {
            let update = state.dashboard.apply(&mut session.state, event);
            ServerMessage::Update { update }
        }
        ClientMessage::GetView => ServerMessage::View {
            view: state.dashboard.view(&session.state),
        },
        ClientMessage::Ping => ServerMessage::Pong,
    }
}
