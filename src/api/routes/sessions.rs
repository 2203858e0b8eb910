//! Session Routes
//!
//! - POST /api/v1/sessions - Open a session
//! - GET /api/v1/sessions/:id - Current view of a session
//! - POST /api/v1/sessions/:id/events - Apply one UI event
//! - DELETE /api/v1/sessions/:id - Close a session

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::dto::{EventResponse, SessionResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::session::DashboardEvent;

/// POST /api/v1/sessions
pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    let handle = state.sessions.create().await?;
    let session = handle.lock().await;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id: session.id,
            view: state.dashboard.view(&session.state),
        }),
    ))
}

/// GET /api/v1/sessions/:id
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<SessionResponse>> {
    let id = parse_session_id(&id)?;
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.touch();

    Ok(Json(SessionResponse {
        session_id: id,
        view: state.dashboard.view(&session.state),
    }))
}

/// POST /api/v1/sessions/:id/events
///
/// The event runs to completion under the session lock, so events of one
/// session are applied in arrival order.
pub async fn post_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<DashboardEvent>, JsonRejection>,
) -> ApiResult<Json<EventResponse>> {
    let id = parse_session_id(&id)?;
    let Json(event) = payload?;

    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.touch();

    let event_name = event.name();
    let update = state.dashboard.apply(&mut session.state, event);
    tracing::debug!(
        session_id = %id,
        event = event_name,
        unchanged = update.is_unchanged(),
        "Event applied"
    );

    Ok(Json(EventResponse {
        session_id: id,
        update,
    }))
}

/// DELETE /api/v1/sessions/:id
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_session_id(&id)?;
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::Session(crate::session::SessionError::NotFound(id)))
    }
}

fn parse_session_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::Validation(format!("Invalid session id: {}", raw)))
}
