//! Admin session lifecycle

use axum::{
    extract::{Extension, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use tracing::{debug, info};

use folio_security::{GuardSnapshot, OpenedSession, SessionError};

use crate::error::ApiError;
use crate::middleware::{authenticate_admin, bearer_token, session_id, AdminContext};
use crate::response::{ApiResponse, MessageBody};
use crate::state::AppState;

/// POST /api/v1/admin/session - admin login for the bearer token.
pub async fn open_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<ApiResponse<OpenedSession>>), ApiError> {
    let token = bearer_token(&headers)
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;

    let opened = state.sessions.open(token).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(opened))))
}

/// GET /api/v1/admin/session - status read; not counted as activity.
pub async fn session_status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<GuardSnapshot>>, ApiError> {
    let user = authenticate_admin(&state, &headers).await?;
    let id = session_id(&headers)?;

    state.sessions.verify_owner(id, &user.id).await?;
    let snapshot = state.sessions.snapshot(id).await?;
    Ok(Json(ApiResponse::success(snapshot)))
}

/// POST /api/v1/admin/session/activity - explicit pulse, e.g. "stay logged in".
/// The admin gate already counted it.
pub async fn record_activity(Extension(ctx): Extension<AdminContext>) -> Json<ApiResponse<MessageBody>> {
    debug!(session_id = %ctx.session_id, "Activity recorded");
    Json(ApiResponse::success(MessageBody::new("Activity recorded")))
}

/// DELETE /api/v1/admin/session - explicit logout; idempotent.
pub async fn close_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<MessageBody>>, ApiError> {
    let user = authenticate_admin(&state, &headers).await?;
    let id = session_id(&headers)?;

    match state.sessions.verify_owner(id, &user.id).await {
        Ok(()) | Err(SessionError::NotFound | SessionError::Expired) => {}
        Err(e) => return Err(e.into()),
    }
    state.sessions.close(id).await;
    info!("Admin {} logged out", user.id);

    Ok(Json(ApiResponse::success(MessageBody::new("Logged out"))))
}
