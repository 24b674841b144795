//! Contact form

use axum::{extract::State, http::StatusCode, Json};

use folio_core::services::contact_service::{CONTACT_FAILED_MESSAGE, CONTACT_SENT_MESSAGE};
use folio_core::{ContactRequest, DomainError};

use crate::error::ApiError;
use crate::response::{ApiResponse, MessageBody};
use crate::state::AppState;

/// POST /api/v1/contact
pub async fn send_message(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MessageBody>>), ApiError> {
    match state.contact.send(&payload).await {
        Ok(()) => Ok((
            StatusCode::OK,
            Json(ApiResponse::success(MessageBody::new(CONTACT_SENT_MESSAGE))),
        )),
        Err(DomainError::MailFailed(_)) => Err(ApiError::Upstream(CONTACT_FAILED_MESSAGE.to_string())),
        Err(e) => Err(e.into()),
    }
}
