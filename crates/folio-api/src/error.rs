//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use folio_core::DomainError;
use folio_security::SessionError;

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Session expired")]
    SessionExpired,

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::SessionExpired => (StatusCode::UNAUTHORIZED, "SESSION_EXPIRED"),
            ApiError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            ApiError::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            ApiError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::PayloadTooLarge(msg)
            | ApiError::Upstream(msg) => msg.clone(),
            ApiError::SessionExpired => "Admin session expired".to_string(),
            ApiError::InternalError(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        let body = Json(ApiResponse::<()>::error(code, &self.message()));
        (status, body).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::ValidationError(msg) | DomainError::InvalidImage(msg) => {
                ApiError::BadRequest(msg)
            }
            DomainError::UnknownCollection(name) => {
                ApiError::NotFound(format!("unknown collection '{}'", name))
            }
            e @ DomainError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            DomainError::IdentityError(msg) => ApiError::Unauthorized(msg),
            e @ (DomainError::StoreError(_)
            | DomainError::UploadFailed(_)
            | DomainError::MailFailed(_)) => ApiError::Upstream(e.to_string()),
            DomainError::InternalError(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Unauthenticated => ApiError::Unauthorized(err.to_string()),
            SessionError::Forbidden => ApiError::Forbidden(err.to_string()),
            SessionError::NotFound | SessionError::Expired => ApiError::SessionExpired,
            SessionError::StoreError(msg) => ApiError::InternalError(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_mapping() {
        let err = ApiError::from(DomainError::UploadFailed("timeout".to_string()));
        assert_eq!(err.parts().0, StatusCode::BAD_GATEWAY);
        assert_eq!(err.message(), "Upload failed: timeout");

        let err = ApiError::from(DomainError::NotFound { entity: "Award", id: "a1".to_string() });
        assert_eq!(err.parts(), (StatusCode::NOT_FOUND, "NOT_FOUND"));
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = ApiError::InternalError("secret path".to_string());
        assert_eq!(err.message(), "Internal server error");
    }

    #[test]
    fn test_expired_session_is_unauthorized() {
        let err = ApiError::from(SessionError::Expired);
        assert_eq!(err.parts(), (StatusCode::UNAUTHORIZED, "SESSION_EXPIRED"));
    }
}
