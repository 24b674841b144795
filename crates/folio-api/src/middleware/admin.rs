//! Admin gate
//!
//! Every admin call re-checks the bearer token with the identity provider,
//! applies the admin policy and ties the request to a live guard session
//! owned by the same user. Passing the gate counts as activity.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use folio_core::repositories::IdentityProvider;
use folio_core::AuthUser;
use folio_security::ActivityKind;
use folio_shared::constants::ADMIN_SESSION_HEADER;

use crate::error::ApiError;
use crate::state::AppState;

/// Inserted into request extensions by [`admin_gate`].
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub user: AuthUser,
    pub session_id: String,
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub fn session_id(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(ADMIN_SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::Unauthorized(format!("missing {} header", ADMIN_SESSION_HEADER)))
}

/// Fresh identity check plus the admin policy. Provider failures count as
/// "not signed in".
pub async fn authenticate_admin(state: &AppState, headers: &HeaderMap) -> Result<AuthUser, ApiError> {
    let token = bearer_token(headers)
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;

    let user = match state.identity.resolve(token).await {
        Ok(Some(user)) => user,
        Ok(None) => return Err(ApiError::Unauthorized("invalid or expired token".to_string())),
        Err(e) => {
            debug!("Identity check failed: {}", e);
            return Err(ApiError::Unauthorized("identity check failed".to_string()));
        }
    };

    if !state.admin.is_admin(&user) {
        return Err(ApiError::Forbidden("admin privileges required".to_string()));
    }
    Ok(user)
}

pub async fn admin_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticate_admin(&state, request.headers()).await?;
    let session_id = session_id(request.headers())?.to_string();

    state.sessions.verify_owner(&session_id, &user.id).await?;
    state.sessions.touch(&session_id, ActivityKind::ApiRequest).await?;

    request
        .extensions_mut()
        .insert(AdminContext { user, session_id });
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers), Some("abc"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_session_header_required() {
        let mut headers = HeaderMap::new();
        assert!(matches!(session_id(&headers), Err(ApiError::Unauthorized(_))));

        headers.insert(ADMIN_SESSION_HEADER, HeaderValue::from_static("s-1"));
        assert_eq!(session_id(&headers).unwrap(), "s-1");
    }
}
