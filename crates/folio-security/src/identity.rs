//! Auth provider seen by the session guard

use std::sync::Arc;

use async_trait::async_trait;
use folio_core::repositories::IdentityProvider;
use folio_core::AuthUser;

use crate::error::AuthError;

/// Identity of the current browsing context.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// `Ok(None)` when nobody is signed in. Transport failures are errors; the
    /// guard treats them as `None`.
    async fn current_user(&self) -> Result<Option<AuthUser>, AuthError>;

    fn login_url(&self, return_url: &str) -> String;
}

/// Binds a bearer token to an [`IdentityProvider`].
pub struct TokenIdentity {
    provider: Arc<dyn IdentityProvider>,
    token: String,
}

impl TokenIdentity {
    pub fn new(provider: Arc<dyn IdentityProvider>, token: impl Into<String>) -> Self {
        Self {
            provider,
            token: token.into(),
        }
    }
}

#[async_trait]
impl AuthProvider for TokenIdentity {
    async fn current_user(&self) -> Result<Option<AuthUser>, AuthError> {
        if self.token.is_empty() {
            return Ok(None);
        }
        self.provider
            .resolve(&self.token)
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))
    }

    fn login_url(&self, return_url: &str) -> String {
        self.provider.login_url(return_url)
    }
}
