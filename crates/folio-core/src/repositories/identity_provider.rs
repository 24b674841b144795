//! Identity provider trait (port)

use async_trait::async_trait;

use crate::domain::AuthUser;
use crate::error::DomainError;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves the user behind `token`. `None` when the token is invalid or expired.
    async fn resolve(&self, token: &str) -> Result<Option<AuthUser>, DomainError>;

    /// Login page URL that returns the visitor to `return_url` afterwards.
    fn login_url(&self, return_url: &str) -> String;
}
