//! Auth provider over the BaaS `User/me` endpoint

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use tracing::{debug, warn};

use folio_core::domain::AuthUser;
use folio_core::error::DomainError;
use folio_core::repositories::IdentityProvider;

use super::client::BackendClient;

pub struct RemoteIdentityProvider {
    client: BackendClient,
}

impl RemoteIdentityProvider {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityProvider for RemoteIdentityProvider {
    async fn resolve(&self, token: &str) -> Result<Option<AuthUser>, DomainError> {
        let url = format!("{}/me", self.client.entity_url("User"));
        let request = self.client.request_as(Method::GET, &url, token);

        match self.client.send_json::<AuthUser>(request).await {
            Ok(user) => {
                debug!("Resolved user {}", user.id);
                Ok(Some(user))
            }
            Err(e)
                if matches!(
                    e.status(),
                    Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND)
                ) =>
            {
                debug!("Token not accepted: {}", e);
                Ok(None)
            }
            Err(e) => {
                warn!("Identity check failed: {}", e);
                Err(DomainError::IdentityError(e.to_string()))
            }
        }
    }

    fn login_url(&self, return_url: &str) -> String {
        self.client.login_redirect(return_url)
    }
}
