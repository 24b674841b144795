//! Email delivery over the BaaS `SendEmail` integration

use async_trait::async_trait;
use reqwest::Method;
use tracing::info;

use folio_core::domain::EmailMessage;
use folio_core::error::DomainError;
use folio_core::repositories::Mailer;
use folio_shared::utils::mask_email;

use super::client::BackendClient;

pub struct RemoteMailer {
    client: BackendClient,
}

impl RemoteMailer {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Mailer for RemoteMailer {
    async fn send_email(&self, message: &EmailMessage) -> Result<(), DomainError> {
        let request = self
            .client
            .request(Method::POST, &self.client.integration_url("SendEmail"))
            .json(message);

        self.client
            .send(request)
            .await
            .map_err(|e| DomainError::MailFailed(e.to_string()))?;
        info!("Email sent to {}", mask_email(&message.to));
        Ok(())
    }
}
