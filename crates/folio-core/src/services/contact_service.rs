//! Contact form delivery to the site owner

use std::sync::Arc;

use folio_shared::utils::mask_email;
use tracing::{error, info};
use validator::Validate;

use crate::domain::{ContactRequest, EmailMessage};
use crate::error::DomainError;
use crate::repositories::Mailer;

pub const CONTACT_SENT_MESSAGE: &str = "Message sent successfully!";
pub const CONTACT_FAILED_MESSAGE: &str = "Failed to send message. Please try again.";

pub struct ContactService {
    mailer: Arc<dyn Mailer>,
    owner_email: String,
}

impl ContactService {
    pub fn new(mailer: Arc<dyn Mailer>, owner_email: String) -> Self {
        Self { mailer, owner_email }
    }

    pub async fn send(&self, request: &ContactRequest) -> Result<(), DomainError> {
        request.validate()?;

        let message = EmailMessage::from_contact(request, &self.owner_email);
        self.mailer.send_email(&message).await.map_err(|e| {
            error!("Contact message from {} not delivered: {}", mask_email(&request.email), e);
            DomainError::MailFailed(e.to_string())
        })?;

        info!("Contact message delivered from {}", mask_email(&request.email));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::mailer::MockMailer;

    fn request() -> ContactRequest {
        ContactRequest {
            name: "Grace".to_string(),
            email: "grace@example.org".to_string(),
            message: "Let's collaborate".to_string(),
        }
    }

    #[tokio::test]
    async fn test_send_addresses_owner() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send_email()
            .withf(|m| m.to == "owner@example.org" && m.subject == "New Message from Grace")
            .times(1)
            .returning(|_| Ok(()));

        let service = ContactService::new(Arc::new(mailer), "owner@example.org".to_string());
        service.send(&request()).await.unwrap();
    }

    #[tokio::test]
    async fn test_send_failure_is_reported() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send_email()
            .returning(|_| Err(DomainError::StoreError("smtp down".to_string())));

        let service = ContactService::new(Arc::new(mailer), "owner@example.org".to_string());
        assert!(matches!(
            service.send(&request()).await,
            Err(DomainError::MailFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_request_is_not_sent() {
        let mut mailer = MockMailer::new();
        mailer.expect_send_email().never();

        let service = ContactService::new(Arc::new(mailer), "owner@example.org".to_string());
        let mut bad = request();
        bad.email = "not-an-email".to_string();
        assert!(matches!(
            service.send(&bad).await,
            Err(DomainError::ValidationError(_))
        ));
    }
}
