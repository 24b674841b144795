//! Email delivery trait (port)

use async_trait::async_trait;

use crate::domain::EmailMessage;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_email(&self, message: &EmailMessage) -> Result<(), DomainError>;
}
