//! File upload trait (port)

use async_trait::async_trait;

use crate::domain::{UploadResult, UploadedFile};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn upload(&self, file: UploadedFile) -> Result<UploadResult, DomainError>;
}
