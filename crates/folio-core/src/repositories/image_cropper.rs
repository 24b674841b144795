//! Image cropper trait (port)

use crate::domain::{CropParams, UploadedFile};
use crate::error::DomainError;

/// CPU-bound; callers run it off the async executor.
#[cfg_attr(test, mockall::automock)]
pub trait ImageCropper: Send + Sync {
    fn crop(&self, file: &UploadedFile, params: &CropParams) -> Result<UploadedFile, DomainError>;
}
