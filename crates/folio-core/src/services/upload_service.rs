//! File uploads through the backend integration. Every failure surfaces as
//! `DomainError::UploadFailed`.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::{CropParams, UploadResult, UploadedFile};
use crate::error::DomainError;
use crate::repositories::{FileStorage, ImageCropper};

pub struct UploadService {
    storage: Arc<dyn FileStorage>,
    cropper: Option<Arc<dyn ImageCropper>>,
    max_bytes: usize,
}

impl UploadService {
    pub fn new(storage: Arc<dyn FileStorage>, max_bytes: usize) -> Self {
        Self {
            storage,
            cropper: None,
            max_bytes,
        }
    }

    pub fn with_cropper(mut self, cropper: Arc<dyn ImageCropper>) -> Self {
        self.cropper = Some(cropper);
        self
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub async fn upload(&self, file: UploadedFile) -> Result<UploadResult, DomainError> {
        if file.is_empty() {
            return Err(fail(&file.file_name, "file is empty".to_string()));
        }
        if file.len() > self.max_bytes {
            return Err(fail(
                &file.file_name,
                format!("file is {} bytes, limit is {}", file.len(), self.max_bytes),
            ));
        }

        let name = file.file_name.clone();
        let size = file.len();
        match self.storage.upload(file).await {
            Ok(result) => {
                info!("Uploaded {} ({} bytes) to {}", name, size, result.url);
                Ok(result)
            }
            Err(DomainError::UploadFailed(reason)) => Err(fail(&name, reason)),
            Err(e) => Err(fail(&name, e.to_string())),
        }
    }
}

impl UploadService {
    /// Crops the image onto the fixed canvas, then uploads the JPEG result.
    /// Bad parameters or an undecodable image are `InvalidImage`.
    pub async fn upload_cropped(
        &self,
        file: UploadedFile,
        params: CropParams,
    ) -> Result<UploadResult, DomainError> {
        params.validate()?;
        let cropper = self
            .cropper
            .clone()
            .ok_or_else(|| DomainError::InternalError("no image cropper configured".to_string()))?;

        let cropped = tokio::task::spawn_blocking(move || cropper.crop(&file, &params))
            .await
            .map_err(|e| DomainError::InternalError(format!("crop task failed: {}", e)))??;

        self.upload(cropped).await
    }
}

fn fail(file_name: &str, reason: String) -> DomainError {
    error!("Upload of {} failed: {}", file_name, reason);
    DomainError::UploadFailed(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CROPPED_FILE_NAME;
    use crate::repositories::file_storage::MockFileStorage;
    use crate::repositories::image_cropper::MockImageCropper;

    #[tokio::test]
    async fn test_upload_returns_url() {
        let mut storage = MockFileStorage::new();
        storage
            .expect_upload()
            .withf(|f| f.file_name == "cv.pdf")
            .returning(|_| Ok(UploadResult { url: "https://cdn.example/cv.pdf".to_string() }));

        let service = UploadService::new(Arc::new(storage), 1024);
        let result = service
            .upload(UploadedFile::new("cv.pdf", "application/pdf", vec![1, 2, 3]))
            .await
            .unwrap();
        assert_eq!(result.url, "https://cdn.example/cv.pdf");
    }

    #[tokio::test]
    async fn test_every_failure_is_upload_failed() {
        let mut storage = MockFileStorage::new();
        storage
            .expect_upload()
            .returning(|_| Err(DomainError::StoreError("timeout".to_string())));
        let service = UploadService::new(Arc::new(storage), 4);

        let empty = service.upload(UploadedFile::new("a.png", "image/png", Vec::new())).await;
        assert!(matches!(empty, Err(DomainError::UploadFailed(_))));

        let large = service.upload(UploadedFile::new("a.png", "image/png", vec![0; 5])).await;
        assert!(matches!(large, Err(DomainError::UploadFailed(_))));

        let remote = service.upload(UploadedFile::new("a.png", "image/png", vec![0; 3])).await;
        match remote {
            Err(DomainError::UploadFailed(reason)) => assert!(reason.contains("timeout")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upload_cropped_sends_cropper_output() {
        let mut cropper = MockImageCropper::new();
        cropper
            .expect_crop()
            .withf(|_, params| params.zoom == 2.0)
            .returning(|_, _| Ok(UploadedFile::new(CROPPED_FILE_NAME, "image/jpeg", vec![0xFF, 0xD8])));

        let mut storage = MockFileStorage::new();
        storage
            .expect_upload()
            .withf(|f| f.file_name == CROPPED_FILE_NAME && f.content_type == "image/jpeg")
            .returning(|_| Ok(UploadResult { url: "https://cdn.example/c.jpg".to_string() }));

        let service = UploadService::new(Arc::new(storage), 1024).with_cropper(Arc::new(cropper));
        let params = CropParams { zoom: 2.0, ..CropParams::default() };
        let result = service
            .upload_cropped(UploadedFile::new("photo.png", "image/png", vec![1, 2, 3]), params)
            .await
            .unwrap();
        assert_eq!(result.url, "https://cdn.example/c.jpg");
    }

    #[tokio::test]
    async fn test_upload_cropped_rejects_bad_params() {
        let mut storage = MockFileStorage::new();
        storage.expect_upload().never();
        let service = UploadService::new(Arc::new(storage), 1024)
            .with_cropper(Arc::new(MockImageCropper::new()));

        let params = CropParams { zoom: 9.0, ..CropParams::default() };
        let result = service
            .upload_cropped(UploadedFile::new("photo.png", "image/png", vec![1]), params)
            .await;
        assert!(matches!(result, Err(DomainError::InvalidImage(_))));
    }
}
