//! File upload over the BaaS `UploadFile` integration

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Deserialize;

use folio_core::domain::{UploadResult, UploadedFile};
use folio_core::error::DomainError;
use folio_core::repositories::FileStorage;

use super::client::BackendClient;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    file_url: String,
}

pub struct RemoteFileStorage {
    client: BackendClient,
}

impl RemoteFileStorage {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FileStorage for RemoteFileStorage {
    async fn upload(&self, file: UploadedFile) -> Result<UploadResult, DomainError> {
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|e| DomainError::UploadFailed(format!("invalid content type: {}", e)))?;
        let form = Form::new().part("file", part);

        let request = self
            .client
            .request(Method::POST, &self.client.integration_url("UploadFile"))
            .multipart(form);

        let response: UploadResponse = self
            .client
            .send_json(request)
            .await
            .map_err(|e| DomainError::UploadFailed(e.to_string()))?;

        Ok(UploadResult {
            url: response.file_url,
        })
    }
}
