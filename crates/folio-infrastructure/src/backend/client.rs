// ============================================================================
// Folio Infrastructure - BaaS HTTP client
// File: crates/folio-infrastructure/src/backend/client.rs
// ============================================================================

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use folio_shared::config::BackendSettings;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Unexpected backend response: {0}")]
    Decode(String),

    #[error("Invalid record id: {0:?}")]
    InvalidId(String),
}

impl BackendError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            BackendError::Transport(e) => e.status(),
            BackendError::Decode(_) | BackendError::InvalidId(_) => None,
        }
    }
}

/// Shared handle to the app's BaaS API. Cheap to clone.
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
    app_id: String,
    login_url: String,
    service_token: Option<String>,
}

impl BackendClient {
    pub fn new(settings: &BackendSettings) -> Result<Self, BackendError> {
        let http = Client::builder().timeout(settings.timeout()).build()?;
        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            app_id: settings.app_id.clone(),
            login_url: settings.login_url.clone(),
            service_token: settings.service_token.clone().filter(|t| !t.is_empty()),
        })
    }

    fn app_url(&self) -> String {
        format!("{}/api/apps/{}", self.base_url, self.app_id)
    }

    pub fn entity_url(&self, entity: &str) -> String {
        format!("{}/entities/{}", self.app_url(), entity)
    }

    /// The id is pushed as one escaped path segment.
    pub fn record_url(&self, entity: &str, id: &str) -> Result<String, BackendError> {
        if id.is_empty() || id == "." || id == ".." {
            return Err(BackendError::InvalidId(id.to_string()));
        }
        let mut url = Url::parse(&self.entity_url(entity))
            .map_err(|_| BackendError::InvalidId(id.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidId(id.to_string()))?
            .push(id);
        Ok(url.to_string())
    }

    pub fn integration_url(&self, endpoint: &str) -> String {
        format!("{}/integration-endpoints/Core/{}", self.app_url(), endpoint)
    }

    /// `{login_url}?from_url=<return>&app_id=<app>`
    pub fn login_redirect(&self, return_url: &str) -> String {
        let params = [("from_url", return_url), ("app_id", self.app_id.as_str())];
        match Url::parse_with_params(&self.login_url, &params) {
            Ok(url) => url.to_string(),
            Err(e) => {
                warn!("Invalid login URL {}: {}", self.login_url, e);
                self.login_url.clone()
            }
        }
    }

    /// Request authenticated with the service token, when one is configured.
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.service_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Request authenticated as the end user behind `token`.
    pub fn request_as(&self, method: Method, url: &str, token: &str) -> RequestBuilder {
        self.http.request(method, url).bearer_auth(token)
    }

    pub async fn send(&self, request: RequestBuilder) -> Result<Response, BackendError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!("Backend error {}: {}", status, body);
        Err(BackendError::Status { status, body })
    }

    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }
}
