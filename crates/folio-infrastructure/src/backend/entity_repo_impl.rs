// ============================================================================
// Folio Infrastructure - BaaS Entity Repository
// File: crates/folio-infrastructure/src/backend/entity_repo_impl.rs
// ============================================================================

use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use tracing::{error, info};

use folio_core::domain::Entity;
use folio_core::error::DomainError;
use folio_core::repositories::EntityRepository;
use folio_shared::FieldPatch;

use super::client::{BackendClient, BackendError};

/// `/entities/{T::NAME}` over the BaaS REST API.
pub struct RemoteEntityRepository<T> {
    client: BackendClient,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> RemoteEntityRepository<T> {
    pub fn new(client: BackendClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    fn map_err(&self, id: Option<&str>, err: BackendError) -> DomainError {
        if let (BackendError::InvalidId(_), Some(id)) = (&err, id) {
            return DomainError::NotFound {
                entity: T::NAME,
                id: id.to_string(),
            };
        }
        match (err.status(), id) {
            (Some(StatusCode::NOT_FOUND), Some(id)) => DomainError::NotFound {
                entity: T::NAME,
                id: id.to_string(),
            },
            _ => {
                error!("{} request failed: {}", T::NAME, err);
                DomainError::StoreError(err.to_string())
            }
        }
    }
}

#[async_trait]
impl<T: Entity> EntityRepository<T> for RemoteEntityRepository<T> {
    async fn list(&self, sort: Option<&str>) -> Result<Vec<T>, DomainError> {
        let mut request = self
            .client
            .request(Method::GET, &self.client.entity_url(T::NAME));
        if let Some(sort) = sort {
            request = request.query(&[("sort", sort)]);
        }

        self.client
            .send_json::<Vec<T>>(request)
            .await
            .map_err(|e| self.map_err(None, e))
    }

    async fn create(&self, record: &T) -> Result<T, DomainError> {
        let request = self
            .client
            .request(Method::POST, &self.client.entity_url(T::NAME))
            .json(record);

        let created: T = self
            .client
            .send_json(request)
            .await
            .map_err(|e| self.map_err(None, e))?;
        info!("Created {} {}", T::NAME, created.id().unwrap_or("<no id>"));
        Ok(created)
    }

    async fn update(&self, id: &str, patch: &FieldPatch) -> Result<T, DomainError> {
        let url = self
            .client
            .record_url(T::NAME, id)
            .map_err(|e| self.map_err(Some(id), e))?;
        let request = self.client.request(Method::PUT, &url).json(patch);

        let updated = self
            .client
            .send_json(request)
            .await
            .map_err(|e| self.map_err(Some(id), e))?;
        info!("Updated {} {}", T::NAME, id);
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let url = self
            .client
            .record_url(T::NAME, id)
            .map_err(|e| self.map_err(Some(id), e))?;
        let request = self.client.request(Method::DELETE, &url);

        self.client
            .send(request)
            .await
            .map_err(|e| self.map_err(Some(id), e))?;
        info!("Deleted {} {}", T::NAME, id);
        Ok(())
    }
}
