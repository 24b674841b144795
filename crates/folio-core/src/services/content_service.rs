// ============================================================================
// Folio Core - Content Service
// File: crates/folio-core/src/services/content_service.rs
// ============================================================================
//! CRUD over portfolio entities with the same required-field checks the admin
//! forms apply.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use folio_shared::{FieldPatch, RecordMeta};
use serde_json::Value;
use tracing::{debug, info};
use validator::Validate;

use crate::domain::{sanitize_patch, Entity};
use crate::error::DomainError;
use crate::repositories::{ContentRepositories, EntityRepository};

/// Manager for one entity type.
pub struct ContentService<T: Entity> {
    repo: Arc<dyn EntityRepository<T>>,
}

impl<T: Entity> ContentService<T> {
    pub fn new(repo: Arc<dyn EntityRepository<T>>) -> Self {
        Self { repo }
    }

    /// List records; falls back to the entity's default ordering.
    pub async fn list(&self, sort: Option<&str>) -> Result<Vec<T>, DomainError> {
        let sort = sort.filter(|s| !s.trim().is_empty()).or(T::DEFAULT_SORT);
        debug!("Listing {} (sort: {:?})", T::NAME, sort);
        self.repo.list(sort).await
    }

    pub async fn create(&self, mut record: T) -> Result<T, DomainError> {
        record.validate()?;
        // ids and timestamps are issued by the store
        *record.meta_mut() = RecordMeta::default();

        info!("Creating {}", T::NAME);
        let created = self.repo.create(&record).await?;
        info!("{} created: {:?}", T::NAME, created.id());
        Ok(created)
    }

    pub async fn update(&self, id: &str, patch: FieldPatch) -> Result<T, DomainError> {
        require_id(id)?;
        let patch = sanitize_patch::<T>(patch)?;

        info!("Updating {} {} ({} fields)", T::NAME, id, patch.len());
        self.repo.update(id, &patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        require_id(id)?;
        info!("Deleting {} {}", T::NAME, id);
        self.repo.delete(id).await
    }
}

fn require_id(id: &str) -> Result<(), DomainError> {
    if id.trim().is_empty() {
        return Err(DomainError::ValidationError("id is required".to_string()));
    }
    Ok(())
}

/// Type-erased manager so the HTTP layer can dispatch on a collection name.
#[async_trait]
pub trait ContentManager: Send + Sync {
    fn entity_name(&self) -> &'static str;
    async fn list_json(&self, sort: Option<&str>) -> Result<Vec<Value>, DomainError>;
    async fn create_json(&self, body: Value) -> Result<Value, DomainError>;
    async fn update_json(&self, id: &str, patch: FieldPatch) -> Result<Value, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}

#[async_trait]
impl<T: Entity> ContentManager for ContentService<T> {
    fn entity_name(&self) -> &'static str {
        T::NAME
    }

    async fn list_json(&self, sort: Option<&str>) -> Result<Vec<Value>, DomainError> {
        self.list(sort).await?.iter().map(to_json).collect()
    }

    async fn create_json(&self, body: Value) -> Result<Value, DomainError> {
        let record: T = serde_json::from_value(body).map_err(|e| {
            DomainError::ValidationError(format!("invalid {} payload: {}", T::NAME, e))
        })?;
        to_json(&self.create(record).await?)
    }

    async fn update_json(&self, id: &str, patch: FieldPatch) -> Result<Value, DomainError> {
        to_json(&self.update(id, patch).await?)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        ContentService::<T>::delete(self, id).await
    }
}

fn to_json<T: Entity>(record: &T) -> Result<Value, DomainError> {
    serde_json::to_value(record).map_err(|e| DomainError::InternalError(e.to_string()))
}

/// Every entity manager, keyed by collection path segment.
#[derive(Clone)]
pub struct ContentCatalog {
    managers: BTreeMap<&'static str, Arc<dyn ContentManager>>,
}

impl ContentCatalog {
    pub fn new(repos: &ContentRepositories) -> Self {
        let mut catalog = Self { managers: BTreeMap::new() };
        catalog.register(repos.publications.clone());
        catalog.register(repos.experience.clone());
        catalog.register(repos.education.clone());
        catalog.register(repos.awards.clone());
        catalog.register(repos.certifications.clone());
        catalog.register(repos.news.clone());
        catalog.register(repos.collaborations.clone());
        catalog.register(repos.sections.clone());
        catalog.register(repos.settings.clone());
        catalog
    }

    fn register<T: Entity>(&mut self, repo: Arc<dyn EntityRepository<T>>) {
        self.managers
            .insert(T::COLLECTION, Arc::new(ContentService::new(repo)));
    }

    pub fn get(&self, collection: &str) -> Result<Arc<dyn ContentManager>, DomainError> {
        self.managers
            .get(collection)
            .cloned()
            .ok_or_else(|| DomainError::UnknownCollection(collection.to_string()))
    }

    pub fn collections(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.managers.keys().copied()
    }
}
