//! Entity repository trait (port)

use std::sync::Arc;

use async_trait::async_trait;
use folio_shared::FieldPatch;

use crate::domain::{
    Award, Certification, Collaboration, Education, Entity, Experience, News, PortfolioSection,
    Publication, Settings,
};
use crate::error::DomainError;

#[async_trait]
pub trait EntityRepository<T: Entity>: Send + Sync {
    /// Lists every record, ordered by `sort` (`field` or `-field`) when given.
    async fn list(&self, sort: Option<&str>) -> Result<Vec<T>, DomainError>;
    async fn create(&self, record: &T) -> Result<T, DomainError>;
    async fn update(&self, id: &str, patch: &FieldPatch) -> Result<T, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}

/// One repository per portfolio entity.
#[derive(Clone)]
pub struct ContentRepositories {
    pub publications: Arc<dyn EntityRepository<Publication>>,
    pub experience: Arc<dyn EntityRepository<Experience>>,
    pub education: Arc<dyn EntityRepository<Education>>,
    pub awards: Arc<dyn EntityRepository<Award>>,
    pub certifications: Arc<dyn EntityRepository<Certification>>,
    pub news: Arc<dyn EntityRepository<News>>,
    pub collaborations: Arc<dyn EntityRepository<Collaboration>>,
    pub sections: Arc<dyn EntityRepository<PortfolioSection>>,
    pub settings: Arc<dyn EntityRepository<Settings>>,
}
