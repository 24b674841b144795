//! In-process adapters for local runs and tests

pub mod entity_store;
pub mod session_store;

use std::sync::Arc;

use folio_core::repositories::ContentRepositories;

pub use entity_store::MemoryEntityRepository;
pub use session_store::MemorySessionStore;

/// Every content repository held in memory.
pub fn memory_repositories() -> ContentRepositories {
    ContentRepositories {
        publications: Arc::new(MemoryEntityRepository::new()),
        experience: Arc::new(MemoryEntityRepository::new()),
        education: Arc::new(MemoryEntityRepository::new()),
        awards: Arc::new(MemoryEntityRepository::new()),
        certifications: Arc::new(MemoryEntityRepository::new()),
        news: Arc::new(MemoryEntityRepository::new()),
        collaborations: Arc::new(MemoryEntityRepository::new()),
        sections: Arc::new(MemoryEntityRepository::new()),
        settings: Arc::new(MemoryEntityRepository::new()),
    }
}
