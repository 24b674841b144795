//! BaaS adapters (HTTP)

pub mod client;
pub mod entity_repo_impl;
pub mod identity_impl;
pub mod storage_impl;
pub mod mailer_impl;

use std::sync::Arc;

use folio_core::repositories::ContentRepositories;

pub use client::{BackendClient, BackendError};
pub use entity_repo_impl::RemoteEntityRepository;
pub use identity_impl::RemoteIdentityProvider;
pub use mailer_impl::RemoteMailer;
pub use storage_impl::RemoteFileStorage;

/// Every content repository backed by the BaaS entity API.
pub fn remote_repositories(client: &BackendClient) -> ContentRepositories {
    ContentRepositories {
        publications: Arc::new(RemoteEntityRepository::new(client.clone())),
        experience: Arc::new(RemoteEntityRepository::new(client.clone())),
        education: Arc::new(RemoteEntityRepository::new(client.clone())),
        awards: Arc::new(RemoteEntityRepository::new(client.clone())),
        certifications: Arc::new(RemoteEntityRepository::new(client.clone())),
        news: Arc::new(RemoteEntityRepository::new(client.clone())),
        collaborations: Arc::new(RemoteEntityRepository::new(client.clone())),
        sections: Arc::new(RemoteEntityRepository::new(client.clone())),
        settings: Arc::new(RemoteEntityRepository::new(client.clone())),
    }
}
