//! Shared application state

use std::sync::Arc;

use folio_core::repositories::{
    ContentRepositories, FileStorage, IdentityProvider, ImageCropper, Mailer,
};
use folio_core::services::{
    ContactService, ContentCatalog, PortfolioService, SettingsService, UploadService,
};
use folio_security::{AdminPolicy, InactivityPolicy, SessionRegistry, SessionStore};
use folio_shared::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog: ContentCatalog,
    pub portfolio: Arc<PortfolioService>,
    pub settings: Arc<SettingsService>,
    pub contact: Arc<ContactService>,
    pub uploads: Arc<UploadService>,
    pub identity: Arc<dyn IdentityProvider>,
    pub admin: AdminPolicy,
    pub sessions: Arc<SessionRegistry>,
}

/// Adapters the state is assembled from.
pub struct Adapters {
    pub repositories: ContentRepositories,
    pub identity: Arc<dyn IdentityProvider>,
    pub mailer: Arc<dyn Mailer>,
    pub storage: Arc<dyn FileStorage>,
    pub cropper: Arc<dyn ImageCropper>,
    pub session_store: Arc<dyn SessionStore>,
}

impl AppState {
    pub fn new(config: AppConfig, adapters: Adapters) -> Self {
        let admin = AdminPolicy::from_settings(&config.admin);
        let sessions = SessionRegistry::new(
            adapters.session_store,
            Arc::clone(&adapters.identity),
            admin.clone(),
            InactivityPolicy::from_settings(&config.session),
            config.session.storage_key.clone(),
            admin_url(&config.app.public_url),
        );
        let uploads = UploadService::new(adapters.storage, config.upload.max_bytes)
            .with_cropper(adapters.cropper);

        Self {
            catalog: ContentCatalog::new(&adapters.repositories),
            portfolio: Arc::new(PortfolioService::new(adapters.repositories.clone())),
            settings: Arc::new(SettingsService::new(adapters.repositories.settings)),
            contact: Arc::new(ContactService::new(
                adapters.mailer,
                config.admin.owner_email.clone(),
            )),
            uploads: Arc::new(uploads),
            identity: adapters.identity,
            admin,
            sessions: Arc::new(sessions),
            config: Arc::new(config),
        }
    }
}

fn admin_url(public_url: &str) -> String {
    format!("{}/admin", public_url.trim_end_matches('/'))
}
