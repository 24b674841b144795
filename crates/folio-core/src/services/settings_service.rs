//! Site settings: a singleton stored as the first Settings record

use std::sync::Arc;

use folio_shared::FieldPatch;
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::{Entity, Settings};
use crate::error::DomainError;
use crate::repositories::EntityRepository;
use crate::services::ContentService;

pub struct SettingsService {
    content: ContentService<Settings>,
}

impl SettingsService {
    pub fn new(repo: Arc<dyn EntityRepository<Settings>>) -> Self {
        Self {
            content: ContentService::new(repo),
        }
    }

    pub async fn current(&self) -> Result<Option<Settings>, DomainError> {
        Ok(self.content.list(None).await?.into_iter().next())
    }

    /// Stored settings, or the all-visible defaults when none exist or the
    /// store cannot be reached.
    pub async fn effective(&self) -> Settings {
        match self.current().await {
            Ok(Some(settings)) => settings,
            Ok(None) => Settings::default(),
            Err(e) => {
                warn!("Falling back to default settings: {}", e);
                Settings::default()
            }
        }
    }

    /// Updates the existing record, or creates the first one.
    pub async fn save(&self, patch: FieldPatch) -> Result<Settings, DomainError> {
        match self.current().await? {
            Some(existing) => {
                let id = existing
                    .id()
                    .ok_or_else(|| DomainError::InternalError("stored settings have no id".to_string()))?
                    .to_string();
                self.content.update(&id, patch).await
            }
            None => {
                info!("No settings record yet, creating one");
                let settings: Settings = serde_json::from_value(Value::Object(patch))
                    .map_err(|e| DomainError::ValidationError(format!("invalid settings: {}", e)))?;
                self.content.create(settings).await
            }
        }
    }
}
