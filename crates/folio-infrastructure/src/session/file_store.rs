//! File-backed session store
//!
//! One JSON object of `key -> {timestamp}` entries, the on-disk counterpart
//! of browser local storage. Writes go through a temp file and a rename.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use folio_security::{SessionError, SessionRecord, SessionStore};

type Entries = BTreeMap<String, SessionRecord>;

pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Entries, SessionError> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(SessionError::StoreError(e.to_string())),
        };

        match serde_json::from_slice(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                // Unreadable contents behave like an empty store.
                warn!("Ignoring corrupt session file {}: {}", self.path.display(), e);
                Ok(Entries::new())
            }
        }
    }

    async fn write(&self, entries: &Entries) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| SessionError::StoreError(e.to_string()))?;
        }

        let json = serde_json::to_vec_pretty(entries)
            .map_err(|e| SessionError::StoreError(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)
            .await
            .map_err(|e| SessionError::StoreError(e.to_string()))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| SessionError::StoreError(e.to_string()))?;
        debug!("Wrote {} session entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self, key: &str) -> Result<Option<SessionRecord>, SessionError> {
        let _guard = self.lock.lock().await;
        Ok(self.read().await?.get(key).copied())
    }

    async fn save(&self, key: &str, record: SessionRecord) -> Result<(), SessionError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read().await?;
        entries.insert(key.to_string(), record);
        self.write(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), SessionError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read().await?;
        if entries.remove(key).is_some() {
            self.write(&entries).await?;
        }
        Ok(())
    }
}
