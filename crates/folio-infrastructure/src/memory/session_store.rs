//! In-memory session store

use async_trait::async_trait;
use dashmap::DashMap;

use folio_security::{SessionError, SessionRecord, SessionStore};

#[derive(Default)]
pub struct MemorySessionStore {
    records: DashMap<String, SessionRecord>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, key: &str) -> Result<Option<SessionRecord>, SessionError> {
        Ok(self.records.get(key).map(|r| *r))
    }

    async fn save(&self, key: &str, record: SessionRecord) -> Result<(), SessionError> {
        self.records.insert(key.to_string(), record);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.records.remove(key);
        Ok(())
    }
}
