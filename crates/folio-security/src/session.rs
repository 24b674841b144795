//! Stored admin session record and the local store it lives in

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// `{ "timestamp": <epoch millis> }`, written on admin login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub timestamp: i64,
}

impl SessionRecord {
    pub fn established_now() -> Self {
        Self::established_at(Utc::now())
    }

    pub fn established_at(at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at.timestamp_millis(),
        }
    }

    pub fn established(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.timestamp)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// A record is only honoured while `now - established < max_age`.
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        now.signed_duration_since(self.established()) < max_age
    }
}

/// Local persisted state: one record per key, like browser local storage.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<SessionRecord>, SessionError>;
    async fn save(&self, key: &str, record: SessionRecord) -> Result<(), SessionError>;
    /// Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), SessionError>;
}
