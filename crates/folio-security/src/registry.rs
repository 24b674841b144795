//! Server-side session registry
//!
//! One [`SessionGuard`] per admin session id. API clients get the same
//! inactivity policy as the browser: every admin request is a pulse, and an
//! idle session logs itself out.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use folio_core::repositories::IdentityProvider;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::activity::ActivityKind;
use crate::countdown::InactivityPolicy;
use crate::error::SessionError;
use crate::guard::{AccessDenied, GuardConfig, GuardScope, GuardSnapshot, SessionGuard};
use crate::identity::TokenIdentity;
use crate::policy::AdminPolicy;
use crate::session::SessionStore;

impl From<AccessDenied> for SessionError {
    fn from(denied: AccessDenied) -> Self {
        match denied {
            AccessDenied::NoIdentity => SessionError::Unauthenticated,
            AccessDenied::NotAdmin => SessionError::Forbidden,
            AccessDenied::StorageUnavailable(msg) => SessionError::StoreError(msg),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenedSession {
    pub session_id: String,
    pub established_at: DateTime<Utc>,
    pub user_id: String,
}

struct RegistryEntry {
    guard: Arc<SessionGuard>,
    user_id: String,
}

pub struct SessionRegistry {
    guards: DashMap<String, RegistryEntry>,
    store: Arc<dyn SessionStore>,
    identity: Arc<dyn IdentityProvider>,
    admin: AdminPolicy,
    policy: InactivityPolicy,
    storage_key: String,
    return_url: String,
}

impl SessionRegistry {
    pub fn new(
        store: Arc<dyn SessionStore>,
        identity: Arc<dyn IdentityProvider>,
        admin: AdminPolicy,
        policy: InactivityPolicy,
        storage_key: impl Into<String>,
        return_url: impl Into<String>,
    ) -> Self {
        Self {
            guards: DashMap::new(),
            store,
            identity,
            admin,
            policy,
            storage_key: storage_key.into(),
            return_url: return_url.into(),
        }
    }

    /// Admin login for `token`. Each session keeps its record under its own key.
    pub async fn open(&self, token: &str) -> Result<OpenedSession, SessionError> {
        if token.trim().is_empty() {
            return Err(SessionError::Unauthenticated);
        }

        let session_id = Uuid::new_v4().to_string();
        let config = GuardConfig {
            scope: GuardScope::AdminPage {
                return_url: self.return_url.clone(),
            },
            session_key: format!("{}:{}", self.storage_key, session_id),
            policy: self.policy,
        };
        let auth = Arc::new(TokenIdentity::new(Arc::clone(&self.identity), token));
        let guard = SessionGuard::new(config, auth, Arc::clone(&self.store), self.admin.clone());

        let grant = guard.enter_admin(&self.return_url).await?;

        self.guards.insert(
            session_id.clone(),
            RegistryEntry {
                guard: Arc::new(guard),
                user_id: grant.user.id.clone(),
            },
        );
        info!(session_id = %session_id, user_id = %grant.user.id, "Admin session opened");

        Ok(OpenedSession {
            session_id,
            established_at: grant.record.established(),
            user_id: grant.user.id,
        })
    }

    /// Guard for a live session. Its stored record must still exist and be
    /// younger than the max age; logged-out guards are dropped here.
    async fn live(&self, session_id: &str) -> Result<(Arc<SessionGuard>, String), SessionError> {
        let (guard, user_id) = self
            .guards
            .get(session_id)
            .map(|entry| (Arc::clone(&entry.guard), entry.user_id.clone()))
            .ok_or(SessionError::NotFound)?;

        if !guard.revalidate().await {
            self.guards.remove(session_id);
            debug!(session_id, "Removed expired session");
            return Err(SessionError::Expired);
        }
        Ok((guard, user_id))
    }

    pub async fn touch(&self, session_id: &str, kind: ActivityKind) -> Result<(), SessionError> {
        let (guard, _) = self.live(session_id).await?;
        if guard.pulse(kind) {
            Ok(())
        } else {
            self.guards.remove(session_id);
            Err(SessionError::Expired)
        }
    }

    /// Fails with `Forbidden` when the session belongs to someone else.
    pub async fn verify_owner(&self, session_id: &str, user_id: &str) -> Result<(), SessionError> {
        let (_, owner) = self.live(session_id).await?;
        if owner == user_id {
            Ok(())
        } else {
            Err(SessionError::Forbidden)
        }
    }

    /// Status reads do not count as activity.
    pub async fn snapshot(&self, session_id: &str) -> Result<GuardSnapshot, SessionError> {
        let (guard, _) = self.live(session_id).await?;
        Ok(guard.snapshot())
    }

    /// Explicit logout. Unknown ids are fine.
    pub async fn close(&self, session_id: &str) {
        if let Some((_, entry)) = self.guards.remove(session_id) {
            if entry.guard.logout().await {
                info!(session_id, user_id = %entry.user_id, "Admin session closed");
            }
        }
    }

    /// Drops every guard that is no longer authorized.
    pub fn sweep(&self) -> usize {
        let before = self.guards.len();
        self.guards.retain(|_, entry| entry.guard.is_authorized());
        let removed = before.saturating_sub(self.guards.len());
        if removed > 0 {
            debug!(removed, "Swept expired admin sessions");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use async_trait::async_trait;
    use folio_core::{AuthUser, DomainError};

    use super::*;
    use crate::guard::GuardState;
    use crate::session::SessionRecord;

    #[derive(Default)]
    struct TestStore {
        records: parking_lot::Mutex<HashMap<String, SessionRecord>>,
    }

    #[async_trait]
    impl SessionStore for TestStore {
        async fn load(&self, key: &str) -> Result<Option<SessionRecord>, SessionError> {
            Ok(self.records.lock().get(key).copied())
        }

        async fn save(&self, key: &str, record: SessionRecord) -> Result<(), SessionError> {
            self.records.lock().insert(key.to_string(), record);
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<(), SessionError> {
            self.records.lock().remove(key);
            Ok(())
        }
    }

    /// Tokens: "admin-token" is the owner, "guest-token" a visitor,
    /// "broken-token" fails in transport.
    struct TestIdentity;

    #[async_trait]
    impl IdentityProvider for TestIdentity {
        async fn resolve(&self, token: &str) -> Result<Option<AuthUser>, DomainError> {
            let user = |id: &str, role: &str| AuthUser {
                id: id.to_string(),
                email: None,
                role: Some(role.to_string()),
                full_name: None,
            };
            match token {
                "admin-token" => Ok(Some(user("u-admin", "admin"))),
                "guest-token" => Ok(Some(user("u-guest", "user"))),
                "broken-token" => Err(DomainError::IdentityError("timeout".to_string())),
                _ => Ok(None),
            }
        }

        fn login_url(&self, return_url: &str) -> String {
            format!("https://login.test/?from_url={return_url}")
        }
    }

    fn registry(store: Arc<TestStore>) -> SessionRegistry {
        SessionRegistry::new(
            store,
            Arc::new(TestIdentity),
            AdminPolicy::new("admin", "owner@example.org"),
            InactivityPolicy::default(),
            "adminSession",
            "https://folio.test/admin",
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_admin_session() {
        let store = Arc::new(TestStore::default());
        let registry = registry(store.clone());

        let opened = registry.open("admin-token").await.unwrap();
        assert_eq!(opened.user_id, "u-admin");
        assert_eq!(registry.len(), 1);

        let key = format!("adminSession:{}", opened.session_id);
        assert!(store.records.lock().contains_key(&key));

        let snapshot = registry.snapshot(&opened.session_id).await.unwrap();
        assert_eq!(snapshot.state, GuardState::Authorized);
        assert_eq!(snapshot.remaining_secs, 120);
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_rejections() {
        let registry = registry(Arc::new(TestStore::default()));

        assert_eq!(registry.open("").await.unwrap_err(), SessionError::Unauthenticated);
        assert_eq!(registry.open("unknown").await.unwrap_err(), SessionError::Unauthenticated);
        assert_eq!(registry.open("broken-token").await.unwrap_err(), SessionError::Unauthenticated);
        assert_eq!(registry.open("guest-token").await.unwrap_err(), SessionError::Forbidden);
        assert!(registry.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_touch_keeps_session_alive() {
        let registry = registry(Arc::new(TestStore::default()));
        let opened = registry.open("admin-token").await.unwrap();

        for _ in 0..5 {
            tokio::time::sleep(Duration::from_secs(100)).await;
            registry.touch(&opened.session_id, ActivityKind::ApiRequest).await.unwrap();
        }
        tokio::time::sleep(Duration::from_millis(10)).await;

        let snapshot = registry.snapshot(&opened.session_id).await.unwrap();
        assert_eq!(snapshot.remaining_secs, 120);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_expires() {
        let store = Arc::new(TestStore::default());
        let registry = registry(store.clone());
        let opened = registry.open("admin-token").await.unwrap();

        tokio::time::sleep(Duration::from_millis(120_500)).await;

        assert!(store.records.lock().is_empty());
        assert_eq!(
            registry.touch(&opened.session_id, ActivityKind::ApiRequest).await.unwrap_err(),
            SessionError::Expired
        );
        assert_eq!(
            registry.snapshot(&opened.session_id).await.unwrap_err(),
            SessionError::NotFound
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_past_max_age_is_expired() {
        let store = Arc::new(TestStore::default());
        let registry = registry(store.clone());
        let opened = registry.open("admin-token").await.unwrap();

        let key = format!("adminSession:{}", opened.session_id);
        let backdated = SessionRecord::established_at(Utc::now() - chrono::Duration::hours(25));
        store.records.lock().insert(key.clone(), backdated);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(
            registry.touch(&opened.session_id, ActivityKind::ApiRequest).await.unwrap_err(),
            SessionError::Expired
        );
        assert!(!store.records.lock().contains_key(&key));
        assert!(registry.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_without_stored_record_is_expired() {
        let store = Arc::new(TestStore::default());
        let registry = registry(store.clone());
        let opened = registry.open("admin-token").await.unwrap();

        store.records.lock().clear();

        assert_eq!(
            registry.verify_owner(&opened.session_id, "u-admin").await.unwrap_err(),
            SessionError::Expired
        );
        assert_eq!(
            registry.snapshot(&opened.session_id).await.unwrap_err(),
            SessionError::NotFound
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_verify_owner() {
        let registry = registry(Arc::new(TestStore::default()));
        let opened = registry.open("admin-token").await.unwrap();

        assert!(registry.verify_owner(&opened.session_id, "u-admin").await.is_ok());
        assert_eq!(
            registry.verify_owner(&opened.session_id, "u-other").await.unwrap_err(),
            SessionError::Forbidden
        );
        assert_eq!(
            registry.verify_owner("missing", "u-admin").await.unwrap_err(),
            SessionError::NotFound
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_is_idempotent() {
        let store = Arc::new(TestStore::default());
        let registry = registry(store.clone());
        let opened = registry.open("admin-token").await.unwrap();

        registry.close(&opened.session_id).await;
        registry.close(&opened.session_id).await;
        registry.close("never-existed").await;

        assert!(registry.is_empty());
        assert!(store.records.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_removes_expired() {
        let registry = registry(Arc::new(TestStore::default()));
        let idle = registry.open("admin-token").await.unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;
        let busy = registry.open("admin-token").await.unwrap();

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(registry.sweep(), 1);
        assert_eq!(registry.len(), 1);
        assert!(registry.snapshot(&busy.session_id).await.is_ok());
        assert_eq!(
            registry.snapshot(&idle.session_id).await.unwrap_err(),
            SessionError::NotFound
        );
    }
}
