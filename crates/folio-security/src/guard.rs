//! Session guard
//!
//! Owns the admin privilege of one browsing context: the identity check on
//! load, the stored session record and the inactivity countdown. Every
//! authorized period runs one timer task that consumes activity pulses;
//! leaving the authorized states cancels the task and drops the pulse
//! receiver, so stale senders go inert.

use std::sync::Arc;

use folio_core::AuthUser;
use parking_lot::Mutex;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::activity::{ActivityKind, ActivityPulse};
use crate::countdown::{InactivityCountdown, InactivityPolicy, TickOutcome};
use crate::identity::AuthProvider;
use crate::navigation::{NavigationTarget, Navigator};
use crate::policy::AdminPolicy;
use crate::session::{SessionRecord, SessionStore};

const PULSE_BUFFER: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardState {
    Anonymous,
    Authorizing,
    Authorized,
    ExpiredWarning,
    LoggedOut,
}

impl GuardState {
    /// `Authorized` or `ExpiredWarning`: the timer is running.
    pub fn is_active(self) -> bool {
        matches!(self, GuardState::Authorized | GuardState::ExpiredWarning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuardSnapshot {
    pub state: GuardState,
    pub remaining_secs: u32,
    pub warning: bool,
}

impl GuardSnapshot {
    fn idle(state: GuardState) -> Self {
        Self {
            state,
            remaining_secs: 0,
            warning: false,
        }
    }

    fn counting(countdown: &InactivityCountdown) -> Self {
        Self {
            state: if countdown.warning() {
                GuardState::ExpiredWarning
            } else {
                GuardState::Authorized
            },
            remaining_secs: countdown.remaining(),
            warning: countdown.warning(),
        }
    }
}

/// Which page the guard protects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardScope {
    /// Admin-only page. Identity failures redirect to login with `return_url`;
    /// an admin without a valid session and every logout go to the public page.
    AdminPage { return_url: String },
    /// Public page. Failures resolve to `Anonymous` silently.
    PublicPage,
}

#[derive(Debug, Clone)]
pub struct GuardConfig {
    pub scope: GuardScope,
    pub session_key: String,
    pub policy: InactivityPolicy,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessDenied {
    #[error("No signed-in user")]
    NoIdentity,

    #[error("User is not an admin")]
    NotAdmin,

    #[error("Session storage unavailable: {0}")]
    StorageUnavailable(String),
}

#[derive(Debug, Clone)]
pub struct AdminGrant {
    pub user: AuthUser,
    pub record: SessionRecord,
}

struct Running {
    pulses: mpsc::Sender<ActivityPulse>,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl Running {
    fn cancel(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

struct Shared {
    config: GuardConfig,
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn SessionStore>,
    navigator: Option<Arc<dyn Navigator>>,
    admin: AdminPolicy,
    state: watch::Sender<GuardSnapshot>,
    runtime: Mutex<Option<Running>>,
}

pub struct SessionGuard {
    shared: Arc<Shared>,
}

impl SessionGuard {
    /// Starts in `Authorizing`; call [`SessionGuard::authorize`] to resolve it.
    pub fn new(
        config: GuardConfig,
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn SessionStore>,
        admin: AdminPolicy,
    ) -> Self {
        let (state, _) = watch::channel(GuardSnapshot::idle(GuardState::Authorizing));
        Self {
            shared: Arc::new(Shared {
                config,
                auth,
                store,
                navigator: None,
                admin,
                state,
                runtime: Mutex::new(None),
            }),
        }
    }

    /// Must be attached before the guard is authorized.
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        match Arc::get_mut(&mut self.shared) {
            Some(shared) => shared.navigator = Some(navigator),
            None => warn!("Navigator attached to a running guard, ignored"),
        }
        self
    }

    /// Page-load check: admin identity plus a fresh stored session.
    pub async fn authorize(&self) -> GuardState {
        let current = self.snapshot().state;
        if current.is_active() {
            return current;
        }
        self.shared.publish_idle(GuardState::Authorizing);

        let user = match self.shared.current_admin().await {
            Ok(user) => user,
            Err(denied) => {
                debug!(reason = %denied, "Admin check failed");
                if let GuardScope::AdminPage { return_url } = &self.shared.config.scope {
                    // Signed-in visitors go back to the portfolio, not to login.
                    match denied {
                        AccessDenied::NotAdmin => self.shared.navigate(NavigationTarget::PublicPage),
                        _ => self.shared.redirect_to_login(return_url),
                    }
                }
                self.shared.publish_idle(GuardState::Anonymous);
                return GuardState::Anonymous;
            }
        };

        if !self.shared.has_fresh_session().await {
            if matches!(self.shared.config.scope, GuardScope::AdminPage { .. }) {
                self.shared.navigate(NavigationTarget::PublicPage);
            }
            self.shared.publish_idle(GuardState::Anonymous);
            return GuardState::Anonymous;
        }

        info!(user_id = %user.id, "Admin session restored");
        Shared::start_countdown(&self.shared);
        GuardState::Authorized
    }

    /// Admin login action: fresh identity check, then a new stored session.
    pub async fn enter_admin(&self, current_url: &str) -> Result<AdminGrant, AccessDenied> {
        let user = match self.shared.current_admin().await {
            Ok(user) => user,
            Err(denied) => {
                self.shared.redirect_to_login(current_url);
                if !self.snapshot().state.is_active() {
                    self.shared.publish_idle(GuardState::Anonymous);
                }
                return Err(denied);
            }
        };

        let record = SessionRecord::established_now();
        self.shared
            .store
            .save(&self.shared.config.session_key, record)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to persist admin session");
                if !self.snapshot().state.is_active() {
                    self.shared.publish_idle(GuardState::Anonymous);
                }
                AccessDenied::StorageUnavailable(e.to_string())
            })?;

        info!(user_id = %user.id, "Admin session established");
        Shared::start_countdown(&self.shared);
        self.shared.navigate(NavigationTarget::AdminPage);

        Ok(AdminGrant { user, record })
    }

    /// Publishes one activity pulse. `false` when the guard is not authorized.
    pub fn pulse(&self, kind: ActivityKind) -> bool {
        let runtime = self.shared.runtime.lock();
        let Some(running) = runtime.as_ref() else {
            return false;
        };
        match running.pulses.try_send(ActivityPulse::now(kind)) {
            Ok(()) => true,
            // A queued pulse already resets the countdown.
            Err(mpsc::error::TrySendError::Full(_)) => true,
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        }
    }

    /// Sender for input adapters. Goes inert once the authorized period ends.
    pub fn activity_sender(&self) -> Option<mpsc::Sender<ActivityPulse>> {
        self.shared
            .runtime
            .lock()
            .as_ref()
            .map(|running| running.pulses.clone())
    }

    pub fn snapshot(&self) -> GuardSnapshot {
        *self.shared.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<GuardSnapshot> {
        self.shared.state.subscribe()
    }

    pub fn is_authorized(&self) -> bool {
        self.snapshot().state.is_active()
    }

    /// Re-reads the stored record of an authorized guard. A missing or stale
    /// record logs the guard out.
    pub async fn revalidate(&self) -> bool {
        if !self.is_authorized() {
            return false;
        }
        if self.shared.has_fresh_session().await {
            return true;
        }
        self.shared.log_out("stored session expired").await;
        false
    }

    /// Explicit logout. Idempotent: `false` when there was nothing to log out,
    /// in which case only the stored record is cleared again.
    pub async fn logout(&self) -> bool {
        self.shared.log_out("explicit logout").await
    }

    /// Teardown on navigation: cancels the timer and detaches activity. The
    /// stored session is left alone so the next page load can restore it.
    pub fn stop(&self) {
        if let Some(running) = self.shared.runtime.lock().take() {
            running.cancel();
        }
        self.shared.state.send_if_modified(|snapshot| {
            if snapshot.state.is_active() || snapshot.state == GuardState::Authorizing {
                *snapshot = GuardSnapshot::idle(GuardState::Anonymous);
                true
            } else {
                false
            }
        });
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if let Some(running) = self.shared.runtime.lock().take() {
            running.task.abort();
        }
    }
}

impl Shared {
    async fn current_admin(&self) -> Result<AuthUser, AccessDenied> {
        let user = match self.auth.current_user().await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Identity check failed, treating as signed out");
                None
            }
        };
        let user = user.ok_or(AccessDenied::NoIdentity)?;
        if self.admin.is_admin(&user) {
            Ok(user)
        } else {
            Err(AccessDenied::NotAdmin)
        }
    }

    /// Loads the stored record; a stale one is removed.
    async fn has_fresh_session(&self) -> bool {
        let key = &self.config.session_key;
        let record = match self.store.load(key).await {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "Failed to read admin session");
                None
            }
        };
        let Some(record) = record else {
            return false;
        };

        if record.is_fresh(chrono::Utc::now(), self.config.policy.max_age) {
            return true;
        }

        debug!(established = %record.established(), "Stored admin session is stale");
        if let Err(e) = self.store.remove(key).await {
            warn!(error = %e, "Failed to clear stale admin session");
        }
        false
    }

    fn start_countdown(shared: &Arc<Self>) {
        let (pulse_tx, pulse_rx) = mpsc::channel(PULSE_BUFFER);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let mut runtime = shared.runtime.lock();
        if let Some(previous) = runtime.take() {
            previous.cancel();
        }

        let countdown = InactivityCountdown::new(shared.config.policy);
        shared.state.send_replace(GuardSnapshot::counting(&countdown));

        let task = tokio::spawn(run_countdown(
            Arc::clone(shared),
            countdown,
            pulse_rx,
            shutdown_rx,
        ));
        *runtime = Some(Running {
            pulses: pulse_tx,
            shutdown: Some(shutdown_tx),
            task,
        });
    }

    fn publish_idle(&self, state: GuardState) {
        self.state.send_replace(GuardSnapshot::idle(state));
    }

    /// Publishes countdown progress unless the guard already left the
    /// authorized states.
    fn publish_countdown(&self, countdown: &InactivityCountdown) {
        let next = GuardSnapshot::counting(countdown);
        self.state.send_if_modified(|snapshot| {
            if snapshot.state.is_active() && *snapshot != next {
                *snapshot = next;
                true
            } else {
                false
            }
        });
    }

    /// Shared by explicit logout and expiry. Only the call that moves the
    /// state out of the authorized states runs the side effects.
    async fn log_out(&self, reason: &'static str) -> bool {
        let won = self.state.send_if_modified(|snapshot| {
            if snapshot.state.is_active() {
                *snapshot = GuardSnapshot::idle(GuardState::LoggedOut);
                true
            } else {
                false
            }
        });

        if won {
            if let Some(running) = self.runtime.lock().take() {
                running.cancel();
            }
        }

        if let Err(e) = self.store.remove(&self.config.session_key).await {
            warn!(error = %e, "Failed to clear admin session");
        }

        if won {
            info!(reason, "Admin logged out");
            if matches!(self.config.scope, GuardScope::AdminPage { .. }) {
                self.navigate(NavigationTarget::PublicPage);
            }
        }
        won
    }

    fn redirect_to_login(&self, return_url: &str) {
        let url = self.auth.login_url(return_url);
        self.navigate(NavigationTarget::Login { url });
    }

    fn navigate(&self, target: NavigationTarget) {
        if let Some(navigator) = &self.navigator {
            debug!(?target, "Navigating");
            navigator.navigate(target);
        }
    }
}

async fn run_countdown(
    shared: Arc<Shared>,
    mut countdown: InactivityCountdown,
    mut pulses: mpsc::Receiver<ActivityPulse>,
    mut shutdown: oneshot::Receiver<()>,
) {
    let period = shared.config.policy.tick;
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                debug!("Countdown cancelled");
                return;
            }
            pulse = pulses.recv() => {
                let Some(pulse) = pulse else {
                    return;
                };
                countdown.reset();
                ticker.reset();
                shared.publish_countdown(&countdown);
                debug!(kind = ?pulse.kind, "Activity, countdown reset");
            }
            _ = ticker.tick() => {
                match countdown.tick() {
                    TickOutcome::Counting { .. } => shared.publish_countdown(&countdown),
                    TickOutcome::WarningRaised { remaining } => {
                        info!(remaining, "Inactivity warning raised");
                        shared.publish_countdown(&countdown);
                    }
                    TickOutcome::Expired => {
                        shared.log_out("inactivity timeout").await;
                        return;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::error::{AuthError, SessionError};
    use crate::identity::MockAuthProvider;

    const KEY: &str = "adminSession";

    #[derive(Default)]
    struct TestStore {
        records: parking_lot::Mutex<HashMap<String, SessionRecord>>,
        fail_save: bool,
    }

    impl TestStore {
        fn with_record(record: SessionRecord) -> Self {
            let store = Self::default();
            store.records.lock().insert(KEY.to_string(), record);
            store
        }

        fn get(&self) -> Option<SessionRecord> {
            self.records.lock().get(KEY).copied()
        }
    }

    #[async_trait]
    impl SessionStore for TestStore {
        async fn load(&self, key: &str) -> Result<Option<SessionRecord>, SessionError> {
            Ok(self.records.lock().get(key).copied())
        }

        async fn save(&self, key: &str, record: SessionRecord) -> Result<(), SessionError> {
            if self.fail_save {
                return Err(SessionError::StoreError("quota exceeded".to_string()));
            }
            self.records.lock().insert(key.to_string(), record);
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<(), SessionError> {
            self.records.lock().remove(key);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        visits: parking_lot::Mutex<Vec<NavigationTarget>>,
    }

    impl RecordingNavigator {
        fn visits(&self) -> Vec<NavigationTarget> {
            self.visits.lock().clone()
        }
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, target: NavigationTarget) {
            self.visits.lock().push(target);
        }
    }

    fn admin_user() -> AuthUser {
        AuthUser {
            id: "u-1".to_string(),
            email: Some("owner@example.org".to_string()),
            role: Some("user".to_string()),
            full_name: None,
        }
    }

    fn auth_returning(result: fn() -> Result<Option<AuthUser>, AuthError>) -> Arc<MockAuthProvider> {
        let mut auth = MockAuthProvider::new();
        auth.expect_current_user().returning(move || result());
        auth.expect_login_url()
            .returning(|url| format!("https://login.test/?from_url={url}"));
        Arc::new(auth)
    }

    fn admin_config() -> GuardConfig {
        GuardConfig {
            scope: GuardScope::AdminPage {
                return_url: "https://folio.test/admin".to_string(),
            },
            session_key: KEY.to_string(),
            policy: InactivityPolicy::default(),
        }
    }

    fn guard(
        config: GuardConfig,
        auth: Arc<MockAuthProvider>,
        store: Arc<TestStore>,
        navigator: Arc<RecordingNavigator>,
    ) -> SessionGuard {
        SessionGuard::new(
            config,
            auth,
            store,
            AdminPolicy::new("admin", "owner@example.org"),
        )
        .with_navigator(navigator)
    }

    async fn advance(millis: u64) {
        time::sleep(Duration::from_millis(millis)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_session_is_authorized() {
        let store = Arc::new(TestStore::with_record(SessionRecord::established_now()));
        let nav = Arc::new(RecordingNavigator::default());
        let guard = guard(admin_config(), auth_returning(|| Ok(Some(admin_user()))), store, nav.clone());

        assert_eq!(guard.snapshot().state, GuardState::Authorizing);
        assert_eq!(guard.authorize().await, GuardState::Authorized);

        let snapshot = guard.snapshot();
        assert_eq!(snapshot.remaining_secs, 120);
        assert!(!snapshot.warning);
        assert!(nav.visits().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_session_is_anonymous_and_cleared() {
        let stale = SessionRecord::established_at(chrono::Utc::now() - chrono::Duration::hours(24));
        let store = Arc::new(TestStore::with_record(stale));
        let nav = Arc::new(RecordingNavigator::default());
        let guard = guard(admin_config(), auth_returning(|| Ok(Some(admin_user()))), store.clone(), nav.clone());

        assert_eq!(guard.authorize().await, GuardState::Anonymous);
        assert!(store.get().is_none());
        assert_eq!(nav.visits(), vec![NavigationTarget::PublicPage]);
        assert!(!guard.pulse(ActivityKind::Click));
    }

    #[tokio::test(start_paused = true)]
    async fn test_identity_error_redirects_to_login() {
        let store = Arc::new(TestStore::with_record(SessionRecord::established_now()));
        let nav = Arc::new(RecordingNavigator::default());
        let guard = guard(
            admin_config(),
            auth_returning(|| Err(AuthError::Transport("connection refused".to_string()))),
            store.clone(),
            nav.clone(),
        );

        assert_eq!(guard.authorize().await, GuardState::Anonymous);
        assert_eq!(
            nav.visits(),
            vec![NavigationTarget::Login {
                url: "https://login.test/?from_url=https://folio.test/admin".to_string()
            }]
        );
        assert!(store.get().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_admin_on_admin_page_goes_public() {
        let store = Arc::new(TestStore::with_record(SessionRecord::established_now()));
        let nav = Arc::new(RecordingNavigator::default());
        let guard = guard(
            admin_config(),
            auth_returning(|| {
                Ok(Some(AuthUser {
                    email: Some("visitor@example.org".to_string()),
                    ..admin_user()
                }))
            }),
            store.clone(),
            nav.clone(),
        );

        assert_eq!(guard.authorize().await, GuardState::Anonymous);
        assert_eq!(nav.visits(), vec![NavigationTarget::PublicPage]);
        assert!(!guard.pulse(ActivityKind::Click));
    }

    #[tokio::test(start_paused = true)]
    async fn test_signed_out_on_admin_page_redirects_to_login() {
        let store = Arc::new(TestStore::with_record(SessionRecord::established_now()));
        let nav = Arc::new(RecordingNavigator::default());
        let guard = guard(admin_config(), auth_returning(|| Ok(None)), store, nav.clone());

        assert_eq!(guard.authorize().await, GuardState::Anonymous);
        assert!(matches!(nav.visits().as_slice(), [NavigationTarget::Login { .. }]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_public_page_failures_are_silent() {
        let store = Arc::new(TestStore::default());
        let nav = Arc::new(RecordingNavigator::default());
        let config = GuardConfig {
            scope: GuardScope::PublicPage,
            ..admin_config()
        };
        let guard = guard(config, auth_returning(|| Ok(None)), store, nav.clone());

        assert_eq!(guard.authorize().await, GuardState::Anonymous);
        assert!(nav.visits().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_warning_window_and_reset_on_activity() {
        let store = Arc::new(TestStore::with_record(SessionRecord::established_now()));
        let nav = Arc::new(RecordingNavigator::default());
        let guard = guard(admin_config(), auth_returning(|| Ok(Some(admin_user()))), store, nav);
        guard.authorize().await;

        advance(89_500).await;
        let snapshot = guard.snapshot();
        assert_eq!(snapshot.state, GuardState::Authorized);
        assert!(!snapshot.warning);

        advance(1_000).await;
        let snapshot = guard.snapshot();
        assert_eq!(snapshot.state, GuardState::ExpiredWarning);
        assert_eq!(snapshot.remaining_secs, 30);
        assert!(snapshot.warning);

        advance(5_000).await;
        let snapshot = guard.snapshot();
        assert_eq!(snapshot.remaining_secs, 25);
        assert!(snapshot.warning);

        advance(700).await;
        assert!(guard.pulse(ActivityKind::WarningDismissed));
        advance(10).await;
        assert_eq!(
            guard.snapshot(),
            GuardSnapshot {
                state: GuardState::Authorized,
                remaining_secs: 120,
                warning: false,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_timeout_logs_out_once() {
        let store = Arc::new(TestStore::with_record(SessionRecord::established_now()));
        let nav = Arc::new(RecordingNavigator::default());
        let guard = guard(admin_config(), auth_returning(|| Ok(Some(admin_user()))), store.clone(), nav.clone());
        guard.authorize().await;
        let stale_sender = guard.activity_sender().unwrap();

        advance(119_500).await;
        assert_eq!(guard.snapshot().remaining_secs, 1);

        advance(1_000).await;
        assert_eq!(guard.snapshot().state, GuardState::LoggedOut);
        assert!(store.get().is_none());
        assert_eq!(nav.visits(), vec![NavigationTarget::PublicPage]);

        advance(300_000).await;
        assert_eq!(nav.visits().len(), 1);
        assert!(!guard.pulse(ActivityKind::Click));
        assert!(stale_sender
            .try_send(ActivityPulse::now(ActivityKind::Click))
            .is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_regular_activity_never_logs_out() {
        let store = Arc::new(TestStore::with_record(SessionRecord::established_now()));
        let nav = Arc::new(RecordingNavigator::default());
        let guard = guard(admin_config(), auth_returning(|| Ok(Some(admin_user()))), store.clone(), nav);
        guard.authorize().await;

        for _ in 0..10 {
            advance(119_000).await;
            assert!(guard.pulse(ActivityKind::PointerMove));
        }
        advance(10).await;

        assert_eq!(guard.snapshot().state, GuardState::Authorized);
        assert!(store.get().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_is_idempotent() {
        let store = Arc::new(TestStore::with_record(SessionRecord::established_now()));
        let nav = Arc::new(RecordingNavigator::default());
        let guard = guard(admin_config(), auth_returning(|| Ok(Some(admin_user()))), store.clone(), nav.clone());
        guard.authorize().await;

        assert!(guard.logout().await);
        assert!(!guard.logout().await);
        assert_eq!(guard.snapshot().state, GuardState::LoggedOut);
        assert!(store.get().is_none());
        assert_eq!(nav.visits(), vec![NavigationTarget::PublicPage]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_admin_writes_session() {
        let store = Arc::new(TestStore::default());
        let nav = Arc::new(RecordingNavigator::default());
        let config = GuardConfig {
            scope: GuardScope::PublicPage,
            ..admin_config()
        };
        let guard = guard(config, auth_returning(|| Ok(Some(admin_user()))), store.clone(), nav.clone());
        assert_eq!(guard.authorize().await, GuardState::Anonymous);

        let grant = guard.enter_admin("https://folio.test/").await.unwrap();
        assert_eq!(grant.user.id, "u-1");
        assert_eq!(store.get(), Some(grant.record));
        assert_eq!(guard.snapshot().state, GuardState::Authorized);
        assert_eq!(nav.visits(), vec![NavigationTarget::AdminPage]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_admin_denies_non_admin() {
        let store = Arc::new(TestStore::default());
        let nav = Arc::new(RecordingNavigator::default());
        let guard = guard(
            admin_config(),
            auth_returning(|| {
                Ok(Some(AuthUser {
                    email: Some("visitor@example.org".to_string()),
                    ..admin_user()
                }))
            }),
            store.clone(),
            nav.clone(),
        );

        let denied = guard.enter_admin("https://folio.test/").await.unwrap_err();
        assert_eq!(denied, AccessDenied::NotAdmin);
        assert!(store.get().is_none());
        assert_eq!(
            nav.visits(),
            vec![NavigationTarget::Login {
                url: "https://login.test/?from_url=https://folio.test/".to_string()
            }]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_admin_fails_when_store_rejects() {
        let store = Arc::new(TestStore {
            fail_save: true,
            ..TestStore::default()
        });
        let nav = Arc::new(RecordingNavigator::default());
        let guard = guard(admin_config(), auth_returning(|| Ok(Some(admin_user()))), store, nav);

        let denied = guard.enter_admin("https://folio.test/").await.unwrap_err();
        assert!(matches!(denied, AccessDenied::StorageUnavailable(_)));
        assert!(!guard.is_authorized());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_keeps_stored_session() {
        let store = Arc::new(TestStore::with_record(SessionRecord::established_now()));
        let nav = Arc::new(RecordingNavigator::default());
        let guard = guard(admin_config(), auth_returning(|| Ok(Some(admin_user()))), store.clone(), nav);
        guard.authorize().await;

        guard.stop();
        advance(200_000).await;

        assert_eq!(guard.snapshot().state, GuardState::Anonymous);
        assert!(store.get().is_some());
        assert!(!guard.pulse(ActivityKind::KeyPress));
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscriber_observes_transitions() {
        let store = Arc::new(TestStore::with_record(SessionRecord::established_now()));
        let nav = Arc::new(RecordingNavigator::default());
        let guard = guard(admin_config(), auth_returning(|| Ok(Some(admin_user()))), store, nav);
        let mut rx = guard.subscribe();
        guard.authorize().await;

        rx.wait_for(|s| s.state == GuardState::ExpiredWarning).await.unwrap();
        rx.wait_for(|s| s.state == GuardState::LoggedOut).await.unwrap();
    }
}
