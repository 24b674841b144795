//! # Folio Security
//!
//! Admin gating and the session guard: admin policy, stored session record,
//! inactivity countdown, the guard state machine and the server-side registry.

pub mod error;
pub mod policy;
pub mod session;
pub mod identity;
pub mod navigation;
pub mod activity;
pub mod countdown;
pub mod guard;
pub mod registry;

pub use activity::{ActivityKind, ActivityPulse};
pub use countdown::{InactivityCountdown, InactivityPolicy, TickOutcome};
pub use error::{AuthError, SessionError};
pub use guard::{AccessDenied, AdminGrant, GuardConfig, GuardScope, GuardSnapshot, GuardState, SessionGuard};
pub use identity::{AuthProvider, TokenIdentity};
pub use navigation::{NavigationTarget, Navigator};
pub use policy::AdminPolicy;
pub use registry::{OpenedSession, SessionRegistry};
pub use session::{SessionRecord, SessionStore};
