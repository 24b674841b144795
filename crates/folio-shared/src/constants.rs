//! Application-wide constants

/// Seconds of silence before an admin session is logged out.
pub const INACTIVITY_TIMEOUT_SECS: u32 = 120;
/// Remaining seconds at which the inactivity warning is raised.
pub const INACTIVITY_WARNING_SECS: u32 = 30;
/// Countdown resolution.
pub const COUNTDOWN_TICK_MILLIS: u64 = 1_000;
/// Stored sessions older than this are never re-validated.
pub const SESSION_MAX_AGE_HOURS: i64 = 24;
/// Local storage key holding the admin session record.
pub const SESSION_STORAGE_KEY: &str = "adminSession";

pub const ADMIN_ROLE: &str = "admin";
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 20 * 1024 * 1024;

pub const ADMIN_SESSION_HEADER: &str = "x-admin-session";
/// Interval between sweeps of logged-out admin sessions.
pub const SESSION_SWEEP_SECS: u64 = 60;
