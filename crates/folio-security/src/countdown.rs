//! Inactivity countdown
//!
//! Pure state: the guard drives it with one tick per second and resets it on
//! every activity pulse.

use std::time::Duration;

use folio_shared::config::SessionSettings;
use folio_shared::constants;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InactivityPolicy {
    /// Countdown start value, in ticks.
    pub timeout_secs: u32,
    /// Warning is raised once the countdown is at or below this.
    pub warning_secs: u32,
    pub tick: Duration,
    /// Stored sessions older than this are not honoured on reload.
    pub max_age: chrono::Duration,
}

impl Default for InactivityPolicy {
    fn default() -> Self {
        Self {
            timeout_secs: constants::INACTIVITY_TIMEOUT_SECS,
            warning_secs: constants::INACTIVITY_WARNING_SECS,
            tick: Duration::from_millis(constants::COUNTDOWN_TICK_MILLIS),
            max_age: chrono::Duration::hours(constants::SESSION_MAX_AGE_HOURS),
        }
    }
}

impl InactivityPolicy {
    pub fn from_settings(settings: &SessionSettings) -> Self {
        Self {
            timeout_secs: settings.inactivity_timeout_secs.max(1),
            warning_secs: settings.warning_threshold_secs,
            max_age: settings.max_age(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Counting { remaining: u32 },
    /// First tick at or below the warning threshold.
    WarningRaised { remaining: u32 },
    Expired,
}

#[derive(Debug, Clone)]
pub struct InactivityCountdown {
    policy: InactivityPolicy,
    remaining: u32,
    warning: bool,
}

impl InactivityCountdown {
    pub fn new(policy: InactivityPolicy) -> Self {
        Self {
            remaining: policy.timeout_secs,
            warning: false,
            policy,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn warning(&self) -> bool {
        self.warning
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Back to the full budget, warning cleared.
    pub fn reset(&mut self) {
        self.remaining = self.policy.timeout_secs;
        self.warning = false;
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.remaining == 0 {
            return TickOutcome::Expired;
        }

        self.remaining -= 1;
        if self.remaining == 0 {
            return TickOutcome::Expired;
        }

        if self.remaining <= self.policy.warning_secs && !self.warning {
            self.warning = true;
            return TickOutcome::WarningRaised {
                remaining: self.remaining,
            };
        }

        TickOutcome::Counting {
            remaining: self.remaining,
        }
    }
}
