//! Activity pulses

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Interaction kinds that count as activity. Input adapters map their own
/// event names onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    PointerPress,
    PointerMove,
    KeyPress,
    Scroll,
    TouchStart,
    Click,
    /// "Stay logged in" on the inactivity warning.
    WarningDismissed,
    /// An authenticated admin API call.
    ApiRequest,
}

impl ActivityKind {
    /// Maps DOM event names (`mousedown`, `keypress`, ...) onto activity kinds.
    pub fn from_dom_event(name: &str) -> Option<Self> {
        match name {
            "mousedown" | "pointerdown" => Some(Self::PointerPress),
            "mousemove" | "pointermove" => Some(Self::PointerMove),
            "keypress" | "keydown" => Some(Self::KeyPress),
            "scroll" => Some(Self::Scroll),
            "touchstart" => Some(Self::TouchStart),
            "click" => Some(Self::Click),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ActivityPulse {
    pub kind: ActivityKind,
    pub at: Instant,
}

impl ActivityPulse {
    pub fn now(kind: ActivityKind) -> Self {
        Self {
            kind,
            at: Instant::now(),
        }
    }
}
