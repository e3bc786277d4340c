//! Rate Limiting Infrastructure
//!
//! Cooldown windows keyed on the time of the last allowed action. The
//! timestamp lives on the record being protected (e.g. a user's last OTP
//! send), so no separate store is needed.

use chrono::{DateTime, Duration, Utc};

/// Minimum spacing between two actions
#[derive(Debug, Clone, Copy)]
pub struct Cooldown {
    window: Duration,
}

/// Cooldown check result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownCheck {
    pub allowed: bool,
    /// Whole seconds until the next action is allowed, rounded up
    pub retry_after_secs: u64,
}

impl Cooldown {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    pub fn from_secs(secs: i64) -> Self {
        Self::new(Duration::seconds(secs))
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Allowed when there was no previous action, or at least `window` has
    /// elapsed since it.
    pub fn check(&self, last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> CooldownCheck {
        let Some(last) = last else {
            return CooldownCheck {
                allowed: true,
                retry_after_secs: 0,
            };
        };

        let elapsed = now - last;
        if elapsed >= self.window {
            return CooldownCheck {
                allowed: true,
                retry_after_secs: 0,
            };
        }

        let remaining_ms = (self.window - elapsed).num_milliseconds().max(0) as u64;
        CooldownCheck {
            allowed: false,
            retry_after_secs: remaining_ms.div_ceil(1000).max(1),
        }
    }
}

impl Default for Cooldown {
    fn default() -> Self {
        Self::from_secs(60)
    }
}
