//! Reload timer armed after each guess
//!
//! Deadlines use `tokio::time::Instant`, so tests running with a paused
//! tokio clock advance through the feedback delay without real waiting.

use tokio::time::{Duration, Instant};

/// One-shot deadline for the transition from `Resolved` back to `Loading`
///
/// Owned by the round controller. Dropping the handle cancels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadTimer {
    deadline: Instant,
}

impl ReloadTimer {
    pub fn arm(now: Instant, delay: Duration) -> Self {
        Self {
            deadline: now + delay,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }

    /// Sleep on the tokio clock until the deadline
    pub async fn wait(&self) {
        tokio::time::sleep_until(self.deadline).await;
    }
}
