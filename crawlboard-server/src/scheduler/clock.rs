//! Runtime-backed clock
//!
//! Wall-clock timestamps derived from the tokio clock, so paused-time tests
//! see timestamps that move exactly as far as the runtime was advanced.

use chrono::{DateTime, Utc};
use crawlboard_core::simulation::Clock;
use tokio::time::Instant;

/// Clock anchored at the moment it was created
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    origin: Instant,
    origin_utc: DateTime<Utc>,
}

impl TokioClock {
    /// Must be called from within a tokio runtime
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            origin_utc: Utc::now(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = chrono::Duration::from_std(self.origin.elapsed())
            .unwrap_or_else(|_| chrono::Duration::zero());
        self.origin_utc + elapsed
    }
}
