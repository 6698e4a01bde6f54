//! The clock capability used for backoff suspension.
//!
//! Abstracting the sleep keeps backoff behavior observable in tests: the
//! fake records requested durations and returns immediately, so retry
//! tests run sub-millisecond.

use async_trait::async_trait;
use std::time::Duration;

/// Cooperative sleep capability.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Suspend the current task for the given duration.
    async fn sleep(&self, duration: Duration);
}

/// Production clock backed by the Tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
