//! Time source abstraction for the dispatcher.
//!
//! Delivery pacing sleeps between sends; hiding the sleep behind a trait
//! lets tests record the requested durations and return immediately
//! instead of waiting out multi-second delays.

use async_trait::async_trait;
use std::time::Duration;

/// A source of elapsed time the dispatcher can wait on.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Waits for the given duration.
    async fn sleep(&self, duration: Duration);
}

/// Production clock backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Clock that elides every sleep, for dry runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantClock;

#[async_trait]
impl Clock for InstantClock {
    async fn sleep(&self, _duration: Duration) {}
}
