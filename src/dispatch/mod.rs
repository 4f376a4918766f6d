//! Paced delivery of chunked messages.
//!
//! The dispatcher walks a [`DeliveryPlan`](crate::analysis::DeliveryPlan)
//! and drives a [`Transport`] with human-feeling timing:
//!
//! - The first chunk goes out immediately; later chunks wait out their
//!   pacing delay (or a configured floor, whichever is longer).
//! - With the typing indicator enabled, a composing notice precedes each
//!   chunk except the last, held visible for a fraction of the delay.
//! - The natural strategy adds a short random breath after each send.
//!
//! Text failures abort the sequence with the failing chunk's index;
//! presence failures are logged and ignored.

mod clock;
mod transport;

pub use clock::{Clock, InstantClock, TokioClock};
pub use transport::{Payload, Presence, Transport};

use crate::analysis::DeliveryPlan;
use crate::core::DeliveryConfig;
use crate::error::{DispatchError, Result};
use crate::pacing::DeliveryStrategy;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Portion of the pacing delay during which typing stays visible, in percent.
const TYPING_VISIBLE_PERCENT: u64 = 30;

/// Longest time the typing indicator is held before a send.
const MAX_TYPING_VISIBLE_MS: u64 = 3000;

/// Shortest post-send breath for the natural strategy.
const NATURAL_PAUSE_MIN_MS: u64 = 200;

/// Longest post-send breath for the natural strategy.
const NATURAL_PAUSE_MAX_MS: u64 = 500;

/// Runtime knobs for plan delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Show composing/available presence around sends.
    pub typing_indicator: bool,
    /// Strategy the plan was paced with; controls post-send pauses.
    pub strategy: DeliveryStrategy,
    /// Minimum inter-chunk delay, overriding shorter computed delays.
    pub fixed_delay_ms: Option<u64>,
    /// Log each delivered chunk at info level instead of debug.
    pub report_progress: bool,
}

impl DispatchOptions {
    /// Derives dispatch options from a delivery configuration.
    #[must_use]
    pub const fn from_config(config: &DeliveryConfig) -> Self {
        Self {
            typing_indicator: config.typing_indicator,
            strategy: config.strategy,
            fixed_delay_ms: config.fixed_delay_ms,
            report_progress: false,
        }
    }

    /// Enables or disables per-chunk progress reporting.
    #[must_use]
    pub const fn with_progress(mut self, report_progress: bool) -> Self {
        self.report_progress = report_progress;
        self
    }
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self::from_config(&DeliveryConfig::default())
    }
}

/// Delivers delivery plans over a transport with paced timing.
///
/// Generic over its [`Clock`] so tests can record sleeps instead of
/// waiting them out; production code uses [`TokioClock`].
#[derive(Debug, Clone)]
pub struct Dispatcher<C: Clock = TokioClock> {
    options: DispatchOptions,
    clock: C,
}

impl Dispatcher<TokioClock> {
    /// Creates a dispatcher backed by the tokio timer.
    #[must_use]
    pub const fn new(options: DispatchOptions) -> Self {
        Self {
            options,
            clock: TokioClock,
        }
    }
}

impl<C: Clock> Dispatcher<C> {
    /// Creates a dispatcher with an explicit time source.
    pub const fn with_clock(options: DispatchOptions, clock: C) -> Self {
        Self { options, clock }
    }

    /// Returns the options this dispatcher was built with.
    #[must_use]
    pub const fn options(&self) -> &DispatchOptions {
        &self.options
    }

    /// Delivers every chunk of the plan in order.
    ///
    /// An empty plan is a no-op. Whitespace-only chunks are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::PlanMismatch`] when the plan's chunk and
    /// pacing sequences disagree in length, and [`DispatchError::Send`]
    /// when the transport rejects a text chunk; remaining chunks are not
    /// attempted after a send failure.
    pub async fn dispatch<T, R>(
        &self,
        plan: &DeliveryPlan,
        transport: &T,
        rng: &mut R,
    ) -> Result<()>
    where
        T: Transport + ?Sized,
        R: Rng + Send + ?Sized,
    {
        if plan.chunks.len() != plan.pacing.len() {
            return Err(DispatchError::PlanMismatch {
                chunks: plan.chunks.len(),
                pacing: plan.pacing.len(),
            }
            .into());
        }
        if plan.chunks.is_empty() {
            return Ok(());
        }

        let total = plan.chunks.len();
        for (position, (chunk, meta)) in plan.chunks.iter().zip(&plan.pacing).enumerate() {
            if chunk.text.trim().is_empty() {
                debug!(index = chunk.index, "skipping whitespace-only chunk");
                continue;
            }
            let is_last = position + 1 == total;

            if position > 0 {
                let wait_ms = match self.options.fixed_delay_ms {
                    Some(fixed) => fixed.max(meta.delay_ms),
                    None => meta.delay_ms,
                };
                self.clock.sleep(Duration::from_millis(wait_ms)).await;
            }

            if self.options.typing_indicator && !is_last {
                if let Err(error) = transport
                    .deliver(Payload::Presence(Presence::Composing))
                    .await
                {
                    warn!(%error, "typing indicator update failed");
                }
                let visible_ms =
                    (meta.delay_ms * TYPING_VISIBLE_PERCENT / 100).min(MAX_TYPING_VISIBLE_MS);
                self.clock.sleep(Duration::from_millis(visible_ms)).await;
            }

            transport
                .deliver(Payload::Text(&chunk.text))
                .await
                .map_err(|error| DispatchError::Send {
                    index: chunk.index,
                    source: error.into(),
                })?;

            if self.options.report_progress {
                info!(
                    chunk = position + 1,
                    total,
                    content_type = %chunk.content_type,
                    delay_ms = meta.delay_ms,
                    "chunk delivered"
                );
            } else {
                debug!(
                    chunk = position + 1,
                    total,
                    content_type = %chunk.content_type,
                    delay_ms = meta.delay_ms,
                    "chunk delivered"
                );
            }

            if self.options.strategy == DeliveryStrategy::Natural && !is_last {
                let pause_ms = rng.random_range(NATURAL_PAUSE_MIN_MS..=NATURAL_PAUSE_MAX_MS);
                self.clock.sleep(Duration::from_millis(pause_ms)).await;
            }
        }

        if self.options.typing_indicator {
            if let Err(error) = transport
                .deliver(Payload::Presence(Presence::Available))
                .await
            {
                warn!(%error, "presence reset failed");
            }
        }

        Ok(())
    }
}
