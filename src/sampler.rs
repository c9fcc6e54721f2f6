//! Timer-driven producer that feeds the ring.

use crate::provider::{ProviderError, StatsProvider};
use crate::ring::RingStore;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Error in the sampling loop. Every variant is fatal to the process: a
/// broken statistics source makes all subsequent history suspect, so the
/// loop prefers a gap in availability over serving stale data. Deliberate
/// policy, not an oversight.
#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("stats fetch failed: {0}")]
    Fetch(#[from] ProviderError),

    #[error("device {0:?} not present in fetched stats")]
    DeviceMissing(String),
}

/// Single-writer sampling loop: primes the ring once, then writes one
/// snapshot per tick at the wall-clock-derived position.
pub struct Sampler<P> {
    provider: Arc<P>,
    ring: Arc<RingStore>,
    device: String,
    period: Duration,
}

impl<P: StatsProvider> Sampler<P> {
    pub fn new(provider: Arc<P>, ring: Arc<RingStore>, device: impl Into<String>) -> Self {
        Self {
            provider,
            ring,
            device: device.into(),
            period: crate::constants::SAMPLE_PERIOD,
        }
    }

    /// Override the tick period.
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Fill every slot with the first observed snapshot, synchronously,
    /// before any concurrent access begins. Leaves readers a full window
    /// of (repeated) valid data, so they never track a fill count. Failure
    /// here is fatal at startup: without a first snapshot there is nothing
    /// useful to serve.
    pub fn prime(&self) -> Result<(), SamplerError> {
        let snapshot = self.fetch_device()?;
        for position in 0..self.ring.window() {
            self.ring.write(position, snapshot);
        }
        info!(
            device = %self.device,
            window = self.ring.window(),
            "ring primed with first snapshot"
        );
        Ok(())
    }

    /// Steady-state ticking. Checks cancellation before each tick's work
    /// and returns cleanly, without writing, once cancelled. A fetch
    /// failure terminates the loop with an error.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<(), SamplerError> {
        let mut ticker = tokio::time::interval(self.period);
        // the immediate first tick would double-write the priming second
        ticker.tick().await;

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    info!("stats sampling loop stopped");
                    return Ok(());
                }
                _ = ticker.tick() => {
                    self.sample_at(self.wall_position())?;
                }
            }
        }
    }

    /// One sampling step: fetch, write at `position`, advance the cursor
    /// past it.
    pub fn sample_at(&self, position: usize) -> Result<(), SamplerError> {
        let snapshot = self.fetch_device()?;
        self.ring.write(position, snapshot);
        self.ring.set_cursor(position + 1);
        Ok(())
    }

    fn fetch_device(&self) -> Result<crate::counters::CounterSet, SamplerError> {
        let stats = self.provider.fetch()?;
        stats
            .get(&self.device)
            .copied()
            .ok_or_else(|| SamplerError::DeviceMissing(self.device.clone()))
    }

    /// Wall-clock-derived slot index: the current unix second modulo the
    /// window, so the absolute index doubles as a second-of-window
    /// timestamp. Drift and missed ticks are not compensated.
    fn wall_position(&self) -> usize {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        (now.as_secs() as usize) % self.ring.window()
    }
}
