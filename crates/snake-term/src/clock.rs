//! Fixed-period stats clock.

use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Periodic trigger for `tick_clock`. The first tick of every run lands one
/// full period after the run started.
pub struct StatsClock {
    interval: Interval,
    period: Duration,
}

impl StatsClock {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval, period }
    }

    /// Elapsed time credited per tick (milliseconds)
    pub fn period_ms(&self) -> u64 {
        self.period.as_millis() as u64
    }

    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }

    /// Restart the phase when a new run begins
    pub fn restart(&mut self) {
        self.interval.reset();
    }
}
