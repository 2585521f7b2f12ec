//! Minimum-interval gate between ticks.
//!
//! A call that arrives too soon is dropped, not queued; a late call runs once
//! and restarts the interval from its own timestamp.

use std::time::Duration;

use skirmish_core::constants::MIN_TICK_INTERVAL_MS;

#[derive(Debug, Clone, Copy)]
pub struct FrameGate {
    interval: Duration,
    last: Option<Duration>,
}

impl Default for FrameGate {
    fn default() -> Self {
        Self::new(Duration::from_millis(MIN_TICK_INTERVAL_MS))
    }
}

impl FrameGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a tick may run at `now` (time since an arbitrary fixed start).
    /// Marks the tick as taken when it returns true.
    pub fn ready(&mut self, now: Duration) -> bool {
        let due = match self.last {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.interval,
        };
        if due {
            self.last = Some(now);
        }
        due
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
