//! Fixed-rate sub-ticks driven by accumulated frame time.
//!
//! A [`PeriodicTimer`] fires once its accumulated time reaches the
//! interval and then subtracts the interval rather than resetting, so the
//! cadence stays phase-locked regardless of frame rate.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodicTimer {
    /// Seconds between firings.
    pub interval: f32,
    /// Seconds accumulated since the last firing.
    pub elapsed: f32,
}

impl PeriodicTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Timer that is due immediately.
    pub fn primed(interval: f32) -> Self {
        Self {
            interval,
            elapsed: interval,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    /// Advance, but never bank more than one interval.
    ///
    /// Used for throttles whose action may be ineligible when the timer is
    /// due: the timer waits at "due" instead of building up a burst.
    pub fn advance_capped(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.interval);
    }

    pub fn is_due(&self) -> bool {
        self.elapsed >= self.interval
    }

    /// Fire if due, keeping any overshoot for the next period.
    pub fn consume(&mut self) -> bool {
        if self.is_due() {
            self.elapsed -= self.interval;
            true
        } else {
            false
        }
    }

    /// Advance by `dt` and fire at most once.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.advance(dt);
        self.consume()
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Change the period, keeping at most one new interval of accumulated time.
    pub fn set_interval(&mut self, interval: f32) {
        self.interval = interval;
        self.elapsed = self.elapsed.min(interval);
    }
}
