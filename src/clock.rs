//! Fixed-interval tick clock
//!
//! egui only runs code when it repaints, so there is no timer callback.
//! Instead the app polls the clock once per frame and asks egui to wake
//! it again when the next tick is due.
//!
//! A late poll fires once and re-arms from the poll time. Missed ticks are
//! dropped, not replayed, so a stalled window doesn't make the trace jump.

use std::time::{Duration, Instant};

/// Default sweep step: 25 ticks per second
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(40);

/// Periodic tick source with an on/off switch
#[derive(Clone, Debug)]
pub struct TickClock {
    interval: Duration,
    enabled: bool,
    /// When the last tick fired (or the clock was armed)
    last_fire: Option<Instant>,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl TickClock {
    /// Create a disabled clock
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            enabled: false,
            last_fire: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        if interval != self.interval {
            log::debug!("Tick interval set to {:?}", interval);
            self.interval = interval;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start or stop the clock. Starting re-arms the interval from `now`.
    pub fn set_enabled(&mut self, enabled: bool, now: Instant) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        self.last_fire = enabled.then_some(now);
    }

    /// Flip the enabled state, returning the new state
    pub fn toggle(&mut self, now: Instant) -> bool {
        self.set_enabled(!self.enabled, now);
        self.enabled
    }

    /// Returns true if a tick is due at `now`
    ///
    /// Fires at most once per call.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.enabled {
            return false;
        }

        match self.last_fire {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last_fire = Some(now);
                true
            }
        }
    }

    /// Time left until the next tick, or `None` while stopped
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        if !self.enabled {
            return None;
        }

        let elapsed = self
            .last_fire
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(self.interval);
        Some(self.interval.saturating_sub(elapsed))
    }
}
