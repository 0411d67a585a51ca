//! Windowed rate limiting for diagnostics emitted from the interrupt handler.

use embassy_time::Instant;

use crate::conf::RateLimitConfig;

/// Allows `burst` events per `interval`, counting the ones it suppresses.
#[derive(Debug, Clone)]
pub struct RateLimit {
    config: RateLimitConfig,
    begin: Option<Instant>,
    printed: u32,
    missed: u32,
    carried: u32,
}

impl RateLimit {
    pub const fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            begin: None,
            printed: 0,
            missed: 0,
            carried: 0,
        }
    }

    /// Records one event at `now`.
    ///
    /// Returns `None` if the event should be dropped. Otherwise returns the
    /// number of events suppressed in the previous window; it is reported
    /// once, with the first event let through after the window reopened.
    pub fn check(&mut self, now: Instant) -> Option<u32> {
        if self.config.interval.as_ticks() == 0 {
            return Some(0);
        }

        let expired = match self.begin {
            None => true,
            Some(begin) => now.saturating_duration_since(begin) >= self.config.interval,
        };
        if expired {
            self.begin = Some(now);
            self.printed = 0;
            self.carried = self.carried.saturating_add(core::mem::take(&mut self.missed));
        }

        if self.printed < self.config.burst {
            self.printed = self.printed.saturating_add(1);
            Some(core::mem::take(&mut self.carried))
        } else {
            self.missed = self.missed.saturating_add(1);
            None
        }
    }
}
