//! Driver configuration.

use embassy_time::Duration;

/// Limits how often interrupt-time failures are logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Length of one window. A zero interval disables limiting.
    pub interval: Duration,
    /// Messages allowed per window.
    pub burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            burst: 10,
        }
    }
}

/// Configuration used when attaching a touchscreen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Logging limits for bus failures in the interrupt handler.
    pub rate_limit: RateLimitConfig,
    /// Upper bound of the `ABS_X`/`ABS_Y` range advertised to the input subsystem.
    /// Reported coordinates are not clamped to it.
    pub abs_max: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rate_limit: RateLimitConfig::default(),
            abs_max: 2048,
        }
    }
}
