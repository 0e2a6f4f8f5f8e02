//! Inter-image throttling.

use std::time::Duration;

use rand::Rng;

/// Default base delay between images, in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 1200;

/// Exclusive upper bound of the random jitter, in milliseconds.
pub const JITTER_MS: u64 = 250;

/// Base delay plus uniform jitter between consecutive image downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    base_delay: Duration,
}

impl Throttle {
    pub fn new(base_delay: Duration) -> Self {
        Self { base_delay }
    }

    /// Throttle with a base delay in milliseconds.
    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    pub fn delay_ms(&self) -> u64 {
        self.base_delay.as_millis() as u64
    }

    /// A zero base delay turns throttling off.
    pub fn is_enabled(&self) -> bool {
        !self.base_delay.is_zero()
    }

    /// Next pause: base delay plus jitter in `[0, JITTER_MS)` ms, or `None`
    /// when throttling is off.
    pub fn next_delay(&self) -> Option<Duration> {
        if !self.is_enabled() {
            return None;
        }
        let jitter = rand::thread_rng().gen_range(0..JITTER_MS);
        Some(self.base_delay + Duration::from_millis(jitter))
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::from_millis(DEFAULT_DELAY_MS)
    }
}
