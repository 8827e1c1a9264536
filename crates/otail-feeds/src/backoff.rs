//! Reconnect delays: capped exponential growth with full jitter.
//!
//! For attempt `n` the ceiling is `min(base * 2^n, cap)`, and the actual wait
//! is drawn uniformly from `[0, ceiling)`. Overflow in the exponential clamps
//! to `cap`.

use rand::Rng;
use std::time::Duration;

pub const DEFAULT_BASE: Duration = Duration::from_millis(500);
pub const DEFAULT_CAP: Duration = Duration::from_secs(30);

/// Upper bound of the delay for `attempt`.
pub fn ceiling(attempt: u32, base: Duration, cap: Duration) -> Duration {
    2u32.checked_pow(attempt)
        .and_then(|factor| base.checked_mul(factor))
        .map_or(cap, |grown| grown.min(cap))
}

/// Randomised delay before retry number `attempt`.
pub fn delay(attempt: u32, base: Duration, cap: Duration) -> Duration {
    delay_with(&mut rand::thread_rng(), attempt, base, cap)
}

/// [`delay`] with an explicit random source.
pub fn delay_with<R: Rng + ?Sized>(
    rng: &mut R,
    attempt: u32,
    base: Duration,
    cap: Duration,
) -> Duration {
    let upper = ceiling(attempt, base, cap);
    let nanos = u64::try_from(upper.as_nanos()).unwrap_or(u64::MAX);
    if nanos == 0 {
        return Duration::ZERO;
    }
    Duration::from_nanos(rng.gen_range(0..nanos))
}

/// Backoff parameters carried by a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    pub base: Duration,
    pub cap: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self { base: DEFAULT_BASE, cap: DEFAULT_CAP }
    }
}

impl Backoff {
    pub fn new(base: Duration, cap: Duration) -> Self {
        Self { base, cap }
    }

    pub fn ceiling(&self, attempt: u32) -> Duration {
        ceiling(attempt, self.base, self.cap)
    }

    pub fn delay(&self, attempt: u32) -> Duration {
        delay(attempt, self.base, self.cap)
    }

    pub fn delay_with<R: Rng + ?Sized>(&self, rng: &mut R, attempt: u32) -> Duration {
        delay_with(rng, attempt, self.base, self.cap)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
