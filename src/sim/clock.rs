//! Frame clock
//!
//! Converts wall-clock time since launch into animation ticks. Ticks only
//! drive render interpolation; simulation steps are frame-driven.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::consts::TICKS_PER_SECOND;

/// Discretized animation time, `TICKS_PER_SECOND` per second
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Tick(pub u64);

impl Tick {
    /// Tick reached after `elapsed` wall-clock time
    pub fn from_elapsed(elapsed: Duration) -> Self {
        let ticks = elapsed.as_nanos() * TICKS_PER_SECOND as u128 / 1_000_000_000;
        Tick(ticks as u64)
    }
}

/// Monotonic tick source anchored at game launch
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    start: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Current tick. Never decreases because `Instant` is monotonic.
    pub fn now(&self) -> Tick {
        Tick::from_elapsed(self.start.elapsed())
    }

    /// Wall-clock time since launch
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
