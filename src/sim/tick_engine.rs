//! Wall-clock to tick conversion
//!
//! Scaled game time is poured into a carry buffer; every full `TICK_MS`
//! in the buffer becomes one tick and the remainder waits for the next call.
//! The engine only owns the sub-tick remainder. Counting settled ticks is
//! the caller's job, since a caller may drop ticks or run extra ones.

use serde::{Deserialize, Serialize};

use crate::core::config::TICK_MS;
use crate::sim::time_scale::TimeScale;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickEngine {
    /// Always below `TICK_MS` between calls
    carry_ms: u64,
}

impl TickEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume with a captured remainder
    pub fn with_carry(carry_ms: u64) -> Self {
        Self {
            carry_ms: carry_ms % TICK_MS,
        }
    }

    /// Add game milliseconds; returns the number of whole ticks gained
    pub fn advance(&mut self, elapsed_ms: u64) -> u64 {
        let total = self.carry_ms.saturating_add(elapsed_ms);
        self.carry_ms = total % TICK_MS;
        total / TICK_MS
    }

    /// Add real milliseconds stretched by the time-scale multiplier
    pub fn advance_scaled(&mut self, real_ms: u64, scale: TimeScale) -> u64 {
        self.advance(real_ms.saturating_mul(u64::from(scale.get())))
    }

    pub fn carry_ms(&self) -> u64 {
        self.carry_ms
    }
}
