//! Time-scale multiplier and its stability penalty
//!
//! Running the clock faster is allowed, but above 4x the court starts to
//! wobble: every tick shaves security and morale and feeds corruption.

use serde::{Deserialize, Serialize};

use crate::core::config::TIME_SCALE_RANGE;
use crate::core::error::CommandError;
use crate::core::types::round_half_up;

/// Validated speed multiplier in [1, 10]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TimeScale(u8);

impl TimeScale {
    pub const NORMAL: TimeScale = TimeScale(1);

    pub fn new(value: i64) -> Result<Self, CommandError> {
        let (min, max) = TIME_SCALE_RANGE;
        if value < i64::from(min) || value > i64::from(max) {
            return Err(CommandError::InvalidTimeScale(value));
        }
        Ok(Self(value as u8))
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    pub fn penalty(&self) -> ScalePenalty {
        match self.0 {
            1..=4 => ScalePenalty::NONE,
            5..=6 => ScalePenalty::elevated(1.25),
            7..=8 => ScalePenalty::elevated(1.5),
            _ => ScalePenalty::elevated(1.75),
        }
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl TryFrom<i64> for TimeScale {
    type Error = CommandError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TimeScale> for i64 {
    fn from(scale: TimeScale) -> Self {
        i64::from(scale.0)
    }
}

/// Extra instability caused by a fast clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalePenalty {
    pub corruption_growth_bonus: f64,
    pub fluctuation_multiplier: f64,
}

impl ScalePenalty {
    pub const NONE: ScalePenalty = ScalePenalty {
        corruption_growth_bonus: 0.0,
        fluctuation_multiplier: 1.0,
    };

    /// The corruption bonus is flat across every elevated band
    fn elevated(fluctuation_multiplier: f64) -> Self {
        Self {
            corruption_growth_bonus: 0.5,
            fluctuation_multiplier,
        }
    }

    pub fn is_active(&self) -> bool {
        self.corruption_growth_bonus > 0.0 || self.fluctuation_multiplier > 1.0
    }

    /// Security and morale lost per tick
    pub fn stability_loss(&self) -> i64 {
        round_half_up((self.fluctuation_multiplier - 1.0) * 3.0)
    }

    /// Corruption gained per tick
    pub fn corruption_gain(&self) -> i64 {
        round_half_up(self.corruption_growth_bonus * 4.0)
    }
}

/// Penalty for a raw multiplier; rejects anything outside [1, 10]
pub fn scale_penalty(scale: i64) -> Result<ScalePenalty, CommandError> {
    TimeScale::new(scale).map(|s| s.penalty())
}
