//! Per-tick settlement of the home city's stockpile and court
//!
//! Pure functions: each takes the current state and returns the next one,
//! already clamped to its domain range.

use serde::{Deserialize, Serialize};

use crate::core::config::{SessionConfig, MAX_COLLAPSE_VALUE};
use crate::sim::time_scale::ScalePenalty;

/// Home city stockpile.
///
/// `security` and `armament` live in [0, 100], `population` is at least 1,
/// everything else is non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceState {
    pub grain: i64,
    pub gold: i64,
    pub population: i64,
    pub security: i64,
    pub armament: i64,
}

impl ResourceState {
    pub fn from_config(config: &SessionConfig) -> Self {
        let r = &config.resources;
        Self {
            grain: r.grain,
            gold: r.gold,
            population: r.population,
            security: r.security,
            armament: r.armament,
        }
        .clamped()
    }

    pub fn clamped(self) -> Self {
        Self {
            grain: self.grain.max(0),
            gold: self.gold.max(0),
            population: self.population.max(1),
            security: self.security.clamp(0, 100),
            armament: self.armament.clamp(0, 100),
        }
    }
}

/// Court stability. Percent fields in [0, 100], `cv` in [0, MAX_COLLAPSE_VALUE].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceState {
    pub security: i64,
    pub morale: i64,
    pub corruption: i64,
    pub cv: i64,
}

impl GovernanceState {
    pub fn from_config(config: &SessionConfig) -> Self {
        let g = &config.governance;
        Self {
            security: g.security,
            morale: g.morale,
            corruption: g.corruption,
            cv: g.cv,
        }
        .clamped()
    }

    pub fn clamped(self) -> Self {
        Self {
            security: self.security.clamp(0, 100),
            morale: self.morale.clamp(0, 100),
            corruption: self.corruption.clamp(0, 100),
            cv: self.cv.clamp(0, MAX_COLLAPSE_VALUE),
        }
    }

    /// Number of collapse thresholds currently breached (0..=6)
    pub fn breached_thresholds(&self) -> i64 {
        [
            self.security < 40,
            self.morale < 40,
            self.corruption > 60,
            self.security < 20,
            self.morale < 20,
            self.corruption > 80,
        ]
        .iter()
        .filter(|&&breached| breached)
        .count() as i64
    }

    /// All three pillars healthy enough for the court to recover
    pub fn is_stable(&self) -> bool {
        self.security >= 70 && self.morale >= 70 && self.corruption <= 40
    }
}

/// Collapse value added per breached threshold
pub const CV_PER_BREACH: i64 = 10;

/// Collapse value removed per tick while the court is stable
pub const CV_RECOVERY: i64 = 15;

pub fn settle_resources(current: &ResourceState) -> ResourceState {
    // floor(2% of population) - floor(10% of armament), in integer steps
    let grain_delta = current.population.div_euclid(50) - current.armament.div_euclid(10);
    let gold_delta = current.population.div_euclid(100) - current.armament.div_euclid(20);
    let population_delta = if current.security >= 60 { 5 } else { -5 };
    let security_delta = if current.armament >= 50 { 1 } else { -1 };
    let armament_delta = (current.gold.div_euclid(100) - 1).max(-2);

    ResourceState {
        grain: current.grain + grain_delta,
        gold: current.gold + gold_delta,
        population: current.population + population_delta,
        security: current.security + security_delta,
        armament: current.armament + armament_delta,
    }
    .clamped()
}

/// Breaches stack additively, up to +60 in one tick
pub fn settle_governance(current: &GovernanceState) -> GovernanceState {
    let mut cv = current.cv + current.breached_thresholds() * CV_PER_BREACH;
    if current.is_stable() {
        cv -= CV_RECOVERY;
    }

    GovernanceState { cv, ..*current }.clamped()
}

/// Extra wobble from running the clock fast
pub fn apply_scale_penalty(current: &GovernanceState, penalty: &ScalePenalty) -> GovernanceState {
    if !penalty.is_active() {
        return *current;
    }
    let loss = penalty.stability_loss();
    GovernanceState {
        security: current.security - loss,
        morale: current.morale - loss,
        corruption: current.corruption + penalty.corruption_gain(),
        cv: current.cv,
    }
    .clamped()
}
