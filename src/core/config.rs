//! Rule constants and session configuration
//!
//! The fixed rules of the campaign are plain constants. Opening conditions
//! (starting stocks, starting governance, log size) are tunable through
//! `SessionConfig`, which can be loaded from TOML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ConquestError, Result};

// === CLOCK ===

/// Length of one simulation tick in game seconds
pub const TICK_SECONDS: u64 = 60;

/// Length of one simulation tick in game milliseconds
pub const TICK_MS: u64 = TICK_SECONDS * 1000;

/// Game seconds between random events
pub const EVENT_INTERVAL_SECONDS: u64 = 300;

/// Game minutes between autosaves
pub const AUTOSAVE_INTERVAL_MINUTES: u64 = 10;

/// Inclusive range of accepted time-scale multipliers
pub const TIME_SCALE_RANGE: (u8, u8) = (1, 10);

// === GOVERNANCE ===

/// Collapse value at which the court falls and the campaign is lost
pub const MAX_COLLAPSE_VALUE: i64 = 300;

// === CONQUEST ===

/// Cities in a roster: one home city plus the annexation targets
pub const TOTAL_CITIES: usize = 12;

/// Annexed cities needed for victory (every city except home)
pub const VICTORY_TARGET: usize = 11;

/// Flat garrison bonus added to every city's tier defense
pub const GARRISON_BONUS: f64 = 10.0;

/// Default capacity of the player-facing session log
pub const LOG_CAPACITY: usize = 40;

/// Starting stockpile of the home city
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StartingResources {
    pub grain: i64,
    pub gold: i64,
    pub population: i64,
    pub security: i64,
    pub armament: i64,
}

impl Default for StartingResources {
    fn default() -> Self {
        Self {
            grain: 1000,
            gold: 1000,
            population: 1000,
            security: 60,
            armament: 50,
        }
    }
}

/// Starting state of the court
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StartingGovernance {
    pub security: i64,
    pub morale: i64,
    pub corruption: i64,
    pub cv: i64,
}

impl Default for StartingGovernance {
    fn default() -> Self {
        Self {
            security: 60,
            morale: 60,
            corruption: 40,
            cv: 0,
        }
    }
}

/// Tunable opening conditions for a new session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub resources: StartingResources,
    pub governance: StartingGovernance,
    /// Entries kept in the session log before the oldest are dropped
    pub log_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            resources: StartingResources::default(),
            governance: StartingGovernance::default(),
            log_capacity: LOG_CAPACITY,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML. Missing sections fall back to defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SessionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate that every value sits inside its domain range
    pub fn validate(&self) -> Result<()> {
        let r = &self.resources;
        if r.grain < 0 || r.gold < 0 {
            return Err(ConquestError::InvalidConfig(
                "grain and gold must be non-negative".into(),
            ));
        }
        if r.population < 1 {
            return Err(ConquestError::InvalidConfig(format!(
                "population must be at least 1, got {}",
                r.population
            )));
        }
        check_percent("resources.security", r.security)?;
        check_percent("resources.armament", r.armament)?;

        let g = &self.governance;
        check_percent("governance.security", g.security)?;
        check_percent("governance.morale", g.morale)?;
        check_percent("governance.corruption", g.corruption)?;
        if !(0..MAX_COLLAPSE_VALUE).contains(&g.cv) {
            return Err(ConquestError::InvalidConfig(format!(
                "governance.cv ({}) must be in [0, {})",
                g.cv, MAX_COLLAPSE_VALUE
            )));
        }

        if self.log_capacity == 0 {
            return Err(ConquestError::InvalidConfig(
                "log_capacity must be positive".into(),
            ));
        }
        Ok(())
    }
}

fn check_percent(field: &str, value: i64) -> Result<()> {
    if (0..=100).contains(&value) {
        Ok(())
    } else {
        Err(ConquestError::InvalidConfig(format!(
            "{} ({}) must be in [0, 100]",
            field, value
        )))
    }
}
