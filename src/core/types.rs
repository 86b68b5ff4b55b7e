//! Core type definitions used throughout the codebase

use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::core::error::CommandError;

/// Simulation tick counter
pub type Tick = u64;

/// City category. Controls annexation difficulty and base defense.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CityTier {
    #[display(fmt = "capital")]
    Capital,
    #[display(fmt = "core")]
    Core,
    #[display(fmt = "frontier")]
    Frontier,
}

impl CityTier {
    pub const ALL: [CityTier; 3] = [CityTier::Capital, CityTier::Core, CityTier::Frontier];

    /// ISV at or below which a city of this tier counts as annexed.
    ///
    /// Harder tiers sit further below zero: frontier > core > capital.
    pub fn annex_threshold(&self) -> i64 {
        match self {
            CityTier::Frontier => 0,
            CityTier::Core => -50,
            CityTier::Capital => -100,
        }
    }

    /// Starting ISV of a city held by an opposing faction
    pub fn base_isv(&self) -> i64 {
        match self {
            CityTier::Capital => 60,
            CityTier::Core => 40,
            CityTier::Frontier => 20,
        }
    }

    /// Defensive strength before the fixed garrison bonus
    pub fn base_defense(&self) -> f64 {
        match self {
            CityTier::Capital => 60.0,
            CityTier::Core => 42.0,
            CityTier::Frontier => 26.0,
        }
    }
}

/// One of the three opposing powers
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    #[display(fmt = "wei")]
    Wei,
    #[display(fmt = "shu")]
    Shu,
    #[display(fmt = "wu")]
    Wu,
}

impl Faction {
    pub const ALL: [Faction; 3] = [Faction::Wei, Faction::Shu, Faction::Wu];
}

/// Current holder of a city
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    #[display(fmt = "player")]
    Player,
    #[display(fmt = "wei")]
    Wei,
    #[display(fmt = "shu")]
    Shu,
    #[display(fmt = "wu")]
    Wu,
}

impl From<Faction> for Owner {
    fn from(faction: Faction) -> Self {
        match faction {
            Faction::Wei => Owner::Wei,
            Faction::Shu => Owner::Shu,
            Faction::Wu => Owner::Wu,
        }
    }
}

/// Approach used to pressure a target city
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    #[display(fmt = "economic")]
    Economic,
    #[display(fmt = "diplomatic")]
    Diplomatic,
    #[display(fmt = "war")]
    War,
}

impl Lane {
    /// Declaration order; also the tie-break order for lane scoring
    pub const ALL: [Lane; 3] = [Lane::Economic, Lane::Diplomatic, Lane::War];
}

impl FromStr for Lane {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "economic" | "eco" => Ok(Lane::Economic),
            "diplomatic" | "dip" => Ok(Lane::Diplomatic),
            "war" => Ok(Lane::War),
            other => Err(CommandError::UnknownLane(other.to_string())),
        }
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[display(fmt = "newbie")]
    Newbie,
    #[display(fmt = "easy")]
    Easy,
    #[display(fmt = "standard")]
    Standard,
    #[display(fmt = "hard")]
    Hard,
}

impl Difficulty {
    /// The two easiest settings: any home tier, always independent
    pub fn is_lenient(&self) -> bool {
        matches!(self, Difficulty::Newbie | Difficulty::Easy)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Standard
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newbie" => Ok(Difficulty::Newbie),
            "easy" => Ok(Difficulty::Easy),
            "standard" => Ok(Difficulty::Standard),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

/// Terminal state of a campaign. Never returns to `Ongoing` once left.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[display(fmt = "ongoing")]
    Ongoing,
    #[display(fmt = "victory")]
    Victory,
    #[display(fmt = "defeat")]
    Defeat,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

/// Half-up rounding, `floor(x + 0.5)`. Negative halves round toward zero.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
