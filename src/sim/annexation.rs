//! Annexation conflict resolution
//!
//! One player action against one city. Pressure is attacker power minus
//! defender defense; each lane converts pressure into an ISV change, and the
//! war lane may instead use a discretized battle result.

use serde::{Deserialize, Serialize};

use crate::core::types::{round_half_up, CityTier, Lane};

/// Discretized result of a war-lane clash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    MajorWin,
    MinorWin,
    Draw,
    MinorLose,
    MajorLose,
}

impl BattleOutcome {
    /// Classify a power-minus-defense difference
    pub fn from_diff(diff: f64) -> Self {
        if diff >= 30.0 {
            BattleOutcome::MajorWin
        } else if diff >= 10.0 {
            BattleOutcome::MinorWin
        } else if diff <= -20.0 {
            BattleOutcome::MajorLose
        } else if diff <= -5.0 {
            BattleOutcome::MinorLose
        } else {
            BattleOutcome::Draw
        }
    }

    /// Fixed ISV change for this result
    pub fn isv_delta(&self) -> i64 {
        match self {
            BattleOutcome::MajorWin => -30,
            BattleOutcome::MinorWin => -15,
            BattleOutcome::Draw => -5,
            BattleOutcome::MinorLose => 5,
            BattleOutcome::MajorLose => 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnexationInput {
    pub isv: i64,
    pub lane: Lane,
    pub power: f64,
    pub defense: f64,
    /// Only consulted on the war lane
    pub battle_outcome: Option<BattleOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnexationResult {
    pub isv: i64,
    pub delta: i64,
}

/// A city is annexed once its ISV sinks to its tier threshold
pub fn is_annexed(tier: CityTier, isv: i64) -> bool {
    isv <= tier.annex_threshold()
}

fn lane_delta(input: &AnnexationInput) -> i64 {
    let pressure = input.power - input.defense;
    match input.lane {
        Lane::Economic => -round_half_up(pressure),
        Lane::Diplomatic => -round_half_up(pressure * 0.8),
        Lane::War => match input.battle_outcome {
            Some(outcome) => outcome.isv_delta(),
            None => -round_half_up(pressure * 1.2),
        },
    }
}

pub fn apply_annexation_action(input: &AnnexationInput) -> AnnexationResult {
    let delta = lane_delta(input);
    AnnexationResult {
        isv: input.isv + delta,
        delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(lane: Lane, power: f64, defense: f64) -> AnnexationInput {
        AnnexationInput {
            isv: 20,
            lane,
            power,
            defense,
            battle_outcome: None,
        }
    }

    #[test]
    fn test_is_annexed_boundaries() {
        assert!(is_annexed(CityTier::Frontier, 0));
        assert!(!is_annexed(CityTier::Frontier, 1));
        assert!(is_annexed(CityTier::Core, -50));
        assert!(!is_annexed(CityTier::Core, -49));
        assert!(is_annexed(CityTier::Capital, -100));
        assert!(!is_annexed(CityTier::Capital, -99));
    }

    #[test]
    fn test_economic_lane() {
        let result = apply_annexation_action(&input(Lane::Economic, 70.0, 36.0));
        assert_eq!(result.delta, -34);
        assert_eq!(result.isv, -14);
    }

    #[test]
    fn test_diplomatic_lane_dampened() {
        let result = apply_annexation_action(&input(Lane::Diplomatic, 46.0, 36.0));
        assert_eq!(result.delta, -8);
    }

    #[test]
    fn test_war_lane_without_outcome_amplified() {
        let result = apply_annexation_action(&input(Lane::War, 46.0, 36.0));
        assert_eq!(result.delta, -12);
    }

    #[test]
    fn test_war_lane_uses_outcome_table() {
        let mut war = input(Lane::War, 0.0, 100.0);
        war.battle_outcome = Some(BattleOutcome::MajorWin);
        assert_eq!(apply_annexation_action(&war).delta, -30);

        war.battle_outcome = Some(BattleOutcome::MajorLose);
        assert_eq!(apply_annexation_action(&war).delta, 12);
    }

    #[test]
    fn test_outcome_ignored_off_war_lane() {
        let mut eco = input(Lane::Economic, 40.0, 36.0);
        eco.battle_outcome = Some(BattleOutcome::MajorLose);
        assert_eq!(apply_annexation_action(&eco).delta, -4);
    }

    #[test]
    fn test_negative_pressure_raises_isv() {
        let result = apply_annexation_action(&input(Lane::Economic, 20.0, 36.0));
        assert_eq!(result.delta, 16);
        assert_eq!(result.isv, 36);
    }

    #[test]
    fn test_battle_discretization() {
        assert_eq!(BattleOutcome::from_diff(30.0), BattleOutcome::MajorWin);
        assert_eq!(BattleOutcome::from_diff(29.9), BattleOutcome::MinorWin);
        assert_eq!(BattleOutcome::from_diff(10.0), BattleOutcome::MinorWin);
        assert_eq!(BattleOutcome::from_diff(9.0), BattleOutcome::Draw);
        assert_eq!(BattleOutcome::from_diff(-4.9), BattleOutcome::Draw);
        assert_eq!(BattleOutcome::from_diff(-5.0), BattleOutcome::MinorLose);
        assert_eq!(BattleOutcome::from_diff(-19.9), BattleOutcome::MinorLose);
        assert_eq!(BattleOutcome::from_diff(-20.0), BattleOutcome::MajorLose);
    }
}
