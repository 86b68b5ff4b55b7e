//! Opponent lane-scoring heuristic and the ambient pressure it applies
//!
//! The opposing factions never contest territory: they only erode the
//! player's stockpile and court through whichever lanes score best.

use serde::{Deserialize, Serialize};

use crate::core::types::Lane;
use crate::sim::settlement::{GovernanceState, ResourceState};

/// What the attacking court knows about itself
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfSignals {
    pub deficit: bool,
    pub military_ready: bool,
    pub diplomatic_leverage: bool,
}

/// Weaknesses observed in the target court
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSignals {
    pub security_low: bool,
    pub morale_low: bool,
    pub corruption_high: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    #[default]
    Neutral,
    Hostile,
    Friendly,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiPolicyContext {
    pub own: SelfSignals,
    pub target: TargetSignals,
    pub relation: Relation,
}

impl AiPolicyContext {
    /// Read the signals the factions use against the player.
    ///
    /// The factions mirror the player's own economy and court when judging
    /// both their footing and the target's weaknesses.
    pub fn against_player(resources: &ResourceState, governance: &GovernanceState) -> Self {
        Self {
            own: SelfSignals {
                deficit: resources.gold < 400,
                military_ready: resources.armament > 40,
                diplomatic_leverage: governance.morale > 55,
            },
            target: TargetSignals {
                security_low: governance.security < 50,
                morale_low: governance.morale < 50,
                corruption_high: governance.corruption > 50,
            },
            relation: Relation::Hostile,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AiAction {
    pub lane: Lane,
    pub score: u32,
    pub reason: &'static str,
}

fn reason(lane: Lane) -> &'static str {
    match lane {
        Lane::Economic => "resource pressure exploit",
        Lane::Diplomatic => "political instability exploit",
        Lane::War => "security weakness exploit",
    }
}

fn lane_scores(context: &AiPolicyContext) -> [(Lane, u32); 3] {
    let (mut economic, mut diplomatic, mut war) = (1, 1, 1);

    if context.own.deficit {
        economic += 3;
    }
    if context.own.diplomatic_leverage {
        diplomatic += 2;
    }
    if context.own.military_ready {
        war += 2;
    }

    if context.target.corruption_high {
        economic += 2;
        diplomatic += 1;
    }
    if context.target.morale_low {
        diplomatic += 2;
        war += 1;
    }
    if context.target.security_low {
        war += 3;
    }

    match context.relation {
        Relation::Hostile => war += 1,
        Relation::Friendly => diplomatic += 1,
        Relation::Neutral => {}
    }

    [
        (Lane::Economic, economic),
        (Lane::Diplomatic, diplomatic),
        (Lane::War, war),
    ]
}

/// Top three lanes by score, highest first.
///
/// The sort is stable, so ties keep declaration order.
pub fn pick_ai_actions(context: &AiPolicyContext) -> Vec<AiAction> {
    let mut actions: Vec<AiAction> = lane_scores(context)
        .into_iter()
        .map(|(lane, score)| AiAction {
            lane,
            score,
            reason: reason(lane),
        })
        .collect();
    actions.sort_by(|a, b| b.score.cmp(&a.score));
    actions.truncate(3);
    actions
}

/// Apply the fixed erosion of each chosen lane to the player's state
pub fn apply_ai_pressure(
    actions: &[AiAction],
    resources: &ResourceState,
    governance: &GovernanceState,
) -> (ResourceState, GovernanceState) {
    let mut resources = *resources;
    let mut governance = *governance;

    for action in actions {
        match action.lane {
            Lane::Economic => {
                resources.gold -= 20;
                resources.grain -= 30;
            }
            Lane::Diplomatic => {
                governance.morale -= 2;
            }
            Lane::War => {
                resources.armament -= 2;
                governance.security -= 2;
            }
        }
    }

    (resources.clamped(), governance.clamped())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_context_keeps_declaration_order() {
        let actions = pick_ai_actions(&AiPolicyContext::default());
        let lanes: Vec<Lane> = actions.iter().map(|a| a.lane).collect();
        assert_eq!(lanes, vec![Lane::Economic, Lane::Diplomatic, Lane::War]);
        assert!(actions.iter().all(|a| a.score == 1));
    }

    #[test]
    fn test_security_low_and_hostile_favours_war() {
        let context = AiPolicyContext {
            target: TargetSignals {
                security_low: true,
                ..Default::default()
            },
            relation: Relation::Hostile,
            ..Default::default()
        };
        let actions = pick_ai_actions(&context);
        assert_eq!(actions[0].lane, Lane::War);
        assert_eq!(actions[0].score, 5);
        assert_eq!(actions[0].reason, "security weakness exploit");
    }

    #[test]
    fn test_deficit_and_corruption_favour_economic() {
        let context = AiPolicyContext {
            own: SelfSignals {
                deficit: true,
                ..Default::default()
            },
            target: TargetSignals {
                corruption_high: true,
                ..Default::default()
            },
            relation: Relation::Friendly,
        };
        let actions = pick_ai_actions(&context);
        assert_eq!(actions[0].lane, Lane::Economic);
        assert_eq!(actions[0].score, 6);
        assert_eq!(actions[1].lane, Lane::Diplomatic);
        assert_eq!(actions[1].score, 3);
        assert_eq!(actions[2].lane, Lane::War);
    }

    #[test]
    fn test_tie_broken_by_declaration_order() {
        // diplomatic: 1 + 2 (leverage) = 3, war: 1 + 2 (ready) = 3
        let context = AiPolicyContext {
            own: SelfSignals {
                military_ready: true,
                diplomatic_leverage: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let actions = pick_ai_actions(&context);
        assert_eq!(actions[0].lane, Lane::Diplomatic);
        assert_eq!(actions[1].lane, Lane::War);
        assert_eq!(actions[2].lane, Lane::Economic);
    }

    #[test]
    fn test_player_context_signals() {
        let resources = ResourceState {
            grain: 1000,
            gold: 300,
            population: 1000,
            security: 60,
            armament: 50,
        };
        let governance = GovernanceState {
            security: 45,
            morale: 60,
            corruption: 55,
            cv: 0,
        };
        let context = AiPolicyContext::against_player(&resources, &governance);
        assert!(context.own.deficit);
        assert!(context.own.military_ready);
        assert!(context.own.diplomatic_leverage);
        assert!(context.target.security_low);
        assert!(!context.target.morale_low);
        assert!(context.target.corruption_high);
        assert_eq!(context.relation, Relation::Hostile);
    }

    #[test]
    fn test_pressure_applies_every_chosen_lane() {
        let resources = ResourceState {
            grain: 100,
            gold: 10,
            population: 50,
            security: 50,
            armament: 1,
        };
        let governance = GovernanceState {
            security: 1,
            morale: 50,
            corruption: 20,
            cv: 0,
        };
        let actions = pick_ai_actions(&AiPolicyContext::default());
        let (r, g) = apply_ai_pressure(&actions, &resources, &governance);
        assert_eq!(r.gold, 0);
        assert_eq!(r.grain, 70);
        assert_eq!(r.armament, 0);
        assert_eq!(g.security, 0);
        assert_eq!(g.morale, 48);
        assert_eq!(g.corruption, 20);
    }
}
