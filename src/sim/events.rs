//! Random court events
//!
//! A countdown fires an event every `EVENT_INTERVAL_SECONDS` of game time.
//! Four archetypes compete by weight; the three heaviest are offered.

use serde::{Deserialize, Serialize};

use crate::core::config::EVENT_INTERVAL_SECONDS;
use crate::core::types::Tick;
use crate::sim::settlement::GovernanceState;

/// Number of choices offered per event
pub const CHOICES_PER_EVENT: usize = 3;

/// Governance readings the weights react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventContext {
    pub security: i64,
    pub morale: i64,
    pub corruption: i64,
}

impl From<&GovernanceState> for EventContext {
    fn from(g: &GovernanceState) -> Self {
        Self {
            security: g.security,
            morale: g.morale,
            corruption: g.corruption,
        }
    }
}

/// Fixed change to the court applied when a choice is taken
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventImpact {
    pub security: i64,
    pub morale: i64,
    pub corruption: i64,
}

impl EventImpact {
    pub fn apply(&self, governance: &GovernanceState) -> GovernanceState {
        GovernanceState {
            security: governance.security + self.security,
            morale: governance.morale + self.morale,
            corruption: governance.corruption + self.corruption,
            cv: governance.cv,
        }
        .clamped()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventChoice {
    pub id: String,
    pub label: String,
    pub impact: EventImpact,
}

/// An event waiting for the player's decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEvent {
    pub id: String,
    pub title: String,
    pub choices: Vec<EventChoice>,
}

impl PendingEvent {
    pub fn new(tick: Tick, context: &EventContext) -> Self {
        Self {
            id: format!("event-{}", tick),
            title: format!("Court crisis at tick {}", tick),
            choices: build_event_choices(context),
        }
    }

    pub fn choice(&self, id: &str) -> Option<&EventChoice> {
        self.choices.iter().find(|c| c.id == id)
    }
}

struct Archetype {
    id: &'static str,
    label: &'static str,
    impact: EventImpact,
    base_weight: u32,
}

/// Flat +1 for each of low security, low morale, high corruption
fn computed_weight(base: u32, context: &EventContext) -> u32 {
    let mut weight = base;
    if context.security < 50 {
        weight += 1;
    }
    if context.morale < 50 {
        weight += 1;
    }
    if context.corruption > 50 {
        weight += 1;
    }
    weight
}

fn archetypes(context: &EventContext) -> [Archetype; 4] {
    [
        Archetype {
            id: "grain-relief",
            label: "Open the granaries",
            impact: EventImpact {
                security: 5,
                morale: 8,
                corruption: 2,
            },
            base_weight: 3,
        },
        Archetype {
            id: "military-crackdown",
            label: "Military crackdown",
            impact: EventImpact {
                security: 8,
                morale: -5,
                corruption: 1,
            },
            base_weight: if context.security < 40 { 5 } else { 2 },
        },
        Archetype {
            id: "anti-corruption-drive",
            label: "Anti-corruption drive",
            impact: EventImpact {
                security: 2,
                morale: 3,
                corruption: -10,
            },
            base_weight: if context.corruption > 60 { 6 } else { 2 },
        },
        Archetype {
            id: "tax-cut",
            label: "Temporary tax cut",
            impact: EventImpact {
                security: 1,
                morale: 5,
                corruption: 0,
            },
            base_weight: if context.morale < 45 { 5 } else { 2 },
        },
    ]
}

/// The three heaviest archetypes, heaviest first; ties keep pool order
pub fn build_event_choices(context: &EventContext) -> Vec<EventChoice> {
    let mut pool: Vec<(u32, Archetype)> = archetypes(context)
        .into_iter()
        .map(|a| (computed_weight(a.base_weight, context), a))
        .collect();
    pool.sort_by(|a, b| b.0.cmp(&a.0));

    pool.into_iter()
        .take(CHOICES_PER_EVENT)
        .map(|(_, a)| EventChoice {
            id: a.id.to_string(),
            label: a.label.to_string(),
            impact: a.impact,
        })
        .collect()
}

/// Countdown to the next event, in game milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventClock {
    remaining_ms: i64,
}

impl Default for EventClock {
    fn default() -> Self {
        Self {
            remaining_ms: Self::period_ms(),
        }
    }
}

impl EventClock {
    fn period_ms() -> i64 {
        (EVENT_INTERVAL_SECONDS * 1000) as i64
    }

    pub fn elapse(&mut self, game_ms: u64) {
        let elapsed = i64::try_from(game_ms).unwrap_or(i64::MAX);
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed);
    }

    pub fn is_due(&self) -> bool {
        self.remaining_ms <= 0
    }

    /// Restart a full period
    pub fn reset(&mut self) {
        self.remaining_ms = Self::period_ms();
    }

    /// Whole seconds until the next event, rounded up, never negative
    pub fn seconds_remaining(&self) -> u64 {
        (self.remaining_ms.max(0) as u64).div_ceil(1000)
    }
}
