//! Session simulation rules
//!
//! Leaf components are pure functions over explicit state; the tick engine
//! and time scale turn wall-clock time into whole settlement ticks.

pub mod ai_policy;
pub mod annexation;
pub mod events;
pub mod settlement;
pub mod tick_engine;
pub mod time_scale;
pub mod victory;

pub use ai_policy::{apply_ai_pressure, pick_ai_actions, AiAction, AiPolicyContext, Relation};
pub use annexation::{apply_annexation_action, is_annexed, AnnexationInput, BattleOutcome};
pub use events::{build_event_choices, EventChoice, EventClock, EventContext, PendingEvent};
pub use settlement::{
    apply_scale_penalty, settle_governance, settle_resources, GovernanceState, ResourceState,
};
pub use tick_engine::TickEngine;
pub use time_scale::{scale_penalty, ScalePenalty, TimeScale};
pub use victory::evaluate_outcome;
