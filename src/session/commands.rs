//! Player commands
//!
//! Each command validates first and mutates only on success. Rejections are
//! returned as `CommandError` and leave the session untouched.

use serde::{Deserialize, Serialize};

use crate::core::config::GARRISON_BONUS;
use crate::core::error::{CommandError, CommandResult};
use crate::core::types::{CityTier, Lane, Owner};
use crate::sim::{
    apply_annexation_action, AnnexationInput, BattleOutcome, GovernanceState, ResourceState,
    TimeScale,
};

use super::snapshot::SessionSnapshot;
use super::GameSession;

/// Transport-facing command result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub ok: bool,
    pub message: String,
}

impl From<CommandResult> for ActionResult {
    fn from(result: CommandResult) -> Self {
        match result {
            Ok(message) => Self { ok: true, message },
            Err(err) => Self {
                ok: false,
                message: err.to_string(),
            },
        }
    }
}

/// Command result paired with the refreshed snapshot
#[derive(Debug, Clone, Serialize)]
pub struct CommandResponse {
    pub result: ActionResult,
    pub snapshot: SessionSnapshot,
}

fn can_afford(lane: Lane, r: &ResourceState) -> bool {
    match lane {
        Lane::Economic => r.gold >= 120 && r.grain >= 140,
        Lane::Diplomatic => r.gold >= 150 && r.population >= 50,
        Lane::War => r.armament >= 20 && r.grain >= 100,
    }
}

fn pay_lane_cost(lane: Lane, r: &mut ResourceState) {
    match lane {
        Lane::Economic => {
            r.gold -= 120;
            r.grain -= 140;
        }
        Lane::Diplomatic => {
            r.gold -= 150;
            r.population = (r.population - 40).max(1);
        }
        Lane::War => {
            r.armament -= 20;
            r.grain -= 100;
        }
    }
}

/// Attacker power from post-cost state
fn attacker_power(lane: Lane, r: &ResourceState, g: &GovernanceState) -> f64 {
    match lane {
        Lane::Economic => r.gold as f64 / 30.0 + r.grain as f64 / 80.0 + g.morale as f64 / 2.0,
        Lane::Diplomatic => {
            g.morale as f64 + r.population as f64 / 80.0 - g.corruption as f64 / 2.0
        }
        Lane::War => r.armament as f64 + g.security as f64 * 1.5,
    }
}

fn city_defense(tier: CityTier) -> f64 {
    tier.base_defense() + GARRISON_BONUS
}

impl GameSession {
    /// Pause or resume the wall clock
    pub fn set_paused(&mut self, paused: bool) -> CommandResult {
        let result = self.try_set_paused(paused);
        self.note_rejection("set_paused", &result);
        result
    }

    fn try_set_paused(&mut self, paused: bool) -> CommandResult {
        if self.state.outcome.is_terminal() {
            return Err(CommandError::GameOver);
        }
        if !paused && self.state.pending_event.is_some() {
            return Err(CommandError::EventPending);
        }

        self.state.paused = paused;
        let message = if paused { "Paused" } else { "Resumed" };
        self.push_log(message);
        Ok(message.to_string())
    }

    pub fn set_time_scale(&mut self, scale: i64) -> CommandResult {
        let result = self.try_set_time_scale(scale);
        self.note_rejection("set_time_scale", &result);
        result
    }

    fn try_set_time_scale(&mut self, scale: i64) -> CommandResult {
        if self.state.outcome.is_terminal() {
            return Err(CommandError::GameOver);
        }
        let scale = TimeScale::new(scale)?;

        self.state.time_scale = scale;
        let penalty = scale.penalty();
        let message = if penalty.is_active() {
            format!(
                "Time scale x{} (corruption +{}, stability -{} per tick)",
                scale.get(),
                penalty.corruption_gain(),
                penalty.stability_loss()
            )
        } else {
            format!("Time scale x{}", scale.get())
        };
        tracing::debug!(scale = scale.get(), "Time scale changed");
        self.push_log(message.clone());
        Ok(message)
    }

    /// Run exactly one tick without touching the wall-clock carry
    pub fn manual_advance_tick(&mut self) -> CommandResult {
        let result = self.try_manual_advance_tick();
        self.note_rejection("manual_advance_tick", &result);
        result
    }

    fn try_manual_advance_tick(&mut self) -> CommandResult {
        if self.state.outcome.is_terminal() {
            return Err(CommandError::GameOver);
        }
        if self.state.pending_event.is_some() {
            return Err(CommandError::EventPending);
        }

        self.step_one_tick();
        let message = format!("Advanced to tick {}", self.state.tick);
        self.push_log(message.clone());
        Ok(message)
    }

    /// Act against one faction city through one lane
    pub fn perform_annex_action(&mut self, lane: Lane, city_name: &str) -> CommandResult {
        let result = self.try_annex(lane, city_name);
        self.note_rejection("perform_annex_action", &result);
        result
    }

    fn try_annex(&mut self, lane: Lane, city_name: &str) -> CommandResult {
        if self.state.outcome.is_terminal() {
            return Err(CommandError::GameOver);
        }
        if self.state.pending_event.is_some() {
            return Err(CommandError::EventPending);
        }

        let index = self
            .state
            .cities
            .iter()
            .position(|c| c.name == city_name)
            .ok_or_else(|| CommandError::UnknownCity(city_name.to_string()))?;
        if self.state.cities[index].owner == Owner::Player {
            return Err(CommandError::AlreadyOwned(city_name.to_string()));
        }
        if !can_afford(lane, &self.state.resources) {
            return Err(CommandError::InsufficientResources(lane));
        }

        pay_lane_cost(lane, &mut self.state.resources);

        let power = attacker_power(lane, &self.state.resources, &self.state.governance);
        let city = &mut self.state.cities[index];
        let defense = city_defense(city.tier);
        let battle_outcome = match lane {
            Lane::War => Some(BattleOutcome::from_diff(power - defense)),
            _ => None,
        };

        let result = apply_annexation_action(&AnnexationInput {
            isv: city.isv,
            lane,
            power,
            defense,
            battle_outcome,
        });
        city.isv = result.isv;

        let name = city.name.clone();
        let previous_owner = city.owner;
        let annexed = city.is_past_threshold();
        if annexed {
            city.owner = Owner::Player;
        }

        tracing::debug!(
            %lane,
            city = %name,
            power,
            defense,
            delta = result.delta,
            isv = result.isv,
            "Annex action resolved"
        );

        let message = if annexed {
            tracing::info!(city = %name, from = %previous_owner, "City annexed");
            self.push_log(format!("Annexed {} from {} ({})", name, previous_owner, lane));
            format!("{} annexed", name)
        } else {
            self.push_log(format!(
                "{} action on {}: ISV {:+} to {}",
                lane, name, result.delta, result.isv
            ));
            format!("{} action on {} complete", lane, name)
        };

        self.evaluate_outcome();
        Ok(message)
    }

    /// Apply one of the pending event's choices and resume
    pub fn resolve_event(&mut self, choice_id: &str) -> CommandResult {
        let result = self.try_resolve_event(choice_id);
        self.note_rejection("resolve_event", &result);
        result
    }

    fn try_resolve_event(&mut self, choice_id: &str) -> CommandResult {
        let event = self
            .state
            .pending_event
            .as_ref()
            .ok_or(CommandError::NoPendingEvent)?;
        let choice = event
            .choice(choice_id)
            .cloned()
            .ok_or_else(|| CommandError::UnknownChoice(choice_id.to_string()))?;

        self.state.governance = choice.impact.apply(&self.state.governance);
        self.state.pending_event = None;
        self.state.paused = false;

        tracing::info!(choice = %choice.id, "Event resolved");
        self.push_log(format!("Event resolved: {}", choice.label));
        self.evaluate_outcome();
        Ok(format!("Chose {}", choice.label))
    }

    pub fn manual_save(&mut self) -> CommandResult {
        let id = self.saves.manual_save(&self.state);
        tracing::info!(id, tick = self.state.tick, "Manual save");
        self.push_log(format!("Saved #{}", id));
        Ok(format!("Saved #{}", id))
    }

    /// Restore the most recent save of either kind
    pub fn load_latest_save(&mut self) -> CommandResult {
        let result = self.try_load_latest_save();
        self.note_rejection("load_latest_save", &result);
        result
    }

    fn try_load_latest_save(&mut self) -> CommandResult {
        if self.state.outcome.is_terminal() {
            return Err(CommandError::GameOver);
        }
        let id = self
            .saves
            .latest()
            .map(|record| record.id())
            .ok_or(CommandError::NoSaveAvailable)?;
        let state = self
            .saves
            .load_latest()
            .ok_or(CommandError::NoSaveAvailable)?;

        self.state = state;
        tracing::info!(id, tick = self.state.tick, "Save loaded");
        self.push_log(format!("Loaded save #{}", id));
        Ok(format!("Loaded save #{} at tick {}", id, self.state.tick))
    }

    /// Run a command result through the transport shape
    pub fn respond(&self, result: CommandResult) -> CommandResponse {
        CommandResponse {
            result: result.into(),
            snapshot: self.snapshot(),
        }
    }

    fn note_rejection(&self, command: &str, result: &CommandResult) {
        if let Err(err) = result {
            tracing::warn!(command, tick = self.state.tick, error = %err, "Command rejected");
        }
    }
}
