//! Game session orchestrator
//!
//! A `GameSession` owns one campaign: the city map, the player's resource
//! and governance state, time accounting, at most one pending event, the
//! outcome, its save store and its log. Hosts drive it with wall-clock
//! advances and player commands, one at a time.

pub mod city;
pub mod commands;
pub mod console;
pub mod log;
pub mod snapshot;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::config::{SessionConfig, TICK_MS};
use crate::core::error::Result;
use crate::core::types::{Difficulty, Faction, Outcome, Tick};
use crate::roster::cities::CITIES;
use crate::roster::setup::{create_new_game, NewGame};
use crate::save::SaveStore;
use crate::sim::{
    apply_ai_pressure, apply_scale_penalty, evaluate_outcome, pick_ai_actions, settle_governance,
    settle_resources, AiPolicyContext, EventClock, EventContext, GovernanceState, PendingEvent,
    ResourceState, TickEngine, TimeScale,
};

pub use city::{build_cities, City};
pub use commands::{ActionResult, CommandResponse};
pub use log::{LogEntry, SessionLog};
pub use snapshot::SessionSnapshot;

/// Everything a save captures and a load restores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Settlement ticks run so far, counting manual ticks
    pub tick: Tick,
    /// Game time, scaled
    pub elapsed_ms: u64,
    /// Sub-tick wall-clock remainder
    pub clock: TickEngine,
    pub event_clock: EventClock,
    pub time_scale: TimeScale,
    pub paused: bool,
    pub outcome: Outcome,
    pub resources: ResourceState,
    pub governance: GovernanceState,
    pub cities: Vec<City>,
    pub pending_event: Option<PendingEvent>,
    pub home_lost: bool,
}

impl SessionState {
    fn new(setup: &NewGame, config: &SessionConfig) -> Self {
        Self {
            tick: 0,
            elapsed_ms: 0,
            clock: TickEngine::new(),
            event_clock: EventClock::default(),
            time_scale: TimeScale::NORMAL,
            paused: false,
            outcome: Outcome::Ongoing,
            resources: ResourceState::from_config(config),
            governance: GovernanceState::from_config(config),
            cities: build_cities(&CITIES, &setup.home_city),
            pending_event: None,
            home_lost: false,
        }
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_ms / 1000
    }

    pub fn elapsed_minutes(&self) -> u64 {
        self.elapsed_seconds() / 60
    }
}

/// Real milliseconds stretched by the time scale, saturating at `u64::MAX`
fn scaled_game_ms(real_ms: u64, scale: TimeScale) -> u64 {
    real_ms.saturating_mul(u64::from(scale.get()))
}

pub struct GameSession {
    setup: NewGame,
    state: SessionState,
    saves: SaveStore<SessionState>,
    log: SessionLog,
}

impl GameSession {
    /// Start a campaign with the default starting state
    pub fn new(seed: u64, difficulty: Difficulty) -> Result<Self> {
        Self::with_config(seed, difficulty, &SessionConfig::default())
    }

    pub fn with_config(seed: u64, difficulty: Difficulty, config: &SessionConfig) -> Result<Self> {
        config.validate()?;
        let setup = create_new_game(seed, difficulty)?;
        let state = SessionState::new(&setup, config);

        let mut session = Self {
            setup,
            state,
            saves: SaveStore::new(),
            log: SessionLog::new(config.log_capacity),
        };

        let affiliation = session
            .setup
            .affiliation
            .map(|f| f.to_string())
            .unwrap_or_else(|| "independent".to_string());
        tracing::info!(
            seed,
            %difficulty,
            home = %session.setup.home_city,
            %affiliation,
            "Session created"
        );
        session.push_log(format!(
            "Campaign begins at {} ({}), {}",
            session.setup.home_city, session.setup.home_tier, affiliation
        ));
        Ok(session)
    }

    pub fn seed(&self) -> u64 {
        self.setup.seed
    }

    pub fn difficulty(&self) -> Difficulty {
        self.setup.difficulty
    }

    pub fn home_city(&self) -> &str {
        &self.setup.home_city
    }

    pub fn affiliation(&self) -> Option<Faction> {
        self.setup.affiliation
    }

    pub fn opposing_factions(&self) -> &[Faction] {
        &self.setup.opposing_factions
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn saves(&self) -> &SaveStore<SessionState> {
        &self.saves
    }

    pub fn city(&self, name: &str) -> Option<&City> {
        self.state.cities.iter().find(|c| c.name == name)
    }

    /// Cities taken from the factions. The home city does not count.
    pub fn annexed_count(&self) -> usize {
        self.state
            .cities
            .iter()
            .filter(|c| c.is_player_owned() && c.name != self.setup.home_city)
            .count()
    }

    /// Feed real elapsed time into the session.
    ///
    /// Does nothing while paused or after the campaign ends. Returns the
    /// number of settlement ticks that ran.
    pub fn advance_wall_clock(&mut self, real: Duration) -> u64 {
        if self.state.paused || self.state.outcome.is_terminal() {
            return 0;
        }

        let real_ms = u64::try_from(real.as_millis()).unwrap_or(u64::MAX);
        let scale = self.state.time_scale;
        let game_ms = scaled_game_ms(real_ms, scale);
        self.state.elapsed_ms = self.state.elapsed_ms.saturating_add(game_ms);
        self.state.event_clock.elapse(game_ms);

        let due = self.state.clock.advance_scaled(real_ms, scale);
        let mut ran = 0;
        for _ in 0..due {
            self.run_tick();
            ran += 1;
            if self.state.outcome.is_terminal() {
                break;
            }
        }

        if ran > 0 {
            tracing::debug!(ticks = ran, tick = self.state.tick, "Wall clock advanced");
        }

        self.trigger_event_if_due();
        self.auto_save_if_due();
        ran
    }

    /// One settlement tick on top of the fixed 60s step
    pub(crate) fn step_one_tick(&mut self) {
        self.state.elapsed_ms = self.state.elapsed_ms.saturating_add(TICK_MS);
        self.state.event_clock.elapse(TICK_MS);
        self.run_tick();
        self.trigger_event_if_due();
        self.auto_save_if_due();
    }

    fn run_tick(&mut self) {
        let state = &mut self.state;
        state.tick += 1;

        let resources = settle_resources(&state.resources);
        let governance = settle_governance(&state.governance);
        let governance = apply_scale_penalty(&governance, &state.time_scale.penalty());

        let context = AiPolicyContext::against_player(&resources, &governance);
        let actions = pick_ai_actions(&context);
        let (resources, governance) = apply_ai_pressure(&actions, &resources, &governance);

        state.resources = resources;
        state.governance = governance;

        let lanes: Vec<_> = actions.iter().map(|a| a.lane).collect();
        tracing::debug!(
            tick = state.tick,
            cv = state.governance.cv,
            gold = state.resources.gold,
            grain = state.resources.grain,
            ai_lanes = ?lanes,
            "Tick settled"
        );

        self.evaluate_outcome();
    }

    /// Re-check victory and defeat. A decided outcome never changes.
    pub(crate) fn evaluate_outcome(&mut self) {
        if self.state.outcome.is_terminal() {
            return;
        }

        let outcome = evaluate_outcome(
            self.annexed_count(),
            self.state.home_lost,
            self.state.governance.cv,
        );
        if !outcome.is_terminal() {
            return;
        }

        self.state.outcome = outcome;
        self.state.paused = true;
        tracing::info!(
            %outcome,
            tick = self.state.tick,
            annexed = self.annexed_count(),
            cv = self.state.governance.cv,
            "Campaign decided"
        );
        match outcome {
            Outcome::Victory => self.push_log("Victory: the realm is unified"),
            _ => self.push_log("Defeat: the realm has collapsed"),
        }
    }

    fn trigger_event_if_due(&mut self) {
        if self.state.outcome.is_terminal()
            || self.state.pending_event.is_some()
            || !self.state.event_clock.is_due()
        {
            return;
        }

        let context = EventContext::from(&self.state.governance);
        let event = PendingEvent::new(self.state.tick, &context);
        tracing::info!(id = %event.id, tick = self.state.tick, "Event raised");
        self.push_log(format!("Event: {}", event.title));

        self.state.pending_event = Some(event);
        self.state.event_clock.reset();
        self.state.paused = true;
    }

    fn auto_save_if_due(&mut self) {
        let minutes = self.state.elapsed_minutes();
        if let Some(id) = self.saves.auto_save_if_due(minutes, &self.state) {
            tracing::debug!(id, minutes, "Autosaved");
            self.push_log(format!("Autosave #{}", id));
        }
    }

    pub(crate) fn push_log(&mut self, message: impl Into<String>) {
        self.log.push(self.state.tick, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Owner;

    fn session() -> GameSession {
        GameSession::new(42, Difficulty::Standard).unwrap()
    }

    #[test]
    fn test_new_session_layout() {
        let s = session();
        assert_eq!(s.state().cities.len(), 12);
        assert_eq!(s.state().tick, 0);
        assert_eq!(s.outcome(), Outcome::Ongoing);
        assert_eq!(s.annexed_count(), 0);

        let home = s.city(s.home_city()).unwrap();
        assert_eq!(home.owner, Owner::Player);
        assert_ne!(home.tier, crate::core::types::CityTier::Capital);
        assert!(!s.log().is_empty());
    }

    #[test]
    fn test_sub_tick_time_carries_over() {
        let mut s = session();
        assert_eq!(s.advance_wall_clock(Duration::from_secs(59)), 0);
        assert_eq!(s.state().tick, 0);
        assert_eq!(s.advance_wall_clock(Duration::from_secs(1)), 1);
        assert_eq!(s.state().tick, 1);
        assert_eq!(s.state().elapsed_seconds(), 60);
    }

    #[test]
    fn test_time_scale_multiplies_game_time() {
        let mut s = session();
        s.state.time_scale = TimeScale::new(4).unwrap();
        assert_eq!(s.advance_wall_clock(Duration::from_secs(30)), 2);
        assert_eq!(s.state().elapsed_seconds(), 120);
    }

    #[test]
    fn test_paused_session_ignores_wall_clock() {
        let mut s = session();
        s.state.paused = true;
        assert_eq!(s.advance_wall_clock(Duration::from_secs(600)), 0);
        assert_eq!(s.state().elapsed_ms, 0);
    }

    #[test]
    fn test_event_raised_after_interval() {
        let mut s = session();
        s.advance_wall_clock(Duration::from_secs(299));
        assert!(s.state().pending_event.is_none());

        s.advance_wall_clock(Duration::from_secs(1));
        let event = s.state().pending_event.as_ref().unwrap();
        assert_eq!(event.id, "event-5");
        assert_eq!(event.choices.len(), 3);
        assert!(s.state().paused);
    }

    #[test]
    fn test_first_autosave_on_first_advance() {
        let mut s = session();
        s.advance_wall_clock(Duration::from_secs(1));
        assert_eq!(s.saves().count(), 1);
        assert_eq!(s.saves().last_auto_save_minute(), Some(0));

        s.advance_wall_clock(Duration::from_secs(120));
        assert_eq!(s.saves().count(), 1);
    }

    #[test]
    fn test_batch_stops_when_campaign_decided() {
        let mut s = session();
        s.state.governance.cv = 300;
        s.state.governance.security = 0;
        s.state.governance.morale = 0;
        s.state.governance.corruption = 100;

        let ran = s.advance_wall_clock(Duration::from_secs(600));
        assert_eq!(ran, 1);
        assert_eq!(s.outcome(), Outcome::Defeat);
        assert!(s.state().paused);
        assert!(s.state().pending_event.is_none());
    }

    #[test]
    fn test_scaled_game_ms_saturates() {
        let fast = TimeScale::new(10).unwrap();
        assert_eq!(scaled_game_ms(30_000, fast), 300_000);
        assert_eq!(scaled_game_ms(u64::MAX / 2, fast), u64::MAX);
    }

    #[test]
    fn test_absurd_wall_clock_advance_saturates() {
        let mut s = session();
        s.state.time_scale = TimeScale::new(10).unwrap();
        s.state.governance.cv = 300;
        s.state.governance.security = 0;
        s.state.governance.morale = 0;
        s.state.governance.corruption = 100;

        let ran = s.advance_wall_clock(Duration::MAX);
        assert_eq!(ran, 1);
        assert_eq!(s.outcome(), Outcome::Defeat);
        assert_eq!(s.state().elapsed_ms, u64::MAX);
        assert!(s.state().clock.carry_ms() < TICK_MS);
    }

    #[test]
    fn test_manual_ticks_leave_carry_alone() {
        let mut s = session();
        s.advance_wall_clock(Duration::from_secs(45));
        s.manual_advance_tick().unwrap();
        s.manual_advance_tick().unwrap();
        assert_eq!(s.state().tick, 2);
        assert_eq!(s.state().clock.carry_ms(), 45_000);
    }

    #[test]
    fn test_outcome_is_sticky() {
        let mut s = session();
        s.state.governance.cv = 300;
        s.evaluate_outcome();
        assert_eq!(s.outcome(), Outcome::Defeat);

        s.state.governance.cv = 0;
        s.evaluate_outcome();
        assert_eq!(s.outcome(), Outcome::Defeat);
    }

    #[test]
    fn test_victory_when_all_others_annexed() {
        let mut s = session();
        for city in s.state.cities.iter_mut() {
            city.owner = Owner::Player;
        }
        s.evaluate_outcome();
        assert_eq!(s.annexed_count(), 11);
        assert_eq!(s.outcome(), Outcome::Victory);
    }
}
