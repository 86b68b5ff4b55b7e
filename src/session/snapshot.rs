//! Serializable view of a session for hosts and transports

use serde::Serialize;

use crate::core::config::{
    AUTOSAVE_INTERVAL_MINUTES, EVENT_INTERVAL_SECONDS, MAX_COLLAPSE_VALUE, TICK_SECONDS,
    TIME_SCALE_RANGE, TOTAL_CITIES, VICTORY_TARGET,
};
use crate::core::types::{CityTier, Difficulty, Faction, Outcome, Owner, Tick};
use crate::rules::sovereignty::{protection_status, ProtectionStatus, PROTECTION_MINUTES};
use crate::sim::{EventChoice, ResourceState};

use super::log::LogEntry;
use super::GameSession;

#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub seed: u64,
    pub difficulty: Difficulty,
    pub home_city: String,
    pub home_tier: CityTier,
    pub affiliation: Option<Faction>,
    pub opposing_factions: Vec<Faction>,
    pub tick: Tick,
    pub elapsed_seconds: u64,
    pub paused: bool,
    pub time_scale: u8,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct GovernanceView {
    pub security: i64,
    pub morale: i64,
    pub corruption: i64,
    pub cv: i64,
    pub cv_max: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConquestProgress {
    pub annexed_cities: usize,
    pub remaining_cities: usize,
    pub total_cities: usize,
    pub victory_target: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CityView {
    pub name: String,
    pub tier: CityTier,
    pub owner: Owner,
    pub isv: i64,
    pub annex_threshold: i64,
    pub is_annexed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventView {
    pub pending: bool,
    pub id: Option<String>,
    pub title: Option<String>,
    pub choices: Vec<EventChoice>,
    pub next_in_seconds: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveInfo {
    pub count: usize,
    pub last_auto_save_minute: Option<u64>,
    pub auto_save_interval_minutes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnexThresholds {
    pub capital: i64,
    pub core: i64,
    pub frontier: i64,
}

/// Fixed rule constants, echoed for clients
#[derive(Debug, Clone, Serialize)]
pub struct RuleConstants {
    pub tick_seconds: u64,
    pub event_interval_seconds: u64,
    pub auto_save_interval_minutes: u64,
    pub cv_max: i64,
    pub time_scale_min: u8,
    pub time_scale_max: u8,
    pub annex_thresholds: AnnexThresholds,
}

impl Default for RuleConstants {
    fn default() -> Self {
        Self {
            tick_seconds: TICK_SECONDS,
            event_interval_seconds: EVENT_INTERVAL_SECONDS,
            auto_save_interval_minutes: AUTOSAVE_INTERVAL_MINUTES,
            cv_max: MAX_COLLAPSE_VALUE,
            time_scale_min: TIME_SCALE_RANGE.0,
            time_scale_max: TIME_SCALE_RANGE.1,
            annex_thresholds: AnnexThresholds {
                capital: CityTier::Capital.annex_threshold(),
                core: CityTier::Core.annex_threshold(),
                frontier: CityTier::Frontier.annex_threshold(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session: SessionInfo,
    pub resources: ResourceState,
    pub governance: GovernanceView,
    pub conquest: ConquestProgress,
    pub cities: Vec<CityView>,
    pub event: EventView,
    pub save: SaveInfo,
    pub protection: ProtectionStatus,
    pub rules: RuleConstants,
    /// Most recent first
    pub logs: Vec<LogEntry>,
}

impl GameSession {
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = &self.state;
        let annexed = self.annexed_count();

        let cities = state
            .cities
            .iter()
            .map(|city| CityView {
                name: city.name.clone(),
                tier: city.tier,
                owner: city.owner,
                isv: city.isv,
                annex_threshold: city.annex_threshold(),
                is_annexed: city.is_player_owned() && city.name != self.setup.home_city,
            })
            .collect();

        let pending = state.pending_event.as_ref();
        let event = EventView {
            pending: pending.is_some(),
            id: pending.map(|e| e.id.clone()),
            title: pending.map(|e| e.title.clone()),
            choices: pending.map(|e| e.choices.clone()).unwrap_or_default(),
            next_in_seconds: state.event_clock.seconds_remaining(),
        };

        SessionSnapshot {
            session: SessionInfo {
                seed: self.setup.seed,
                difficulty: self.setup.difficulty,
                home_city: self.setup.home_city.clone(),
                home_tier: self.setup.home_tier,
                affiliation: self.setup.affiliation,
                opposing_factions: self.setup.opposing_factions.clone(),
                tick: state.tick,
                elapsed_seconds: state.elapsed_seconds(),
                paused: state.paused,
                time_scale: state.time_scale.get(),
                outcome: state.outcome,
            },
            resources: state.resources,
            governance: GovernanceView {
                security: state.governance.security,
                morale: state.governance.morale,
                corruption: state.governance.corruption,
                cv: state.governance.cv,
                cv_max: MAX_COLLAPSE_VALUE,
            },
            conquest: ConquestProgress {
                annexed_cities: annexed,
                remaining_cities: VICTORY_TARGET.saturating_sub(annexed),
                total_cities: TOTAL_CITIES,
                victory_target: VICTORY_TARGET,
            },
            cities,
            event,
            save: SaveInfo {
                count: self.saves.count(),
                last_auto_save_minute: self.saves.last_auto_save_minute(),
                auto_save_interval_minutes: AUTOSAVE_INTERVAL_MINUTES,
            },
            protection: protection_status(state.elapsed_minutes(), PROTECTION_MINUTES),
            rules: RuleConstants::default(),
            logs: self.log.entries().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn session() -> GameSession {
        GameSession::new(7, Difficulty::Easy).unwrap()
    }

    #[test]
    fn test_fresh_snapshot() {
        let s = session();
        let snap = s.snapshot();
        assert_eq!(snap.session.seed, 7);
        assert_eq!(snap.session.tick, 0);
        assert_eq!(snap.session.time_scale, 1);
        assert_eq!(snap.cities.len(), 12);
        assert_eq!(snap.conquest.annexed_cities, 0);
        assert_eq!(snap.conquest.remaining_cities, 11);
        assert_eq!(snap.governance.cv_max, 300);
        assert!(!snap.event.pending);
        assert_eq!(snap.event.next_in_seconds, 300);
        assert!(snap.protection.active);
        assert_eq!(snap.protection.remaining_minutes, 20);
        assert!(snap.cities.iter().all(|c| !c.is_annexed));
    }

    #[test]
    fn test_snapshot_tracks_clock() {
        let mut s = session();
        s.advance_wall_clock(Duration::from_secs(90));
        let snap = s.snapshot();
        assert_eq!(snap.session.tick, 1);
        assert_eq!(snap.session.elapsed_seconds, 90);
        assert_eq!(snap.event.next_in_seconds, 210);
        assert_eq!(snap.save.count, 1);
        assert_eq!(snap.save.last_auto_save_minute, Some(1));
    }

    #[test]
    fn test_rule_constants() {
        let rules = RuleConstants::default();
        assert_eq!(rules.tick_seconds, 60);
        assert_eq!(rules.event_interval_seconds, 300);
        assert_eq!(rules.annex_thresholds.capital, -100);
        assert_eq!(rules.annex_thresholds.core, -50);
        assert_eq!(rules.annex_thresholds.frontier, 0);

        let t = &rules.annex_thresholds;
        assert!(t.frontier > t.core && t.core > t.capital);
    }

    #[test]
    fn test_snapshot_serializes() {
        let json = serde_json::to_value(session().snapshot()).unwrap();
        assert_eq!(json["session"]["outcome"], "ongoing");
        assert_eq!(json["rules"]["cv_max"], 300);
        assert!(json["logs"].as_array().unwrap().len() >= 1);
    }
}
