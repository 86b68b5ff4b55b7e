use serde::{Deserialize, Serialize};

use crate::core::types::{CityTier, Faction, Owner};
use crate::roster::cities::CityConfig;
use crate::sim::annexation::is_annexed;

/// Minimum starting ISV of the player's home city
pub const HOME_MIN_ISV: i64 = 70;

/// A city on the campaign map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    /// Fixed at creation
    pub tier: CityTier,
    pub owner: Owner,
    pub isv: i64,
}

impl City {
    pub fn annex_threshold(&self) -> i64 {
        self.tier.annex_threshold()
    }

    pub fn is_past_threshold(&self) -> bool {
        is_annexed(self.tier, self.isv)
    }

    pub fn is_player_owned(&self) -> bool {
        self.owner == Owner::Player
    }
}

/// Build the campaign map.
///
/// The home city goes to the player; every other city is dealt to the
/// factions round-robin in roster order.
pub fn build_cities(roster: &[CityConfig], home: &str) -> Vec<City> {
    let mut cursor = 0;
    roster
        .iter()
        .map(|config| {
            if config.name == home {
                return City {
                    name: config.name.to_string(),
                    tier: config.tier,
                    owner: Owner::Player,
                    isv: config.tier.base_isv().max(HOME_MIN_ISV),
                };
            }
            let faction = Faction::ALL[cursor % Faction::ALL.len()];
            cursor += 1;
            City {
                name: config.name.to_string(),
                tier: config.tier,
                owner: faction.into(),
                isv: config.tier.base_isv(),
            }
        })
        .collect()
}
