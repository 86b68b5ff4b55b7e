//! Fixed city roster

use std::sync::OnceLock;

use ahash::AHashMap;

use crate::core::error::{ConquestError, Result};
use crate::core::types::CityTier;

/// Static roster entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityConfig {
    pub name: &'static str,
    pub tier: CityTier,
}

/// The twelve cities of the campaign, in roster order.
///
/// Exactly three capitals; faction assignment walks this order.
pub const CITIES: [CityConfig; 12] = [
    CityConfig {
        name: "Luoyang",
        tier: CityTier::Capital,
    },
    CityConfig {
        name: "Jianye",
        tier: CityTier::Capital,
    },
    CityConfig {
        name: "Chengdu",
        tier: CityTier::Capital,
    },
    CityConfig {
        name: "Xuchang",
        tier: CityTier::Core,
    },
    CityConfig {
        name: "Xiangyang",
        tier: CityTier::Core,
    },
    CityConfig {
        name: "Hanzhong",
        tier: CityTier::Core,
    },
    CityConfig {
        name: "Chang'an",
        tier: CityTier::Frontier,
    },
    CityConfig {
        name: "Yecheng",
        tier: CityTier::Frontier,
    },
    CityConfig {
        name: "Jiangling",
        tier: CityTier::Frontier,
    },
    CityConfig {
        name: "Hefei",
        tier: CityTier::Frontier,
    },
    CityConfig {
        name: "Shouchun",
        tier: CityTier::Frontier,
    },
    CityConfig {
        name: "Beiping",
        tier: CityTier::Frontier,
    },
];

fn tier_index() -> &'static AHashMap<&'static str, CityTier> {
    static INDEX: OnceLock<AHashMap<&'static str, CityTier>> = OnceLock::new();
    INDEX.get_or_init(|| CITIES.iter().map(|c| (c.name, c.tier)).collect())
}

/// Look up the tier of a roster city
pub fn city_tier(name: &str) -> Result<CityTier> {
    tier_index()
        .get(name)
        .copied()
        .ok_or_else(|| ConquestError::UnknownCity(name.to_string()))
}

/// Roster entries whose tier is in `tiers`, in roster order
pub fn cities_with_tiers(tiers: &[CityTier]) -> Vec<CityConfig> {
    CITIES
        .iter()
        .filter(|c| tiers.contains(&c.tier))
        .copied()
        .collect()
}
