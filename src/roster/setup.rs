//! New-game setup: home city and affiliation from seed + difficulty

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{ConquestError, Result};
use crate::core::types::{CityTier, Difficulty, Faction};
use crate::roster::cities::{cities_with_tiers, CityConfig};

/// Result of rolling a new campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGame {
    pub seed: u64,
    pub difficulty: Difficulty,
    pub home_city: String,
    pub home_tier: CityTier,
    /// `None` means the player starts independent
    pub affiliation: Option<Faction>,
    pub opposing_factions: Vec<Faction>,
}

/// Home tiers a difficulty may roll
pub fn eligible_home_tiers(difficulty: Difficulty) -> &'static [CityTier] {
    match difficulty {
        Difficulty::Standard | Difficulty::Hard => &[CityTier::Core, CityTier::Frontier],
        Difficulty::Newbie | Difficulty::Easy => {
            &[CityTier::Capital, CityTier::Core, CityTier::Frontier]
        }
    }
}

fn pick_one<T: Copy>(items: &[T], rng: &mut ChaCha8Rng) -> Result<T> {
    if items.is_empty() {
        return Err(ConquestError::EmptyCandidatePool);
    }
    Ok(items[rng.gen_range(0..items.len())])
}

fn resolve_affiliation(difficulty: Difficulty, rng: &mut ChaCha8Rng) -> Result<Option<Faction>> {
    if difficulty.is_lenient() {
        return Ok(None);
    }
    pick_one(&Faction::ALL, rng).map(Some)
}

fn opposing_factions(affiliation: Option<Faction>) -> Vec<Faction> {
    Faction::ALL
        .iter()
        .copied()
        .filter(|f| Some(*f) != affiliation)
        .collect()
}

/// Roll a new campaign.
///
/// Each call owns its own generator, so the same seed and difficulty always
/// produce the same setup.
pub fn create_new_game(seed: u64, difficulty: Difficulty) -> Result<NewGame> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let candidates: Vec<CityConfig> = cities_with_tiers(eligible_home_tiers(difficulty));
    let home = pick_one(&candidates, &mut rng)?;
    let affiliation = resolve_affiliation(difficulty, &mut rng)?;

    tracing::debug!(
        seed,
        %difficulty,
        home = home.name,
        "Rolled new campaign"
    );

    Ok(NewGame {
        seed,
        difficulty,
        home_city: home.name.to_string(),
        home_tier: home.tier,
        affiliation,
        opposing_factions: opposing_factions(affiliation),
    })
}
