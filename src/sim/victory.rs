//! Terminal outcome evaluation

use crate::core::config::{MAX_COLLAPSE_VALUE, VICTORY_TARGET};
use crate::core::types::Outcome;

/// Defeat beats victory: a collapsed court loses even with every city taken
pub fn evaluate_outcome(annexed_cities: usize, home_lost: bool, cv: i64) -> Outcome {
    if home_lost || cv >= MAX_COLLAPSE_VALUE {
        return Outcome::Defeat;
    }
    if annexed_cities >= VICTORY_TARGET {
        return Outcome::Victory;
    }
    Outcome::Ongoing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_victory_at_target() {
        assert_eq!(evaluate_outcome(11, false, 0), Outcome::Victory);
        assert_eq!(evaluate_outcome(10, false, 0), Outcome::Ongoing);
    }

    #[test]
    fn test_collapse_is_defeat() {
        assert_eq!(evaluate_outcome(0, false, 300), Outcome::Defeat);
        assert_eq!(evaluate_outcome(11, false, 300), Outcome::Defeat);
        assert_eq!(evaluate_outcome(0, false, 299), Outcome::Ongoing);
    }

    #[test]
    fn test_losing_home_is_defeat() {
        assert_eq!(evaluate_outcome(11, true, 0), Outcome::Defeat);
    }

    #[test]
    fn test_fresh_game_ongoing() {
        assert_eq!(evaluate_outcome(0, false, 0), Outcome::Ongoing);
    }
}
