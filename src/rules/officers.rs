//! Officer staffing rules

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Loyalty below which a rival court can poach an officer
pub const POACH_LOYALTY: i64 = 30;

/// Loyalty lost on a failed promotion
pub const PROMOTION_FAILURE_LOYALTY_LOSS: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Officer {
    pub id: String,
    pub loyalty: i64,
    pub locked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReassignOutcome {
    /// Always false: locked officers are never moved
    pub touched_locked: bool,
    pub cooldown_ready: bool,
    pub reassigned_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionFailure {
    pub loyalty: i64,
    pub resources_lost: i64,
}

/// Count officers the automatic staffer may move.
///
/// With no previous reassignment the cooldown counts as ready.
pub fn auto_reassign(
    officers: &[Officer],
    locked_ids: &[&str],
    cooldown_minutes: u64,
    minutes_since_last: Option<u64>,
) -> ReassignOutcome {
    let cooldown_ready = minutes_since_last.map_or(true, |m| m >= cooldown_minutes);
    if !cooldown_ready {
        return ReassignOutcome {
            touched_locked: false,
            cooldown_ready,
            reassigned_count: 0,
        };
    }

    let locked: AHashSet<&str> = locked_ids.iter().copied().collect();
    let reassigned_count = officers
        .iter()
        .filter(|o| !o.locked && !locked.contains(o.id.as_str()))
        .count();

    ReassignOutcome {
        touched_locked: false,
        cooldown_ready,
        reassigned_count,
    }
}

pub fn on_promotion_failure(loyalty: i64, resource_cost: Option<i64>) -> PromotionFailure {
    PromotionFailure {
        loyalty: (loyalty - PROMOTION_FAILURE_LOYALTY_LOSS).max(0),
        resources_lost: resource_cost.unwrap_or(1),
    }
}

pub fn can_be_poached(loyalty: i64) -> bool {
    loyalty < POACH_LOYALTY
}

#[cfg(test)]
mod tests {
    use super::*;

    fn officer(id: &str, locked: bool) -> Officer {
        Officer {
            id: id.to_string(),
            loyalty: 50,
            locked,
        }
    }

    #[test]
    fn test_reassign_skips_locked() {
        let officers = vec![officer("a", false), officer("b", true), officer("c", false)];
        let outcome = auto_reassign(&officers, &["c"], 30, Some(45));
        assert!(outcome.cooldown_ready);
        assert!(!outcome.touched_locked);
        assert_eq!(outcome.reassigned_count, 1);
    }

    #[test]
    fn test_reassign_waits_for_cooldown() {
        let officers = vec![officer("a", false)];
        let outcome = auto_reassign(&officers, &[], 30, Some(10));
        assert!(!outcome.cooldown_ready);
        assert_eq!(outcome.reassigned_count, 0);
    }

    #[test]
    fn test_first_reassign_is_ready() {
        let outcome = auto_reassign(&[officer("a", false)], &[], 30, None);
        assert!(outcome.cooldown_ready);
        assert_eq!(outcome.reassigned_count, 1);
    }

    #[test]
    fn test_promotion_failure() {
        assert_eq!(
            on_promotion_failure(25, None),
            PromotionFailure {
                loyalty: 15,
                resources_lost: 1,
            }
        );
        assert_eq!(on_promotion_failure(4, Some(30)).loyalty, 0);
        assert_eq!(on_promotion_failure(4, Some(30)).resources_lost, 30);
    }

    #[test]
    fn test_poaching() {
        assert!(can_be_poached(29));
        assert!(!can_be_poached(30));
    }
}
