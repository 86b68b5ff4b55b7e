//! Sovereignty rules: independence, opening protection, capital relocation

use serde::{Deserialize, Serialize};

use crate::core::types::Difficulty;

/// Default length of the opening protection window in game minutes
pub const PROTECTION_MINUTES: u64 = 20;

/// Default cooldown between capital relocations in game minutes
pub const RELOCATION_COOLDOWN_MINUTES: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectionStatus {
    pub active: bool,
    pub remaining_minutes: u64,
}

/// Whether an aligned player may break away without a fight.
///
/// Lenient difficulties always allow it; otherwise prestige and morale must
/// both reach 70 and the ransom must be paid.
pub fn can_peacefully_declare_independence(
    difficulty: Difficulty,
    prestige: i64,
    morale: i64,
    ransom_paid: bool,
) -> bool {
    if difficulty.is_lenient() {
        return true;
    }
    prestige >= 70 && morale >= 70 && ransom_paid
}

pub fn protection_status(elapsed_minutes: u64, total_minutes: u64) -> ProtectionStatus {
    let remaining = total_minutes.saturating_sub(elapsed_minutes);
    ProtectionStatus {
        active: remaining > 0,
        remaining_minutes: remaining,
    }
}

pub fn can_relocate_capital(minutes_since_last: u64, cooldown_minutes: u64) -> bool {
    minutes_since_last >= cooldown_minutes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_independence_is_free() {
        assert!(can_peacefully_declare_independence(Difficulty::Newbie, 0, 0, false));
        assert!(can_peacefully_declare_independence(Difficulty::Easy, 10, 5, false));
    }

    #[test]
    fn test_strict_independence_needs_everything() {
        assert!(can_peacefully_declare_independence(Difficulty::Hard, 70, 70, true));
        assert!(!can_peacefully_declare_independence(Difficulty::Hard, 69, 90, true));
        assert!(!can_peacefully_declare_independence(Difficulty::Standard, 80, 69, true));
        assert!(!can_peacefully_declare_independence(Difficulty::Standard, 80, 80, false));
    }

    #[test]
    fn test_protection_window() {
        assert_eq!(
            protection_status(5, PROTECTION_MINUTES),
            ProtectionStatus {
                active: true,
                remaining_minutes: 15,
            }
        );
        assert_eq!(
            protection_status(20, PROTECTION_MINUTES),
            ProtectionStatus {
                active: false,
                remaining_minutes: 0,
            }
        );
        assert!(!protection_status(500, PROTECTION_MINUTES).active);
    }

    #[test]
    fn test_relocation_cooldown() {
        assert!(!can_relocate_capital(59, RELOCATION_COOLDOWN_MINUTES));
        assert!(can_relocate_capital(60, RELOCATION_COOLDOWN_MINUTES));
    }
}
