//! Reward calculation
//!
//! Per-room currency folding in room modifiers and active effects, and the
//! end-of-run payout across all three currencies.

use serde::{Deserialize, Serialize};

use crate::combat::ActiveEffects;
use crate::world::{CurrencyReward, Room};

/// Flat bonus per boss defeated, added to each currency at the end of a run
pub const BOSS_BONUS: u64 = 50;

/// Per-floor end-of-run base for each currency
pub const PER_FLOOR_BASE: CurrencyReward = CurrencyReward {
    currency_a: 5,
    currency_b: 3,
    currency_c: 2,
};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExitReason {
    Death,
    Voluntary,
    /// Left right after a floor boss fell, before entering a new room
    AfterBoss,
    /// Cleared the final floor
    Completed,
}

impl ExitReason {
    /// Payout multiplier for this ending
    pub fn multiplier(&self) -> f64 {
        match self {
            ExitReason::Death => 1.0,
            ExitReason::Voluntary => 0.5,
            ExitReason::AfterBoss => 0.3,
            ExitReason::Completed => 1.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExitReason::Death => "Death",
            ExitReason::Voluntary => "Voluntary Exit",
            ExitReason::AfterBoss => "Exit After Boss",
            ExitReason::Completed => "Completed",
        }
    }
}

/// Pure reward formulas
#[derive(Debug, Clone, Copy, Default)]
pub struct RewardCalculator;

impl RewardCalculator {
    /// Currency granted for clearing a room under the current effects
    pub fn room_reward(room: &Room, effects: &ActiveEffects) -> CurrencyReward {
        let factor = room.modifier_multiplier() * effects.reward_multiplier;
        room.payload.base_reward().scaled(factor)
    }

    /// Final payout for each currency.
    ///
    /// `(floors_cleared * base + accumulated + bosses * 50) * exit multiplier`,
    /// floored per currency.
    pub fn end_of_run(
        floors_cleared: u32,
        bosses_defeated: u32,
        accumulated: CurrencyReward,
        reason: ExitReason,
    ) -> CurrencyReward {
        let floors = floors_cleared as u64;
        let boss_bonus = bosses_defeated as u64 * BOSS_BONUS;
        let mult = reason.multiplier();
        let payout = |base: u64, earned: u64| ((floors * base + earned + boss_bonus) as f64 * mult).floor() as u64;

        CurrencyReward {
            currency_a: payout(PER_FLOOR_BASE.currency_a, accumulated.currency_a),
            currency_b: payout(PER_FLOOR_BASE.currency_b, accumulated.currency_b),
            currency_c: payout(PER_FLOOR_BASE.currency_c, accumulated.currency_c),
        }
    }
}
