//! Run summary
//!
//! The immutable record produced when a run is finalized.

use serde::{Deserialize, Serialize};

use crate::progression::ExitReason;
use crate::save::AchievementId;
use crate::world::CurrencyReward;

/// Counters tracked over a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    pub rooms_completed: u32,
    pub damage_taken: u64,
    pub damage_dealt: u64,
    pub critical_hits: u32,
    pub consumables_used: u32,
    pub artifacts_used: u32,
    pub shop_purchases: u32,
    pub events_succeeded: u32,
    pub events_failed: u32,
    pub traps_triggered: u32,
    pub rerolls_used: u32,
    pub currency_spent: u64,
}

/// Final record of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub exit_reason: ExitReason,
    pub final_floor: u32,
    pub floors_cleared: u32,
    pub bosses_defeated: u32,
    pub mini_bosses_defeated: u32,
    pub duration_seconds: u64,
    pub rewards: CurrencyReward,
    pub achievements_earned: Vec<AchievementId>,
    pub statistics: RunStatistics,
}
