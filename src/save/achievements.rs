//! Run achievements
//!
//! A closed set of achievements, each a pure predicate over the final run
//! state. Validation is side-effect free and can be repeated at will.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::game::RunState;
use crate::items::Consumable;
use crate::progression::TOTAL_FLOORS;

/// Floors a speedrun must clear
pub const SPEEDRUN_FLOORS: u32 = 10;
/// Time limit for a speedrun in seconds
pub const SPEEDRUN_SECONDS: u64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    TenBosses,
    NoDamage,
    Speedrun,
    AllRoomTypes,
    NoConsumables,
    MaxFloor,
    CollectThemAll,
    MasterUpgrades,
}

impl AchievementId {
    pub const ALL: [AchievementId; 8] = [
        AchievementId::TenBosses,
        AchievementId::NoDamage,
        AchievementId::Speedrun,
        AchievementId::AllRoomTypes,
        AchievementId::NoConsumables,
        AchievementId::MaxFloor,
        AchievementId::CollectThemAll,
        AchievementId::MasterUpgrades,
    ];

    /// Stable string id used in profiles
    pub fn id(&self) -> &'static str {
        match self {
            AchievementId::TenBosses => "tenBosses",
            AchievementId::NoDamage => "noDamage",
            AchievementId::Speedrun => "speedrun",
            AchievementId::AllRoomTypes => "allRoomTypes",
            AchievementId::NoConsumables => "noConsumables",
            AchievementId::MaxFloor => "maxFloor",
            AchievementId::CollectThemAll => "collectThemAll",
            AchievementId::MasterUpgrades => "masterUpgrades",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AchievementId::TenBosses => "Boss Slayer",
            AchievementId::NoDamage => "Untouchable",
            AchievementId::Speedrun => "Lightning Run",
            AchievementId::AllRoomTypes => "Explorer",
            AchievementId::NoConsumables => "Pure",
            AchievementId::MaxFloor => "Mountain Climber",
            AchievementId::CollectThemAll => "Hoarder",
            AchievementId::MasterUpgrades => "Scholar",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AchievementId::TenBosses => "Defeat 10 mini-bosses in a run",
            AchievementId::NoDamage => "Finish a run without taking damage",
            AchievementId::Speedrun => "Clear 10 floors in under 10 minutes",
            AchievementId::AllRoomTypes => "Visit 8 different room types in one run",
            AchievementId::NoConsumables => "Finish a run without using consumables",
            AchievementId::MaxFloor => "Reach floor 26",
            AchievementId::CollectThemAll => "Hold one of each core consumable",
            AchievementId::MasterUpgrades => "Buy 5 or more items from shops in one run",
        }
    }

    /// Whether a final run state earns this achievement
    pub fn is_earned(&self, run: &RunState) -> bool {
        let stats = &run.statistics;
        match self {
            AchievementId::TenBosses => run.mini_bosses_defeated >= 10,
            AchievementId::NoDamage => stats.damage_taken == 0,
            AchievementId::Speedrun => {
                run.floors_cleared >= SPEEDRUN_FLOORS
                    && run.duration_seconds().is_some_and(|d| d < SPEEDRUN_SECONDS)
            }
            AchievementId::AllRoomTypes => run.visited_room_types.len() >= 8,
            AchievementId::NoConsumables => stats.consumables_used == 0,
            AchievementId::MaxFloor => run.current_floor >= TOTAL_FLOORS,
            AchievementId::CollectThemAll => Consumable::CORE
                .iter()
                .all(|c| run.items.iter().any(|item| item.is_consumable(*c))),
            AchievementId::MasterUpgrades => stats.shop_purchases >= 5,
        }
    }
}

/// Evaluate every achievement against a final run state
pub fn validate(run: &RunState) -> BTreeSet<AchievementId> {
    AchievementId::ALL
        .into_iter()
        .filter(|a| a.is_earned(run))
        .collect()
}
