//! Player stat block
//!
//! Named stats used by the run, the profile baseline and the effect system.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Core player stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stat {
    Strength,
    Defense,
    Agility,
    Intelligence,
    Vitality,
    Wisdom,
    MaxHp,
    MaxMana,
}

impl Stat {
    pub const ALL: [Stat; 8] = [
        Stat::Strength,
        Stat::Defense,
        Stat::Agility,
        Stat::Intelligence,
        Stat::Vitality,
        Stat::Wisdom,
        Stat::MaxHp,
        Stat::MaxMana,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stat::Strength => "Strength",
            Stat::Defense => "Defense",
            Stat::Agility => "Agility",
            Stat::Intelligence => "Intelligence",
            Stat::Vitality => "Vitality",
            Stat::Wisdom => "Wisdom",
            Stat::MaxHp => "Max HP",
            Stat::MaxMana => "Max Mana",
        }
    }

    /// Level 1 value for this stat
    pub fn base_value(&self) -> i32 {
        match self {
            Stat::MaxHp => 100,
            Stat::MaxMana => 50,
            _ => 10,
        }
    }
}

/// Stat map keyed by stat
pub type StatMap = BTreeMap<Stat, i32>;

/// Level 1 stats for a fresh character
pub fn base_stats() -> StatMap {
    Stat::ALL.iter().map(|s| (*s, s.base_value())).collect()
}

/// Add to a stat, creating it if missing
pub fn add_stat(stats: &mut StatMap, stat: Stat, amount: i32) {
    *stats.entry(stat).or_insert(0) += amount;
}
