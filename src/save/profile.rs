//! Player profile and persistent progression
//!
//! The profile is the cross-run input to a run: baseline stats, permanent
//! upgrade levels and the room types the player has unlocked. It also banks
//! the currencies and statistics each finished run pays out.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::entities::{base_stats, Stat, StatMap};
use crate::game::RunSummary;
use crate::progression::{PurchaseError, UpgradeId, UpgradeLevels, UpgradePurchase, UpgradeShop};
use crate::world::RoomType;

/// A profile that cannot seed a run
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("baseline stat {0:?} is missing")]
    MissingStat(Stat),
    #[error("baseline stat {0:?} must be positive, got {1}")]
    NonPositiveStat(Stat, i32),
    #[error("upgrade {id:?} level {level} exceeds max level {max}")]
    UpgradeLevelTooHigh { id: UpgradeId, level: u32, max: u32 },
    #[error("no room types are unlocked")]
    NoRoomTypes,
    #[error("unlocked room types only contain skill rooms")]
    OnlySkillRooms,
    #[error("failed to parse profile: {0}")]
    Parse(String),
    #[error("failed to serialize profile: {0}")]
    Serialize(String),
}

/// Lifetime statistics across runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileStats {
    pub total_runs: u32,
    pub total_deaths: u32,
    pub completed_runs: u32,
    pub highest_floor: u32,
    pub bosses_defeated: u32,
    pub mini_bosses_defeated: u32,
    pub playtime_seconds: u64,
}

/// Persistent player profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Every stat must be present; max HP and max mana must be positive
    pub baseline_stats: StatMap,
    #[serde(default)]
    pub permanent_upgrade_levels: UpgradeLevels,
    pub unlocked_room_types: BTreeSet<RoomType>,
    #[serde(default)]
    pub currency_a: u64,
    #[serde(default)]
    pub currency_b: u64,
    #[serde(default)]
    pub currency_c: u64,
    #[serde(default)]
    pub stats: ProfileStats,
    /// Achievement ids earned in any run
    #[serde(default)]
    pub achievements: BTreeSet<String>,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            baseline_stats: base_stats(),
            permanent_upgrade_levels: BTreeMap::new(),
            unlocked_room_types: RoomType::DEFAULT_UNLOCKED.into_iter().collect(),
            currency_a: 0,
            currency_b: 0,
            currency_c: 0,
            stats: ProfileStats::default(),
            achievements: BTreeSet::new(),
        }
    }
}

impl PlayerProfile {
    /// Create a new profile
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a profile from RON and validate it
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        let profile: Self = ron::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    /// Serialize the profile as pretty RON
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Check that this profile can seed a run
    pub fn validate(&self) -> Result<(), ConfigError> {
        for stat in Stat::ALL {
            let value = *self.baseline_stats.get(&stat).ok_or(ConfigError::MissingStat(stat))?;
            if matches!(stat, Stat::MaxHp | Stat::MaxMana) && value <= 0 {
                return Err(ConfigError::NonPositiveStat(stat, value));
            }
        }

        for (id, level) in &self.permanent_upgrade_levels {
            let max = id.definition().max_level;
            if *level > max {
                return Err(ConfigError::UpgradeLevelTooHigh { id: *id, level: *level, max });
            }
        }

        if self.unlocked_room_types.is_empty() {
            return Err(ConfigError::NoRoomTypes);
        }
        if self.unlocked_room_types.iter().all(|t| *t == RoomType::Skill) {
            return Err(ConfigError::OnlySkillRooms);
        }

        Ok(())
    }

    /// Current level of a permanent upgrade
    pub fn upgrade_level(&self, id: UpgradeId) -> u32 {
        self.permanent_upgrade_levels.get(&id).copied().unwrap_or(0)
    }

    /// Total bonus granted by a permanent upgrade
    pub fn upgrade_bonus(&self, id: UpgradeId) -> u32 {
        UpgradeShop::current_bonus(id, self.upgrade_level(id))
    }

    /// Buy one level of a permanent upgrade with banked Currency A
    pub fn purchase_upgrade(&mut self, id: UpgradeId) -> Result<UpgradePurchase, PurchaseError> {
        UpgradeShop::purchase(&mut self.permanent_upgrade_levels, &mut self.currency_a, id)
    }

    /// Bank a finished run: currencies, statistics and achievements
    pub fn record_run(&mut self, summary: &RunSummary) {
        self.currency_a += summary.rewards.currency_a;
        self.currency_b += summary.rewards.currency_b;
        self.currency_c += summary.rewards.currency_c;

        self.stats.total_runs += 1;
        match summary.exit_reason {
            crate::progression::ExitReason::Death => self.stats.total_deaths += 1,
            crate::progression::ExitReason::Completed => self.stats.completed_runs += 1,
            _ => {}
        }
        self.stats.highest_floor = self.stats.highest_floor.max(summary.final_floor);
        self.stats.bosses_defeated += summary.bosses_defeated;
        self.stats.mini_bosses_defeated += summary.mini_bosses_defeated;
        self.stats.playtime_seconds += summary.duration_seconds;

        for achievement in &summary.achievements_earned {
            if self.achievements.insert(achievement.id().to_string()) {
                log::info!("Achievement unlocked: {}", achievement.name());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_valid() {
        let profile = PlayerProfile::default();
        assert!(profile.validate().is_ok());
        assert_eq!(profile.unlocked_room_types.len(), 9);
        assert!(!profile.unlocked_room_types.contains(&RoomType::Library));
    }

    #[test]
    fn test_missing_stat_fails_fast() {
        let mut profile = PlayerProfile::default();
        profile.baseline_stats.remove(&Stat::Wisdom);
        assert_eq!(profile.validate(), Err(ConfigError::MissingStat(Stat::Wisdom)));
    }

    #[test]
    fn test_non_positive_hp_fails() {
        let mut profile = PlayerProfile::default();
        profile.baseline_stats.insert(Stat::MaxHp, 0);
        assert_eq!(profile.validate(), Err(ConfigError::NonPositiveStat(Stat::MaxHp, 0)));
    }

    #[test]
    fn test_room_type_validation() {
        let mut profile = PlayerProfile::default();
        profile.unlocked_room_types.clear();
        assert_eq!(profile.validate(), Err(ConfigError::NoRoomTypes));
        profile.unlocked_room_types.insert(RoomType::Skill);
        assert_eq!(profile.validate(), Err(ConfigError::OnlySkillRooms));
    }

    #[test]
    fn test_upgrade_level_cap() {
        let mut profile = PlayerProfile::default();
        profile.permanent_upgrade_levels.insert(UpgradeId::LuckBonus, 21);
        assert!(matches!(profile.validate(), Err(ConfigError::UpgradeLevelTooHigh { .. })));
    }

    #[test]
    fn test_ron_roundtrip_and_parse_error() {
        let mut profile = PlayerProfile::default();
        profile.permanent_upgrade_levels.insert(UpgradeId::MaxHealthBonus, 3);
        let text = profile.to_ron().unwrap();
        assert_eq!(PlayerProfile::from_ron(&text).unwrap(), profile);

        assert!(matches!(PlayerProfile::from_ron("(baseline_stats: oops"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_purchase_upgrade_uses_banked_currency() {
        let mut profile = PlayerProfile { currency_a: 60, ..PlayerProfile::default() };
        profile.purchase_upgrade(UpgradeId::MaxHealthBonus).unwrap();
        assert_eq!(profile.currency_a, 10);
        assert_eq!(profile.upgrade_bonus(UpgradeId::MaxHealthBonus), 10);
        assert!(profile.purchase_upgrade(UpgradeId::MaxHealthBonus).is_err());
        assert_eq!(profile.upgrade_level(UpgradeId::MaxHealthBonus), 1);
    }
}
