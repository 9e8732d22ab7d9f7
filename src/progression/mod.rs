//! Progression systems

pub mod difficulty;
pub mod rewards;
pub mod skills;
pub mod unlocks;
pub mod upgrades;

pub use difficulty::{
    boss_section, floor_boss, is_boss_floor, EnemyStats, FloorBoss, ProgressionScaler, ScalingMultipliers,
    BOSS_CLEAR_DIFFICULTY_STEP, TOTAL_FLOORS,
};
pub use rewards::{ExitReason, RewardCalculator};
pub use skills::{generate_skill_choices, library_skills, Skill};
pub use unlocks::{available_unlocks, unlock_room_type, UnlockError};
pub use upgrades::{
    PermanentUpgrade, PurchaseError, UpgradeCategory, UpgradeDetails, UpgradeId, UpgradeLevels, UpgradePurchase,
    UpgradeShop,
};
