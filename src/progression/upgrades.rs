//! Permanent upgrades
//!
//! Cross-run meta-progression bought with Currency A. Each upgrade has an
//! exponential cost curve and a level cap.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Why an upgrade purchase was declined
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PurchaseError {
    #[error("{0:?} is already at max level {1}")]
    MaxLevel(UpgradeId, u32),
    #[error("insufficient currency: need {needed}, have {available}")]
    InsufficientCurrency { needed: u64, available: u64 },
}

/// Upgrade groupings for catalog display
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UpgradeCategory {
    Survival,
    Magic,
    Offense,
    Utility,
    Progression,
}

/// Every permanent upgrade
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UpgradeId {
    MaxHealthBonus,
    MaxManaBonus,
    DamageBonus,
    DefenseBonus,
    CritChanceBonus,
    CritDamageBonus,
    AgilityBonus,
    IntelligenceBonus,
    LuckBonus,
    ExperienceBonus,
    GoldFindBonus,
    StartingCurrencyB,
}

/// Static definition of one upgrade
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PermanentUpgrade {
    pub id: UpgradeId,
    pub name: &'static str,
    pub description: &'static str,
    pub base_cost: u64,
    /// Cost growth per level (> 1)
    pub cost_scaling: f64,
    /// Bonus gained per level
    pub increment: u32,
    pub max_level: u32,
    pub category: UpgradeCategory,
}

impl PermanentUpgrade {
    /// Currency A price of the next level from `level`
    pub fn cost(&self, level: u32) -> u64 {
        (self.base_cost as f64 * self.cost_scaling.powi(level as i32)).floor() as u64
    }

    /// Total bonus at a level
    pub fn bonus(&self, level: u32) -> u32 {
        level * self.increment
    }
}

impl UpgradeId {
    pub const ALL: [UpgradeId; 12] = [
        UpgradeId::MaxHealthBonus,
        UpgradeId::MaxManaBonus,
        UpgradeId::DamageBonus,
        UpgradeId::DefenseBonus,
        UpgradeId::CritChanceBonus,
        UpgradeId::CritDamageBonus,
        UpgradeId::AgilityBonus,
        UpgradeId::IntelligenceBonus,
        UpgradeId::LuckBonus,
        UpgradeId::ExperienceBonus,
        UpgradeId::GoldFindBonus,
        UpgradeId::StartingCurrencyB,
    ];

    /// Static definition for this upgrade
    pub fn definition(&self) -> PermanentUpgrade {
        use UpgradeCategory::*;
        let (name, description, base_cost, cost_scaling, increment, max_level, category) = match self {
            UpgradeId::MaxHealthBonus => ("Vitality Training", "+10 max HP per level", 50, 1.15, 10, 50, Survival),
            UpgradeId::MaxManaBonus => ("Mana Attunement", "+5 max mana per level", 40, 1.15, 5, 50, Magic),
            UpgradeId::DamageBonus => ("Weapon Mastery", "+5% damage per level", 60, 1.2, 5, 40, Offense),
            UpgradeId::DefenseBonus => ("Iron Skin", "+5 defense per level", 50, 1.15, 5, 40, Survival),
            UpgradeId::CritChanceBonus => ("Precision", "+2% crit chance per level", 75, 1.25, 2, 25, Offense),
            UpgradeId::CritDamageBonus => ("Lethality", "+5% crit damage per level", 80, 1.3, 5, 30, Offense),
            UpgradeId::AgilityBonus => ("Fleet Foot", "+3 agility per level", 45, 1.15, 3, 40, Utility),
            UpgradeId::IntelligenceBonus => ("Arcane Study", "+3 intelligence per level", 45, 1.15, 3, 40, Magic),
            UpgradeId::LuckBonus => ("Fortune's Favor", "+2% luck per level", 100, 1.4, 2, 20, Utility),
            UpgradeId::ExperienceBonus => ("Quick Learner", "+5% experience per level", 70, 1.2, 5, 30, Progression),
            UpgradeId::GoldFindBonus => ("Treasure Hunter", "+5% gold find per level", 90, 1.3, 5, 25, Progression),
            UpgradeId::StartingCurrencyB => ("Head Start", "+10 starting Currency B per level", 120, 1.5, 10, 20, Progression),
        };
        PermanentUpgrade {
            id: *self,
            name,
            description,
            base_cost,
            cost_scaling,
            increment,
            max_level,
            category,
        }
    }
}

/// Current level of each upgrade, keyed by id
pub type UpgradeLevels = BTreeMap<UpgradeId, u32>;

/// Catalog row with the player's current standing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeDetails {
    pub upgrade: PermanentUpgrade,
    pub level: u32,
    pub current_bonus: u32,
    /// None once maxed
    pub next_cost: Option<u64>,
}

/// Receipt of a successful purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradePurchase {
    pub id: UpgradeId,
    pub cost: u64,
    pub new_level: u32,
}

// =============================================================================
// Upgrade Shop
// =============================================================================

/// Cost curve and purchase validation for permanent upgrades
#[derive(Debug, Clone, Copy, Default)]
pub struct UpgradeShop;

impl UpgradeShop {
    /// `floor(base_cost * cost_scaling ^ level)`
    pub fn cost(id: UpgradeId, level: u32) -> u64 {
        id.definition().cost(level)
    }

    /// Total bonus granted by an upgrade at a level
    pub fn current_bonus(id: UpgradeId, level: u32) -> u32 {
        id.definition().bonus(level)
    }

    /// Buy one level. On failure nothing changes.
    pub fn purchase(
        levels: &mut UpgradeLevels,
        currency_a: &mut u64,
        id: UpgradeId,
    ) -> Result<UpgradePurchase, PurchaseError> {
        let upgrade = id.definition();
        let level = levels.get(&id).copied().unwrap_or(0);
        if level >= upgrade.max_level {
            log::warn!("Upgrade {:?} declined: max level", id);
            return Err(PurchaseError::MaxLevel(id, upgrade.max_level));
        }

        let cost = upgrade.cost(level);
        if *currency_a < cost {
            log::warn!("Upgrade {:?} declined: need {}, have {}", id, cost, currency_a);
            return Err(PurchaseError::InsufficientCurrency { needed: cost, available: *currency_a });
        }

        *currency_a -= cost;
        levels.insert(id, level + 1);
        log::info!("Purchased {} level {} for {}", upgrade.name, level + 1, cost);

        Ok(UpgradePurchase { id, cost, new_level: level + 1 })
    }

    /// Catalog row for one upgrade
    pub fn details(levels: &UpgradeLevels, id: UpgradeId) -> UpgradeDetails {
        let upgrade = id.definition();
        let level = levels.get(&id).copied().unwrap_or(0);
        UpgradeDetails {
            upgrade,
            level,
            current_bonus: upgrade.bonus(level),
            next_cost: (level < upgrade.max_level).then(|| upgrade.cost(level)),
        }
    }

    /// Costs of the next `count` levels, stopping at the cap
    pub fn cost_progression(id: UpgradeId, from_level: u32, count: u32) -> Vec<(u32, u64)> {
        let upgrade = id.definition();
        (from_level..upgrade.max_level)
            .take(count as usize)
            .map(|level| (level + 1, upgrade.cost(level)))
            .collect()
    }

    /// All upgrades grouped by category
    pub fn by_category(levels: &UpgradeLevels) -> BTreeMap<UpgradeCategory, Vec<UpgradeDetails>> {
        let mut groups: BTreeMap<UpgradeCategory, Vec<UpgradeDetails>> = BTreeMap::new();
        for id in UpgradeId::ALL {
            groups
                .entry(id.definition().category)
                .or_default()
                .push(Self::details(levels, id));
        }
        groups
    }
}
