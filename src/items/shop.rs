//! In-run shop stock
//!
//! Shop rooms offer a random selection from a fixed catalog, tier-weighted
//! by floor depth. Prices scale with the floor and are paid in run Currency A.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entities::Stat;
use super::item::{Item, ItemKind};
use super::Consumable;

/// Shop catalog categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShopCategory {
    Consumable,
    Buff,
    Equipment,
    Special,
    Utility,
}

/// Utility items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Utility {
    /// Keepsake for the caller's map display
    MapFragment,
    /// Spent automatically to bypass the next trap
    SkeletonKey,
    /// Keepsake; leaving a run never needs one
    EscapeScroll,
    /// Regenerate the current floor's room offer once
    RerollToken,
}

/// What buying an item does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShopEffect {
    /// Goes to the inventory for later use
    Consumable(Consumable),
    /// Raises a stat for the rest of the run
    StatBoost(Stat, i32),
    /// Goes to the inventory; may also raise a stat
    Equipment(Option<(Stat, i32)>),
    /// Held for the caller's combat resolver, except the Merchant Ring,
    /// which raises room currency while held
    Special,
    Utility(Utility),
}

/// An item offered by a shop room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopItem {
    pub id: String,
    pub name: String,
    pub category: ShopCategory,
    pub tier: u8,
    /// Price in run Currency A
    pub cost: u64,
    pub description: String,
    pub effect: ShopEffect,
}

impl ShopItem {
    /// The inventory item a purchase produces, if any
    pub fn to_item(&self) -> Option<Item> {
        let kind = match self.effect {
            ShopEffect::Consumable(c) => ItemKind::Consumable(c),
            ShopEffect::StatBoost(..) => return None,
            ShopEffect::Equipment(_) => ItemKind::Equipment,
            ShopEffect::Special => ItemKind::Special,
            ShopEffect::Utility(u) => ItemKind::Utility(u),
        };
        Some(Item::new(&self.id, &self.name, kind, 0))
    }
}

struct CatalogEntry {
    id: &'static str,
    name: &'static str,
    category: ShopCategory,
    base_cost: u64,
    tier: u8,
    description: &'static str,
    effect: ShopEffect,
}

const fn entry(
    id: &'static str,
    name: &'static str,
    category: ShopCategory,
    base_cost: u64,
    tier: u8,
    description: &'static str,
    effect: ShopEffect,
) -> CatalogEntry {
    CatalogEntry { id, name, category, base_cost, tier, description, effect }
}

use ShopCategory as C;

const CATALOG: &[CatalogEntry] = &[
    // Consumables
    entry("healthPotion", "Health Potion", C::Consumable, 20, 1, "Restore 40 HP", ShopEffect::Consumable(Consumable::HealthPotion)),
    entry("healthPotionMajor", "Major Health Potion", C::Consumable, 35, 2, "Restore 100 HP", ShopEffect::Consumable(Consumable::MajorHealthPotion)),
    entry("manaPotion", "Mana Potion", C::Consumable, 15, 1, "Restore 25 Mana", ShopEffect::Consumable(Consumable::ManaPotion)),
    entry("manaPotionMajor", "Major Mana Potion", C::Consumable, 28, 2, "Restore 60 Mana", ShopEffect::Consumable(Consumable::MajorManaPotion)),
    entry("rejuvenation", "Rejuvenation Elixir", C::Consumable, 50, 3, "Restore 30% HP + 30% Mana", ShopEffect::Consumable(Consumable::Rejuvenation)),
    entry("antidote", "Antidote", C::Consumable, 18, 1, "Remove poison", ShopEffect::Consumable(Consumable::Antidote)),
    entry("cleanse", "Cleanse Scroll", C::Consumable, 40, 2, "Remove all debuffs", ShopEffect::Consumable(Consumable::CleanseScroll)),
    entry("revive", "Phoenix Feather", C::Consumable, 90, 3, "Survive fatal blow once", ShopEffect::Consumable(Consumable::PhoenixFeather)),
    // Temporary buffs
    entry("strengthPotion", "Strength Potion", C::Buff, 30, 1, "+5 Strength (this run)", ShopEffect::StatBoost(Stat::Strength, 5)),
    entry("strengthElixir", "Strength Elixir", C::Buff, 55, 2, "+10 Strength (this run)", ShopEffect::StatBoost(Stat::Strength, 10)),
    entry("defensePotion", "Defense Potion", C::Buff, 25, 1, "+5 Defense (this run)", ShopEffect::StatBoost(Stat::Defense, 5)),
    entry("defenseElixir", "Defense Elixir", C::Buff, 50, 2, "+10 Defense (this run)", ShopEffect::StatBoost(Stat::Defense, 10)),
    entry("speedPotion", "Speed Potion", C::Buff, 25, 1, "+5 Agility (this run)", ShopEffect::StatBoost(Stat::Agility, 5)),
    entry("speedElixir", "Speed Elixir", C::Buff, 48, 2, "+10 Agility (this run)", ShopEffect::StatBoost(Stat::Agility, 10)),
    entry("intelligencePotion", "Intelligence Potion", C::Buff, 28, 1, "+5 Intelligence (this run)", ShopEffect::StatBoost(Stat::Intelligence, 5)),
    entry("wisdomPotion", "Wisdom Potion", C::Buff, 28, 1, "+5 Wisdom (this run)", ShopEffect::StatBoost(Stat::Wisdom, 5)),
    // Equipment
    entry("ironSword", "Iron Sword", C::Equipment, 40, 1, "+8 Damage", ShopEffect::Equipment(None)),
    entry("steelSword", "Steel Sword", C::Equipment, 70, 2, "+15 Damage", ShopEffect::Equipment(None)),
    entry("mythrilSword", "Mythril Sword", C::Equipment, 120, 3, "+25 Damage", ShopEffect::Equipment(None)),
    entry("leatherArmor", "Leather Armor", C::Equipment, 35, 1, "+5 Defense", ShopEffect::Equipment(Some((Stat::Defense, 5)))),
    entry("chainmail", "Chainmail", C::Equipment, 65, 2, "+10 Defense", ShopEffect::Equipment(Some((Stat::Defense, 10)))),
    entry("plateArmor", "Plate Armor", C::Equipment, 110, 3, "+18 Defense", ShopEffect::Equipment(Some((Stat::Defense, 18)))),
    // Specials
    entry("luckCharm", "Luck Charm", C::Special, 60, 2, "+5% crit chance in combat", ShopEffect::Special),
    entry("experienceBoost", "XP Tome", C::Special, 50, 2, "+20% skill damage in combat", ShopEffect::Special),
    entry("goldMultiplier", "Merchant Ring", C::Special, 75, 2, "+25% room currency while held", ShopEffect::Special),
    entry("damageMultiplier", "Power Amulet", C::Special, 80, 3, "+15% all damage", ShopEffect::Special),
    entry("critBoost", "Critical Ring", C::Special, 70, 2, "+10% crit chance", ShopEffect::Special),
    entry("vampiricTouch", "Vampire Ring", C::Special, 90, 3, "Lifesteal: 5% damage to HP", ShopEffect::Special),
    // Utility
    entry("mapFragment", "Map Fragment", C::Utility, 45, 2, "A torn chart of the floors below", ShopEffect::Utility(Utility::MapFragment)),
    entry("keyRing", "Skeleton Key", C::Utility, 55, 2, "Bypass the next trap", ShopEffect::Utility(Utility::SkeletonKey)),
    entry("returnScroll", "Escape Scroll", C::Utility, 40, 2, "A worn scroll promising a way home", ShopEffect::Utility(Utility::EscapeScroll)),
    entry("rerollToken", "Reroll Token", C::Utility, 35, 1, "Reroll room choices once", ShopEffect::Utility(Utility::RerollToken)),
];

/// Price factor for a floor
pub fn price_scale(floor: u32) -> u64 {
    (1.0 + floor as f64 * 0.5).floor() as u64
}

fn to_shop_item(entry: &CatalogEntry, floor: u32) -> ShopItem {
    ShopItem {
        id: entry.id.to_string(),
        name: entry.name.to_string(),
        category: entry.category,
        tier: entry.tier,
        cost: entry.base_cost * price_scale(floor),
        description: entry.description.to_string(),
        effect: entry.effect,
    }
}

/// Full catalog priced for a floor, for overview screens
pub fn shop_catalog(floor: u32) -> Vec<ShopItem> {
    CATALOG.iter().map(|e| to_shop_item(e, floor)).collect()
}

/// Roll 5-7 distinct stock items for a shop room
pub fn generate_shop_items(floor: u32, rng: &mut impl Rng) -> Vec<ShopItem> {
    let count = rng.gen_range(5..=7);
    let mut available: Vec<&CatalogEntry> = CATALOG.iter().collect();
    let mut stock = Vec::with_capacity(count);

    for _ in 0..count {
        if available.is_empty() {
            break;
        }

        // Early floors lean on tier 1, mid floors on tiers 1-2
        let mut candidates: Vec<usize> = (0..available.len())
            .filter(|&i| match floor {
                0..=5 => available[i].tier == 1 || rng.gen_bool(0.3),
                6..=15 => available[i].tier <= 2 || rng.gen_bool(0.2),
                _ => true,
            })
            .collect();
        if candidates.is_empty() {
            candidates = (0..available.len()).collect();
        }

        let picked = candidates[rng.gen_range(0..candidates.len())];
        stock.push(to_shop_item(available.remove(picked), floor));
    }

    stock
}
