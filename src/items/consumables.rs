//! Consumable items
//!
//! Single-use items that can be used between rooms.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Consumable {
    HealthPotion,
    MajorHealthPotion,
    ManaPotion,
    MajorManaPotion,
    Rejuvenation,
    Antidote,
    CleanseScroll,
    PhoenixFeather,
}

/// What using a consumable does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsumableEffect {
    Heal(u32),
    RestoreMana(u32),
    /// Restore a percentage of both HP and mana
    Rejuvenate(u32),
    CurePoison,
    CleanseDebuffs,
    /// Survive the next fatal blow
    Revive,
}

impl Consumable {
    /// The collectible set tracked by the Hoarder achievement
    pub const CORE: [Consumable; 5] = [
        Consumable::HealthPotion,
        Consumable::ManaPotion,
        Consumable::Antidote,
        Consumable::CleanseScroll,
        Consumable::PhoenixFeather,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Consumable::HealthPotion => "healthPotion",
            Consumable::MajorHealthPotion => "healthPotionMajor",
            Consumable::ManaPotion => "manaPotion",
            Consumable::MajorManaPotion => "manaPotionMajor",
            Consumable::Rejuvenation => "rejuvenation",
            Consumable::Antidote => "antidote",
            Consumable::CleanseScroll => "cleanse",
            Consumable::PhoenixFeather => "revive",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Consumable::HealthPotion => "Health Potion",
            Consumable::MajorHealthPotion => "Major Health Potion",
            Consumable::ManaPotion => "Mana Potion",
            Consumable::MajorManaPotion => "Major Mana Potion",
            Consumable::Rejuvenation => "Rejuvenation Elixir",
            Consumable::Antidote => "Antidote",
            Consumable::CleanseScroll => "Cleanse Scroll",
            Consumable::PhoenixFeather => "Phoenix Feather",
        }
    }

    pub fn effect(&self) -> ConsumableEffect {
        match self {
            Consumable::HealthPotion => ConsumableEffect::Heal(40),
            Consumable::MajorHealthPotion => ConsumableEffect::Heal(100),
            Consumable::ManaPotion => ConsumableEffect::RestoreMana(25),
            Consumable::MajorManaPotion => ConsumableEffect::RestoreMana(60),
            Consumable::Rejuvenation => ConsumableEffect::Rejuvenate(30),
            Consumable::Antidote => ConsumableEffect::CurePoison,
            Consumable::CleanseScroll => ConsumableEffect::CleanseDebuffs,
            Consumable::PhoenixFeather => ConsumableEffect::Revive,
        }
    }
}
