//! Run inventory items
//!
//! Everything the player picks up during a run lives in one flat item list;
//! the kind decides what the engine can do with it.

use serde::{Deserialize, Serialize};

use super::{Consumable, Utility};

/// Loot quality tiers for mini-boss drops
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LootTier {
    Common,
    Rare,
    Legendary,
}

/// What an item is, as far as the engine cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Usable between rooms
    Consumable(Consumable),
    /// Valuables from treasure rooms
    Treasure,
    /// Mini-boss drop
    Loot(LootTier),
    /// Weapons and armor
    Equipment,
    /// Alchemy lab brews
    Potion,
    /// Shop specials (charms, rings, amulets)
    Special,
    /// Shop utilities
    Utility(Utility),
}

/// An item held in the run inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Stable content id (e.g. "healthPotion")
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
    /// Currency A value credited when picked up as loot
    pub value: u32,
}

impl Item {
    pub fn new(id: &str, name: &str, kind: ItemKind, value: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            value,
        }
    }

    /// Create the inventory item for a consumable
    pub fn consumable(consumable: Consumable) -> Self {
        Self::new(consumable.id(), consumable.name(), ItemKind::Consumable(consumable), 1)
    }

    pub fn is_consumable(&self, consumable: Consumable) -> bool {
        self.kind == ItemKind::Consumable(consumable)
    }
}

