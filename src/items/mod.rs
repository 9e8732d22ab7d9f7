//! Item system

pub mod artifacts;
pub mod consumables;
pub mod item;
pub mod loot;
pub mod shop;

pub use artifacts::{Artifact, ArtifactRarity};
pub use consumables::{Consumable, ConsumableEffect};
pub use item::{Item, ItemKind, LootTier};
pub use loot::{alchemy_potions, armory_equipment, generate_treasure, roll_boss_loot, BossDrop};
pub use shop::{generate_shop_items, shop_catalog, ShopCategory, ShopEffect, ShopItem, Utility};
