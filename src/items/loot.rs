//! Loot generation system
//!
//! Mini-boss drop tables, treasure hoards and the fixed room rewards of the
//! armory and alchemy lab.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::item::{Item, ItemKind, LootTier};
use super::{Artifact, Consumable};

/// Base chance for a rare drop
const RARE_CHANCE: f64 = 0.45;
/// Floors past this always drop a rare
const RARE_GUARANTEED_AFTER: u32 = 15;
/// Floors past this get the improved legendary/artifact odds
const LATE_FLOOR: u32 = 20;

/// A single mini-boss drop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BossDrop {
    Item(Item),
    Artifact(Artifact),
}

/// Legendary drop chance for a floor
pub fn legendary_chance(floor: u32) -> f64 {
    if floor > LATE_FLOOR { 0.15 } else { 0.05 }
}

/// Artifact drop chance for a floor
pub fn artifact_chance(floor: u32) -> f64 {
    if floor > LATE_FLOOR { 0.05 } else { 0.01 }
}

fn common_drop(rng: &mut impl Rng) -> Item {
    match rng.gen_range(0..3) {
        0 => Item::new("goldCoins", "Gold Coins", ItemKind::Loot(LootTier::Common), 25),
        1 => Item::consumable(Consumable::HealthPotion),
        _ => Item::consumable(Consumable::ManaPotion),
    }
}

fn rare_drop(rng: &mut impl Rng) -> Item {
    let (id, name, value) = match rng.gen_range(0..3) {
        0 => ("rareGem", "Rare Gem", 50),
        1 => ("enchantedScroll", "Enchanted Scroll", 30),
        _ => ("ancientRelic", "Ancient Relic", 75),
    };
    Item::new(id, name, ItemKind::Loot(LootTier::Rare), value)
}

fn legendary_drop(rng: &mut impl Rng) -> Item {
    let (id, name, value) = match rng.gen_range(0..3) {
        0 => ("midasTouch", "Midas Touch", 200),
        1 => ("dragonScale", "Dragon Scale", 150),
        _ => ("voidShard", "Void Shard", 180),
    };
    Item::new(id, name, ItemKind::Loot(LootTier::Legendary), value)
}

/// Roll the drops for a mini-boss.
///
/// One common drop always; rare, legendary and artifact drops are independent
/// trials, so a single kill can yield all four.
pub fn roll_boss_loot(floor: u32, rng: &mut impl Rng) -> Vec<BossDrop> {
    let mut loot = vec![BossDrop::Item(common_drop(rng))];

    if floor > RARE_GUARANTEED_AFTER || rng.gen_bool(RARE_CHANCE) {
        loot.push(BossDrop::Item(rare_drop(rng)));
    }
    if rng.gen_bool(legendary_chance(floor)) {
        loot.push(BossDrop::Item(legendary_drop(rng)));
    }
    if rng.gen_bool(artifact_chance(floor)) {
        loot.push(BossDrop::Artifact(Artifact::roll(rng)));
    }

    loot
}

/// Generate the 1-2 valuables found in a treasure room
pub fn generate_treasure(difficulty: f64, rng: &mut impl Rng) -> Vec<Item> {
    let count = if rng.gen_bool(0.5) { 1 } else { 2 };
    (0..count)
        .map(|_| {
            let (id, name, base) = match rng.gen_range(0..4) {
                0 => ("goldCoin", "Gold Coin", 5.0),
                1 => ("rareGem", "Rare Gem", 15.0),
                2 => ("ancientRelic", "Ancient Relic", 25.0),
                _ => ("enchantedScroll", "Enchanted Scroll", 10.0),
            };
            Item::new(id, name, ItemKind::Treasure, (base * difficulty).floor() as u32)
        })
        .collect()
}

/// Equipment on display in an armory
pub fn armory_equipment(difficulty: f64) -> Vec<Item> {
    vec![
        Item::new("ancientSword", "Ancient Sword", ItemKind::Equipment, (20.0 * difficulty).floor() as u32),
        Item::new("dragonplate", "Dragonplate Armor", ItemKind::Equipment, (15.0 * difficulty).floor() as u32),
    ]
}

/// Potions brewed in an alchemy lab
pub fn alchemy_potions() -> Vec<Item> {
    vec![
        Item::new("elixirOfPower", "Elixir of Power", ItemKind::Potion, 0),
        Item::new("elixirOfVitality", "Elixir of Vitality", ItemKind::Potion, 0),
    ]
}
