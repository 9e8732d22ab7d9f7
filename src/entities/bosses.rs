//! Mini-boss creation
//!
//! Mini-bosses guard select rooms. Their stats scale with the floor and the
//! run's accumulated difficulty, and each carries a pre-rolled loot list.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::items::{roll_boss_loot, BossDrop};
use crate::world::RoomType;

const BASE_HEALTH: f64 = 60.0;
const BASE_DAMAGE: f64 = 12.0;

const MINI_BOSS_NAMES: [&str; 10] = [
    "Shade Guardian",
    "Flame Sentinel",
    "Void Watcher",
    "Dark Disciple",
    "Lich Keeper",
    "Shadow Beast",
    "Cursed Revenant",
    "Infernal Hound",
    "Corrupted Knight",
    "Abyssal Creature",
];

/// The single special move a mini-boss knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MiniBossAbility {
    Cleave,
    DarkPulse,
    ShadowStrike,
    Curse,
    Regenerate,
}

impl MiniBossAbility {
    pub const ALL: [MiniBossAbility; 5] = [
        MiniBossAbility::Cleave,
        MiniBossAbility::DarkPulse,
        MiniBossAbility::ShadowStrike,
        MiniBossAbility::Curse,
        MiniBossAbility::Regenerate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MiniBossAbility::Cleave => "Cleave",
            MiniBossAbility::DarkPulse => "Dark Pulse",
            MiniBossAbility::ShadowStrike => "Shadow Strike",
            MiniBossAbility::Curse => "Curse",
            MiniBossAbility::Regenerate => "Regenerate",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MiniBossAbility::Cleave => "Heavy attack",
            MiniBossAbility::DarkPulse => "Magic attack",
            MiniBossAbility::ShadowStrike => "Quick melee",
            MiniBossAbility::Curse => "Inflict debuff",
            MiniBossAbility::Regenerate => "Heal 20% HP",
        }
    }

    /// Damage multiplier over the boss's base damage (0 for non-damaging moves)
    pub fn damage_multiplier(&self) -> f64 {
        match self {
            MiniBossAbility::Cleave => 1.5,
            MiniBossAbility::DarkPulse => 1.2,
            MiniBossAbility::ShadowStrike => 1.3,
            MiniBossAbility::Curse | MiniBossAbility::Regenerate => 0.0,
        }
    }
}

/// A mini-boss guarding a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiniBoss {
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub damage: u32,
    pub defense: u32,
    pub ability: MiniBossAbility,
    /// Drops granted if the boss is defeated
    pub loot: Vec<BossDrop>,
}

impl MiniBoss {
    /// Damage dealt by this boss's ability
    pub fn ability_damage(&self) -> u32 {
        (self.damage as f64 * self.ability.damage_multiplier()).floor() as u32
    }

    /// Scale health and damage in place (floor challenges, room modifiers)
    pub fn apply_multipliers(&mut self, health: f64, damage: f64) {
        self.max_health = (self.max_health as f64 * health).floor() as u32;
        self.health = self.max_health;
        self.damage = (self.damage as f64 * damage).floor() as u32;
    }
}

/// Generate the mini-boss for a room, if the room type allows one
pub fn generate_mini_boss(
    room_type: RoomType,
    floor: u32,
    difficulty_multiplier: f64,
    rng: &mut impl Rng,
) -> Option<MiniBoss> {
    if !room_type.allows_mini_boss() {
        return None;
    }

    let floor_f = floor as f64;
    let health = (BASE_HEALTH * (1.0 + floor_f * 0.08) * difficulty_multiplier).floor() as u32;
    let damage = (BASE_DAMAGE * (1.0 + floor_f * 0.06) * difficulty_multiplier).floor() as u32;

    let name = MINI_BOSS_NAMES[rng.gen_range(0..MINI_BOSS_NAMES.len())];
    let ability = MiniBossAbility::ALL[rng.gen_range(0..MiniBossAbility::ALL.len())];
    let loot = roll_boss_loot(floor, rng);

    log::debug!("Mini-boss {} guards a {} on floor {}", name, room_type.name(), floor);

    Some(MiniBoss {
        name: name.to_string(),
        health,
        max_health: health,
        damage,
        defense: 3 + floor / 3,
        ability,
        loot,
    })
}
