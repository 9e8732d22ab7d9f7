//! Room data model
//!
//! Room types, modifiers, events and the type-specific payloads a room carries.

use serde::{Deserialize, Serialize};

use crate::entities::MiniBoss;
use crate::items::{Item, ShopItem};
use crate::progression::Skill;
use super::Theme;

/// Kinds of rooms a floor can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoomType {
    Skill,
    Treasure,
    Healing,
    Rest,
    Trap,
    Shop,
    Library,
    Armory,
    Alchemy,
    Combat,
    Mystery,
    Elite,
}

impl RoomType {
    /// Every room type
    pub const ALL: [RoomType; 12] = [
        RoomType::Skill,
        RoomType::Treasure,
        RoomType::Healing,
        RoomType::Rest,
        RoomType::Trap,
        RoomType::Shop,
        RoomType::Library,
        RoomType::Armory,
        RoomType::Alchemy,
        RoomType::Combat,
        RoomType::Mystery,
        RoomType::Elite,
    ];

    /// Room types generated without any unlock
    pub const DEFAULT_UNLOCKED: [RoomType; 9] = [
        RoomType::Skill,
        RoomType::Treasure,
        RoomType::Healing,
        RoomType::Rest,
        RoomType::Trap,
        RoomType::Shop,
        RoomType::Combat,
        RoomType::Mystery,
        RoomType::Elite,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RoomType::Skill => "Skill Room",
            RoomType::Treasure => "Treasure Room",
            RoomType::Healing => "Healing Room",
            RoomType::Rest => "Rest Room",
            RoomType::Trap => "Trap Room",
            RoomType::Shop => "Shop",
            RoomType::Library => "Library",
            RoomType::Armory => "Armory",
            RoomType::Alchemy => "Alchemy Lab",
            RoomType::Combat => "Combat Chamber",
            RoomType::Mystery => "Mystery Room",
            RoomType::Elite => "Elite Chamber",
        }
    }

    /// Selection weight once the type is available
    pub fn weight(&self) -> u32 {
        match self {
            RoomType::Skill => 20,
            RoomType::Treasure => 15,
            RoomType::Healing => 15,
            RoomType::Rest => 10,
            RoomType::Trap => 10,
            RoomType::Shop => 10,
            RoomType::Library | RoomType::Armory | RoomType::Alchemy => 10,
            RoomType::Combat => 12,
            RoomType::Mystery => 8,
            RoomType::Elite => 5,
        }
    }

    /// Currency B price to unlock this type during a run, if unlockable
    pub fn unlock_cost(&self) -> Option<u64> {
        match self {
            RoomType::Library => Some(50),
            RoomType::Armory => Some(75),
            RoomType::Alchemy => Some(60),
            _ => None,
        }
    }

    /// Whether a mini-boss may guard this room
    pub fn allows_mini_boss(&self) -> bool {
        !matches!(
            self,
            RoomType::Healing | RoomType::Rest | RoomType::Shop | RoomType::Alchemy | RoomType::Library
        )
    }

    /// Difficulty factor applied to this room's mini-boss
    pub fn mini_boss_difficulty(&self) -> f64 {
        match self {
            RoomType::Combat => 1.2,
            RoomType::Elite => 1.5,
            _ => 1.0,
        }
    }
}

/// Random room-wide modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomModifier {
    Blessed,
    Cursed,
    Flooded,
    Frozen,
    Inferno,
    Thunderstorm,
}

impl RoomModifier {
    pub const ALL: [RoomModifier; 6] = [
        RoomModifier::Blessed,
        RoomModifier::Cursed,
        RoomModifier::Flooded,
        RoomModifier::Frozen,
        RoomModifier::Inferno,
        RoomModifier::Thunderstorm,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RoomModifier::Blessed => "Blessed",
            RoomModifier::Cursed => "Cursed",
            RoomModifier::Flooded => "Flooded",
            RoomModifier::Frozen => "Frozen",
            RoomModifier::Inferno => "Inferno",
            RoomModifier::Thunderstorm => "Thunderstorm",
        }
    }

    /// Reward multiplier for a room of the given type
    pub fn reward_multiplier(&self, room_type: RoomType) -> f64 {
        match self {
            RoomModifier::Blessed => 1.5,
            RoomModifier::Cursed => 0.5,
            RoomModifier::Inferno if room_type == RoomType::Treasure => 1.25,
            _ => 1.0,
        }
    }

    /// Multiplier on healing and mana restoration
    pub fn healing_multiplier(&self) -> f64 {
        match self {
            RoomModifier::Flooded => 0.5,
            _ => 1.0,
        }
    }

    /// Multiplier on the damage of an attached mini-boss
    pub fn enemy_damage_multiplier(&self) -> f64 {
        match self {
            RoomModifier::Frozen => 0.8,
            RoomModifier::Inferno => 1.2,
            _ => 1.0,
        }
    }

    /// Chance for actions to chain-hit
    pub fn chain_chance(&self) -> f64 {
        match self {
            RoomModifier::Thunderstorm => 0.3,
            _ => 0.0,
        }
    }
}

/// Skill-check events a room may host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomEvent {
    Riddle,
    Puzzle,
    Trial,
    Stealth,
    Meditation,
}

/// Stat an event checks against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCheck {
    Wisdom,
    Intelligence,
    Strength,
    Agility,
}

/// How hard an event is for the caller's resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventDifficulty {
    Easy,
    Medium,
    Hard,
}

impl RoomEvent {
    pub const ALL: [RoomEvent; 5] = [
        RoomEvent::Riddle,
        RoomEvent::Puzzle,
        RoomEvent::Trial,
        RoomEvent::Stealth,
        RoomEvent::Meditation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RoomEvent::Riddle => "Ancient Riddle",
            RoomEvent::Puzzle => "Magical Puzzle",
            RoomEvent::Trial => "Warrior's Trial",
            RoomEvent::Stealth => "Stealth Challenge",
            RoomEvent::Meditation => "Meditation",
        }
    }

    pub fn check(&self) -> EventCheck {
        match self {
            RoomEvent::Riddle | RoomEvent::Meditation => EventCheck::Wisdom,
            RoomEvent::Puzzle => EventCheck::Intelligence,
            RoomEvent::Trial => EventCheck::Strength,
            RoomEvent::Stealth => EventCheck::Agility,
        }
    }

    pub fn difficulty(&self) -> EventDifficulty {
        match self {
            RoomEvent::Meditation => EventDifficulty::Easy,
            RoomEvent::Riddle | RoomEvent::Trial => EventDifficulty::Medium,
            RoomEvent::Puzzle | RoomEvent::Stealth => EventDifficulty::Hard,
        }
    }

    /// Currency A granted on success
    pub fn success_reward(floor: u32) -> u64 {
        5 * floor as u64
    }

    /// HP lost on failure
    pub fn failure_damage(floor: u32) -> u32 {
        10 * floor / 5
    }
}

/// Currency amounts attached to a room
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyReward {
    pub currency_a: u64,
    pub currency_b: u64,
    pub currency_c: u64,
}

impl CurrencyReward {
    pub fn a(amount: u64) -> Self {
        Self { currency_a: amount, ..Self::default() }
    }

    /// Scale each currency by a factor, flooring
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            currency_a: (self.currency_a as f64 * factor).floor() as u64,
            currency_b: (self.currency_b as f64 * factor).floor() as u64,
            currency_c: (self.currency_c as f64 * factor).floor() as u64,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.currency_a == 0 && self.currency_b == 0 && self.currency_c == 0
    }
}

/// Type-specific contents of a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoomPayload {
    Skill { options: Vec<Skill> },
    Treasure { reward: CurrencyReward, items: Vec<Item> },
    Healing { heal_amount: u32 },
    Rest { restore_amount: u32 },
    Trap { health_loss: u32, currency_loss: u64 },
    Shop { stock: Vec<ShopItem> },
    Library { skills: Vec<Skill>, reward: CurrencyReward },
    Armory { equipment: Vec<Item>, defense: i32 },
    Alchemy { potions: Vec<Item>, intelligence: i32 },
    Encounter { reward: CurrencyReward },
}

impl RoomPayload {
    /// Currency granted by clearing this room, before multipliers
    pub fn base_reward(&self) -> CurrencyReward {
        match self {
            RoomPayload::Treasure { reward, .. }
            | RoomPayload::Library { reward, .. }
            | RoomPayload::Encounter { reward } => *reward,
            _ => CurrencyReward::default(),
        }
    }
}

/// Unique id of a room within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoomId(pub u32);

/// A single room offered on a floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub room_type: RoomType,
    pub floor: u32,
    pub theme: Theme,
    pub modifier: Option<RoomModifier>,
    pub event: Option<RoomEvent>,
    pub mini_boss: Option<MiniBoss>,
    pub payload: RoomPayload,
}

impl Room {
    /// Multiplier the modifier applies to this room's rewards
    pub fn modifier_multiplier(&self) -> f64 {
        self.modifier
            .map(|m| m.reward_multiplier(self.room_type))
            .unwrap_or(1.0)
    }

    /// Multiplier the modifier applies to healing and restoration
    pub fn healing_multiplier(&self) -> f64 {
        self.modifier.map(|m| m.healing_multiplier()).unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_boss_rooms() {
        for room_type in [RoomType::Healing, RoomType::Rest, RoomType::Shop, RoomType::Alchemy, RoomType::Library] {
            assert!(!room_type.allows_mini_boss(), "{:?} should never have a mini-boss", room_type);
        }
        assert!(RoomType::Armory.allows_mini_boss());
        assert!(RoomType::Trap.allows_mini_boss());
    }

    #[test]
    fn test_modifier_rewards() {
        assert_eq!(RoomModifier::Blessed.reward_multiplier(RoomType::Combat), 1.5);
        assert_eq!(RoomModifier::Cursed.reward_multiplier(RoomType::Treasure), 0.5);
        assert_eq!(RoomModifier::Inferno.reward_multiplier(RoomType::Treasure), 1.25);
        assert_eq!(RoomModifier::Inferno.reward_multiplier(RoomType::Combat), 1.0);
        assert_eq!(RoomModifier::Frozen.reward_multiplier(RoomType::Treasure), 1.0);
    }

    #[test]
    fn test_event_formulas() {
        assert_eq!(RoomEvent::success_reward(7), 35);
        assert_eq!(RoomEvent::failure_damage(7), 14);
        assert_eq!(RoomEvent::failure_damage(1), 2);
    }

    #[test]
    fn test_currency_scaling_floors() {
        let reward = CurrencyReward { currency_a: 25, currency_b: 3, currency_c: 1 };
        assert_eq!(reward.scaled(0.5), CurrencyReward { currency_a: 12, currency_b: 1, currency_c: 0 });
    }
}
