//! Status effects system
//!
//! Buffs and debuffs last a number of rooms. The tracker counts them down once
//! per completed room and folds the active set into one composite.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entities::Stat;

/// Every buff and debuff the run knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectType {
    StrengthBoost,
    DefenseBoost,
    SpeedBoost,
    DamageBoost,
    Regeneration,
    Fortunate,
    MoneyBag,
    TimeWarp,
    Cursed,
    Weakened,
    Poisoned,
}

impl EffectType {
    /// Buffs a defeated mini-boss may grant
    pub const REWARD_BUFFS: [EffectType; 6] = [
        EffectType::StrengthBoost,
        EffectType::DefenseBoost,
        EffectType::SpeedBoost,
        EffectType::DamageBoost,
        EffectType::Regeneration,
        EffectType::Fortunate,
    ];

    /// Pick a random mini-boss reward buff
    pub fn roll_reward_buff(rng: &mut impl Rng) -> Self {
        Self::REWARD_BUFFS[rng.gen_range(0..Self::REWARD_BUFFS.len())]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EffectType::StrengthBoost => "+10% Strength",
            EffectType::DefenseBoost => "+10% Defense",
            EffectType::SpeedBoost => "+10% Agility",
            EffectType::DamageBoost => "+15% Damage",
            EffectType::Regeneration => "Regeneration",
            EffectType::Fortunate => "Lucky",
            EffectType::MoneyBag => "Money Bag",
            EffectType::TimeWarp => "Time Warp",
            EffectType::Cursed => "Cursed",
            EffectType::Weakened => "Weakened",
            EffectType::Poisoned => "Poisoned",
        }
    }

    /// Is this a beneficial effect?
    pub fn is_buff(&self) -> bool {
        !matches!(self, EffectType::Cursed | EffectType::Weakened | EffectType::Poisoned)
    }

    /// Duration in rooms
    pub fn duration(&self) -> u32 {
        match self {
            EffectType::StrengthBoost | EffectType::DefenseBoost => 3,
            EffectType::SpeedBoost | EffectType::DamageBoost => 2,
            EffectType::Regeneration => 4,
            EffectType::Fortunate | EffectType::MoneyBag => 3,
            EffectType::TimeWarp => 1,
            EffectType::Cursed => 5,
            EffectType::Weakened => 2,
            EffectType::Poisoned => 6,
        }
    }

    /// Build a fresh instance at full duration
    pub fn instance(&self) -> Effect {
        let mut effect = Effect {
            effect_type: *self,
            remaining: self.duration(),
            damage_multiplier: 1.0,
            reward_multiplier: 1.0,
            stat_multipliers: BTreeMap::new(),
            regen_per_room: 0.0,
            damage_per_room: 0.0,
        };
        match self {
            EffectType::StrengthBoost => {
                effect.stat_multipliers.insert(Stat::Strength, 1.1);
            }
            EffectType::DefenseBoost => {
                effect.stat_multipliers.insert(Stat::Defense, 1.1);
            }
            EffectType::SpeedBoost => {
                effect.stat_multipliers.insert(Stat::Agility, 1.1);
            }
            EffectType::DamageBoost => effect.damage_multiplier = 1.15,
            EffectType::Regeneration => effect.regen_per_room = 0.1,
            EffectType::Fortunate => effect.reward_multiplier = 1.3,
            EffectType::MoneyBag => effect.reward_multiplier = 2.0,
            EffectType::TimeWarp => effect.damage_multiplier = 1.5,
            EffectType::Cursed => {
                effect.reward_multiplier = 0.6;
                effect.damage_multiplier = 1.2;
            }
            EffectType::Weakened => effect.damage_multiplier = 0.75,
            EffectType::Poisoned => effect.damage_per_room = 0.15,
        }
        effect
    }
}

/// One active buff or debuff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub effect_type: EffectType,
    /// Rooms left; always > 0 while tracked
    pub remaining: u32,
    pub damage_multiplier: f64,
    pub reward_multiplier: f64,
    pub stat_multipliers: BTreeMap<Stat, f64>,
    /// Fraction of max HP restored per room
    pub regen_per_room: f64,
    /// Fraction of max HP lost per room
    pub damage_per_room: f64,
}

impl Effect {
    /// Amplify the multiplicative part of this effect
    pub fn amplify(&mut self, factor: f64) {
        self.damage_multiplier *= factor;
        self.reward_multiplier *= factor;
    }
}

/// Composite of every active effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub damage_multiplier: f64,
    pub reward_multiplier: f64,
    pub stat_multipliers: BTreeMap<Stat, f64>,
    pub regen_per_room: f64,
    pub damage_per_room: f64,
}

impl Default for ActiveEffects {
    fn default() -> Self {
        Self {
            damage_multiplier: 1.0,
            reward_multiplier: 1.0,
            stat_multipliers: BTreeMap::new(),
            regen_per_room: 0.0,
            damage_per_room: 0.0,
        }
    }
}

impl ActiveEffects {
    /// Multiplier for a single stat (1.0 if untouched)
    pub fn stat_multiplier(&self, stat: Stat) -> f64 {
        self.stat_multipliers.get(&stat).copied().unwrap_or(1.0)
    }
}

/// Owns the active buff and debuff lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectTracker {
    pub buffs: Vec<Effect>,
    pub debuffs: Vec<Effect>,
}

impl EffectTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fresh instance of an effect to the matching list
    pub fn apply(&mut self, effect_type: EffectType) {
        let effect = effect_type.instance();
        log::debug!("Applying {} for {} rooms", effect_type.name(), effect.remaining);
        if effect_type.is_buff() {
            self.buffs.push(effect);
        } else {
            self.debuffs.push(effect);
        }
    }

    /// Count every effect down by one room and drop the expired ones
    pub fn advance_durations(&mut self) {
        for effect in self.buffs.iter_mut().chain(self.debuffs.iter_mut()) {
            effect.remaining = effect.remaining.saturating_sub(1);
        }
        self.buffs.retain(|e| e.remaining > 0);
        self.debuffs.retain(|e| e.remaining > 0);
    }

    /// Fold all active effects into one composite
    pub fn active_effects(&self) -> ActiveEffects {
        self.iter().fold(ActiveEffects::default(), |mut acc, effect| {
            acc.damage_multiplier *= effect.damage_multiplier;
            acc.reward_multiplier *= effect.reward_multiplier;
            acc.regen_per_room += effect.regen_per_room;
            acc.damage_per_room += effect.damage_per_room;
            for (stat, mult) in &effect.stat_multipliers {
                *acc.stat_multipliers.entry(*stat).or_insert(1.0) *= mult;
            }
            acc
        })
    }

    /// Check if an effect is active
    pub fn has_effect(&self, effect_type: EffectType) -> bool {
        self.iter().any(|e| e.effect_type == effect_type)
    }

    /// Remove all instances of one effect type
    pub fn remove_effect(&mut self, effect_type: EffectType) -> bool {
        let before = self.len();
        self.buffs.retain(|e| e.effect_type != effect_type);
        self.debuffs.retain(|e| e.effect_type != effect_type);
        self.len() < before
    }

    /// Remove every debuff
    pub fn cleanse(&mut self) {
        self.debuffs.clear();
    }

    /// Amplify every active buff
    pub fn amplify_buffs(&mut self, factor: f64) {
        for buff in &mut self.buffs {
            buff.amplify(factor);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.buffs.iter().chain(self.debuffs.iter())
    }

    pub fn len(&self) -> usize {
        self.buffs.len() + self.debuffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
