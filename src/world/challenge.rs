//! Floor-wide challenges
//!
//! A floor may roll one challenge on entry; it stays active until the floor is left.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Chance for a floor to roll a challenge
pub const FLOOR_CHALLENGE_CHANCE: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloorChallenge {
    /// Healing rooms heal half as much
    NoHealing,
    /// Mini-bosses have +50% HP
    Reinforced,
    /// Mini-bosses deal 20% less damage
    Dampened,
    /// Player damage reduced by 25%
    RustyWeapons,
}

impl FloorChallenge {
    pub const ALL: [FloorChallenge; 4] = [
        FloorChallenge::NoHealing,
        FloorChallenge::Reinforced,
        FloorChallenge::Dampened,
        FloorChallenge::RustyWeapons,
    ];

    /// Roll the challenge for a freshly entered floor
    pub fn roll(rng: &mut impl Rng) -> Option<Self> {
        if !rng.gen_bool(FLOOR_CHALLENGE_CHANCE) {
            return None;
        }
        Some(Self::ALL[rng.gen_range(0..Self::ALL.len())])
    }

    pub fn name(&self) -> &'static str {
        match self {
            FloorChallenge::NoHealing => "No Healing",
            FloorChallenge::Reinforced => "Reinforced",
            FloorChallenge::Dampened => "Dampened",
            FloorChallenge::RustyWeapons => "Rusty Weapons",
        }
    }

    pub fn healing_multiplier(&self) -> f64 {
        match self {
            FloorChallenge::NoHealing => 0.5,
            _ => 1.0,
        }
    }

    pub fn mini_boss_health_multiplier(&self) -> f64 {
        match self {
            FloorChallenge::Reinforced => 1.5,
            _ => 1.0,
        }
    }

    pub fn mini_boss_damage_multiplier(&self) -> f64 {
        match self {
            FloorChallenge::Dampened => 0.8,
            _ => 1.0,
        }
    }

    pub fn player_damage_multiplier(&self) -> f64 {
        match self {
            FloorChallenge::RustyWeapons => 0.75,
            _ => 1.0,
        }
    }
}
