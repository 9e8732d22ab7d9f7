//! Artifacts
//!
//! Rare single-use items dropped by mini-bosses.

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Artifact {
    PhoenixFeather,
    Chronometer,
    AceInTheHole,
    MoneyBag,
    SoulGem,
    Voidwalker,
    Lifewell,
}

/// Artifact rarity (display only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactRarity {
    Epic,
    Legendary,
}

impl Artifact {
    pub const ALL: [Artifact; 7] = [
        Artifact::PhoenixFeather,
        Artifact::Chronometer,
        Artifact::AceInTheHole,
        Artifact::MoneyBag,
        Artifact::SoulGem,
        Artifact::Voidwalker,
        Artifact::Lifewell,
    ];

    pub fn roll(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Artifact::PhoenixFeather => "Phoenix Feather",
            Artifact::Chronometer => "Chronometer",
            Artifact::AceInTheHole => "Ace in the Hole",
            Artifact::MoneyBag => "Bottomless Money Bag",
            Artifact::SoulGem => "Soul Gem",
            Artifact::Voidwalker => "Voidwalker",
            Artifact::Lifewell => "Lifewell",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Artifact::PhoenixFeather => "Survive one fatal blow",
            Artifact::Chronometer => "Slow time for one room",
            Artifact::AceInTheHole => "Guaranteed critical hit next action",
            Artifact::MoneyBag => "Double currency from the next 3 rooms",
            Artifact::SoulGem => "Amplify all active buffs by 50%",
            Artifact::Voidwalker => "Skip the next 2 trap effects",
            Artifact::Lifewell => "Fully restore HP and mana",
        }
    }

    pub fn rarity(&self) -> ArtifactRarity {
        match self {
            Artifact::PhoenixFeather | Artifact::SoulGem | Artifact::Lifewell => ArtifactRarity::Legendary,
            _ => ArtifactRarity::Epic,
        }
    }
}
