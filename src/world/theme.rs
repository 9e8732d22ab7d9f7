//! Run themes
//!
//! Each run takes place in one themed environment that flavors its enemies.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Environment theme for a whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theme {
    Darkness,
    Forest,
    Volcano,
    Void,
    Ice,
    Arcane,
}

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::Darkness,
        Theme::Forest,
        Theme::Volcano,
        Theme::Void,
        Theme::Ice,
        Theme::Arcane,
    ];

    /// Pick a theme uniformly
    pub fn roll(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Darkness => "Darkness",
            Theme::Forest => "Enchanted Forest",
            Theme::Volcano => "Volcano",
            Theme::Void => "Void",
            Theme::Ice => "Frozen Wastes",
            Theme::Arcane => "Arcane Library",
        }
    }

    /// Enemy roster for the caller's combat encounters
    pub fn enemies(&self) -> [&'static str; 3] {
        match self {
            Theme::Darkness => ["Shadow Beast", "Void Watcher", "Dark Spirit"],
            Theme::Forest => ["Forest Guardian", "Wild Beast", "Nature Spirit"],
            Theme::Volcano => ["Flame Sentinel", "Magma Elemental", "Fire Drake"],
            Theme::Void => ["Void Entity", "Cosmic Horror", "Reality Tear"],
            Theme::Ice => ["Frost Giant", "Ice Wraith", "Glacier Lord"],
            Theme::Arcane => ["Spellcaster", "Mana Elemental", "Arcane Construct"],
        }
    }

    /// Enemy damage bonus in this environment
    pub fn damage_bonus(&self) -> f64 {
        match self {
            Theme::Darkness => 1.1,
            Theme::Forest => 1.0,
            Theme::Volcano => 1.15,
            Theme::Void => 1.2,
            Theme::Ice => 1.05,
            Theme::Arcane => 1.08,
        }
    }
}
