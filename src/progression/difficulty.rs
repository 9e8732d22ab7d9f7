//! Floor-based difficulty scaling
//!
//! Enemy stat multipliers for regular and boss floors, plus the floor boss
//! stat blocks derived from them.

use serde::{Deserialize, Serialize};

/// Total number of floors in a run
pub const TOTAL_FLOORS: u32 = 26;

/// Floors per boss section
pub const FLOORS_PER_BOSS: u32 = 5;

/// Number of boss sections (the final floor reuses the last one)
pub const BOSS_SECTIONS: u32 = 5;

/// Difficulty compounding applied each time a boss floor is cleared
pub const BOSS_CLEAR_DIFFICULTY_STEP: f64 = 1.2;

/// Check if a floor is a boss floor
pub fn is_boss_floor(floor: u32) -> bool {
    floor % FLOORS_PER_BOSS == 0 || floor == TOTAL_FLOORS
}

/// Boss section for a floor, capped at the last section
pub fn boss_section(floor: u32) -> u32 {
    floor.div_ceil(FLOORS_PER_BOSS).clamp(1, BOSS_SECTIONS)
}

/// Health / damage / defense multipliers for one floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalingMultipliers {
    pub health: f64,
    pub damage: f64,
    pub defense: f64,
}

impl ScalingMultipliers {
    /// No scaling
    pub const IDENTITY: Self = Self { health: 1.0, damage: 1.0, defense: 1.0 };
}

/// Base stats for an enemy before floor scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub health: u32,
    pub damage: u32,
    pub defense: u32,
}

// =============================================================================
// Progression Scaling
// =============================================================================

/// Pure scaling formulas keyed by floor number
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressionScaler;

impl ProgressionScaler {
    /// Regular enemy multipliers: 1.08 / 1.06 / 1.05 per floor past the first
    pub fn regular(floor: u32) -> ScalingMultipliers {
        let steps = floor.saturating_sub(1) as i32;
        ScalingMultipliers {
            health: 1.08f64.powi(steps),
            damage: 1.06f64.powi(steps),
            defense: 1.05f64.powi(steps),
        }
    }

    /// Boss multipliers, only defined on boss floors
    pub fn boss(floor: u32) -> Option<ScalingMultipliers> {
        if !is_boss_floor(floor) {
            return None;
        }
        let steps = boss_section(floor) as i32 - 1;
        Some(ScalingMultipliers {
            health: 1.12f64.powi(steps),
            damage: 1.10f64.powi(steps),
            defense: 1.08f64.powi(steps),
        })
    }

    /// Scale a regular enemy for a floor and the run's accumulated difficulty
    pub fn scale_enemy(base: EnemyStats, floor: u32, difficulty_multiplier: f64) -> EnemyStats {
        apply(base, Self::regular(floor), difficulty_multiplier)
    }

    /// Scale a boss for a floor; falls back to regular scaling off boss floors
    pub fn scale_boss(base: EnemyStats, floor: u32, difficulty_multiplier: f64) -> EnemyStats {
        let mults = Self::boss(floor).unwrap_or_else(|| Self::regular(floor));
        apply(base, mults, difficulty_multiplier)
    }

    /// Difficulty after clearing a boss floor
    pub fn after_boss_clear(difficulty_multiplier: f64) -> f64 {
        difficulty_multiplier * BOSS_CLEAR_DIFFICULTY_STEP
    }
}

fn apply(base: EnemyStats, mults: ScalingMultipliers, difficulty: f64) -> EnemyStats {
    EnemyStats {
        health: (base.health as f64 * mults.health * difficulty).floor() as u32,
        damage: (base.damage as f64 * mults.damage * difficulty).floor() as u32,
        defense: (base.defense as f64 * mults.defense).floor() as u32,
    }
}

// =============================================================================
// Floor Bosses
// =============================================================================

/// Base stats shared by every floor boss before section scaling
const FLOOR_BOSS_BASE: EnemyStats = EnemyStats { health: 150, damage: 20, defense: 7 };

/// The boss guarding a boss floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorBoss {
    pub name: String,
    pub description: String,
    pub stats: EnemyStats,
}

/// Get the floor boss for a floor (only boss floors)
pub fn floor_boss(floor: u32, difficulty_multiplier: f64) -> Option<FloorBoss> {
    if !is_boss_floor(floor) {
        return None;
    }
    // Floor 26 is the sixth boss but uses section 5 scaling
    let boss_number = if floor == TOTAL_FLOORS { 6 } else { floor / FLOORS_PER_BOSS };
    let (name, description) = match boss_number {
        1 => ("Shadow Wraith", "A shadowy figure emerges from the darkness..."),
        2 => ("Infernal Drake", "Flames engulf as a dragon descends..."),
        3 => ("Void Entity", "Reality warps around an otherworldly being..."),
        4 => ("Dark Sorcerer", "Dark magic crackles as a sorcerer appears..."),
        5 => ("Abyssal Titan", "The earth trembles at the arrival of a titan..."),
        _ => ("The Eternal One", "Time itself seems to stop as an ancient power awakens..."),
    };
    Some(FloorBoss {
        name: name.to_string(),
        description: description.to_string(),
        stats: ProgressionScaler::scale_boss(FLOOR_BOSS_BASE, floor, difficulty_multiplier),
    })
}
