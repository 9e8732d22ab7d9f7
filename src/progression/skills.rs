//! Skill system
//!
//! Skills offered by skill rooms and libraries. Power scales with the floor
//! they were found on and the run's difficulty.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A learned or offered skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    /// 0 for utility skills
    pub damage: u32,
    pub mana: u32,
    pub description: String,
    pub tier: u8,
}

struct SkillTemplate {
    id: &'static str,
    name: &'static str,
    damage: u32,
    mana: u32,
    description: &'static str,
    tier: u8,
}

const fn template(
    id: &'static str,
    name: &'static str,
    damage: u32,
    mana: u32,
    description: &'static str,
    tier: u8,
) -> SkillTemplate {
    SkillTemplate { id, name, damage, mana, description, tier }
}

const SKILL_POOL: &[SkillTemplate] = &[
    // Tier 1: early floors
    template("slash", "Slash", 20, 5, "Quick melee attack", 1),
    template("magicMissile", "Magic Missile", 18, 10, "Precise arcane attack", 1),
    template("defend", "Defend", 0, 8, "Reduce next damage 30%", 1),
    // Tier 2
    template("powerStrike", "Power Strike", 50, 20, "Heavy melee attack", 2),
    template("frostbolt", "Frostbolt", 40, 25, "Freezing attack", 2),
    template("shadowStep", "Shadow Step", 35, 15, "Evade and counter", 2),
    template("heal", "Heal", 0, 18, "Restore 35 HP", 2),
    template("arrowStorm", "Arrow Storm", 38, 22, "Multi-shot attack", 2),
    // Tier 3: late floors
    template("fireball", "Fireball", 60, 35, "Explosive magic", 3),
    template("chainLightning", "Chain Lightning", 65, 40, "Arc between foes", 3),
    template("divineShield", "Divine Shield", 0, 38, "Protect + heal", 3),
    template("vampiricStrike", "Vampiric Strike", 45, 25, "Lifesteal attack", 3),
    template("thunderClap", "Thunder Clap", 50, 30, "Stun blast", 3),
];

/// Attempts before a skill room settles for fewer choices
const MAX_CHOICE_ATTEMPTS: u32 = 20;

fn scaled(template: &SkillTemplate, floor: u32, difficulty_multiplier: f64) -> Skill {
    let floor_f = floor as f64;
    Skill {
        id: template.id.to_string(),
        name: template.name.to_string(),
        damage: (template.damage as f64 * (1.0 + floor_f * 0.08) * difficulty_multiplier).floor() as u32,
        mana: (template.mana as f64 * (1.0 + floor_f * 0.02)).floor() as u32,
        description: template.description.to_string(),
        tier: template.tier,
    }
}

/// Roll one skill, weighted toward tiers appropriate for the floor
pub fn generate_skill(floor: u32, difficulty_multiplier: f64, rng: &mut impl Rng) -> Skill {
    let mut available: Vec<&SkillTemplate> = SKILL_POOL
        .iter()
        .filter(|s| match floor {
            0..=9 => s.tier <= 1 || rng.gen_bool(0.3),
            10..=19 => s.tier <= 2 || rng.gen_bool(0.2),
            _ => true,
        })
        .collect();
    if available.is_empty() {
        available = SKILL_POOL.iter().collect();
    }

    let picked = available[rng.gen_range(0..available.len())];
    scaled(picked, floor, difficulty_multiplier)
}

/// Roll 3-4 distinct skills for a skill room
pub fn generate_skill_choices(floor: u32, difficulty_multiplier: f64, rng: &mut impl Rng) -> Vec<Skill> {
    let target = if rng.gen_bool(0.5) { 3 } else { 4 };
    let mut choices: Vec<Skill> = Vec::with_capacity(target);
    let mut attempts = 0;

    while choices.len() < target && attempts < MAX_CHOICE_ATTEMPTS {
        let skill = generate_skill(floor, difficulty_multiplier, rng);
        if !choices.iter().any(|c| c.id == skill.id) {
            choices.push(skill);
        }
        attempts += 1;
    }

    choices
}

/// The fixed tomes a library holds
pub fn library_skills() -> Vec<Skill> {
    vec![
        Skill {
            id: "arcaneBlast".to_string(),
            name: "Arcane Blast".to_string(),
            damage: 50,
            mana: 45,
            description: "Concentrated arcane energy".to_string(),
            tier: 3,
        },
        Skill {
            id: "spellshield".to_string(),
            name: "Spell Shield".to_string(),
            damage: 0,
            mana: 35,
            description: "+20 defense against spells".to_string(),
            tier: 3,
        },
    ]
}
