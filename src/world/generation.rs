//! Floor and room generation
//!
//! Builds the 3-4 room choices offered on each floor and fills every room
//! with its type-specific payload, an optional modifier, an optional event
//! and, where allowed, a mini-boss.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::generate_mini_boss;
use crate::items::{alchemy_potions, armory_equipment, generate_shop_items, generate_treasure};
use crate::progression::{generate_skill_choices, is_boss_floor, library_skills};
use super::{CurrencyReward, FloorChallenge, Room, RoomEvent, RoomId, RoomModifier, RoomPayload, RoomType, Theme};

/// Chance for a room to carry a modifier
pub const MODIFIER_CHANCE: f64 = 0.4;
/// Chance for a room to host an event
pub const EVENT_CHANCE: f64 = 0.3;
/// Redraws allowed before a duplicate room type is accepted
pub const MAX_DEDUP_RETRIES: u32 = 5;

/// Everything about the run that room generation reads
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    pub floor: u32,
    pub difficulty_multiplier: f64,
    pub theme: Theme,
    pub challenge: Option<FloorChallenge>,
    pub unlocked: &'a BTreeSet<RoomType>,
}

/// Hands out room ids unique within one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoomIdCounter(u32);

impl RoomIdCounter {
    pub fn next_id(&mut self) -> RoomId {
        self.0 += 1;
        RoomId(self.0)
    }
}

/// Whether the floor's offer opens with a guaranteed skill room
pub fn offers_skill_room(floor: u32, unlocked: &BTreeSet<RoomType>) -> bool {
    !is_boss_floor(floor) && floor % 3 == 0 && unlocked.contains(&RoomType::Skill)
}

fn pick_weighted(pool: &[RoomType], rng: &mut impl Rng) -> Option<RoomType> {
    pool.choose_weighted(rng, |t| t.weight()).ok().copied()
}

/// Pick the room types for one floor's offer
pub fn pick_room_types(floor: u32, unlocked: &BTreeSet<RoomType>, rng: &mut impl Rng) -> Vec<RoomType> {
    let count = if rng.gen_bool(0.5) { 3 } else { 4 };
    let mut offered = Vec::with_capacity(count);

    if offers_skill_room(floor, unlocked) {
        offered.push(RoomType::Skill);
    }

    let pool: Vec<RoomType> = unlocked.iter().copied().filter(|t| *t != RoomType::Skill).collect();

    while offered.len() < count {
        let Some(mut pick) = pick_weighted(&pool, rng) else {
            break;
        };

        let mut retries = 0;
        while offered.contains(&pick) && retries < MAX_DEDUP_RETRIES {
            let unused: Vec<RoomType> = pool.iter().copied().filter(|t| !offered.contains(t)).collect();
            match pick_weighted(&unused, rng) {
                Some(fresh) => pick = fresh,
                None => break,
            }
            retries += 1;
        }

        offered.push(pick);
    }

    offered
}

/// Generate the full room offer for a floor
pub fn generate_floor_rooms(
    ctx: &GenerationContext,
    ids: &mut RoomIdCounter,
    rng: &mut impl Rng,
) -> Vec<Room> {
    let types = pick_room_types(ctx.floor, ctx.unlocked, rng);
    log::info!("Generating floor {} with rooms {:?}", ctx.floor, types);

    types
        .into_iter()
        .map(|room_type| generate_room(room_type, ctx, ids.next_id(), rng))
        .collect()
}

/// Currency amount scaled by the run difficulty
fn scaled(base: f64, difficulty: f64) -> u64 {
    (base * difficulty).floor() as u64
}

/// Build a single room of the given type
pub fn generate_room(room_type: RoomType, ctx: &GenerationContext, id: RoomId, rng: &mut impl Rng) -> Room {
    let floor = ctx.floor;
    let floor_f = floor as f64;
    let d = ctx.difficulty_multiplier;

    let modifier = rng
        .gen_bool(MODIFIER_CHANCE)
        .then(|| RoomModifier::ALL[rng.gen_range(0..RoomModifier::ALL.len())]);
    let event = rng
        .gen_bool(EVENT_CHANCE)
        .then(|| RoomEvent::ALL[rng.gen_range(0..RoomEvent::ALL.len())]);

    let payload = match room_type {
        RoomType::Skill => RoomPayload::Skill {
            options: generate_skill_choices(floor, d, rng),
        },
        RoomType::Treasure => RoomPayload::Treasure {
            reward: CurrencyReward::a(scaled(10.0 + floor_f * 2.0, d)),
            items: generate_treasure(d, rng),
        },
        RoomType::Healing => RoomPayload::Healing { heal_amount: 30 + floor * 5 },
        RoomType::Rest => RoomPayload::Rest { restore_amount: 20 + floor * 3 },
        RoomType::Trap => RoomPayload::Trap {
            health_loss: (20.0 * d).floor() as u32,
            currency_loss: scaled(5.0, d),
        },
        RoomType::Shop => RoomPayload::Shop { stock: generate_shop_items(floor, rng) },
        RoomType::Library => RoomPayload::Library {
            skills: library_skills(),
            reward: CurrencyReward::a(scaled(5.0 + floor_f, d)),
        },
        RoomType::Armory => RoomPayload::Armory {
            equipment: armory_equipment(d),
            defense: 5 + (floor / 3) as i32,
        },
        RoomType::Alchemy => RoomPayload::Alchemy {
            potions: alchemy_potions(),
            intelligence: 2 + (floor / 4) as i32,
        },
        RoomType::Combat => RoomPayload::Encounter {
            reward: CurrencyReward {
                currency_a: scaled(15.0 + floor_f * 3.0, d),
                currency_b: scaled(rng.gen_range(2..=4) as f64, d),
                currency_c: 0,
            },
        },
        RoomType::Mystery => RoomPayload::Encounter {
            reward: CurrencyReward {
                currency_a: scaled(8.0 + floor_f * 2.0, d),
                currency_b: scaled(rng.gen_range(1..=2) as f64, d),
                currency_c: 0,
            },
        },
        RoomType::Elite => RoomPayload::Encounter {
            reward: CurrencyReward {
                currency_a: scaled(20.0 + floor_f * 4.0, d),
                currency_b: scaled(rng.gen_range(3..=6) as f64, d),
                currency_c: scaled(rng.gen_range(1..=2) as f64, d),
            },
        },
    };

    let mut mini_boss = generate_mini_boss(room_type, floor, d * room_type.mini_boss_difficulty(), rng);
    if let Some(boss) = mini_boss.as_mut() {
        let health = ctx.challenge.map_or(1.0, |c| c.mini_boss_health_multiplier());
        let damage = ctx.challenge.map_or(1.0, |c| c.mini_boss_damage_multiplier())
            * modifier.map_or(1.0, |m| m.enemy_damage_multiplier());
        if health != 1.0 || damage != 1.0 {
            boss.apply_multipliers(health, damage);
        }
    }

    Room {
        id,
        room_type,
        floor,
        theme: ctx.theme,
        modifier,
        event,
        mini_boss,
        payload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn all_types() -> BTreeSet<RoomType> {
        RoomType::ALL.into_iter().collect()
    }

    fn ctx(floor: u32, unlocked: &BTreeSet<RoomType>) -> GenerationContext<'_> {
        GenerationContext {
            floor,
            difficulty_multiplier: 1.0,
            theme: Theme::Forest,
            challenge: None,
            unlocked,
        }
    }

    #[test]
    fn test_room_count_and_unique_types() {
        let unlocked = all_types();
        let mut rng = StdRng::seed_from_u64(12345);
        let mut ids = RoomIdCounter::default();
        for floor in 1..=26 {
            let rooms = generate_floor_rooms(&ctx(floor, &unlocked), &mut ids, &mut rng);
            assert!(rooms.len() == 3 || rooms.len() == 4);
            let types: BTreeSet<_> = rooms.iter().map(|r| r.room_type).collect();
            assert_eq!(types.len(), rooms.len(), "duplicate room type on floor {}", floor);
        }
    }

    #[test]
    fn test_skill_rooms_follow_floor_rules() {
        let unlocked = all_types();
        let mut rng = StdRng::seed_from_u64(9);
        for floor in 1..=26 {
            let types = pick_room_types(floor, &unlocked, &mut rng);
            let has_skill = types.contains(&RoomType::Skill);
            assert_eq!(has_skill, !is_boss_floor(floor) && floor % 3 == 0, "floor {}", floor);
            if has_skill {
                assert_eq!(types[0], RoomType::Skill);
            }
        }
    }

    #[test]
    fn test_duplicates_only_when_pool_exhausted() {
        let unlocked: BTreeSet<RoomType> = [RoomType::Healing, RoomType::Rest].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(4);
        let types = pick_room_types(1, &unlocked, &mut rng);
        assert!(types.len() >= 3);
        assert!(types.contains(&RoomType::Healing));
        assert!(types.contains(&RoomType::Rest));
        assert!(types.iter().all(|t| unlocked.contains(t)));
    }

    #[test]
    fn test_same_seed_same_floor() {
        let unlocked = all_types();
        let a = generate_floor_rooms(&ctx(7, &unlocked), &mut RoomIdCounter::default(), &mut StdRng::seed_from_u64(77));
        let b = generate_floor_rooms(&ctx(7, &unlocked), &mut RoomIdCounter::default(), &mut StdRng::seed_from_u64(77));
        assert_eq!(a, b);
    }

    #[test]
    fn test_mini_boss_placement() {
        let unlocked = all_types();
        let mut rng = StdRng::seed_from_u64(31);
        let context = ctx(4, &unlocked);
        for (i, room_type) in RoomType::ALL.into_iter().enumerate() {
            let room = generate_room(room_type, &context, RoomId(i as u32), &mut rng);
            assert_eq!(room.mini_boss.is_some(), room_type.allows_mini_boss(), "{:?}", room_type);
        }
    }

    #[test]
    fn test_payload_formulas() {
        let unlocked = all_types();
        let mut rng = StdRng::seed_from_u64(5);
        let context = GenerationContext { difficulty_multiplier: 1.5, ..ctx(6, &unlocked) };

        let healing = generate_room(RoomType::Healing, &context, RoomId(1), &mut rng);
        assert_eq!(healing.payload, RoomPayload::Healing { heal_amount: 60 });

        let trap = generate_room(RoomType::Trap, &context, RoomId(2), &mut rng);
        assert_eq!(trap.payload, RoomPayload::Trap { health_loss: 30, currency_loss: 7 });

        let treasure = generate_room(RoomType::Treasure, &context, RoomId(3), &mut rng);
        assert_eq!(treasure.payload.base_reward().currency_a, 33);
    }

    #[test]
    fn test_reinforced_challenge_boosts_mini_boss() {
        let unlocked = all_types();
        let plain = generate_room(RoomType::Mystery, &ctx(3, &unlocked), RoomId(1), &mut StdRng::seed_from_u64(6));
        let reinforced_ctx = GenerationContext { challenge: Some(FloorChallenge::Reinforced), ..ctx(3, &unlocked) };
        let reinforced = generate_room(RoomType::Mystery, &reinforced_ctx, RoomId(1), &mut StdRng::seed_from_u64(6));

        let (a, b) = (plain.mini_boss.unwrap(), reinforced.mini_boss.unwrap());
        assert_eq!(b.max_health, (a.max_health as f64 * 1.5).floor() as u32);
    }
}
