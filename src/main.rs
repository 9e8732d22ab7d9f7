//! Gauntlet - Entry Point
//!
//! Plays one run on autopilot and prints the summary as JSON.
//!
//! Usage: gauntlet [seed] [profile.ron]
//!
//! When a profile path is given, the profile is loaded from it and written
//! back with the run's rewards banked.

use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use gauntlet::entities::{MiniBoss, Stat};
use gauntlet::items::Consumable;
use gauntlet::world::RoomPayload;
use gauntlet::{PlayerProfile, Room, RoomOutcome, RoomType, RunPhase, RunState};

/// Leave the run when HP drops below this fraction
const RETREAT_HP_FRACTION: f64 = 0.2;
/// Prefer healing below this fraction
const HEAL_HP_FRACTION: f64 = 0.5;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Gauntlet v{}", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(raw) => raw.parse::<u64>().with_context(|| format!("invalid seed: {raw}"))?,
        None => rand::thread_rng().gen(),
    };
    let profile_path = args.next();

    let mut profile = match &profile_path {
        Some(path) => {
            let content = fs::read_to_string(path).with_context(|| format!("failed to read profile {path}"))?;
            PlayerProfile::from_ron(&content).with_context(|| format!("failed to load profile {path}"))?
        }
        None => PlayerProfile::new(),
    };

    log::info!("Seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut clock = unix_now();
    let mut run = RunState::start(&profile, clock, &mut rng)?;

    while !run.is_finalized() {
        if run.phase == RunPhase::RoomResolved {
            if (run.hp as f64) < run.max_hp as f64 * RETREAT_HP_FRACTION {
                run.voluntary_exit(clock)?;
                break;
            }
            run.advance_floor(clock, &mut rng)?;
            continue;
        }

        if (run.hp as f64) < run.max_hp as f64 * HEAL_HP_FRACTION {
            drink_potion(&mut run);
        }

        let room = choose_room(&mut run, &mut rng)?;
        let outcome = play_room(&run, &room, &mut rng);
        clock += 30;
        let report = run.resolve_room(room.id, &outcome, clock, &mut rng)?;
        log::info!(
            "Floor {}: {} room, -{} HP, +{} HP, reward {:?}",
            room.floor,
            room.room_type.name(),
            report.damage_taken,
            report.healed,
            report.reward
        );
    }

    let summary = run.summary.clone().context("run ended without a summary")?;
    profile.record_run(&summary);
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if let Some(path) = profile_path {
        let content = profile.to_ron()?;
        fs::write(&path, content).with_context(|| format!("failed to write profile {path}"))?;
        log::info!("Profile saved to {}", path);
    }

    Ok(())
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn drink_potion(run: &mut RunState) {
    for potion in [Consumable::MajorHealthPotion, Consumable::HealthPotion, Consumable::Rejuvenation] {
        if run.use_consumable(potion).is_ok() {
            return;
        }
    }
}

/// Heal when hurt, otherwise chase the biggest payout
fn choose_room(run: &mut RunState, rng: &mut StdRng) -> Result<Room> {
    let hurt = (run.hp as f64) < run.max_hp as f64 * HEAL_HP_FRACTION;
    let rooms = run.offer_rooms(rng)?;
    let best = rooms
        .iter()
        .max_by_key(|room| {
            let healing = matches!(room.room_type, RoomType::Healing | RoomType::Rest);
            let reward = room.payload.base_reward().currency_a;
            if hurt && healing {
                u64::MAX
            } else if room.mini_boss.is_some() && hurt {
                0
            } else {
                reward + 1
            }
        })
        .cloned();
    best.context("empty room offer")
}

/// Resolve a room the way a cautious player would
fn play_room(run: &RunState, room: &Room, rng: &mut StdRng) -> RoomOutcome {
    let mut outcome = RoomOutcome::default();

    if let Some(boss) = &room.mini_boss {
        let (taken, dealt) = fight(run, boss);
        outcome.damage_taken = taken;
        outcome.damage_dealt = dealt;
        outcome.mini_boss_defeated = taken < run.hp || run.revive_armed;
        outcome.critical_hits = run.guaranteed_crits;
    }
    if room.event.is_some() {
        outcome.event_success = Some(rng.gen_bool(0.5));
    }
    if room.room_type == RoomType::Trap {
        let agility = run.effective_stat(Stat::Agility).max(0) as f64;
        outcome.trap_avoided = rng.gen_bool((agility / 100.0).min(0.5));
    }
    match &room.payload {
        RoomPayload::Skill { options } if !options.is_empty() => {
            outcome.selected_skill = Some(rng.gen_range(0..options.len()));
        }
        RoomPayload::Shop { stock } => {
            let mut budget = run.currency.currency_a;
            for item in stock {
                if item.cost <= budget {
                    budget -= item.cost;
                    outcome.purchases.push(item.id.clone());
                }
            }
        }
        _ => {}
    }
    outcome
}

/// Trade blows until the boss falls. Returns (damage taken, damage dealt).
fn fight(run: &RunState, boss: &MiniBoss) -> (u32, u32) {
    let strength = run.effective_stat(Stat::Strength).max(0) as f64;
    let hit = ((strength + 8.0) * run.combat_damage_multiplier()).floor() as u32;
    let hit = hit.saturating_sub(boss.defense).max(1);
    let defense = run.effective_stat(Stat::Defense).max(0) as u32;
    let taken_per_round = boss.damage.saturating_sub(defense / 2).max(1);

    let rounds = boss.health.div_ceil(hit);
    let taken = taken_per_round * rounds.saturating_sub(1);
    (taken, boss.health)
}
