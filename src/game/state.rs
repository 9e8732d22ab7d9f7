//! Run state machine
//!
//! A run is a plain value owned by the caller. Rooms are offered per floor,
//! the caller resolves one, then either advances or leaves. Every run ends in
//! exactly one finalization, which validates achievements and pays out.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::{EffectTracker, EffectType};
use crate::entities::{add_stat, Stat, StatMap};
use crate::items::{Artifact, BossDrop, Consumable, ConsumableEffect, Item, ItemKind, ShopEffect, ShopItem, Utility};
use crate::progression::{
    floor_boss, is_boss_floor, unlock_room_type, ExitReason, FloorBoss, ProgressionScaler, RewardCalculator,
    Skill, UpgradeId, TOTAL_FLOORS,
};
use crate::save::{validate_achievements, AchievementId, PlayerProfile};
use crate::world::{
    generate_floor_rooms, CurrencyReward, FloorChallenge, GenerationContext, Room, RoomEvent, RoomId,
    RoomIdCounter, RoomPayload, RoomType, Theme,
};

use super::{RoomOutcome, RoomReport, RunError, RunStatistics, RunSummary};

/// Chance that a defeated mini-boss leaves a buff behind
pub const MINI_BOSS_BUFF_CHANCE: f64 = 0.4;

/// Amplification a Soul Gem applies to active buffs
const SOUL_GEM_FACTOR: f64 = 1.5;

/// Trap effects a Voidwalker absorbs
const VOIDWALKER_CHARGES: u32 = 2;

/// Shop id of the Merchant Ring, which raises room currency while held
const MERCHANT_RING: &str = "goldMultiplier";
const MERCHANT_RING_BONUS: f64 = 1.25;

/// Where a run is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Choosing a room on the current floor
    Active,
    /// The floor's room is done; advance or exit
    RoomResolved,
    /// Terminal
    Finalized(ExitReason),
}

/// Ephemeral state of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub phase: RunPhase,
    pub current_floor: u32,
    pub floors_cleared: u32,
    pub bosses_defeated: u32,
    pub mini_bosses_defeated: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub stats: StatMap,
    pub skills: Vec<Skill>,
    pub items: Vec<Item>,
    pub artifacts: Vec<Artifact>,
    /// Currency earned this run, net of spending and losses
    pub currency: CurrencyReward,
    pub unlocked_room_types: BTreeSet<RoomType>,
    pub effects: EffectTracker,
    pub visited_room_types: BTreeSet<RoomType>,
    pub achievements_earned: Vec<AchievementId>,
    /// Boss floors whose milestone bonus has been paid
    pub milestones_reached: Vec<u32>,
    pub theme: Theme,
    pub difficulty_multiplier: f64,
    /// Unix seconds, caller supplied
    pub started_at: u64,
    pub ended_at: Option<u64>,
    /// Challenge active on the current floor
    pub challenge: Option<FloorChallenge>,
    /// Rooms offered on the current floor
    pub offer: Vec<Room>,
    pub room_ids: RoomIdCounter,
    pub statistics: RunStatistics,
    /// Permanent upgrade bonuses the caller's combat resolver may use
    pub upgrade_bonuses: BTreeMap<UpgradeId, u32>,
    pub revive_armed: bool,
    pub trap_immunity: u32,
    /// Guaranteed critical hits waiting for the next fight
    pub guaranteed_crits: u32,
    /// Set when a floor boss fell and no room has been entered since
    pub just_killed_boss: bool,
    pub summary: Option<RunSummary>,
}

impl RunState {
    /// Start a run from a validated profile
    pub fn start(profile: &PlayerProfile, started_at: u64, rng: &mut impl Rng) -> Result<Self, RunError> {
        profile.validate()?;

        let mut stats = profile.baseline_stats.clone();
        let bonus = |id: UpgradeId| profile.upgrade_bonus(id) as i32;
        add_stat(&mut stats, Stat::MaxHp, bonus(UpgradeId::MaxHealthBonus));
        add_stat(&mut stats, Stat::MaxMana, bonus(UpgradeId::MaxManaBonus));
        add_stat(&mut stats, Stat::Agility, bonus(UpgradeId::AgilityBonus));
        add_stat(&mut stats, Stat::Intelligence, bonus(UpgradeId::IntelligenceBonus));

        let max_hp = stats.get(&Stat::MaxHp).copied().unwrap_or(1).max(1) as u32;
        let max_mana = stats.get(&Stat::MaxMana).copied().unwrap_or(1).max(1) as u32;

        let upgrade_bonuses = UpgradeId::ALL
            .into_iter()
            .map(|id| (id, profile.upgrade_bonus(id)))
            .filter(|(_, b)| *b > 0)
            .collect();

        let theme = Theme::roll(rng);
        let challenge = FloorChallenge::roll(rng);
        log::info!("Starting run in {} with {} HP, {} mana", theme.name(), max_hp, max_mana);

        Ok(Self {
            phase: RunPhase::Active,
            current_floor: 1,
            floors_cleared: 0,
            bosses_defeated: 0,
            mini_bosses_defeated: 0,
            hp: max_hp,
            max_hp,
            mana: max_mana,
            max_mana,
            stats,
            skills: Vec::new(),
            items: Vec::new(),
            artifacts: Vec::new(),
            currency: CurrencyReward {
                currency_b: profile.upgrade_bonus(UpgradeId::StartingCurrencyB) as u64,
                ..CurrencyReward::default()
            },
            unlocked_room_types: profile.unlocked_room_types.clone(),
            effects: EffectTracker::new(),
            visited_room_types: BTreeSet::new(),
            achievements_earned: Vec::new(),
            milestones_reached: Vec::new(),
            theme,
            difficulty_multiplier: 1.0,
            started_at,
            ended_at: None,
            challenge,
            offer: Vec::new(),
            room_ids: RoomIdCounter::default(),
            statistics: RunStatistics::default(),
            upgrade_bonuses,
            revive_armed: false,
            trap_immunity: 0,
            guaranteed_crits: 0,
            just_killed_boss: false,
            summary: None,
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn is_finalized(&self) -> bool {
        matches!(self.phase, RunPhase::Finalized(_))
    }

    /// Seconds from start to finalization, once finalized
    pub fn duration_seconds(&self) -> Option<u64> {
        self.ended_at.map(|end| end.saturating_sub(self.started_at))
    }

    /// A stat after active effect multipliers
    pub fn effective_stat(&self, stat: Stat) -> i32 {
        let base = self.stats.get(&stat).copied().unwrap_or(0);
        let mult = self.effects.active_effects().stat_multiplier(stat);
        (base as f64 * mult).floor() as i32
    }

    /// Damage scaling for the caller's combat: active effects and floor challenge
    pub fn combat_damage_multiplier(&self) -> f64 {
        self.effects.active_effects().damage_multiplier
            * self.challenge.map_or(1.0, |c| c.player_damage_multiplier())
    }

    /// The boss guarding the current floor, if any
    pub fn floor_boss(&self) -> Option<FloorBoss> {
        floor_boss(self.current_floor, self.difficulty_multiplier)
    }

    /// Inputs for generating rooms on the current floor
    pub fn generation_context(&self) -> GenerationContext<'_> {
        GenerationContext {
            floor: self.current_floor,
            difficulty_multiplier: self.difficulty_multiplier,
            theme: self.theme,
            challenge: self.challenge,
            unlocked: &self.unlocked_room_types,
        }
    }

    fn require_between_rooms(&self) -> Result<(), RunError> {
        match self.phase {
            RunPhase::Finalized(_) => Err(RunError::AlreadyFinalized),
            _ => Ok(()),
        }
    }

    fn require_choosing(&self) -> Result<(), RunError> {
        match self.phase {
            RunPhase::Active => Ok(()),
            RunPhase::Finalized(_) => Err(RunError::AlreadyFinalized),
            phase => Err(RunError::WrongPhase(phase)),
        }
    }

    fn regenerate_offer(&mut self, rng: &mut impl Rng) {
        let mut ids = self.room_ids;
        let offer = generate_floor_rooms(&self.generation_context(), &mut ids, rng);
        self.room_ids = ids;
        self.offer = offer;
    }

    fn set_phase(&mut self, phase: RunPhase) {
        log::debug!("State transition: {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    // =========================================================================
    // Room offers
    // =========================================================================

    /// Room choices for the current floor, generated on first request
    pub fn offer_rooms(&mut self, rng: &mut impl Rng) -> Result<&[Room], RunError> {
        self.require_choosing()?;
        if self.offer.is_empty() {
            self.regenerate_offer(rng);
        }
        Ok(&self.offer)
    }

    /// Spend a Reroll Token to replace the current offer
    pub fn reroll_rooms(&mut self, rng: &mut impl Rng) -> Result<&[Room], RunError> {
        self.require_choosing()?;
        if self.offer.is_empty() {
            return Err(RunError::NoOffer);
        }
        let token = self.find_utility(Utility::RerollToken).ok_or(RunError::NoRerollToken)?;

        self.items.remove(token);
        self.statistics.rerolls_used += 1;
        self.regenerate_offer(rng);
        log::info!("Rerolled floor {} offer", self.current_floor);
        Ok(&self.offer)
    }

    // =========================================================================
    // Room resolution
    // =========================================================================

    /// Apply the caller-resolved outcome of one offered room.
    ///
    /// Validation happens up front; on `Err` the run is unchanged.
    pub fn resolve_room(
        &mut self,
        room_id: RoomId,
        outcome: &RoomOutcome,
        now: u64,
        rng: &mut impl Rng,
    ) -> Result<RoomReport, RunError> {
        self.require_choosing()?;
        if self.offer.is_empty() {
            return Err(RunError::NoOffer);
        }
        let room = self
            .offer
            .iter()
            .find(|r| r.id == room_id)
            .cloned()
            .ok_or(RunError::RoomNotOffered(room_id))?;
        self.validate_purchases(&room, &outcome.purchases)?;
        Self::validate_choices(&room, outcome)?;

        let mut report = RoomReport::new(room_id);
        let mut effects = self.effects.active_effects();
        if self.holds_item(MERCHANT_RING) {
            effects.reward_multiplier *= MERCHANT_RING_BONUS;
        }
        let rewards_unlocked = room.mini_boss.is_none() || outcome.mini_boss_defeated;

        self.just_killed_boss = false;
        self.visited_room_types.insert(room.room_type);

        // Combat
        self.take_damage(outcome.damage_taken, &mut report);
        self.statistics.damage_dealt += outcome.damage_dealt as u64;
        self.statistics.critical_hits += outcome.critical_hits;
        if room.mini_boss.is_some() {
            self.guaranteed_crits = self.guaranteed_crits.saturating_sub(outcome.critical_hits);
        }
        if let Some(boss) = room.mini_boss.as_ref().filter(|_| outcome.mini_boss_defeated) {
            self.mini_bosses_defeated += 1;
            log::info!("Mini-boss {} defeated on floor {}", boss.name, self.current_floor);
            for drop in &boss.loot {
                match drop {
                    BossDrop::Item(item) => {
                        self.currency.currency_a += item.value as u64;
                        report.reward.currency_a += item.value as u64;
                        report.items_gained.push(item.clone());
                        self.items.push(item.clone());
                    }
                    BossDrop::Artifact(artifact) => {
                        report.artifacts_gained.push(*artifact);
                        self.artifacts.push(*artifact);
                    }
                }
            }
            if rng.gen_bool(MINI_BOSS_BUFF_CHANCE) {
                self.effects.apply(EffectType::roll_reward_buff(rng));
            }
        }

        if rewards_unlocked {
            let reward = RewardCalculator::room_reward(&room, &effects);
            self.add_currency(reward, &mut report);
            self.apply_payload(&room, outcome, &mut report);
        } else {
            log::debug!("Rewards withheld: {:?} still guards room {:?}", room.mini_boss.as_ref().map(|b| &b.name), room_id);
        }

        // Traps spring whether or not the room was otherwise cleared
        if let RoomPayload::Trap { health_loss, currency_loss } = room.payload {
            if outcome.trap_avoided {
                log::debug!("Trap avoided");
            } else if self.trap_immunity > 0 {
                self.trap_immunity -= 1;
                log::debug!("Trap absorbed, {} charges left", self.trap_immunity);
            } else if let Some(key) = self.find_utility(Utility::SkeletonKey) {
                self.items.remove(key);
                log::debug!("Skeleton Key spent to bypass the trap");
            } else {
                self.statistics.traps_triggered += 1;
                self.take_damage(health_loss, &mut report);
                self.currency.currency_a = self.currency.currency_a.saturating_sub(currency_loss);
            }
        }

        if let Some(event) = room.event {
            match outcome.event_success {
                Some(true) => {
                    self.statistics.events_succeeded += 1;
                    self.add_currency(CurrencyReward::a(RoomEvent::success_reward(self.current_floor)), &mut report);
                    log::debug!("{} passed", event.name());
                }
                Some(false) => {
                    self.statistics.events_failed += 1;
                    self.take_damage(RoomEvent::failure_damage(self.current_floor), &mut report);
                    log::debug!("{} failed", event.name());
                }
                None => {}
            }
        }

        // Once-per-room effect ticks, then durations
        let regen = (self.max_hp as f64 * effects.regen_per_room).floor() as u32;
        let dot = (self.max_hp as f64 * effects.damage_per_room).floor() as u32;
        report.healed += self.heal(regen);
        self.take_damage(dot, &mut report);
        self.effects.advance_durations();

        self.floors_cleared += 1;
        self.statistics.rooms_completed += 1;
        self.offer.clear();

        if self.hp == 0 {
            log::info!("Player died on floor {}", self.current_floor);
            self.finalize(ExitReason::Death, now);
        } else {
            self.set_phase(RunPhase::RoomResolved);
        }
        report.phase = self.phase;
        Ok(report)
    }

    /// Skill picks and event results must match what the room offers
    fn validate_choices(room: &Room, outcome: &RoomOutcome) -> Result<(), RunError> {
        if let Some(index) = outcome.selected_skill {
            let valid = matches!(&room.payload, RoomPayload::Skill { options } if index < options.len());
            if !valid {
                log::warn!("Rejected skill choice {} for room {:?}", index, room.id);
                return Err(RunError::InvalidSkillChoice(index));
            }
        }
        if outcome.event_success.is_some() && room.event.is_none() {
            return Err(RunError::NoEventInRoom(room.id));
        }
        Ok(())
    }

    fn validate_purchases(&self, room: &Room, purchases: &[String]) -> Result<(), RunError> {
        if purchases.is_empty() {
            return Ok(());
        }
        let RoomPayload::Shop { stock } = &room.payload else {
            return Err(RunError::ShopItemNotOffered(purchases[0].clone()));
        };

        let mut remaining: Vec<&ShopItem> = stock.iter().collect();
        let mut total = 0u64;
        for id in purchases {
            let index = remaining
                .iter()
                .position(|s| &s.id == id)
                .ok_or_else(|| RunError::ShopItemNotOffered(id.clone()))?;
            total += remaining.remove(index).cost;
        }

        if total > self.currency.currency_a {
            log::warn!("Shop purchase declined: need {}, have {}", total, self.currency.currency_a);
            return Err(RunError::InsufficientCurrency { needed: total, available: self.currency.currency_a });
        }
        Ok(())
    }

    fn apply_payload(&mut self, room: &Room, outcome: &RoomOutcome, report: &mut RoomReport) {
        match &room.payload {
            RoomPayload::Skill { options } => {
                if let Some(skill) = outcome.selected_skill.and_then(|i| options.get(i)) {
                    self.skills.push(skill.clone());
                    report.skill_learned = Some(skill.clone());
                }
            }
            RoomPayload::Treasure { items, .. } => self.gain_items(items, report),
            RoomPayload::Healing { heal_amount } => {
                let mult = room.healing_multiplier() * self.challenge.map_or(1.0, |c| c.healing_multiplier());
                report.healed += self.heal((*heal_amount as f64 * mult).floor() as u32);
            }
            RoomPayload::Rest { restore_amount } => {
                let amount = (*restore_amount as f64 * room.healing_multiplier()).floor() as u32;
                let restored = amount.min(self.max_mana - self.mana);
                self.mana += restored;
                report.mana_restored += restored;
            }
            RoomPayload::Trap { .. } | RoomPayload::Encounter { .. } => {}
            RoomPayload::Shop { stock } => {
                for id in &outcome.purchases {
                    let Some(item) = stock.iter().find(|s| &s.id == id) else {
                        continue;
                    };
                    self.currency.currency_a -= item.cost;
                    self.statistics.currency_spent += item.cost;
                    self.statistics.shop_purchases += 1;
                    match item.effect {
                        ShopEffect::StatBoost(stat, amount) | ShopEffect::Equipment(Some((stat, amount))) => {
                            self.raise_stat(stat, amount);
                        }
                        _ => {}
                    }
                    if let Some(bought) = item.to_item() {
                        self.items.push(bought.clone());
                        report.items_gained.push(bought);
                    }
                    report.purchased.push(id.clone());
                }
            }
            RoomPayload::Library { skills, .. } => {
                self.skills.extend(skills.iter().cloned());
            }
            RoomPayload::Armory { equipment, defense } => {
                self.gain_items(equipment, report);
                self.raise_stat(Stat::Defense, *defense);
            }
            RoomPayload::Alchemy { potions, intelligence } => {
                self.gain_items(potions, report);
                self.raise_stat(Stat::Intelligence, *intelligence);
            }
        }
    }

    fn holds_item(&self, id: &str) -> bool {
        self.items.iter().any(|i| i.id == id)
    }

    fn find_utility(&self, utility: Utility) -> Option<usize> {
        self.items.iter().position(|i| i.kind == ItemKind::Utility(utility))
    }

    fn gain_items(&mut self, items: &[Item], report: &mut RoomReport) {
        self.items.extend(items.iter().cloned());
        report.items_gained.extend(items.iter().cloned());
    }

    fn add_currency(&mut self, reward: CurrencyReward, report: &mut RoomReport) {
        self.currency.currency_a += reward.currency_a;
        self.currency.currency_b += reward.currency_b;
        self.currency.currency_c += reward.currency_c;
        report.reward.currency_a += reward.currency_a;
        report.reward.currency_b += reward.currency_b;
        report.reward.currency_c += reward.currency_c;
    }

    /// Raise a stat, keeping max HP and mana in step
    fn raise_stat(&mut self, stat: Stat, amount: i32) {
        add_stat(&mut self.stats, stat, amount);
        let grow = amount.max(0) as u32;
        match stat {
            Stat::MaxHp => {
                self.max_hp += grow;
                self.hp += grow;
            }
            Stat::MaxMana => {
                self.max_mana += grow;
                self.mana += grow;
            }
            _ => {}
        }
    }

    /// Lose HP; an armed revive turns a lethal hit into 1 HP
    fn take_damage(&mut self, amount: u32, report: &mut RoomReport) {
        if amount == 0 || self.hp == 0 {
            return;
        }
        self.statistics.damage_taken += amount as u64;
        report.damage_taken += amount;

        if amount >= self.hp && self.revive_armed {
            self.revive_armed = false;
            self.hp = 1;
            report.revived = true;
            log::info!("Revived from a fatal blow on floor {}", self.current_floor);
        } else {
            self.hp = self.hp.saturating_sub(amount);
        }
    }

    /// Heal up to max HP; the dead stay dead. Returns HP restored.
    fn heal(&mut self, amount: u32) -> u32 {
        if self.hp == 0 {
            return 0;
        }
        let healed = amount.min(self.max_hp - self.hp);
        self.hp += healed;
        healed
    }

    // =========================================================================
    // Floors and finalization
    // =========================================================================

    /// Leave the resolved floor. Clearing the last floor completes the run.
    pub fn advance_floor(&mut self, now: u64, rng: &mut impl Rng) -> Result<RunPhase, RunError> {
        match self.phase {
            RunPhase::RoomResolved => {}
            RunPhase::Finalized(_) => return Err(RunError::AlreadyFinalized),
            phase => return Err(RunError::WrongPhase(phase)),
        }

        let leaving = self.current_floor;
        if is_boss_floor(leaving) {
            self.bosses_defeated += 1;
            self.difficulty_multiplier = ProgressionScaler::after_boss_clear(self.difficulty_multiplier);
            self.just_killed_boss = true;
            if let Some(boss) = floor_boss(leaving, 1.0) {
                log::info!("{} defeated, difficulty now {:.2}", boss.name, self.difficulty_multiplier);
            }
        }
        if leaving % 5 == 0 && leaving < TOTAL_FLOORS {
            let bonus = 100 * (leaving / 5) as u64;
            self.milestones_reached.push(leaving);
            self.currency.currency_a += bonus;
            log::info!("Milestone floor {} reached: +{} Currency A", leaving, bonus);
        }

        if leaving >= TOTAL_FLOORS {
            self.finalize(ExitReason::Completed, now);
            return Ok(self.phase);
        }

        self.current_floor += 1;
        self.challenge = FloorChallenge::roll(rng);
        self.offer.clear();
        if let Some(challenge) = self.challenge {
            log::info!("Floor {} challenge: {}", self.current_floor, challenge.name());
        }
        self.set_phase(RunPhase::Active);
        Ok(self.phase)
    }

    /// Leave the run between rooms
    pub fn voluntary_exit(&mut self, now: u64) -> Result<&RunSummary, RunError> {
        self.require_between_rooms()?;
        let reason = if self.just_killed_boss { ExitReason::AfterBoss } else { ExitReason::Voluntary };
        self.finalize(reason, now);
        self.summary.as_ref().ok_or(RunError::AlreadyFinalized)
    }

    /// Runs achievements and end-of-run rewards exactly once
    fn finalize(&mut self, reason: ExitReason, now: u64) {
        if self.summary.is_some() {
            return;
        }
        self.ended_at = Some(now.max(self.started_at));
        self.offer.clear();
        let achievements: Vec<_> = validate_achievements(self).into_iter().collect();
        self.achievements_earned = achievements.clone();

        let rewards = RewardCalculator::end_of_run(self.floors_cleared, self.bosses_defeated, self.currency, reason);
        let summary = RunSummary {
            exit_reason: reason,
            final_floor: self.current_floor,
            floors_cleared: self.floors_cleared,
            bosses_defeated: self.bosses_defeated,
            mini_bosses_defeated: self.mini_bosses_defeated,
            duration_seconds: self.duration_seconds().unwrap_or(0),
            rewards,
            achievements_earned: achievements,
            statistics: self.statistics.clone(),
        };
        log::info!(
            "Run finalized ({}): floor {}, rewards {:?}",
            reason.name(),
            self.current_floor,
            summary.rewards
        );
        self.summary = Some(summary);
        self.set_phase(RunPhase::Finalized(reason));
    }

    // =========================================================================
    // Between-room actions
    // =========================================================================

    /// Use a consumable from the inventory
    pub fn use_consumable(&mut self, consumable: Consumable) -> Result<ConsumableEffect, RunError> {
        self.require_between_rooms()?;
        let index = self
            .items
            .iter()
            .position(|i| i.is_consumable(consumable))
            .ok_or(RunError::ConsumableNotOwned(consumable))?;
        self.items.remove(index);

        let effect = consumable.effect();
        match effect {
            ConsumableEffect::Heal(amount) => {
                self.heal(amount);
            }
            ConsumableEffect::RestoreMana(amount) => {
                self.mana = (self.mana + amount).min(self.max_mana);
            }
            ConsumableEffect::Rejuvenate(percent) => {
                self.heal(self.max_hp * percent / 100);
                self.mana = (self.mana + self.max_mana * percent / 100).min(self.max_mana);
            }
            ConsumableEffect::CurePoison => {
                self.effects.remove_effect(EffectType::Poisoned);
            }
            ConsumableEffect::CleanseDebuffs => self.effects.cleanse(),
            ConsumableEffect::Revive => self.revive_armed = true,
        }
        self.statistics.consumables_used += 1;
        log::debug!("Used {}", consumable.name());
        Ok(effect)
    }

    /// Use a held artifact; artifacts are single-use
    pub fn use_artifact(&mut self, artifact: Artifact) -> Result<(), RunError> {
        self.require_between_rooms()?;
        let index = self
            .artifacts
            .iter()
            .position(|a| *a == artifact)
            .ok_or(RunError::ArtifactNotOwned(artifact))?;
        self.artifacts.remove(index);

        match artifact {
            Artifact::PhoenixFeather => self.revive_armed = true,
            Artifact::Chronometer => self.effects.apply(EffectType::TimeWarp),
            Artifact::AceInTheHole => self.guaranteed_crits += 1,
            Artifact::MoneyBag => self.effects.apply(EffectType::MoneyBag),
            Artifact::SoulGem => self.effects.amplify_buffs(SOUL_GEM_FACTOR),
            Artifact::Voidwalker => self.trap_immunity += VOIDWALKER_CHARGES,
            Artifact::Lifewell => {
                self.hp = self.max_hp;
                self.mana = self.max_mana;
            }
        }
        self.statistics.artifacts_used += 1;
        log::debug!("Used artifact {}", artifact.name());
        Ok(())
    }

    /// Unlock a room type for the rest of the run with Currency B
    pub fn purchase_room_unlock(&mut self, room_type: RoomType) -> Result<u64, RunError> {
        self.require_between_rooms()?;
        let cost = unlock_room_type(&mut self.unlocked_room_types, &mut self.currency.currency_b, room_type)?;
        self.statistics.currency_spent += cost;
        Ok(cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::shop_catalog;
    use crate::progression::library_skills;
    use crate::world::{generate_room, RoomModifier};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const T0: u64 = 1_700_000_000;

    fn profile_with(types: &[RoomType]) -> PlayerProfile {
        PlayerProfile {
            unlocked_room_types: types.iter().copied().collect(),
            ..PlayerProfile::default()
        }
    }

    fn start(profile: &PlayerProfile, seed: u64) -> (RunState, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let run = RunState::start(profile, T0, &mut rng).unwrap();
        (run, rng)
    }

    /// Replace the offer with one room of the given type
    fn force_room(run: &mut RunState, room_type: RoomType, rng: &mut StdRng) -> RoomId {
        let id = run.room_ids.next_id();
        let mut room = generate_room(room_type, &run.generation_context(), id, rng);
        room.modifier = None;
        room.event = None;
        run.offer = vec![room];
        id
    }

    /// Mini-boss damage of a combat room generated without a modifier
    fn unmodified_boss_damage(run: &RunState, rng: &mut StdRng) -> u32 {
        loop {
            let room = generate_room(RoomType::Combat, &run.generation_context(), RoomId(0), rng);
            if room.modifier.is_none() {
                return room.mini_boss.map_or(0, |b| b.damage);
            }
        }
    }

    fn shop_item(id: &str) -> Item {
        shop_catalog(1).into_iter().find(|s| s.id == id).and_then(|s| s.to_item()).unwrap()
    }

    /// Resolve the first offered room cleanly and advance
    fn clear_floor(run: &mut RunState, rng: &mut StdRng) {
        let id = run.offer_rooms(rng).unwrap()[0].id;
        run.resolve_room(id, &RoomOutcome::cleared(), T0, rng).unwrap();
        if !run.is_finalized() {
            run.advance_floor(T0, rng).unwrap();
        }
    }

    #[test]
    fn test_start_applies_upgrades() {
        let mut profile = PlayerProfile::default();
        profile.permanent_upgrade_levels.insert(UpgradeId::MaxHealthBonus, 2);
        profile.permanent_upgrade_levels.insert(UpgradeId::AgilityBonus, 1);
        profile.permanent_upgrade_levels.insert(UpgradeId::StartingCurrencyB, 3);
        profile.permanent_upgrade_levels.insert(UpgradeId::LuckBonus, 1);

        let (run, _) = start(&profile, 1);
        assert_eq!(run.max_hp, 120);
        assert_eq!(run.hp, 120);
        assert_eq!(run.stats[&Stat::Agility], 13);
        assert_eq!(run.currency.currency_b, 30);
        assert_eq!(run.upgrade_bonuses.get(&UpgradeId::LuckBonus), Some(&2));
        assert_eq!(run.current_floor, 1);
        assert_eq!(run.phase, RunPhase::Active);
    }

    #[test]
    fn test_start_rejects_corrupt_profile() {
        let mut profile = PlayerProfile::default();
        profile.baseline_stats.remove(&Stat::MaxMana);
        let mut rng = StdRng::seed_from_u64(1);
        let err = RunState::start(&profile, T0, &mut rng).unwrap_err();
        assert!(matches!(err, RunError::Config(_)));
    }

    #[test]
    fn test_offer_is_stable_until_resolved() {
        let (mut run, mut rng) = start(&PlayerProfile::default(), 2);
        let first = run.offer_rooms(&mut rng).unwrap().to_vec();
        let second = run.offer_rooms(&mut rng).unwrap().to_vec();
        assert_eq!(first, second);
        assert!((3..=4).contains(&first.len()));
    }

    #[test]
    fn test_unoffered_room_is_rejected_without_change() {
        let (mut run, mut rng) = start(&PlayerProfile::default(), 3);
        run.offer_rooms(&mut rng).unwrap();
        let before = run.clone();

        let err = run.resolve_room(RoomId(9_999), &RoomOutcome::cleared(), T0, &mut rng).unwrap_err();
        assert_eq!(err, RunError::RoomNotOffered(RoomId(9_999)));
        assert_eq!(run, before);
    }

    #[test]
    fn test_phase_order_is_enforced() {
        let (mut run, mut rng) = start(&PlayerProfile::default(), 4);
        assert_eq!(run.advance_floor(T0, &mut rng), Err(RunError::WrongPhase(RunPhase::Active)));
        assert_eq!(
            run.resolve_room(RoomId(1), &RoomOutcome::cleared(), T0, &mut rng),
            Err(RunError::NoOffer)
        );

        let id = run.offer_rooms(&mut rng).unwrap()[0].id;
        run.resolve_room(id, &RoomOutcome::cleared(), T0, &mut rng).unwrap();
        assert_eq!(run.phase, RunPhase::RoomResolved);
        assert!(matches!(run.offer_rooms(&mut rng), Err(RunError::WrongPhase(_))));

        assert_eq!(run.advance_floor(T0, &mut rng), Ok(RunPhase::Active));
        assert_eq!(run.current_floor, 2);
    }

    #[test]
    fn test_five_floors_then_voluntary_exit() {
        let profile = profile_with(&[RoomType::Healing, RoomType::Rest]);
        let (mut run, mut rng) = start(&profile, 5);

        for floor in 1..=5 {
            assert_eq!(run.current_floor, floor);
            let rooms = run.offer_rooms(&mut rng).unwrap();
            assert!(rooms.iter().all(|r| r.mini_boss.is_none()));
            let id = rooms[0].id;
            run.resolve_room(id, &RoomOutcome::default(), T0 + 60 * floor as u64, &mut rng).unwrap();
            if floor < 5 {
                run.advance_floor(T0, &mut rng).unwrap();
            }
        }

        let summary = run.voluntary_exit(T0 + 400).unwrap().clone();
        assert_eq!(summary.exit_reason, ExitReason::Voluntary);
        assert_eq!(summary.floors_cleared, 5);
        assert_eq!(summary.bosses_defeated, 0);
        assert_eq!(summary.rewards.currency_a, 12);
        assert_eq!(summary.duration_seconds, 400);
        assert!(summary.achievements_earned.contains(&AchievementId::NoDamage));
        assert!(!summary.achievements_earned.contains(&AchievementId::MaxFloor));
        assert!(run.is_finalized());
    }

    #[test]
    fn test_voluntary_exit_pays_half_of_death() {
        let (mut run, mut rng) = start(&PlayerProfile::default(), 6);
        for _ in 0..3 {
            clear_floor(&mut run, &mut rng);
        }
        let id = run.offer_rooms(&mut rng).unwrap()[0].id;
        run.resolve_room(id, &RoomOutcome::cleared(), T0, &mut rng).unwrap();

        let mut died = run.clone();
        died.finalize(ExitReason::Death, T0 + 100);
        let exit = run.voluntary_exit(T0 + 100).unwrap();
        let death = died.summary.as_ref().unwrap();

        assert_eq!(exit.rewards.currency_a, death.rewards.currency_a / 2);
        assert_eq!(exit.rewards.currency_b, death.rewards.currency_b / 2);
        assert_eq!(exit.rewards.currency_c, death.rewards.currency_c / 2);
    }

    #[test]
    fn test_boss_floor_clear_and_exit_after_boss() {
        let profile = profile_with(&[RoomType::Healing, RoomType::Rest]);
        let (mut run, mut rng) = start(&profile, 7);
        for _ in 0..5 {
            clear_floor(&mut run, &mut rng);
        }

        assert_eq!(run.current_floor, 6);
        assert_eq!(run.bosses_defeated, 1);
        assert!((run.difficulty_multiplier - 1.2).abs() < 1e-9);
        assert_eq!(run.milestones_reached, vec![5]);
        assert_eq!(run.currency.currency_a, 100);

        let summary = run.voluntary_exit(T0).unwrap();
        assert_eq!(summary.exit_reason, ExitReason::AfterBoss);
        // (5 * 5 + 100 + 50) * 0.3
        assert_eq!(summary.rewards.currency_a, 52);
    }

    #[test]
    fn test_full_run_completes_once() {
        let profile = profile_with(&[RoomType::Healing, RoomType::Rest]);
        let (mut run, mut rng) = start(&profile, 8);
        for _ in 0..TOTAL_FLOORS {
            clear_floor(&mut run, &mut rng);
        }

        assert_eq!(run.phase, RunPhase::Finalized(ExitReason::Completed));
        assert_eq!(run.current_floor, TOTAL_FLOORS);
        assert_eq!(run.bosses_defeated, 6);
        assert_eq!(run.milestones_reached, vec![5, 10, 15, 20, 25]);
        assert!(run.achievements_earned.contains(&AchievementId::MaxFloor));

        let summary = run.summary.clone();
        assert_eq!(run.voluntary_exit(T0).unwrap_err(), RunError::AlreadyFinalized);
        assert_eq!(run.advance_floor(T0, &mut rng), Err(RunError::AlreadyFinalized));
        assert!(run.offer_rooms(&mut rng).is_err());
        assert_eq!(run.summary, summary);
    }

    #[test]
    fn test_trap_damage_and_voidwalker() {
        let (mut run, mut rng) = start(&PlayerProfile::default(), 9);
        run.currency.currency_a = 3;
        run.artifacts.push(Artifact::Voidwalker);
        run.use_artifact(Artifact::Voidwalker).unwrap();
        assert_eq!(run.trap_immunity, 2);

        let id = force_room(&mut run, RoomType::Trap, &mut rng);
        run.resolve_room(id, &RoomOutcome::cleared(), T0, &mut rng).unwrap();
        assert_eq!(run.statistics.traps_triggered, 0);
        assert_eq!(run.trap_immunity, 1);

        run.advance_floor(T0, &mut rng).unwrap();
        run.trap_immunity = 0;
        let id = force_room(&mut run, RoomType::Trap, &mut rng);
        let report = run.resolve_room(id, &RoomOutcome::cleared(), T0, &mut rng).unwrap();
        assert_eq!(run.statistics.traps_triggered, 1);
        assert!(report.damage_taken >= 20);
        assert!(!validate_achievements(&run).contains(&AchievementId::NoDamage));
    }

    #[test]
    fn test_trap_currency_loss_floors_at_zero() {
        let (mut run, mut rng) = start(&PlayerProfile::default(), 10);
        let id = force_room(&mut run, RoomType::Trap, &mut rng);
        run.offer[0].mini_boss = None;
        run.currency.currency_a = 2;
        run.resolve_room(id, &RoomOutcome::default(), T0, &mut rng).unwrap();
        assert_eq!(run.currency.currency_a, 0);
    }

    #[test]
    fn test_revive_survives_lethal_hit() {
        let (mut run, mut rng) = start(&PlayerProfile::default(), 11);
        run.items.push(Item::consumable(Consumable::PhoenixFeather));
        run.use_consumable(Consumable::PhoenixFeather).unwrap();

        let id = force_room(&mut run, RoomType::Combat, &mut rng);
        run.offer[0].mini_boss = None;
        let outcome = RoomOutcome { damage_taken: 10_000, ..RoomOutcome::cleared() };
        let report = run.resolve_room(id, &outcome, T0, &mut rng).unwrap();
        assert!(report.revived);
        assert_eq!(run.hp, 1);
        assert_eq!(run.phase, RunPhase::RoomResolved);

        run.advance_floor(T0, &mut rng).unwrap();
        let id = force_room(&mut run, RoomType::Combat, &mut rng);
        run.resolve_room(id, &outcome, T0 + 30, &mut rng).unwrap();
        assert_eq!(run.hp, 0);
        assert_eq!(run.phase, RunPhase::Finalized(ExitReason::Death));
        assert_eq!(run.summary.as_ref().map(|s| s.exit_reason), Some(ExitReason::Death));
    }

    #[test]
    fn test_undefeated_mini_boss_withholds_rewards() {
        let (mut run, mut rng) = start(&PlayerProfile::default(), 12);
        let id = force_room(&mut run, RoomType::Elite, &mut rng);
        let outcome = RoomOutcome { damage_taken: 5, ..RoomOutcome::default() };
        let report = run.resolve_room(id, &outcome, T0, &mut rng).unwrap();
        assert!(report.reward.is_empty());
        assert_eq!(run.mini_bosses_defeated, 0);
        assert_eq!(run.currency, CurrencyReward::default());
    }

    #[test]
    fn test_mini_boss_kill_pays_loot_and_reward() {
        let (mut run, mut rng) = start(&PlayerProfile::default(), 13);
        let id = force_room(&mut run, RoomType::Combat, &mut rng);
        let loot_len = run.offer[0].mini_boss.as_ref().unwrap().loot.len();
        let report = run.resolve_room(id, &RoomOutcome::cleared(), T0, &mut rng).unwrap();
        assert_eq!(run.mini_bosses_defeated, 1);
        assert_eq!(report.items_gained.len() + report.artifacts_gained.len(), loot_len);
        assert!(report.reward.currency_a >= 18);
    }

    #[test]
    fn test_shop_purchase_is_atomic() {
        let (mut run, mut rng) = start(&PlayerProfile::default(), 14);
        let id = force_room(&mut run, RoomType::Shop, &mut rng);
        let RoomPayload::Shop { stock } = run.offer[0].payload.clone() else {
            panic!("expected a shop");
        };
        let all: Vec<String> = stock.iter().map(|s| s.id.clone()).collect();
        let total: u64 = stock.iter().map(|s| s.cost).sum();

        run.currency.currency_a = total - 1;
        let before = run.clone();
        let outcome = RoomOutcome { purchases: all.clone(), ..RoomOutcome::default() };
        assert_eq!(
            run.resolve_room(id, &outcome, T0, &mut rng),
            Err(RunError::InsufficientCurrency { needed: total, available: total - 1 })
        );
        assert_eq!(run, before);

        let missing = RoomOutcome { purchases: vec!["notAThing".to_string()], ..RoomOutcome::default() };
        assert!(matches!(run.resolve_room(id, &missing, T0, &mut rng), Err(RunError::ShopItemNotOffered(_))));

        run.currency.currency_a = total;
        let report = run.resolve_room(id, &outcome, T0, &mut rng).unwrap();
        assert_eq!(report.purchased, all);
        assert_eq!(run.currency.currency_a, 0);
        assert_eq!(run.statistics.shop_purchases as usize, stock.len());
    }

    #[test]
    fn test_consumables() {
        let (mut run, _) = start(&PlayerProfile::default(), 15);
        assert_eq!(
            run.use_consumable(Consumable::HealthPotion),
            Err(RunError::ConsumableNotOwned(Consumable::HealthPotion))
        );

        run.hp = 30;
        run.items.push(Item::consumable(Consumable::HealthPotion));
        assert_eq!(run.use_consumable(Consumable::HealthPotion), Ok(ConsumableEffect::Heal(40)));
        assert_eq!(run.hp, 70);
        assert!(run.items.is_empty());

        run.effects.apply(EffectType::Poisoned);
        run.effects.apply(EffectType::Weakened);
        run.items.push(Item::consumable(Consumable::Antidote));
        run.use_consumable(Consumable::Antidote).unwrap();
        assert!(!run.effects.has_effect(EffectType::Poisoned));
        assert!(run.effects.has_effect(EffectType::Weakened));
        assert_eq!(run.statistics.consumables_used, 2);
        assert!(!validate_achievements(&run).contains(&AchievementId::NoConsumables));
    }

    #[test]
    fn test_effects_tick_once_per_room() {
        let (mut run, mut rng) = start(&PlayerProfile::default(), 16);
        run.effects.apply(EffectType::Poisoned);
        let id = force_room(&mut run, RoomType::Rest, &mut rng);
        let report = run.resolve_room(id, &RoomOutcome::default(), T0, &mut rng).unwrap();

        // 15% of 100 max HP
        assert_eq!(report.damage_taken, 15);
        assert_eq!(run.hp, 85);
        assert_eq!(run.effects.debuffs[0].remaining, 5);
    }

    #[test]
    fn test_healing_respects_flooded_and_max() {
        let (mut run, mut rng) = start(&PlayerProfile::default(), 17);
        run.challenge = None;
        let id = force_room(&mut run, RoomType::Healing, &mut rng);
        run.offer[0].modifier = Some(RoomModifier::Flooded);
        run.hp = 10;
        let report = run.resolve_room(id, &RoomOutcome::default(), T0, &mut rng).unwrap();
        // (30 + 5) / 2
        assert_eq!(report.healed, 17);
        assert_eq!(run.hp, 27);
    }

    #[test]
    fn test_reroll_consumes_token() {
        let (mut run, mut rng) = start(&PlayerProfile::default(), 18);
        run.offer_rooms(&mut rng).unwrap();
        assert_eq!(run.reroll_rooms(&mut rng).unwrap_err(), RunError::NoRerollToken);

        let token = shop_catalog(1).into_iter().find(|s| s.id == "rerollToken").unwrap();
        run.items.push(token.to_item().unwrap());
        let old_ids: Vec<RoomId> = run.offer.iter().map(|r| r.id).collect();
        let new_ids: Vec<RoomId> = run.reroll_rooms(&mut rng).unwrap().iter().map(|r| r.id).collect();
        assert!(new_ids.iter().all(|id| !old_ids.contains(id)));
        assert_eq!(run.statistics.rerolls_used, 1);
        assert!(run.items.is_empty());
    }

    #[test]
    fn test_room_unlock_feeds_generation() {
        let profile = profile_with(&[RoomType::Healing]);
        let (mut run, mut rng) = start(&profile, 19);
        assert!(matches!(run.purchase_room_unlock(RoomType::Library), Err(RunError::Unlock(_))));

        run.currency.currency_b = 50;
        assert_eq!(run.purchase_room_unlock(RoomType::Library), Ok(50));
        assert_eq!(run.currency.currency_b, 0);
        let rooms = run.offer_rooms(&mut rng).unwrap();
        assert!(rooms.iter().any(|r| r.room_type == RoomType::Library));
    }

    #[test]
    fn test_artifacts() {
        let (mut run, _) = start(&PlayerProfile::default(), 20);
        run.artifacts = Artifact::ALL.to_vec();
        run.hp = 1;
        run.effects.apply(EffectType::Fortunate);

        run.use_artifact(Artifact::Lifewell).unwrap();
        assert_eq!(run.hp, run.max_hp);
        run.use_artifact(Artifact::SoulGem).unwrap();
        assert!((run.effects.active_effects().reward_multiplier - 1.95).abs() < 1e-9);
        run.use_artifact(Artifact::MoneyBag).unwrap();
        assert!(run.effects.has_effect(EffectType::MoneyBag));
        run.use_artifact(Artifact::AceInTheHole).unwrap();
        assert_eq!(run.guaranteed_crits, 1);

        assert_eq!(run.use_artifact(Artifact::Lifewell), Err(RunError::ArtifactNotOwned(Artifact::Lifewell)));
        assert_eq!(run.statistics.artifacts_used, 4);
    }

    #[test]
    fn test_invalid_choices_leave_run_unchanged() {
        let (mut run, mut rng) = start(&PlayerProfile::default(), 21);
        let id = force_room(&mut run, RoomType::Skill, &mut rng);
        run.offer[0].mini_boss = None;
        let before = run.clone();

        let out_of_range = RoomOutcome { selected_skill: Some(99), ..RoomOutcome::default() };
        assert_eq!(run.resolve_room(id, &out_of_range, T0, &mut rng), Err(RunError::InvalidSkillChoice(99)));
        let no_event = RoomOutcome { event_success: Some(false), ..RoomOutcome::default() };
        assert_eq!(run.resolve_room(id, &no_event, T0, &mut rng), Err(RunError::NoEventInRoom(id)));
        assert_eq!(run, before);

        let id = force_room(&mut run, RoomType::Rest, &mut rng);
        let before = run.clone();
        let stray = RoomOutcome { selected_skill: Some(0), ..RoomOutcome::default() };
        assert_eq!(run.resolve_room(id, &stray, T0, &mut rng), Err(RunError::InvalidSkillChoice(0)));
        assert_eq!(run, before);
    }

    #[test]
    fn test_event_success_and_failure() {
        let (mut run, mut rng) = start(&PlayerProfile::default(), 22);
        let id = force_room(&mut run, RoomType::Rest, &mut rng);
        run.offer[0].event = Some(RoomEvent::Riddle);
        let passed = RoomOutcome { event_success: Some(true), ..RoomOutcome::default() };
        let report = run.resolve_room(id, &passed, T0, &mut rng).unwrap();
        // 5 * floor 1
        assert_eq!(report.reward.currency_a, 5);
        assert_eq!(run.currency.currency_a, 5);
        assert_eq!(run.statistics.events_succeeded, 1);
        assert!(validate_achievements(&run).contains(&AchievementId::NoDamage));

        run.advance_floor(T0, &mut rng).unwrap();
        let id = force_room(&mut run, RoomType::Rest, &mut rng);
        run.offer[0].event = Some(RoomEvent::Trial);
        let failed = RoomOutcome { event_success: Some(false), ..RoomOutcome::default() };
        let report = run.resolve_room(id, &failed, T0, &mut rng).unwrap();
        // floor(10 * 2 / 5)
        assert_eq!(report.damage_taken, 4);
        assert_eq!(run.hp, run.max_hp - 4);
        assert_eq!(run.statistics.events_failed, 1);
        assert!(!validate_achievements(&run).contains(&AchievementId::NoDamage));
    }

    #[test]
    fn test_floor_challenges_apply() {
        let (mut run, mut rng) = start(&PlayerProfile::default(), 23);
        run.challenge = Some(FloorChallenge::NoHealing);
        let id = force_room(&mut run, RoomType::Healing, &mut rng);
        run.hp = 10;
        let report = run.resolve_room(id, &RoomOutcome::default(), T0, &mut rng).unwrap();
        // (30 + 5) / 2
        assert_eq!(report.healed, 17);

        run.challenge = Some(FloorChallenge::RustyWeapons);
        assert!((run.combat_damage_multiplier() - 0.75).abs() < 1e-9);
        run.effects.apply(EffectType::DamageBoost);
        assert!((run.combat_damage_multiplier() - 0.75 * 1.15).abs() < 1e-9);

        run.challenge = None;
        let base = unmodified_boss_damage(&run, &mut rng);
        run.challenge = Some(FloorChallenge::Dampened);
        assert_eq!(unmodified_boss_damage(&run, &mut rng), (base as f64 * 0.8).floor() as u32);
    }

    #[test]
    fn test_modifier_scales_mini_boss_damage() {
        let (mut run, mut rng) = start(&PlayerProfile::default(), 24);
        run.challenge = None;
        let base = unmodified_boss_damage(&run, &mut rng);

        let mut seen = Vec::new();
        for _ in 0..200 {
            let room = generate_room(RoomType::Combat, &run.generation_context(), RoomId(0), &mut rng);
            let damage = room.mini_boss.map_or(0, |b| b.damage);
            let expected = match room.modifier {
                Some(RoomModifier::Frozen) => (base as f64 * 0.8).floor() as u32,
                Some(RoomModifier::Inferno) => (base as f64 * 1.2).floor() as u32,
                _ => base,
            };
            assert_eq!(damage, expected, "modifier {:?}", room.modifier);
            seen.extend(room.modifier);
        }
        assert!(seen.contains(&RoomModifier::Frozen));
        assert!(seen.contains(&RoomModifier::Inferno));
    }

    #[test]
    fn test_mini_boss_kills_sometimes_drop_a_buff() {
        let mut buffed = 0;
        for seed in 0..100 {
            let (mut run, mut rng) = start(&PlayerProfile::default(), 1_000 + seed);
            let id = force_room(&mut run, RoomType::Combat, &mut rng);
            run.resolve_room(id, &RoomOutcome::cleared(), T0, &mut rng).unwrap();
            if let Some(buff) = run.effects.buffs.first() {
                assert!(EffectType::REWARD_BUFFS.contains(&buff.effect_type));
                buffed += 1;
            }
            assert!(run.effects.debuffs.is_empty());
        }
        assert!((20..=60).contains(&buffed), "{} of 100 kills dropped a buff", buffed);
    }

    #[test]
    fn test_room_payloads_apply() {
        let (mut run, mut rng) = start(&PlayerProfile::default(), 25);

        let id = force_room(&mut run, RoomType::Skill, &mut rng);
        run.offer[0].mini_boss = None;
        let RoomPayload::Skill { options } = run.offer[0].payload.clone() else {
            panic!("expected a skill room");
        };
        let pick = RoomOutcome { selected_skill: Some(1), ..RoomOutcome::default() };
        let report = run.resolve_room(id, &pick, T0, &mut rng).unwrap();
        assert_eq!(report.skill_learned.as_ref(), Some(&options[1]));
        assert_eq!(run.skills, vec![options[1].clone()]);
        run.advance_floor(T0, &mut rng).unwrap();

        let id = force_room(&mut run, RoomType::Library, &mut rng);
        let report = run.resolve_room(id, &RoomOutcome::default(), T0, &mut rng).unwrap();
        // 5 + floor 2
        assert_eq!(report.reward.currency_a, 7);
        assert_eq!(run.skills.len(), 3);
        assert!(library_skills().iter().all(|s| run.skills.contains(s)));
        run.advance_floor(T0, &mut rng).unwrap();

        let id = force_room(&mut run, RoomType::Armory, &mut rng);
        run.offer[0].mini_boss = None;
        let defense = run.stats[&Stat::Defense];
        let report = run.resolve_room(id, &RoomOutcome::default(), T0, &mut rng).unwrap();
        // 5 + floor 3 / 3
        assert_eq!(run.stats[&Stat::Defense], defense + 6);
        assert_eq!(report.items_gained.len(), 2);
        run.advance_floor(T0, &mut rng).unwrap();

        let id = force_room(&mut run, RoomType::Alchemy, &mut rng);
        let intelligence = run.stats[&Stat::Intelligence];
        let report = run.resolve_room(id, &RoomOutcome::default(), T0, &mut rng).unwrap();
        // 2 + floor 4 / 4
        assert_eq!(run.stats[&Stat::Intelligence], intelligence + 3);
        assert_eq!(report.items_gained.len(), 2);
    }

    #[test]
    fn test_skeleton_key_and_merchant_ring() {
        let (mut run, mut rng) = start(&PlayerProfile::default(), 26);
        run.items.push(shop_item("keyRing"));
        run.currency.currency_a = 10;
        let id = force_room(&mut run, RoomType::Trap, &mut rng);
        run.offer[0].mini_boss = None;
        run.resolve_room(id, &RoomOutcome::default(), T0, &mut rng).unwrap();
        assert_eq!(run.hp, run.max_hp);
        assert_eq!(run.currency.currency_a, 10);
        assert_eq!(run.statistics.traps_triggered, 0);
        assert!(run.items.is_empty());
        run.advance_floor(T0, &mut rng).unwrap();

        run.items.push(shop_item("goldMultiplier"));
        let id = force_room(&mut run, RoomType::Library, &mut rng);
        let report = run.resolve_room(id, &RoomOutcome::default(), T0, &mut rng).unwrap();
        // floor((5 + 2) * 1.25)
        assert_eq!(report.reward.currency_a, 8);
    }
}
