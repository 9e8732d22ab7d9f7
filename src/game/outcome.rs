//! Room outcomes
//!
//! The caller resolves combat, events and shopping outside the engine and
//! reports the results here. The engine answers with a report of what the
//! room changed.

use serde::{Deserialize, Serialize};

use crate::items::{Artifact, Item};
use crate::progression::Skill;
use crate::world::{CurrencyReward, RoomId};

use super::RunPhase;

/// What happened in a room, as resolved by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomOutcome {
    /// The room's mini-boss fell. Rewards are withheld when a boss is present and this is false.
    pub mini_boss_defeated: bool,
    /// Combat damage the player took
    pub damage_taken: u32,
    pub damage_dealt: u32,
    pub critical_hits: u32,
    /// Result of the room's event, if it had one
    pub event_success: Option<bool>,
    /// The player dodged the trap
    pub trap_avoided: bool,
    /// Index into a skill room's options
    pub selected_skill: Option<usize>,
    /// Shop item ids to buy, in order
    pub purchases: Vec<String>,
}

impl RoomOutcome {
    /// Outcome for a room cleared without incident
    pub fn cleared() -> Self {
        Self { mini_boss_defeated: true, ..Self::default() }
    }
}

/// What resolving a room changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomReport {
    pub room_id: RoomId,
    pub reward: CurrencyReward,
    /// HP lost from combat, traps, failed events and damage over time
    pub damage_taken: u32,
    pub healed: u32,
    pub mana_restored: u32,
    pub items_gained: Vec<Item>,
    pub artifacts_gained: Vec<Artifact>,
    pub skill_learned: Option<Skill>,
    pub purchased: Vec<String>,
    /// A revive saved the player in this room
    pub revived: bool,
    pub phase: RunPhase,
}

impl RoomReport {
    pub(crate) fn new(room_id: RoomId) -> Self {
        Self {
            room_id,
            reward: CurrencyReward::default(),
            damage_taken: 0,
            healed: 0,
            mana_restored: 0,
            items_gained: Vec::new(),
            artifacts_gained: Vec::new(),
            skill_learned: None,
            purchased: Vec::new(),
            revived: false,
            phase: RunPhase::Active,
        }
    }
}
