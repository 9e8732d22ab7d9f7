//! Run errors
//!
//! Every error is raised before any state changes, so a failed call leaves
//! the run exactly as it was.

use crate::items::{Artifact, Consumable};
use crate::progression::UnlockError;
use crate::save::ConfigError;
use crate::world::RoomId;

use super::RunPhase;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RunError {
    #[error("invalid profile: {0}")]
    Config(#[from] ConfigError),
    #[error("room {0:?} is not in the current offer")]
    RoomNotOffered(RoomId),
    #[error("no room offer has been generated for this floor")]
    NoOffer,
    #[error("operation not allowed in phase {0:?}")]
    WrongPhase(RunPhase),
    #[error("the run is already finalized")]
    AlreadyFinalized,
    #[error("skill choice {0} is not among the room's options")]
    InvalidSkillChoice(usize),
    #[error("room {0:?} has no event to resolve")]
    NoEventInRoom(RoomId),
    #[error("shop item {0} is not in stock")]
    ShopItemNotOffered(String),
    #[error("insufficient currency: need {needed}, have {available}")]
    InsufficientCurrency { needed: u64, available: u64 },
    #[error("{0:?} is not in the inventory")]
    ConsumableNotOwned(Consumable),
    #[error("{0:?} is not held")]
    ArtifactNotOwned(Artifact),
    #[error("no reroll token in the inventory")]
    NoRerollToken,
    #[error(transparent)]
    Unlock(#[from] UnlockError),
}
