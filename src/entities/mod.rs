//! Run entities: the player's stat block and mini-bosses

pub mod bosses;
pub mod player;

pub use bosses::{generate_mini_boss, MiniBoss, MiniBossAbility};
pub use player::{add_stat, base_stats, Stat, StatMap};
