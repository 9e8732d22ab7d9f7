//! Combat-side effects: buffs, debuffs and their aggregation

pub mod status;

pub use status::{ActiveEffects, Effect, EffectTracker, EffectType};
