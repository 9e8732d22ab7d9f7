//! Gauntlet - A procedural roguelike run engine
//!
//! Climb 26 floors of generated rooms, pick one room per floor, and bank
//! what you earned into a persistent profile when the run ends.

pub mod combat;
pub mod entities;
pub mod game;
pub mod items;
pub mod progression;
pub mod save;
pub mod world;

// Re-export commonly used types
pub use game::{RoomOutcome, RoomReport, RunError, RunPhase, RunState, RunSummary};
pub use save::PlayerProfile;
pub use world::{Room, RoomType};
