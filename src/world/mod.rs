//! World module
//!
//! Room data, run themes, floor challenges and procedural floor generation.

pub mod challenge;
pub mod generation;
pub mod room;
pub mod theme;

pub use challenge::FloorChallenge;
pub use generation::{generate_floor_rooms, generate_room, pick_room_types, GenerationContext, RoomIdCounter};
pub use room::{
    CurrencyReward, EventCheck, EventDifficulty, Room, RoomEvent, RoomId, RoomModifier, RoomPayload, RoomType,
};
pub use theme::Theme;
