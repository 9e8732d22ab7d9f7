//! Game module - The run state machine and its inputs and outputs

mod error;
mod outcome;
mod state;
mod summary;

pub use error::RunError;
pub use outcome::{RoomOutcome, RoomReport};
pub use state::{RunPhase, RunState, MINI_BOSS_BUFF_CHANCE};
pub use summary::{RunStatistics, RunSummary};
