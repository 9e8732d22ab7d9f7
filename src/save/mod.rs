//! Persistent player data
//!
//! Player profiles, run achievements and the leaderboard.

pub mod achievements;
pub mod leaderboard;
pub mod profile;

pub use achievements::{validate as validate_achievements, AchievementId};
pub use leaderboard::{Leaderboard, LeaderboardCategory, LeaderboardEntry};
pub use profile::{ConfigError, PlayerProfile, ProfileStats};
