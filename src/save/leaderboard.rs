//! Run leaderboard
//!
//! Entries are built from finished runs; ranking is a stable sort so ties
//! keep submission order.

use serde::{Deserialize, Serialize};

use crate::game::RunSummary;
use crate::progression::ExitReason;

/// One finished run on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_id: String,
    pub player_name: String,
    pub highest_floor: u32,
    pub bosses_defeated: u32,
    pub time_seconds: u64,
    pub achievements: Vec<String>,
    pub exit_reason: ExitReason,
}

impl LeaderboardEntry {
    pub fn from_summary(player_id: &str, player_name: &str, summary: &RunSummary) -> Self {
        Self {
            player_id: player_id.to_string(),
            player_name: player_name.to_string(),
            highest_floor: summary.final_floor,
            bosses_defeated: summary.bosses_defeated,
            time_seconds: summary.duration_seconds,
            achievements: summary.achievements_earned.iter().map(|a| a.id().to_string()).collect(),
            exit_reason: summary.exit_reason,
        }
    }
}

/// Ranking categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LeaderboardCategory {
    #[default]
    Floor,
    Bosses,
    /// Fastest first
    Time,
    Achievements,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self, entry: LeaderboardEntry) {
        self.entries.push(entry);
    }

    /// Top `limit` entries in a category
    pub fn top(&self, category: LeaderboardCategory, limit: usize) -> Vec<&LeaderboardEntry> {
        let mut sorted: Vec<&LeaderboardEntry> = self.entries.iter().collect();
        match category {
            LeaderboardCategory::Floor => sorted.sort_by(|a, b| b.highest_floor.cmp(&a.highest_floor)),
            LeaderboardCategory::Bosses => sorted.sort_by(|a, b| b.bosses_defeated.cmp(&a.bosses_defeated)),
            LeaderboardCategory::Time => sorted.sort_by(|a, b| a.time_seconds.cmp(&b.time_seconds)),
            LeaderboardCategory::Achievements => {
                sorted.sort_by(|a, b| b.achievements.len().cmp(&a.achievements.len()))
            }
        }
        sorted.truncate(limit);
        sorted
    }

    /// A player's best run by floor
    pub fn personal_best(&self, player_id: &str) -> Option<&LeaderboardEntry> {
        self.entries
            .iter()
            .filter(|e| e.player_id == player_id)
            .max_by_key(|e| (e.highest_floor, e.bosses_defeated))
    }
}
