pub mod leaderboard;

pub use leaderboard::{LeaderboardEntry, LeaderboardService, PlayerEventScore};
