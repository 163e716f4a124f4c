pub mod achievements;
pub mod catalog;
pub mod config;
pub mod leaderboard;
pub mod session;
