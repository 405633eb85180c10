//! Weekly league state machine
//!
//! This module provides:
//! - League tiers (bronze through diamond) with per-tier promotion and
//!   demotion percentages
//! - Synthetic cohort generation (the leaderboard is local, not networked)
//! - `LeagueEngine`, the per-user league state: weekly XP, ranking,
//!   week-end promotion/demotion, rewards, and history

pub mod cohort;
pub mod engine;
pub mod models;

pub use engine::{LeagueEngine, WeekSummary, COHORT_SIZE, HISTORY_LIMIT};
pub use models::{
    LeagueHistoryEntry, LeagueParticipant, LeagueTier, LeagueTierInfo, PromotionStatus,
    WeekOutcome, WeekReward, WeeklyLeague,
};
