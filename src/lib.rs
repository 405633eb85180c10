//! # manabi-engine - learning state engines
//!
//! Pure Rust implementations of the algorithmic state layer of a
//! Japanese-learning app:
//!
//! - **SM-2 review scheduler** - spaced-repetition intervals, due-word
//!   queries, review sessions, mastery statistics
//! - **Weekly league** - synthetic per-tier leaderboard with
//!   percentile-based promotion/demotion and reward payouts
//! - **State store** - wholesale JSON persistence of each engine
//!
//! ## Design
//!
//! - **No global state** - engines are constructed objects with explicit
//!   lifecycle; nothing here is a process-wide singleton
//! - **Explicit clocks** - every time-dependent operation takes `now` as a
//!   parameter; `*_now` wrappers exist for convenience
//! - **Seedable randomness** - cohort synthesis and session sampling run on
//!   a `ChaCha8Rng`; `with_seed` constructors make tests deterministic
//! - **Total operations** - engine mutations never fail; only persistence
//!   returns errors
//!
//! ## Modules
//!
//! - [`srs`] - vocabulary store and SM-2 scheduling
//! - [`league`] - weekly league state machine
//! - [`storage`] - JSON blob persistence

pub mod league;
pub mod srs;
pub mod storage;

pub use league::{
    LeagueEngine, LeagueHistoryEntry, LeagueParticipant, LeagueTier, LeagueTierInfo,
    PromotionStatus, WeekOutcome, WeekReward, WeekSummary, WeeklyLeague,
};
pub use srs::{
    ReviewOutcome, ReviewQuality, ReviewScheduler, SrsStats, VocabWord, WordSource,
};
pub use storage::{StateStore, StorageError, StorageResult};
