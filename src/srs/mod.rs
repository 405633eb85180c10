//! Vocabulary store and SM-2 spaced repetition
//!
//! This module provides:
//! - Vocabulary word state (`VocabWord`) with its scheduling fields
//! - The SM-2 interval step function
//! - `ReviewScheduler`, the per-user word store with due-word queries,
//!   review sessions, and mastery statistics

pub mod algorithm;
pub mod models;
pub mod scheduler;

pub use algorithm::{ReviewOutcome, MASTERY_INTERVAL_DAYS, MIN_EASE_FACTOR};
pub use models::{ReviewQuality, SrsStats, VocabWord, WordSource};
pub use scheduler::ReviewScheduler;
