//! Per-user league state and week-boundary transitions
//!
//! `LeagueEngine` owns the current tier, the running week's leaderboard,
//! reward balances, and a capped history of past weeks. Transitions between
//! tiers happen only in [`LeagueEngine::process_week_end`], which the caller
//! invokes explicitly; the engine never watches the wall clock.

use chrono::{DateTime, Datelike, Duration, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::cohort;
use super::models::{
    LeagueHistoryEntry, LeagueParticipant, LeagueTier, PromotionStatus, WeekOutcome, WeekReward,
    WeeklyLeague,
};

/// Participants per weekly cohort (the user plus synthetic peers)
pub const COHORT_SIZE: usize = 30;

/// Most recent completed weeks kept in history
pub const HISTORY_LIMIT: usize = 10;

/// How many ranks below the promotion cutoff still count as "safe"
const SAFE_MARGIN: u32 = 3;

/// Result of closing out a week
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummary {
    pub outcome: WeekOutcome,
    pub from_tier: LeagueTier,
    pub to_tier: LeagueTier,
    pub rank: u32,
    pub weekly_xp: u32,
    pub reward: WeekReward,
}

/// Per-user weekly league state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEngine {
    user_id: String,
    user_name: String,
    user_avatar: String,
    current_tier: LeagueTier,
    total_xp: u32,
    gems: u32,
    streak: u32,
    week: WeeklyLeague,
    history: Vec<LeagueHistoryEntry>,
    #[serde(skip, default = "clock_seeded_rng")]
    rng: ChaCha8Rng,
}

fn clock_seeded_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(Utc::now().timestamp_millis() as u64)
}

/// Sunday 00:00:00 through Saturday 23:59:59 of the week containing `now`
pub fn week_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let date = now.date_naive();
    let sunday = date - Duration::days(date.weekday().num_days_from_sunday() as i64);
    let start = sunday
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or(now);
    let end = (sunday + Duration::days(6))
        .and_hms_opt(23, 59, 59)
        .map(|dt| dt.and_utc())
        .unwrap_or(now);
    (start, end)
}

/// The week-boundary state machine: promote inside the promotion band (never
/// past diamond), demote inside the demotion band (never below bronze),
/// otherwise stay
pub fn resolve_week_outcome(
    my_rank: u32,
    promotion_zone: u32,
    demotion_zone: u32,
    tier: LeagueTier,
) -> WeekOutcome {
    if !tier.is_top() && my_rank <= promotion_zone {
        WeekOutcome::Promotion
    } else if !tier.is_bottom() && my_rank >= demotion_zone {
        WeekOutcome::Demotion
    } else {
        WeekOutcome::Stay
    }
}

impl LeagueEngine {
    /// Create a bronze-tier engine and initialize the current week
    pub fn new(name: impl Into<String>, avatar: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::build(name, avatar, now, clock_seeded_rng())
    }

    /// Create an engine with a fixed RNG seed (for deterministic tests)
    pub fn with_seed(
        name: impl Into<String>,
        avatar: impl Into<String>,
        now: DateTime<Utc>,
        seed: u64,
    ) -> Self {
        Self::build(name, avatar, now, ChaCha8Rng::seed_from_u64(seed))
    }

    fn build(
        name: impl Into<String>,
        avatar: impl Into<String>,
        now: DateTime<Utc>,
        rng: ChaCha8Rng,
    ) -> Self {
        let mut engine = Self {
            user_id: Uuid::new_v4().to_string(),
            user_name: name.into(),
            user_avatar: avatar.into(),
            current_tier: LeagueTier::Bronze,
            total_xp: 0,
            gems: 0,
            streak: 0,
            // Placeholder, replaced by initialize_week below
            week: WeeklyLeague::new(LeagueTier::Bronze, now, now, Vec::new()),
            history: Vec::new(),
            rng,
        };
        engine.initialize_week(now);
        engine
    }

    /// Start a fresh weekly league for the current tier with zero weekly XP
    pub fn initialize_week(&mut self, now: DateTime<Utc>) {
        self.week = self.build_week(now);
        debug!(
            tier = self.current_tier.as_str(),
            participants = self.week.participants.len(),
            "initialized weekly league"
        );
    }

    fn build_week(&mut self, now: DateTime<Utc>) -> WeeklyLeague {
        let (week_start, week_end) = week_bounds(now);
        let mut participants =
            cohort::generate_peers(&mut self.rng, self.current_tier, COHORT_SIZE - 1);
        participants.push(LeagueParticipant {
            id: self.user_id.clone(),
            name: self.user_name.clone(),
            avatar: self.user_avatar.clone(),
            weekly_xp: 0,
            total_xp: self.total_xp,
            league: self.current_tier,
            rank: 0,
            streak: self.streak,
            is_current_user: true,
        });
        WeeklyLeague::new(self.current_tier, week_start, week_end, participants)
    }

    // ==================== Mutations ====================

    /// Credit XP to the user and re-rank the cohort
    ///
    /// Every XP source in the app (lessons, chat sessions, quizzes, reviews)
    /// funnels through here; it is the only in-week mutation path.
    pub fn add_xp(&mut self, amount: u32) {
        self.total_xp += amount;
        if let Some(user) = self.week.current_user_mut() {
            user.weekly_xp += amount;
            user.total_xp = self.total_xp;
        }
        self.week.sort_and_rank();
        debug!(amount, rank = self.week.my_rank, "added xp");
    }

    /// Update the user's displayed streak (shown on the leaderboard row)
    pub fn set_streak(&mut self, streak: u32) {
        self.streak = streak;
        if let Some(user) = self.week.current_user_mut() {
            user.streak = streak;
        }
    }

    /// Close out the current week: apply promotion/demotion, pay the reward,
    /// archive the week, and start a new one for the resulting tier
    pub fn process_week_end(&mut self, now: DateTime<Utc>) -> WeekSummary {
        let rank = self.week.my_rank;
        let weekly_xp = self.week.current_user().map(|u| u.weekly_xp).unwrap_or(0);
        let from_tier = self.current_tier;

        let outcome = resolve_week_outcome(
            rank,
            self.week.promotion_zone,
            self.week.demotion_zone,
            from_tier,
        );
        let reward = WeekReward::for_outcome(from_tier, outcome);

        self.history.push(LeagueHistoryEntry {
            week_start: self.week.week_start,
            week_end: self.week.week_end,
            tier: from_tier,
            rank,
            weekly_xp,
            outcome,
            reward,
        });
        if self.history.len() > HISTORY_LIMIT {
            let overflow = self.history.len() - HISTORY_LIMIT;
            self.history.drain(0..overflow);
        }

        self.current_tier = match outcome {
            WeekOutcome::Promotion => from_tier.promoted(),
            WeekOutcome::Demotion => from_tier.demoted(),
            WeekOutcome::Stay => from_tier,
        };
        self.gems += reward.gems;
        self.total_xp += reward.bonus_xp;

        info!(
            from = from_tier.as_str(),
            to = self.current_tier.as_str(),
            rank,
            weekly_xp,
            gems = reward.gems,
            "processed week end"
        );

        self.initialize_week(now);

        WeekSummary {
            outcome,
            from_tier,
            to_tier: self.current_tier,
            rank,
            weekly_xp,
            reward,
        }
    }

    // ==================== Queries ====================

    pub fn current_tier(&self) -> LeagueTier {
        self.current_tier
    }

    pub fn week(&self) -> &WeeklyLeague {
        &self.week
    }

    pub fn leaderboard(&self) -> &[LeagueParticipant] {
        &self.week.participants
    }

    pub fn my_rank(&self) -> u32 {
        self.week.my_rank
    }

    pub fn total_xp(&self) -> u32 {
        self.total_xp
    }

    pub fn gems(&self) -> u32 {
        self.gems
    }

    pub fn history(&self) -> &[LeagueHistoryEntry] {
        &self.history
    }

    /// Classify the user's current position for UI hinting
    pub fn promotion_status(&self) -> PromotionStatus {
        let rank = self.week.my_rank;
        let promo = self.week.promotion_zone;
        if !self.current_tier.is_top() && rank <= promo {
            PromotionStatus::Promotion
        } else if !self.current_tier.is_bottom() && rank >= self.week.demotion_zone {
            PromotionStatus::Demotion
        } else if promo > 0 && rank <= promo + SAFE_MARGIN {
            PromotionStatus::Safe
        } else {
            PromotionStatus::Stay
        }
    }

    /// Whole days remaining until the week closes (ceiling, floored at zero)
    pub fn days_until_week_end(&self, now: DateTime<Utc>) -> i64 {
        let secs = (self.week.week_end - now).num_seconds();
        if secs <= 0 {
            0
        } else {
            (secs + 86_399) / 86_400
        }
    }
}
