//! SM-2 interval step function
//!
//! Computes the next review interval and ease factor from the current word
//! state and a four-way quality rating:
//!
//! - `Again` / `Hard`: failure. Repetitions reset, interval drops to one
//!   day, ease factor decreases (floored at [`MIN_EASE_FACTOR`]).
//! - `Good` / `Easy`: success. First success gives a one-day interval,
//!   the second six days, after that the interval grows by the ease factor.

use chrono::{DateTime, Duration, Utc};

use super::models::{ReviewQuality, VocabWord};

/// Minimum ease factor allowed
pub const MIN_EASE_FACTOR: f32 = 1.3;

/// Interval after the first successful review, in days
pub const FIRST_INTERVAL_DAYS: i32 = 1;

/// Interval after the second successful review, in days
pub const SECOND_INTERVAL_DAYS: i32 = 6;

/// Interval at which a word counts as mastered, in days
pub const MASTERY_INTERVAL_DAYS: i32 = 21;

/// Result of applying one review to a word's scheduling state
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOutcome {
    pub interval: i32,
    pub ease_factor: f32,
    pub repetitions: i32,
    pub due_date: DateTime<Utc>,
}

/// Apply one quality rating to the word's current state
pub fn next_review(word: &VocabWord, quality: ReviewQuality, now: DateTime<Utc>) -> ReviewOutcome {
    let mut ease_factor = word.ease_factor;
    let interval;
    let repetitions;

    if quality.is_success() {
        repetitions = word.repetitions + 1;
        interval = match repetitions {
            1 => FIRST_INTERVAL_DAYS,
            2 => SECOND_INTERVAL_DAYS,
            _ => (word.interval as f32 * ease_factor).round() as i32,
        };
        if quality == ReviewQuality::Easy {
            ease_factor += 0.15;
        }
    } else {
        repetitions = 0;
        interval = FIRST_INTERVAL_DAYS;
        ease_factor -= match quality {
            ReviewQuality::Again => 0.20,
            _ => 0.15,
        };
        ease_factor = ease_factor.max(MIN_EASE_FACTOR);
    }

    ReviewOutcome {
        interval,
        ease_factor,
        repetitions,
        due_date: now + Duration::days(interval as i64),
    }
}

/// The interval each quality rating would produce, for UI preview
///
/// Returned in rating order: Again, Hard, Good, Easy.
pub fn preview_intervals(word: &VocabWord, now: DateTime<Utc>) -> [i32; 4] {
    [
        next_review(word, ReviewQuality::Again, now).interval,
        next_review(word, ReviewQuality::Hard, now).interval,
        next_review(word, ReviewQuality::Good, now).interval,
        next_review(word, ReviewQuality::Easy, now).interval,
    ]
}
