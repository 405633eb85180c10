//! Per-user vocabulary store and review scheduling
//!
//! `ReviewScheduler` owns the word map and is the only writer to it. All
//! time-dependent operations take `now` explicitly; `*_now` wrappers use the
//! system clock.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::algorithm::{self, ReviewOutcome};
use super::models::{ReviewQuality, SrsStats, VocabWord};

/// Maximum number of words handed out per review session
pub const DEFAULT_SESSION_SIZE: usize = 20;

/// Vocabulary store with SM-2 scheduling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewScheduler {
    words: HashMap<String, VocabWord>,
    #[serde(skip, default = "clock_seeded_rng")]
    rng: ChaCha8Rng,
}

fn clock_seeded_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(Utc::now().timestamp_millis() as u64)
}

impl Default for ReviewScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewScheduler {
    pub fn new() -> Self {
        Self {
            words: HashMap::new(),
            rng: clock_seeded_rng(),
        }
    }

    /// Create a scheduler with a fixed RNG seed (for deterministic tests)
    pub fn with_seed(seed: u64) -> Self {
        Self {
            words: HashMap::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    // ==================== Mutations ====================

    /// Insert a word into the store
    ///
    /// Duplicate insertion is not an error: an existing id is left untouched
    /// and `false` is returned.
    pub fn add_word(&mut self, word: VocabWord) -> bool {
        if self.words.contains_key(&word.id) {
            debug!(id = %word.id, "word already in store, skipping");
            return false;
        }
        debug!(id = %word.id, word = %word.word, "adding word");
        self.words.insert(word.id.clone(), word);
        true
    }

    /// Insert a batch of words (content import), applying the per-item
    /// duplicate rule; returns how many were actually inserted
    pub fn add_words(&mut self, words: impl IntoIterator<Item = VocabWord>) -> usize {
        let mut inserted = 0;
        for word in words {
            if self.add_word(word) {
                inserted += 1;
            }
        }
        inserted
    }

    /// Apply one review to a word
    ///
    /// Returns `None` if the id is unknown; the miss is deliberately not an
    /// error so stale UI events are absorbed.
    pub fn review_word(
        &mut self,
        id: &str,
        quality: ReviewQuality,
        now: DateTime<Utc>,
    ) -> Option<ReviewOutcome> {
        let word = self.words.get_mut(id)?;
        let outcome = algorithm::next_review(word, quality, now);

        word.interval = outcome.interval;
        word.ease_factor = outcome.ease_factor;
        word.repetitions = outcome.repetitions;
        word.due_date = outcome.due_date;
        word.last_reviewed_at = Some(now);

        debug!(
            id = %id,
            quality = quality.score(),
            interval = outcome.interval,
            "reviewed word"
        );
        Some(outcome)
    }

    /// `review_word` against the system clock
    pub fn review_word_now(&mut self, id: &str, quality: ReviewQuality) -> Option<ReviewOutcome> {
        self.review_word(id, quality, Utc::now())
    }

    // ==================== Queries ====================

    pub fn get(&self, id: &str) -> Option<&VocabWord> {
        self.words.get(id)
    }

    pub fn all_words(&self) -> impl Iterator<Item = &VocabWord> {
        self.words.values()
    }

    /// All words eligible for review at `now`, in arbitrary order
    pub fn due_words(&self, now: DateTime<Utc>) -> Vec<&VocabWord> {
        self.words.values().filter(|w| w.is_due(now)).collect()
    }

    /// Up to `limit` due words sampled at random for one review session
    pub fn review_session(&mut self, now: DateTime<Utc>, limit: usize) -> Vec<VocabWord> {
        let mut ids: Vec<&String> = self
            .words
            .values()
            .filter(|w| w.is_due(now))
            .map(|w| &w.id)
            .collect();
        // HashMap iteration order varies per instance; sort before shuffling
        // so a seeded RNG alone determines the sample (spec: with_seed is
        // deterministic).
        ids.sort_unstable();
        ids.shuffle(&mut self.rng);
        ids.truncate(limit);

        ids.into_iter()
            .filter_map(|id| self.words.get(id))
            .cloned()
            .collect()
    }

    /// The interval each quality would produce for a word (UI preview)
    pub fn preview_intervals(&self, id: &str, now: DateTime<Utc>) -> Option<[i32; 4]> {
        self.words
            .get(id)
            .map(|w| algorithm::preview_intervals(w, now))
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Words with at least one successful review
    pub fn learned_count(&self) -> usize {
        self.words.values().filter(|w| !w.is_new()).count()
    }

    /// Words whose interval has reached the mastery threshold
    pub fn mastered_count(&self) -> usize {
        self.words.values().filter(|w| w.is_mastered()).count()
    }

    /// Words never successfully reviewed
    pub fn new_count(&self) -> usize {
        self.words.values().filter(|w| w.is_new()).count()
    }

    pub fn stats(&self, now: DateTime<Utc>) -> SrsStats {
        SrsStats {
            total_words: self.words.len(),
            new_words: self.new_count(),
            learned_words: self.learned_count(),
            mastered_words: self.mastered_count(),
            due_now: self.words.values().filter(|w| w.is_due(now)).count(),
        }
    }
}
