//! Data models for the vocabulary review system

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a vocabulary word came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WordSource {
    /// Entered by hand on the vocabulary page
    Manual,
    /// Imported from a content module (journey scenario, song, etc.)
    Content { module: String },
}

impl Default for WordSource {
    fn default() -> Self {
        Self::Manual
    }
}

/// Review quality rating on the four-way scale shown in the UI
///
/// `Again` and `Hard` count as failures; `Good` and `Easy` as successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewQuality {
    Again = 1,
    Hard = 2,
    Good = 3,
    Easy = 4,
}

impl ReviewQuality {
    pub fn from_score(score: u8) -> Option<Self> {
        match score {
            1 => Some(Self::Again),
            2 => Some(Self::Hard),
            3 => Some(Self::Good),
            4 => Some(Self::Easy),
            _ => None,
        }
    }

    pub fn score(&self) -> u8 {
        *self as u8
    }

    pub fn is_success(&self) -> bool {
        *self >= Self::Good
    }
}

/// A vocabulary word together with its spaced-repetition state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabWord {
    pub id: String,
    pub word: String,
    pub reading: String,
    pub meaning: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_meaning: Option<String>,
    #[serde(default)]
    pub source: WordSource,
    /// Current interval in days (0 = never successfully reviewed)
    #[serde(default)]
    pub interval: i32,
    /// SM-2 ease factor (default 2.5, floor 1.3)
    #[serde(default = "default_ease_factor")]
    pub ease_factor: f32,
    /// Consecutive successful reviews
    #[serde(default)]
    pub repetitions: i32,
    /// When the word becomes eligible for review
    pub due_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

fn default_ease_factor() -> f32 {
    2.5
}

impl VocabWord {
    /// Create a manually entered word, due immediately
    pub fn new(
        word: impl Into<String>,
        reading: impl Into<String>,
        meaning: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), word, reading, meaning, now)
    }

    /// Create a word with a caller-chosen id (content imports carry stable ids)
    pub fn with_id(
        id: impl Into<String>,
        word: impl Into<String>,
        reading: impl Into<String>,
        meaning: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            word: word.into(),
            reading: reading.into(),
            meaning: meaning.into(),
            example: None,
            example_meaning: None,
            source: WordSource::default(),
            interval: 0,
            ease_factor: default_ease_factor(),
            repetitions: 0,
            due_date: now,
            last_reviewed_at: None,
        }
    }

    pub fn with_example(
        mut self,
        example: impl Into<String>,
        example_meaning: impl Into<String>,
    ) -> Self {
        self.example = Some(example.into());
        self.example_meaning = Some(example_meaning.into());
        self
    }

    pub fn with_source(mut self, source: WordSource) -> Self {
        self.source = source;
        self
    }

    /// Whether the word is eligible for review at `now`
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_date <= now
    }

    /// A word is "new" until its first successful review
    pub fn is_new(&self) -> bool {
        self.repetitions == 0
    }

    /// A word counts as mastered once its interval reaches the mastery threshold
    pub fn is_mastered(&self) -> bool {
        self.interval >= super::algorithm::MASTERY_INTERVAL_DAYS
    }
}

/// Aggregate statistics over the vocabulary store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SrsStats {
    pub total_words: usize,
    /// Words with no successful review yet
    pub new_words: usize,
    /// Words with at least one successful review
    pub learned_words: usize,
    pub mastered_words: usize,
    pub due_now: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_from_score() {
        assert_eq!(ReviewQuality::from_score(1), Some(ReviewQuality::Again));
        assert_eq!(ReviewQuality::from_score(2), Some(ReviewQuality::Hard));
        assert_eq!(ReviewQuality::from_score(3), Some(ReviewQuality::Good));
        assert_eq!(ReviewQuality::from_score(4), Some(ReviewQuality::Easy));
        assert_eq!(ReviewQuality::from_score(0), None);
        assert_eq!(ReviewQuality::from_score(5), None);
    }

    #[test]
    fn test_quality_success_split() {
        assert!(!ReviewQuality::Again.is_success());
        assert!(!ReviewQuality::Hard.is_success());
        assert!(ReviewQuality::Good.is_success());
        assert!(ReviewQuality::Easy.is_success());
    }

    #[test]
    fn test_new_word_is_due_immediately() {
        let now = Utc::now();
        let word = VocabWord::new("犬", "いぬ", "dog", now);

        assert!(word.is_due(now));
        assert!(word.is_new());
        assert!(!word.is_mastered());
        assert_eq!(word.interval, 0);
        assert_eq!(word.repetitions, 0);
        assert!(word.last_reviewed_at.is_none());
    }

    #[test]
    fn test_word_serde_roundtrip_defaults() {
        let now = Utc::now();
        let word = VocabWord::new("水", "みず", "water", now)
            .with_example("水を飲む", "to drink water")
            .with_source(WordSource::Content {
                module: "journey".to_string(),
            });

        let json = serde_json::to_string(&word).expect("serialize");
        assert!(json.contains("easeFactor"));

        let back: VocabWord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.word, "水");
        assert_eq!(back.source, word.source);
        assert_eq!(back.example.as_deref(), Some("水を飲む"));
    }
}
