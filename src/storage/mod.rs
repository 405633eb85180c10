//! JSON blob persistence for the engines
//!
//! Each engine's full state is one named blob under the data directory:
//!
//! ```text
//! {data_dir}/
//! ├── vocabulary.json   # ReviewScheduler state
//! └── league.json       # LeagueEngine state
//! ```
//!
//! State is restored wholesale on startup and written wholesale on save.
//! Saving is an explicit call the owner makes after a batch of mutations;
//! the engines themselves never touch the filesystem. Engine RNGs are not
//! persisted; a restored engine reseeds from the clock.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::league::LeagueEngine;
use crate::srs::ReviewScheduler;

const VOCABULARY_FILE: &str = "vocabulary.json";
const LEAGUE_FILE: &str = "league.json";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// File-backed store for engine state blobs
pub struct StateStore {
    data_dir: PathBuf,
}

impl StateStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Create the data directory if it does not exist yet
    pub fn init(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    fn vocabulary_path(&self) -> PathBuf {
        self.data_dir.join(VOCABULARY_FILE)
    }

    fn league_path(&self) -> PathBuf {
        self.data_dir.join(LEAGUE_FILE)
    }

    /// Restore the scheduler, or `None` when no blob exists yet
    pub fn load_scheduler(&self) -> StorageResult<Option<ReviewScheduler>> {
        load_blob(&self.vocabulary_path())
    }

    pub fn save_scheduler(&self, scheduler: &ReviewScheduler) -> StorageResult<()> {
        save_blob(&self.vocabulary_path(), scheduler)
    }

    /// Restore the league engine, or `None` when no blob exists yet
    pub fn load_league(&self) -> StorageResult<Option<LeagueEngine>> {
        load_blob(&self.league_path())
    }

    pub fn save_league(&self, league: &LeagueEngine) -> StorageResult<()> {
        save_blob(&self.league_path(), league)
    }
}

fn load_blob<T: DeserializeOwned>(path: &Path) -> StorageResult<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value = serde_json::from_str(&content)?;
    info!(path = %path.display(), "restored state blob");
    Ok(Some(value))
}

fn save_blob<T: Serialize>(path: &Path, value: &T) -> StorageResult<()> {
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    info!(path = %path.display(), "saved state blob");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tempfile::TempDir;

    use super::*;
    use crate::srs::{ReviewQuality, VocabWord};

    fn store() -> (TempDir, StateStore) {
        let dir = TempDir::new().expect("create temp dir");
        let store = StateStore::new(dir.path());
        store.init().expect("init store");
        (dir, store)
    }

    #[test]
    fn test_missing_blobs_load_as_none() {
        let (_dir, store) = store();

        assert!(store.load_scheduler().expect("load").is_none());
        assert!(store.load_league().expect("load").is_none());
    }

    #[test]
    fn test_scheduler_roundtrip() {
        let (_dir, store) = store();
        let now = Utc::now();

        let mut scheduler = ReviewScheduler::new();
        let word = VocabWord::new("空", "そら", "sky", now);
        let id = word.id.clone();
        scheduler.add_word(word);
        scheduler.review_word(&id, ReviewQuality::Good, now);

        store.save_scheduler(&scheduler).expect("save");
        let restored = store
            .load_scheduler()
            .expect("load")
            .expect("blob present");

        assert_eq!(restored.word_count(), 1);
        assert_eq!(restored.get(&id).map(|w| w.repetitions), Some(1));
    }

    #[test]
    fn test_league_roundtrip() {
        let (_dir, store) = store();
        let now = Utc::now();

        let mut league = LeagueEngine::with_seed("Mika", "🦊", now, 3);
        league.add_xp(420);

        store.save_league(&league).expect("save");
        let restored = store.load_league().expect("load").expect("blob present");

        assert_eq!(restored.total_xp(), 420);
        assert_eq!(restored.current_tier(), league.current_tier());
        assert_eq!(
            restored.week().participants.len(),
            league.week().participants.len()
        );
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let (_dir, store) = store();
        let now = Utc::now();

        let mut scheduler = ReviewScheduler::new();
        scheduler.add_word(VocabWord::with_id("w1", "一", "いち", "one", now));
        store.save_scheduler(&scheduler).expect("save");

        scheduler.add_word(VocabWord::with_id("w2", "二", "に", "two", now));
        store.save_scheduler(&scheduler).expect("save");

        let restored = store
            .load_scheduler()
            .expect("load")
            .expect("blob present");
        assert_eq!(restored.word_count(), 2);
    }

    #[test]
    fn test_corrupt_blob_is_a_json_error() {
        let (dir, store) = store();
        std::fs::write(dir.path().join("vocabulary.json"), "not json").expect("write");

        assert!(matches!(
            store.load_scheduler(),
            Err(StorageError::Json(_))
        ));
    }
}
