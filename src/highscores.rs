//! High score records
//!
//! One record per difficulty, persisted to LocalStorage. The simulation only
//! sees the [`HighScoreStore`] trait so it keeps running when storage is gone.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::platform::storage;

/// Persistence collaborator for high scores
///
/// Writes are fire-and-forget: implementations must swallow their own failures.
pub trait HighScoreStore {
    /// Best recorded score for a difficulty (0 when none)
    fn high_score(&self, difficulty: Difficulty) -> u64;
    /// Record a new best score for a difficulty
    fn set_high_score(&mut self, difficulty: Difficulty, score: u64);
}

/// Store used when persistence is unavailable
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStore;

impl HighScoreStore for NoStore {
    fn high_score(&self, _difficulty: Difficulty) -> u64 {
        0
    }

    fn set_high_score(&mut self, _difficulty: Difficulty, _score: u64) {}
}

/// Per-difficulty high score table
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub records: BTreeMap<Difficulty, u64>,
    /// Write through to storage on every new record
    #[serde(skip)]
    pub autosave: bool,
}

impl HighScores {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "pixel_void_highscores";

    /// Create an empty table (in-memory only)
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            autosave: false,
        }
    }

    /// Best score across all difficulties
    pub fn top_score(&self) -> Option<u64> {
        self.records.values().copied().max()
    }

    /// Load the table from storage; autosave is enabled on the result
    pub fn load() -> Self {
        let mut scores = match storage::read_json::<HighScores>(Self::STORAGE_KEY) {
            Some(scores) => {
                log::info!("Loaded {} high score records", scores.records.len());
                scores
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        };
        scores.autosave = true;
        scores
    }

    pub fn save(&self) {
        if storage::write_json(Self::STORAGE_KEY, self) {
            log::info!("High scores saved ({} records)", self.records.len());
        }
    }
}

impl HighScoreStore for HighScores {
    fn high_score(&self, difficulty: Difficulty) -> u64 {
        self.records.get(&difficulty).copied().unwrap_or(0)
    }

    fn set_high_score(&mut self, difficulty: Difficulty, score: u64) {
        self.records.insert(difficulty, score);
        if self.autosave {
            self.save();
        }
    }
}
