//! Best score persistence
//!
//! A single high-water mark: the most points the player has scored in one
//! match. Persisted to LocalStorage as a bare JSON number.

use serde::{Deserialize, Serialize};

use crate::platform::{Persistence, storage};

/// Player's best score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreStore {
    best: u32,
}

impl HighScoreStore {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "pongHighScore";

    /// In-memory store starting at `best`
    pub fn new(best: u32) -> Self {
        Self { best }
    }

    /// Load from LocalStorage, starting at zero when nothing is stored
    pub fn load() -> Self {
        match storage::load_json::<u32>(Self::STORAGE_KEY) {
            Some(best) => {
                log::info!("Loaded high score {}", best);
                Self { best }
            }
            None => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
        }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    fn save(&self) {
        if storage::save_json(Self::STORAGE_KEY, &self.best) {
            log::info!("High score saved ({})", self.best);
        }
    }
}

impl Persistence for HighScoreStore {
    fn load_high_score(&self) -> u32 {
        self.best
    }

    fn save_high_score_if_greater(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        self.save();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_higher_scores_replace() {
        let mut store = HighScoreStore::new(2);
        assert!(!store.save_high_score_if_greater(1));
        assert!(!store.save_high_score_if_greater(2));
        assert_eq!(store.load_high_score(), 2);

        assert!(store.save_high_score_if_greater(3));
        assert_eq!(store.best(), 3);
    }

    #[test]
    fn test_native_load_starts_at_zero() {
        assert_eq!(HighScoreStore::load().best(), 0);
    }
}
