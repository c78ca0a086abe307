//! High score leaderboard system
//!
//! Persisted to the config directory, tracks the top 10 scores.

use serde::{Deserialize, Serialize};

use crate::persistence;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score of the session
    pub score: i64,
    /// Difficulty level reached
    pub level: u32,
    /// Unix timestamp (seconds) when achieved
    pub timestamp: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Config file name
    const FILE: &'static str = "highscores.json";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: i64) -> bool {
        if score <= 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a new score to the leaderboard (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn add_score(&mut self, score: i64, level: u32, timestamp: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            level,
            timestamp,
        };

        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<i64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from the config directory
    pub fn load() -> Self {
        match persistence::load_json::<Self>(Self::FILE) {
            Some(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save high scores to the config directory
    pub fn save(&self) {
        persistence::save_json(Self::FILE, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_insert_in_rank_order() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(10, 5, 0), Some(1));
        assert_eq!(scores.add_score(30, 9, 1), Some(1));
        assert_eq!(scores.add_score(20, 7, 2), Some(2));
        assert_eq!(scores.top_score(), Some(30));
        assert_eq!(
            scores.entries.iter().map(|e| e.score).collect::<Vec<_>>(),
            vec![30, 20, 10]
        );
    }

    #[test]
    fn test_non_positive_scores_never_qualify() {
        let mut scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert!(!scores.qualifies(-4));
        assert_eq!(scores.add_score(0, 1, 0), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_leaderboard_truncates_at_ten() {
        let mut scores = HighScores::new();
        for i in 1..=12 {
            scores.add_score(i, 1, i as u64);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(12));
        // 1 and 2 fell off the bottom
        assert_eq!(scores.entries.last().unwrap().score, 3);
        assert!(!scores.qualifies(3));
        assert!(scores.qualifies(4));
    }
}
