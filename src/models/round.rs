//! Historical round data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A season identifier (calendar year).
pub type Season = i32;

/// Opaque player identifier supplied by the surrounding application.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Season preceding `target`, whose rounds anchor the baseline for `target`.
pub fn prior_season(target: Season) -> Season {
    target.saturating_sub(1)
}

/// One completed round. Lower scores are better.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundScore {
    /// Total strokes for the round
    pub score: f64,

    /// When the round was played
    pub date: DateTime<Utc>,
}

impl RoundScore {
    pub fn new(score: f64, date: DateTime<Utc>) -> Self {
        Self { score, date }
    }
}

/// Extract the raw scores, preserving order.
pub fn scores_of(rounds: &[RoundScore]) -> Vec<f64> {
    rounds.iter().map(|r| r.score).collect()
}
