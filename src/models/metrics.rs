//! Derived performance metrics.

use serde::{Deserialize, Serialize};

/// Direction of recent scoring. Golf convention: falling scores are improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    #[default]
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Improving => write!(f, "improving"),
            TrendDirection::Declining => write!(f, "declining"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// Statistics the scorer decides on. Recomputed on every call, never stored.
///
/// `Default` is the all-zero, stable value reported when there is not enough
/// data to analyse.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Metrics {
    /// Population std dev of the last 8 rounds
    pub last8_std_dev: f64,

    /// Population std dev of the whole season
    pub season_std_dev: f64,

    /// Mean of the last 8 rounds
    pub last8_avg: f64,

    /// Mean of the whole season
    pub season_avg: f64,

    /// Trend classification over the last 8 rounds
    pub trend_direction: TrendDirection,

    /// Absolute regression slope (strokes per round)
    pub trend_strength: f64,

    /// 0-100, higher means more consistent
    pub consistency_score: f64,
}

impl Metrics {
    /// How many strokes better the recent form is than the season average.
    /// Negative when recent rounds are worse.
    pub fn recent_improvement(&self) -> f64 {
        self.season_avg - self.last8_avg
    }
}
