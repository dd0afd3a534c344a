//! Recommendation output.

use serde::{Deserialize, Serialize};

use super::Metrics;

/// The two baseline definitions a season can be tracked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaselineKind {
    /// Mean of every round in the prior season
    #[serde(rename = "season_average")]
    SeasonAverage,
    /// Mean of the final 8 rounds of the prior season
    #[serde(rename = "last_8_rounds")]
    Last8Rounds,
}

impl BaselineKind {
    /// Human-readable label used in reasoning lines.
    pub fn label(&self) -> &'static str {
        match self {
            BaselineKind::SeasonAverage => "season average",
            BaselineKind::Last8Rounds => "last 8 rounds",
        }
    }
}

impl std::fmt::Display for BaselineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BaselineKind::SeasonAverage => write!(f, "season_average"),
            BaselineKind::Last8Rounds => write!(f, "last_8_rounds"),
        }
    }
}

/// Lowest confidence ever reported; used for neutral and low-evidence outcomes.
pub const MIN_CONFIDENCE: u32 = 50;

/// Highest confidence ever reported.
pub const MAX_CONFIDENCE: u32 = 100;

/// Final engine output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub recommended: BaselineKind,

    /// Percentage in 50..=100
    pub confidence: u32,

    /// One line per fired rule plus a conclusion, or the fallback explanation
    pub reasoning: Vec<String>,

    pub metrics: Metrics,
}
