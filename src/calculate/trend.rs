//! Trend detection over recent rounds.
//!
//! Fits an ordinary least squares line through the scores, using the 1-based
//! position of each round as x. Dates are ignored.

use crate::models::TrendDirection;

/// Slope magnitude (strokes per round) beyond which a trend is reported.
pub const TREND_THRESHOLD: f64 = 0.3;

/// Result of a trend fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendAnalysis {
    pub slope: f64,
    pub direction: TrendDirection,
    /// `|slope|`
    pub strength: f64,
}

/// OLS slope of `scores` against x = 1..=n.
///
/// Needs at least two points; the callers only pass full recent windows.
pub fn regression_slope(scores: &[f64]) -> f64 {
    let n = scores.len() as f64;
    let sum_x: f64 = (1..=scores.len()).map(|x| x as f64).sum();
    let sum_y: f64 = scores.iter().sum();
    let sum_xy: f64 = scores
        .iter()
        .enumerate()
        .map(|(i, y)| (i + 1) as f64 * y)
        .sum();
    let sum_xx: f64 = (1..=scores.len()).map(|x| (x as f64).powi(2)).sum();

    (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x.powi(2))
}

/// Classify a slope. Lower scores are better, so a negative slope improves.
pub fn classify_slope(slope: f64) -> TrendDirection {
    if slope < -TREND_THRESHOLD {
        TrendDirection::Improving
    } else if slope > TREND_THRESHOLD {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    }
}

/// Fit and classify the trend of `scores` (oldest first).
pub fn analyze_trend(scores: &[f64]) -> TrendAnalysis {
    let slope = regression_slope(scores);
    TrendAnalysis {
        slope,
        direction: classify_slope(slope),
        strength: slope.abs(),
    }
}
