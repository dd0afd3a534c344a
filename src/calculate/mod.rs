//! Statistics calculation engine.
//!
//! Computes derived metrics from a season of rounds:
//! - Mean and population standard deviation
//! - Consistency score
//! - Trend analysis over recent rounds (see [`trend`])
//! - Rule-based baseline scoring (see [`scorer`])

pub mod scorer;
pub mod trend;

use crate::models::{scores_of, Metrics, RoundScore};

pub use scorer::{recommend, score_metrics, Rule, RuleHit, Scorecard};
pub use trend::{analyze_trend, regression_slope, TrendAnalysis, TREND_THRESHOLD};

/// Number of most recent rounds forming the "last 8" window.
pub const RECENT_WINDOW: usize = 8;

/// Arithmetic mean. `values` must be non-empty.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by n, not n - 1).
pub fn standard_deviation(values: &[f64]) -> f64 {
    let avg = mean(values);
    let squared_diffs: Vec<f64> = values.iter().map(|v| (v - avg).powi(2)).collect();
    mean(&squared_diffs).sqrt()
}

/// Consistency score in [0, 100]: each stroke of std dev costs 10 points.
pub fn consistency_score(std_dev: f64) -> f64 {
    (100.0 - std_dev * 10.0).max(0.0)
}

/// Compute [`Metrics`] for a season.
///
/// `rounds` must hold at least [`RECENT_WINDOW`] entries in ascending date order;
/// the final [`RECENT_WINDOW`] are the recent window.
pub fn compute_metrics(rounds: &[RoundScore]) -> Metrics {
    let season = scores_of(rounds);
    let last8 = &season[season.len().saturating_sub(RECENT_WINDOW)..];

    let last8_std_dev = standard_deviation(last8);
    let trend = analyze_trend(last8);

    Metrics {
        last8_std_dev,
        season_std_dev: standard_deviation(&season),
        last8_avg: mean(last8),
        season_avg: mean(&season),
        trend_direction: trend.direction,
        trend_strength: trend.strength,
        consistency_score: consistency_score(last8_std_dev),
    }
}
