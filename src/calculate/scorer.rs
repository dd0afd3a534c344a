//! Rule-based baseline scoring.
//!
//! Rules run in a fixed order. Each rule that fires adds one reasoning line and
//! moves a signed score: positive favours the last 8 rounds, negative (or zero)
//! favours the season average. Rule order is observable through the reasoning
//! list and must not change.

use tracing::debug;

use crate::models::{
    BaselineKind, Metrics, RecommendationResult, TrendDirection, MAX_CONFIDENCE, MIN_CONFIDENCE,
};

/// Confidence points per unit of score.
const CONFIDENCE_PER_POINT: u32 = 15;

/// Every rule the scorer knows, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Last-8 std dev below 2.0
    VeryHighConsistency,
    /// Last-8 std dev below 3.0
    GoodConsistency,
    /// Last-8 std dev above 4.0
    LowConsistency,
    /// Improving with strength above 0.5
    ImprovingTrend,
    DecliningTrend,
    /// Last 8 more than 2.0 strokes better than the season
    RecentFormBetter,
    /// Last 8 more than 1.0 stroke worse than the season
    RecentFormWorse,
    /// Consistency score above 80
    HighConsistencyScore,
}

impl Rule {
    /// Position of the rule's group in the evaluation order (1-4).
    /// Rules sharing a group are mutually exclusive.
    pub fn group(&self) -> u8 {
        match self {
            Rule::VeryHighConsistency | Rule::GoodConsistency | Rule::LowConsistency => 1,
            Rule::ImprovingTrend | Rule::DecliningTrend => 2,
            Rule::RecentFormBetter | Rule::RecentFormWorse => 3,
            Rule::HighConsistencyScore => 4,
        }
    }

    /// Score contribution when the rule fires.
    pub fn delta(&self) -> i32 {
        match self {
            Rule::VeryHighConsistency => 3,
            Rule::GoodConsistency => 2,
            Rule::LowConsistency => -2,
            Rule::ImprovingTrend => 3,
            Rule::DecliningTrend => -2,
            Rule::RecentFormBetter => 2,
            Rule::RecentFormWorse => -2,
            Rule::HighConsistencyScore => 1,
        }
    }
}

/// A rule that fired, with its justification.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleHit {
    pub rule: Rule,
    pub delta: i32,
    pub reason: String,
}

/// Outcome of running every rule against a set of metrics.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scorecard {
    /// Fired rules in evaluation order
    pub hits: Vec<RuleHit>,
    pub score: i32,
}

impl Scorecard {
    fn fire(&mut self, rule: Rule, reason: String) {
        let delta = rule.delta();
        debug!(?rule, delta, "Scoring rule fired");
        self.score += delta;
        self.hits.push(RuleHit {
            rule,
            delta,
            reason,
        });
    }

    /// Baseline favoured by the accumulated score.
    pub fn recommended(&self) -> BaselineKind {
        if self.score > 0 {
            BaselineKind::Last8Rounds
        } else {
            BaselineKind::SeasonAverage
        }
    }

    /// `min(100, |score| * 15 + 50)`.
    pub fn confidence(&self) -> u32 {
        (self.score.unsigned_abs() * CONFIDENCE_PER_POINT + MIN_CONFIDENCE).min(MAX_CONFIDENCE)
    }
}

/// Run the rule table against `metrics`.
pub fn score_metrics(metrics: &Metrics) -> Scorecard {
    let mut card = Scorecard::default();

    let std_dev = metrics.last8_std_dev;
    if std_dev < 2.0 {
        card.fire(
            Rule::VeryHighConsistency,
            format!(
                "Very high consistency in the last 8 rounds (std dev {:.1})",
                std_dev
            ),
        );
    } else if std_dev < 3.0 {
        card.fire(
            Rule::GoodConsistency,
            format!("Good consistency in the last 8 rounds (std dev {:.1})", std_dev),
        );
    } else if std_dev > 4.0 {
        card.fire(
            Rule::LowConsistency,
            format!(
                "Low consistency in the last 8 rounds (std dev {:.1}), the season average is steadier",
                std_dev
            ),
        );
    }

    match metrics.trend_direction {
        TrendDirection::Improving if metrics.trend_strength > 0.5 => card.fire(
            Rule::ImprovingTrend,
            format!(
                "Clear improving trend ({:.1} strokes per round)",
                metrics.trend_strength
            ),
        ),
        TrendDirection::Declining => card.fire(
            Rule::DecliningTrend,
            format!(
                "Declining trend ({:.1} strokes per round), recent form may not hold",
                metrics.trend_strength
            ),
        ),
        _ => {}
    }

    let improvement = metrics.recent_improvement();
    if improvement > 2.0 {
        card.fire(
            Rule::RecentFormBetter,
            format!(
                "Last 8 rounds average {:.1} strokes better than the season ({:.1} vs {:.1})",
                improvement, metrics.last8_avg, metrics.season_avg
            ),
        );
    } else if improvement < -1.0 {
        card.fire(
            Rule::RecentFormWorse,
            format!(
                "Last 8 rounds average {:.1} strokes worse than the season ({:.1} vs {:.1})",
                -improvement, metrics.last8_avg, metrics.season_avg
            ),
        );
    }

    if metrics.consistency_score > 80.0 {
        card.fire(
            Rule::HighConsistencyScore,
            format!(
                "High consistency score ({:.1}/100)",
                metrics.consistency_score
            ),
        );
    }

    card
}

/// Score `metrics` and build the final result, ending the reasoning with a
/// conclusion line.
pub fn recommend(metrics: Metrics) -> RecommendationResult {
    let card = score_metrics(&metrics);
    let recommended = card.recommended();
    let confidence = card.confidence();

    let mut reasoning: Vec<String> = card.hits.into_iter().map(|h| h.reason).collect();
    reasoning.push(format!(
        "Recommended baseline: {} ({}% confidence, score {:+})",
        recommended.label(),
        confidence,
        card.score
    ));

    RecommendationResult {
        recommended,
        confidence,
        reasoning,
        metrics,
    }
}
