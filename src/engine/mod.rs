//! Baseline recommendation orchestration.
//!
//! Fetches the prior season's rounds, checks there are enough to analyse, then
//! either runs the statistics and scoring pipeline or returns the fallback.
//!
//! Fetch failures are handled one of two ways, chosen by the caller:
//! - [`BaselineEngine::recommend_baseline`] treats a failed fetch as an empty
//!   season and returns the fallback.
//! - [`BaselineEngine::try_recommend_baseline`] propagates the [`SourceError`].

pub mod source;

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::calculate::{self, RECENT_WINDOW};
use crate::models::{
    prior_season, BaselineKind, Metrics, PlayerId, RecommendationResult, RoundScore, Season,
    MIN_CONFIDENCE,
};

pub use source::{MemoryRoundSource, RoundSource, SourceError};

/// Minimum rounds in the prior season before any analysis is attempted.
pub const MIN_ROUNDS: usize = RECENT_WINDOW;

/// Result for a season too short to analyse.
///
/// Always recommends the season average at minimum confidence with all-zero
/// metrics. No statistics are computed.
pub fn fallback(round_count: usize) -> RecommendationResult {
    RecommendationResult {
        recommended: BaselineKind::SeasonAverage,
        confidence: MIN_CONFIDENCE,
        reasoning: vec![
            format!(
                "Insufficient data: {} rounds recorded last season, at least {} are needed for analysis",
                round_count, MIN_ROUNDS
            ),
            "Defaulting to the season average baseline".to_string(),
        ],
        metrics: Metrics::default(),
    }
}

/// Recommend a baseline from an already-fetched season, ascending by date.
pub fn recommend_from_rounds(rounds: &[RoundScore]) -> RecommendationResult {
    if rounds.len() < MIN_ROUNDS {
        debug!(rounds = rounds.len(), "Not enough rounds, using fallback");
        return fallback(rounds.len());
    }

    let metrics = calculate::compute_metrics(rounds);
    debug!(?metrics, "Computed baseline metrics");

    calculate::recommend(metrics)
}

/// Entry point wiring a [`RoundSource`] to the pipeline. Holds no state between
/// calls and can be shared across tasks.
#[derive(Clone)]
pub struct BaselineEngine {
    source: Arc<dyn RoundSource>,
}

impl BaselineEngine {
    pub fn new(source: Arc<dyn RoundSource>) -> Self {
        Self { source }
    }

    /// Recommend a baseline for `target_season` from the season before it.
    ///
    /// A failed fetch is logged and treated as a season with no rounds.
    pub async fn recommend_baseline(
        &self,
        player_id: &PlayerId,
        target_season: Season,
    ) -> RecommendationResult {
        let season = prior_season(target_season);
        let rounds = match self.source.fetch_prior_season_rounds(player_id, season).await {
            Ok(rounds) => rounds,
            Err(e) => {
                warn!(
                    player = %player_id,
                    season,
                    source = self.source.name(),
                    "Failed to fetch rounds, falling back to season average: {}",
                    e
                );
                Vec::new()
            }
        };

        self.finish(player_id, target_season, &rounds)
    }

    /// Like [`recommend_baseline`](Self::recommend_baseline), but returns fetch
    /// failures instead of falling back.
    pub async fn try_recommend_baseline(
        &self,
        player_id: &PlayerId,
        target_season: Season,
    ) -> Result<RecommendationResult, SourceError> {
        let season = prior_season(target_season);
        let rounds = self
            .source
            .fetch_prior_season_rounds(player_id, season)
            .await?;

        Ok(self.finish(player_id, target_season, &rounds))
    }

    fn finish(
        &self,
        player_id: &PlayerId,
        target_season: Season,
        rounds: &[RoundScore],
    ) -> RecommendationResult {
        let result = recommend_from_rounds(rounds);
        info!(
            player = %player_id,
            target_season,
            rounds = rounds.len(),
            recommended = %result.recommended,
            confidence = result.confidence,
            "Baseline recommendation computed"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrendDirection;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn rounds(scores: &[f64]) -> Vec<RoundScore> {
        let start = Utc.with_ymd_and_hms(2025, 3, 15, 9, 0, 0).unwrap();
        scores
            .iter()
            .enumerate()
            .map(|(i, &s)| RoundScore::new(s, start + Duration::days(i as i64 * 5)))
            .collect()
    }

    /// Twelve steady rounds around 80, then eight improving rounds.
    fn improving_season() -> Vec<f64> {
        vec![
            80.0, 79.0, 81.0, 78.0, 80.0, 82.0, 79.0, 80.0, 78.0, 81.0, 79.0, 80.0, 76.0, 75.0,
            75.0, 74.0, 73.0, 73.0, 72.0, 71.0,
        ]
    }

    struct FailingSource;

    #[async_trait]
    impl RoundSource for FailingSource {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn fetch_prior_season_rounds(
            &self,
            _player_id: &PlayerId,
            _season: Season,
        ) -> Result<Vec<RoundScore>, SourceError> {
            Err(SourceError::Unavailable("connection refused".to_string()))
        }
    }

    fn engine_with(player: &str, season: Season, scores: &[f64]) -> BaselineEngine {
        let source = MemoryRoundSource::new().with_season(player, season, rounds(scores));
        BaselineEngine::new(Arc::new(source))
    }

    #[test]
    fn test_insufficient_data_for_every_short_season() {
        for n in 0..MIN_ROUNDS {
            let result = recommend_from_rounds(&rounds(&vec![70.0; n]));

            assert_eq!(result.recommended, BaselineKind::SeasonAverage);
            assert_eq!(result.confidence, 50);
            assert_eq!(result.metrics, Metrics::default());
            assert_eq!(result.reasoning.len(), 2);
            assert!(result.reasoning[0].starts_with("Insufficient data"));
            assert_eq!(
                result.reasoning[1],
                "Defaulting to the season average baseline"
            );
        }
    }

    #[test]
    fn test_fallback_metrics_are_stable() {
        let result = fallback(3);
        assert_eq!(result.metrics.trend_direction, TrendDirection::Stable);
        assert!(result.reasoning[0].contains("3 rounds"));
    }

    #[test]
    fn test_exactly_eight_rounds_are_analysed() {
        let result = recommend_from_rounds(&rounds(&[72.0; 8]));

        assert_eq!(result.metrics.last8_std_dev, 0.0);
        assert_eq!(result.metrics.consistency_score, 100.0);
        assert_eq!(result.metrics.trend_direction, TrendDirection::Stable);
        // sd 0 -> +3, score 100 -> +1
        assert_eq!(result.recommended, BaselineKind::Last8Rounds);
        assert_eq!(result.confidence, 100);
        assert_eq!(result.reasoning.len(), 3);
    }

    #[test]
    fn test_improving_season_recommends_last_8() {
        let result = recommend_from_rounds(&rounds(&improving_season()));

        assert_eq!(result.recommended, BaselineKind::Last8Rounds);
        assert_eq!(result.confidence, 100);
        assert_eq!(result.metrics.trend_direction, TrendDirection::Improving);
        assert!((result.metrics.last8_avg - 73.625).abs() < 1e-9);
        assert!((result.metrics.season_avg - 77.3).abs() < 1e-9);
        assert!(result.metrics.consistency_score > 80.0);
        assert_eq!(result.reasoning.len(), 5);
    }

    #[test]
    fn test_volatile_declining_season_recommends_season_average() {
        let scores = [
            72.0, 73.0, 72.0, 74.0, 72.0, 73.0, 72.0, 73.0, 74.0, 75.0, 73.0, 79.0, 70.0, 81.0,
            76.0, 69.0, 83.0, 77.0, 80.0, 84.0,
        ];
        let result = recommend_from_rounds(&rounds(&scores));

        assert_eq!(result.metrics.trend_direction, TrendDirection::Declining);
        assert!(result.metrics.last8_std_dev > 4.0);
        assert_eq!(result.recommended, BaselineKind::SeasonAverage);
        assert_eq!(result.confidence, 100);
    }

    #[test]
    fn test_recommendation_is_deterministic() {
        let season = rounds(&improving_season());
        let first = recommend_from_rounds(&season);
        let second = recommend_from_rounds(&season);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_engine_reads_prior_season() {
        let engine = engine_with("p1", 2025, &improving_season());

        let result = engine
            .recommend_baseline(&PlayerId::from("p1"), 2026)
            .await;
        assert_eq!(result.recommended, BaselineKind::Last8Rounds);

        // Rounds for 2025 do not count towards a 2025 baseline
        let same_season = engine
            .recommend_baseline(&PlayerId::from("p1"), 2025)
            .await;
        assert_eq!(same_season, fallback(0));
    }

    #[tokio::test]
    async fn test_fetch_failure_maps_to_fallback() {
        let engine = BaselineEngine::new(Arc::new(FailingSource));

        let result = engine
            .recommend_baseline(&PlayerId::from("p1"), 2026)
            .await;
        assert_eq!(result, fallback(0));
    }

    #[tokio::test]
    async fn test_try_recommend_propagates_fetch_failure() {
        let engine = BaselineEngine::new(Arc::new(FailingSource));

        let err = engine
            .try_recommend_baseline(&PlayerId::from("p1"), 2026)
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_try_recommend_matches_recommend_on_success() {
        let engine = engine_with("p1", 2025, &improving_season());
        let player = PlayerId::from("p1");

        let a = engine.try_recommend_baseline(&player, 2026).await.unwrap();
        let b = engine.recommend_baseline(&player, 2026).await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_engine_is_shareable_across_tasks() {
        let engine = engine_with("p1", 2025, &improving_season());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                tokio::spawn(async move {
                    engine
                        .recommend_baseline(&PlayerId::from("p1"), 2026)
                        .await
                })
            })
            .collect();

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }
        assert!(results.windows(2).all(|w| w[0] == w[1]));
    }
}
