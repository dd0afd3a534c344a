//! Round data sources.
//!
//! The engine never reads storage directly; it asks a [`RoundSource`] for the
//! prior season's rounds.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{PlayerId, RoundScore, Season};
use crate::storage::StorageError;

/// Errors a round source can report.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Round source unavailable: {0}")]
    Unavailable(String),
}

/// Supplies completed rounds for a player and season, ascending by date.
#[async_trait]
pub trait RoundSource: Send + Sync {
    /// Source identifier for logging.
    fn name(&self) -> &'static str;

    /// Fetch every round `player_id` completed in `season`.
    async fn fetch_prior_season_rounds(
        &self,
        player_id: &PlayerId,
        season: Season,
    ) -> Result<Vec<RoundScore>, SourceError>;
}

/// In-memory source keyed by player and season.
#[derive(Debug, Clone, Default)]
pub struct MemoryRoundSource {
    rounds: HashMap<(PlayerId, Season), Vec<RoundScore>>,
}

impl MemoryRoundSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a season of rounds, replacing any previous entry.
    pub fn with_season(
        mut self,
        player_id: impl Into<PlayerId>,
        season: Season,
        rounds: Vec<RoundScore>,
    ) -> Self {
        self.rounds.insert((player_id.into(), season), rounds);
        self
    }
}

#[async_trait]
impl RoundSource for MemoryRoundSource {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn fetch_prior_season_rounds(
        &self,
        player_id: &PlayerId,
        season: Season,
    ) -> Result<Vec<RoundScore>, SourceError> {
        Ok(self
            .rounds
            .get(&(player_id.clone(), season))
            .cloned()
            .unwrap_or_default())
    }
}
