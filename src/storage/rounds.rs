//! File-backed round store.
//!
//! Layout: `<data_dir>/rounds/<player_id>/<season>.jsonl`, one [`RoundScore`]
//! per line.

use std::collections::HashSet;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::jsonl::{JsonlReader, JsonlWriter};
use super::{StorageConfig, StorageError};
use crate::engine::{RoundSource, SourceError};
use crate::models::{PlayerId, RoundScore, Season};

/// Reads and writes player seasons under a data directory.
#[derive(Debug, Clone)]
pub struct RoundStore {
    config: StorageConfig,
}

impl RoundStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Path of the season file, rejecting ids that would escape the store.
    pub fn season_path(&self, player_id: &PlayerId, season: Season) -> Result<PathBuf, StorageError> {
        let id = player_id.as_str();
        if id.is_empty() || id == "." || id == ".." || id.contains(['/', '\\']) {
            return Err(StorageError::InvalidPath(id.to_string()));
        }

        Ok(self
            .config
            .rounds_dir()
            .join(id)
            .join(format!("{}.jsonl", season)))
    }

    /// Load a season sorted ascending by date. Missing seasons are empty.
    pub fn load_season(
        &self,
        player_id: &PlayerId,
        season: Season,
    ) -> Result<Vec<RoundScore>, StorageError> {
        let reader: JsonlReader<RoundScore> = JsonlReader::new(self.season_path(player_id, season)?);
        let mut rounds = reader.read_all()?;
        rounds.sort_by_key(|r| r.date);

        debug!(
            player = %player_id,
            season,
            rounds = rounds.len(),
            "Loaded season from {:?}",
            reader.path()
        );
        Ok(rounds)
    }

    /// Add rounds to a season. Rounds whose date is already stored, or repeated
    /// within `rounds`, are skipped. Returns how many were written.
    pub fn append_rounds(
        &self,
        player_id: &PlayerId,
        season: Season,
        rounds: &[RoundScore],
    ) -> Result<usize, StorageError> {
        let mut seen: HashSet<DateTime<Utc>> = self
            .load_season(player_id, season)?
            .iter()
            .map(|r| r.date)
            .collect();
        let fresh: Vec<RoundScore> = rounds
            .iter()
            .filter(|r| seen.insert(r.date))
            .copied()
            .collect();

        let skipped = rounds.len() - fresh.len();
        if skipped > 0 {
            warn!(
                player = %player_id,
                season,
                "Skipped {} rounds already stored for the same date",
                skipped
            );
        }

        JsonlWriter::new(self.season_path(player_id, season)?).append_batch(&fresh)
    }

    /// Replace a season, stored in date order.
    pub fn write_season(
        &self,
        player_id: &PlayerId,
        season: Season,
        rounds: &[RoundScore],
    ) -> Result<usize, StorageError> {
        let mut sorted = rounds.to_vec();
        sorted.sort_by_key(|r| r.date);
        JsonlWriter::new(self.season_path(player_id, season)?).write_all(&sorted)
    }
}

#[async_trait]
impl RoundSource for RoundStore {
    fn name(&self) -> &'static str {
        "jsonl"
    }

    async fn fetch_prior_season_rounds(
        &self,
        player_id: &PlayerId,
        season: Season,
    ) -> Result<Vec<RoundScore>, SourceError> {
        let store = self.clone();
        let player_id = player_id.clone();
        let rounds = tokio::task::spawn_blocking(move || store.load_season(&player_id, season))
            .await
            .map_err(|e| SourceError::Unavailable(format!("Round loader task failed: {}", e)))??;
        Ok(rounds)
    }
}
