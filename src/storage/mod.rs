//! Filesystem storage for historical rounds.
//!
//! - Generic JSONL reading and writing
//! - Per-player, per-season round files usable as a [`RoundSource`](crate::engine::RoundSource)

pub mod jsonl;
pub mod rounds;

use std::path::PathBuf;
use thiserror::Error;

pub use rounds::RoundStore;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn rounds_dir(&self) -> PathBuf {
        self.data_dir.join("rounds")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
