//! # Baseline Engine
//!
//! Decides whether a golfer's next season should be tracked against their
//! prior-season average or the average of their last 8 rounds, and explains
//! the decision.
//!
//! ## Architecture
//!
//! - **models**: Rounds, metrics and recommendation results
//! - **calculate**: Statistics, trend fitting and rule-based scoring
//! - **engine**: Orchestration over a pluggable round source, plus the fallback
//! - **storage**: JSONL round store
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod config;
pub mod engine;
pub mod models;
pub mod storage;

pub use engine::{recommend_from_rounds, BaselineEngine, RoundSource};
pub use models::*;
