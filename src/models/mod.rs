//! Core data models for the baseline engine.

mod metrics;
mod recommendation;
mod round;

pub use metrics::*;
pub use recommendation::*;
pub use round::*;
