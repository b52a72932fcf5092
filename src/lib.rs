//! Evaluation scoring engine for HR performance review campaigns.
//!
//! The `scoring` module holds the pure computation core (response aggregation,
//! bounded manual adjustments, grade derivation, result assembly) together
//! with the repository and notification seams that keep persistence and
//! delivery concerns outside the engine.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
