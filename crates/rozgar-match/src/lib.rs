//! Job-match recommendation engine for the Rozgar platform.
//!
//! The `matching` module carries the scoring rules, the recommendation
//! lifecycle, and the HTTP boundary; `config` and `telemetry` hold the
//! service-level wiring shared with the API binary.

pub mod config;
pub mod error;
pub mod matching;
pub mod telemetry;
