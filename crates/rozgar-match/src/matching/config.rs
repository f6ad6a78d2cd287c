use serde::{Deserialize, Serialize};

/// Tunable boundaries for recommendation generation. Weights are fixed in
/// `scoring`; these knobs control persistence and windowing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Minimum composite score persisted as a recommendation (inclusive).
    pub score_threshold: u8,
    /// Only postings newer than this many days enter the candidate pool.
    pub job_window_days: i64,
    /// Recommendations expire this many days after generation.
    pub expiry_days: i64,
    /// Cap on new recommendations per generation call when no limit is given.
    pub default_limit: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            score_threshold: 50,
            job_window_days: 30,
            expiry_days: 30,
            default_limit: 20,
        }
    }
}
