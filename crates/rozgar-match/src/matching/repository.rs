use chrono::{DateTime, Utc};

use super::domain::{
    CandidateId, CandidateProfile, JobPosting, JobPostingId, Recommendation, RecommendationId,
};

/// Read access to candidate profiles, owned by the user subsystem.
pub trait CandidateDirectory: Send + Sync {
    fn fetch(&self, id: &CandidateId) -> Result<Option<CandidateProfile>, RepositoryError>;
}

/// Read access to job postings, owned by the community/post subsystem.
pub trait JobCatalog: Send + Sync {
    /// Postings created at or after the cutoff, any order.
    fn posted_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<JobPosting>, RepositoryError>;
    fn fetch(&self, id: &JobPostingId) -> Result<Option<JobPosting>, RepositoryError>;
}

/// Persistence for recommendations and their lifecycle state.
///
/// `insert_new` is the race guard for generation: it must atomically refuse a
/// record whose (candidate, job) pair already has a blocking record (see
/// `Recommendation::blocks_regeneration`), returning `Conflict`. A dismissed
/// or expired record for the pair is superseded by the insert instead.
pub trait RecommendationStore: Send + Sync {
    fn insert_new(&self, recommendation: Recommendation)
        -> Result<Recommendation, RepositoryError>;
    fn update(&self, recommendation: Recommendation) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &RecommendationId) -> Result<Option<Recommendation>, RepositoryError>;
    /// Latest record for the pair regardless of status, if any.
    fn for_pair(
        &self,
        candidate_id: &CandidateId,
        job_id: &JobPostingId,
    ) -> Result<Option<Recommendation>, RepositoryError>;
    /// Active, unexpired recommendations sorted by match score descending
    /// (job id ascending on ties), truncated to `limit`. Expiry is enforced
    /// here as a query filter; expired rows stay stored.
    fn active_for_candidate(
        &self,
        candidate_id: &CandidateId,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Recommendation>, RepositoryError>;
}

/// Error enumeration for repository failures. No operation retries; failures
/// propagate to the caller.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Deterministic ordering shared by the store contract and the generator:
/// score descending, then job id ascending so equal scores rank stably.
pub fn rank_recommendations(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(|a, b| {
        b.match_score
            .cmp(&a.match_score)
            .then_with(|| a.job_id.cmp(&b.job_id))
    });
}
