//! Job-match recommendation core: factor scoring, composite ranking,
//! generation, and the recommendation lifecycle.

pub mod config;
pub mod domain;
pub mod factors;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use config::MatchingConfig;
pub use domain::{
    CandidateId, CandidateProfile, InteractionLog, JobPosting, JobPostingId, JobType, MatchFactors,
    Recommendation, RecommendationId, RecommendationStatus,
};
pub use factors::{FactorVerdict, SkillMatch};
pub use repository::{
    rank_recommendations, CandidateDirectory, JobCatalog, RecommendationStore, RepositoryError,
};
pub use router::recommendation_router;
pub use scoring::{composite_score, evaluate, reason_for, MatchEvaluation, MatchWeights, MATCH_WEIGHTS};
pub use service::{RecommendationService, ServiceError};
pub use views::{
    RecommendationCard, RecommendationDashboard, RecommendationView, DESCRIPTION_EXCERPT_CHARS,
};
