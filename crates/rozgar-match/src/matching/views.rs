use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{
    CandidateId, JobPosting, JobPostingId, MatchFactors, Recommendation, RecommendationId,
};

/// Dashboard cards carry at most this many description characters.
pub const DESCRIPTION_EXCERPT_CHARS: usize = 200;

/// One recommendation joined with its posting, shaped for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationCard {
    pub recommendation_id: RecommendationId,
    pub job_id: JobPostingId,
    pub job_title: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    pub job_type: &'static str,
    pub match_score: u8,
    pub match_factors: MatchFactors,
    pub reason: String,
    pub posted_at: DateTime<Utc>,
    pub description_excerpt: String,
    pub skills: Vec<String>,
    pub viewed: bool,
    pub clicked: bool,
}

impl RecommendationCard {
    pub fn from_parts(recommendation: &Recommendation, job: &JobPosting) -> Self {
        Self {
            recommendation_id: recommendation.id.clone(),
            job_id: job.id.clone(),
            job_title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            salary: job.salary.clone(),
            job_type: job.job_type.label(),
            match_score: recommendation.match_score,
            match_factors: recommendation.factors.clone(),
            reason: recommendation.reason.clone(),
            posted_at: job.posted_at,
            description_excerpt: job.description_excerpt(DESCRIPTION_EXCERPT_CHARS),
            skills: job.required_skills.clone(),
            viewed: recommendation.interactions.viewed,
            clicked: recommendation.interactions.clicked,
        }
    }
}

/// Dashboard payload: freshly generated count plus the active ranked list.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationDashboard {
    pub candidate_id: CandidateId,
    pub newly_generated: usize,
    pub recommendations: Vec<RecommendationCard>,
}

/// Sanitized view of a single recommendation after an interaction update.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView {
    pub recommendation_id: RecommendationId,
    pub job_id: JobPostingId,
    pub status: &'static str,
    pub match_score: u8,
    pub reason: String,
    pub viewed: bool,
    pub clicked: bool,
    pub saved: bool,
    pub dismissed: bool,
}

impl RecommendationView {
    pub fn from_recommendation(recommendation: &Recommendation) -> Self {
        Self {
            recommendation_id: recommendation.id.clone(),
            job_id: recommendation.job_id.clone(),
            status: recommendation.status.label(),
            match_score: recommendation.match_score,
            reason: recommendation.reason.clone(),
            viewed: recommendation.interactions.viewed,
            clicked: recommendation.interactions.clicked,
            saved: recommendation.interactions.saved,
            dismissed: recommendation.interactions.dismissed,
        }
    }
}
