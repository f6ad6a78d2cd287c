//! Composite scorer: combines the four factor scores into one weighted match
//! score and a templated reason string.

use chrono::{DateTime, Utc};

use super::domain::{CandidateProfile, JobPosting, MatchFactors};
use super::factors::{experience_match, location_match, recency_match, skill_match};

/// Fixed factor weights. Skill coverage dominates; freshness is the smallest
/// contributor. The sum must stay at 1.0 so the composite remains 0-100.
pub const MATCH_WEIGHTS: MatchWeights = MatchWeights {
    skill: 0.40,
    location: 0.25,
    experience: 0.20,
    recency: 0.15,
};

#[derive(Debug, Clone, Copy)]
pub struct MatchWeights {
    pub skill: f64,
    pub location: f64,
    pub experience: f64,
    pub recency: f64,
}

impl MatchWeights {
    pub fn sum(&self) -> f64 {
        self.skill + self.location + self.experience + self.recency
    }
}

/// Reason buckets: inclusive lower bounds checked in descending order, first
/// match wins. The final bucket catches everything below 60.
const REASON_BUCKETS: &[(u8, &str)] = &[
    (90, "Perfect match for your skills and location!"),
    (80, "Great opportunity matching your profile"),
    (70, "Good fit based on your experience"),
    (60, "Interesting opportunity to explore"),
    (0, "Potential growth opportunity"),
];

/// Deterministic outcome of scoring one (candidate, job) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEvaluation {
    pub score: u8,
    pub factors: MatchFactors,
    pub reason: &'static str,
}

/// Score a candidate against a posting. Pure: no I/O, no side effects.
pub fn evaluate(candidate: &CandidateProfile, job: &JobPosting, now: DateTime<Utc>) -> MatchEvaluation {
    let skill = skill_match(&candidate.skills, &job.required_skills);
    let location = location_match(candidate.location.as_deref(), job.location.as_deref());
    let experience = experience_match(
        candidate.work_experience.as_deref(),
        job.required_experience.as_deref(),
    );
    let recency = recency_match(job.posted_at, now);

    let factors = MatchFactors {
        skill: skill.score,
        location: location.score,
        experience: experience.score,
        recency: recency.score,
        matched_skills: skill.matched,
        missing_skills: skill.missing,
    };

    let score = composite_score(&factors);

    MatchEvaluation {
        score,
        factors,
        reason: reason_for(score),
    }
}

/// Weighted sum of the factor scores, rounded half away from zero. All
/// inputs are non-negative, so this is round-half-up: 74.5 becomes 75.
pub fn composite_score(factors: &MatchFactors) -> u8 {
    let weighted = f64::from(factors.skill) * MATCH_WEIGHTS.skill
        + f64::from(factors.location) * MATCH_WEIGHTS.location
        + f64::from(factors.experience) * MATCH_WEIGHTS.experience
        + f64::from(factors.recency) * MATCH_WEIGHTS.recency;
    weighted.round().clamp(0.0, 100.0) as u8
}

/// Narrative reason for a composite score, from the bucket table.
pub fn reason_for(score: u8) -> &'static str {
    REASON_BUCKETS
        .iter()
        .find(|(floor, _)| score >= *floor)
        .map(|(_, reason)| *reason)
        .unwrap_or("Potential growth opportunity")
}
