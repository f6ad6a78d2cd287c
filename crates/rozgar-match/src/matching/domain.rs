use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for job-seeking candidates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobPostingId(pub String);

impl fmt::Display for JobPostingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for persisted recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecommendationId(pub String);

impl fmt::Display for RecommendationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The matching-relevant slice of a candidate profile. Owned by the user
/// subsystem; read-only to the scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: CandidateId,
    pub name: String,
    pub skills: Vec<String>,
    pub location: Option<String>,
    pub work_experience: Option<String>,
}

/// Employment category advertised on a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl JobType {
    pub const fn label(self) -> &'static str {
        match self {
            JobType::FullTime => "full_time",
            JobType::PartTime => "part_time",
            JobType::Contract => "contract",
            JobType::Internship => "internship",
        }
    }
}

/// A job advertisement record. Owned by the community/post subsystem;
/// read-only to the scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobPostingId,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub job_type: JobType,
    pub description: String,
    pub required_skills: Vec<String>,
    pub required_experience: Option<String>,
    pub posted_at: DateTime<Utc>,
}

impl JobPosting {
    /// Character-bounded description excerpt for dashboard cards. The
    /// ellipsis marker counts against the budget, so the result never
    /// exceeds `max_chars` characters.
    pub fn description_excerpt(&self, max_chars: usize) -> String {
        if self.description.chars().count() <= max_chars {
            return self.description.clone();
        }
        let kept = max_chars.saturating_sub(3);
        let truncated: String = self.description.chars().take(kept).collect();
        format!("{truncated}...")
    }
}

/// The four factor sub-scores plus the skill diff backing them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFactors {
    pub skill: u8,
    pub location: u8,
    pub experience: u8,
    pub recency: u8,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Interaction flags and timestamps accumulated over a recommendation's life.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionLog {
    pub viewed: bool,
    pub viewed_at: Option<DateTime<Utc>>,
    pub clicked: bool,
    pub clicked_at: Option<DateTime<Utc>>,
    pub saved: bool,
    pub saved_at: Option<DateTime<Utc>>,
    pub dismissed: bool,
    pub dismissed_at: Option<DateTime<Utc>>,
}

/// Lifecycle status of a persisted recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    Active,
    Applied,
    Dismissed,
    Saved,
    Expired,
}

impl RecommendationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            RecommendationStatus::Active => "active",
            RecommendationStatus::Applied => "applied",
            RecommendationStatus::Dismissed => "dismissed",
            RecommendationStatus::Saved => "saved",
            RecommendationStatus::Expired => "expired",
        }
    }
}

/// A persisted, scored pairing of candidate and job posting.
///
/// Interaction transitions are value-returning so callers decide when the
/// updated record is persisted; nothing here carries hidden save state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: RecommendationId,
    pub candidate_id: CandidateId,
    pub job_id: JobPostingId,
    pub match_score: u8,
    pub factors: MatchFactors,
    pub reason: String,
    pub status: RecommendationStatus,
    pub interactions: InteractionLog,
    pub generated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Recommendation {
    pub fn new(
        id: RecommendationId,
        candidate_id: CandidateId,
        job_id: JobPostingId,
        match_score: u8,
        factors: MatchFactors,
        reason: String,
        generated_at: DateTime<Utc>,
        ttl_days: i64,
    ) -> Self {
        Self {
            id,
            candidate_id,
            job_id,
            match_score,
            factors,
            reason,
            status: RecommendationStatus::Active,
            interactions: InteractionLog::default(),
            generated_at,
            expires_at: generated_at + Duration::days(ttl_days),
        }
    }

    /// Expiry is a query-time concern; the stored status is not rewritten.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Whether this record suppresses regeneration for its (candidate, job)
    /// pair. Dismissed and expired records do not block, so those pairs stay
    /// eligible for a refreshed score.
    pub fn blocks_regeneration(&self, now: DateTime<Utc>) -> bool {
        if self.is_expired(now) {
            return false;
        }
        matches!(
            self.status,
            RecommendationStatus::Active
                | RecommendationStatus::Applied
                | RecommendationStatus::Saved
        )
    }

    /// Marks the recommendation as seen. Idempotent: the first view timestamp
    /// is kept on repeated calls.
    pub fn with_viewed(mut self, now: DateTime<Utc>) -> Self {
        if !self.interactions.viewed {
            self.interactions.viewed = true;
            self.interactions.viewed_at = Some(now);
        }
        self
    }

    /// Marks the recommendation as opened. A click implies a view, so an
    /// unviewed record gets its view backfilled in the same transition.
    pub fn with_clicked(mut self, now: DateTime<Utc>) -> Self {
        if !self.interactions.clicked {
            self.interactions.clicked = true;
            self.interactions.clicked_at = Some(now);
        }
        if !self.interactions.viewed {
            self.interactions.viewed = true;
            self.interactions.viewed_at = Some(now);
        }
        self
    }

    /// Pins the recommendation for the candidate and moves it to `Saved`.
    pub fn with_saved(mut self, now: DateTime<Utc>) -> Self {
        if !self.interactions.saved {
            self.interactions.saved = true;
            self.interactions.saved_at = Some(now);
        }
        self.status = RecommendationStatus::Saved;
        self
    }

    /// Hides the recommendation and moves it to `Dismissed`, which frees the
    /// pair for future regeneration.
    pub fn with_dismissed(mut self, now: DateTime<Utc>) -> Self {
        if !self.interactions.dismissed {
            self.interactions.dismissed = true;
            self.interactions.dismissed_at = Some(now);
        }
        self.status = RecommendationStatus::Dismissed;
        self
    }
}
