use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use super::config::MatchingConfig;
use super::domain::{CandidateId, Recommendation, RecommendationId};
use super::repository::{
    rank_recommendations, CandidateDirectory, JobCatalog, RecommendationStore, RepositoryError,
};
use super::scoring::evaluate;
use super::views::{RecommendationCard, RecommendationDashboard, RecommendationView};

/// Service composing the job catalog, candidate directory, scoring rules, and
/// recommendation store.
pub struct RecommendationService<C, J, S> {
    candidates: Arc<C>,
    jobs: Arc<J>,
    store: Arc<S>,
    config: MatchingConfig,
}

static RECOMMENDATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_recommendation_id() -> RecommendationId {
    let id = RECOMMENDATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RecommendationId(format!("rec-{id:06}"))
}

impl<C, J, S> RecommendationService<C, J, S>
where
    C: CandidateDirectory + 'static,
    J: JobCatalog + 'static,
    S: RecommendationStore + 'static,
{
    pub fn new(candidates: Arc<C>, jobs: Arc<J>, store: Arc<S>, config: MatchingConfig) -> Self {
        Self {
            candidates,
            jobs,
            store,
            config,
        }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Generate up to `limit` new recommendations for a candidate, returning
    /// the records actually persisted.
    ///
    /// Pairs whose existing record still blocks regeneration are skipped; a
    /// `Conflict` from the store (a concurrent generation won the insert) is
    /// absorbed the same way rather than failing the request.
    pub fn generate_for_candidate(
        &self,
        candidate_id: &CandidateId,
        limit: Option<usize>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Recommendation>, ServiceError> {
        let candidate = self
            .candidates
            .fetch(candidate_id)?
            .ok_or_else(|| ServiceError::CandidateNotFound(candidate_id.clone()))?;

        let limit = limit.unwrap_or(self.config.default_limit);
        let cutoff = now - Duration::days(self.config.job_window_days);
        let pool = self.jobs.posted_since(cutoff)?;

        let mut scored = Vec::new();
        for job in &pool {
            if let Some(existing) = self.store.for_pair(candidate_id, &job.id)? {
                if existing.blocks_regeneration(now) {
                    continue;
                }
            }

            let evaluation = evaluate(&candidate, job, now);
            if evaluation.score < self.config.score_threshold {
                continue;
            }

            scored.push(Recommendation::new(
                next_recommendation_id(),
                candidate.id.clone(),
                job.id.clone(),
                evaluation.score,
                evaluation.factors,
                evaluation.reason.to_string(),
                now,
                self.config.expiry_days,
            ));
        }

        rank_recommendations(&mut scored);
        scored.truncate(limit);

        let mut inserted = Vec::with_capacity(scored.len());
        for recommendation in scored {
            match self.store.insert_new(recommendation) {
                Ok(stored) => inserted.push(stored),
                Err(RepositoryError::Conflict) => {
                    debug!("pair already recommended, skipping duplicate insert");
                }
                Err(err) => return Err(err.into()),
            }
        }

        debug!(
            candidate = %candidate.id,
            pool = pool.len(),
            inserted = inserted.len(),
            "recommendation generation finished"
        );

        Ok(inserted)
    }

    /// Active, ranked recommendations for a candidate.
    pub fn active_for_candidate(
        &self,
        candidate_id: &CandidateId,
        limit: Option<usize>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Recommendation>, ServiceError> {
        let limit = limit.unwrap_or(self.config.default_limit);
        Ok(self.store.active_for_candidate(candidate_id, now, limit)?)
    }

    /// Dashboard read model: generate for the candidate, then read back the
    /// active list joined with its postings.
    pub fn dashboard(
        &self,
        candidate_id: &CandidateId,
        limit: Option<usize>,
        now: DateTime<Utc>,
    ) -> Result<RecommendationDashboard, ServiceError> {
        let newly_generated = self.generate_for_candidate(candidate_id, limit, now)?.len();
        let active = self.active_for_candidate(candidate_id, limit, now)?;

        let mut cards = Vec::with_capacity(active.len());
        for recommendation in &active {
            match self.jobs.fetch(&recommendation.job_id)? {
                Some(job) => cards.push(RecommendationCard::from_parts(recommendation, &job)),
                None => {
                    // The posting was removed after the recommendation was
                    // stored; the card cannot be rendered without it.
                    warn!(job = %recommendation.job_id, "posting missing for stored recommendation");
                }
            }
        }

        Ok(RecommendationDashboard {
            candidate_id: candidate_id.clone(),
            newly_generated,
            recommendations: cards,
        })
    }

    /// Record that the candidate has seen the recommendation.
    pub fn mark_viewed(
        &self,
        candidate_id: &CandidateId,
        recommendation_id: &RecommendationId,
        now: DateTime<Utc>,
    ) -> Result<RecommendationView, ServiceError> {
        self.apply_interaction(candidate_id, recommendation_id, |rec| rec.with_viewed(now))
    }

    /// Record that the candidate opened the recommendation; implies a view.
    pub fn mark_clicked(
        &self,
        candidate_id: &CandidateId,
        recommendation_id: &RecommendationId,
        now: DateTime<Utc>,
    ) -> Result<RecommendationView, ServiceError> {
        self.apply_interaction(candidate_id, recommendation_id, |rec| rec.with_clicked(now))
    }

    /// Pin the recommendation; status moves to `saved`.
    pub fn mark_saved(
        &self,
        candidate_id: &CandidateId,
        recommendation_id: &RecommendationId,
        now: DateTime<Utc>,
    ) -> Result<RecommendationView, ServiceError> {
        self.apply_interaction(candidate_id, recommendation_id, |rec| rec.with_saved(now))
    }

    /// Hide the recommendation; status moves to `dismissed` and the pair
    /// becomes eligible for regeneration.
    pub fn mark_dismissed(
        &self,
        candidate_id: &CandidateId,
        recommendation_id: &RecommendationId,
        now: DateTime<Utc>,
    ) -> Result<RecommendationView, ServiceError> {
        self.apply_interaction(candidate_id, recommendation_id, |rec| {
            rec.with_dismissed(now)
        })
    }

    fn apply_interaction(
        &self,
        candidate_id: &CandidateId,
        recommendation_id: &RecommendationId,
        transition: impl FnOnce(Recommendation) -> Recommendation,
    ) -> Result<RecommendationView, ServiceError> {
        let recommendation = self
            .store
            .fetch(recommendation_id)?
            .filter(|rec| &rec.candidate_id == candidate_id)
            .ok_or_else(|| ServiceError::RecommendationNotFound(recommendation_id.clone()))?;

        let updated = transition(recommendation);
        self.store.update(updated.clone())?;
        Ok(RecommendationView::from_recommendation(&updated))
    }
}

/// Error raised by the recommendation service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("candidate {0} not found")]
    CandidateNotFound(CandidateId),
    #[error("recommendation {0} not found")]
    RecommendationNotFound(RecommendationId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    /// Whether the error names a missing or foreign-owned resource, mapped to
    /// 404 at the HTTP boundary.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ServiceError::CandidateNotFound(_)
                | ServiceError::RecommendationNotFound(_)
                | ServiceError::Repository(RepositoryError::NotFound)
        )
    }
}
