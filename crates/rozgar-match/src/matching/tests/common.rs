use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::matching::config::MatchingConfig;
use crate::matching::domain::{
    CandidateId, CandidateProfile, JobPosting, JobPostingId, JobType, Recommendation,
    RecommendationId, RecommendationStatus,
};
use crate::matching::repository::{
    rank_recommendations, CandidateDirectory, JobCatalog, RecommendationStore, RepositoryError,
};
use crate::matching::router::recommendation_router;
use crate::matching::service::RecommendationService;

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 20, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn candidate() -> CandidateProfile {
    CandidateProfile {
        id: CandidateId("cand-asha".to_string()),
        name: "Asha Verma".to_string(),
        skills: vec!["React".to_string(), "Node".to_string()],
        location: Some("Mumbai, India".to_string()),
        work_experience: Some("3 years, mid-level developer".to_string()),
    }
}

pub(super) fn job(id: &str, posted_at: DateTime<Utc>) -> JobPosting {
    JobPosting {
        id: JobPostingId(id.to_string()),
        title: "Frontend Engineer".to_string(),
        company: "Meridian Labs".to_string(),
        location: Some("Mumbai".to_string()),
        salary: Some("12-18 LPA".to_string()),
        job_type: JobType::FullTime,
        description: "Build and maintain the customer-facing web application.".to_string(),
        required_skills: vec!["React".to_string()],
        required_experience: Some("mid-level".to_string()),
        posted_at,
    }
}

pub(super) fn matching_config() -> MatchingConfig {
    MatchingConfig::default()
}

pub(super) type MemoryService =
    RecommendationService<MemoryDirectory, MemoryCatalog, MemoryStore>;

pub(super) fn build_service(
    candidates: Vec<CandidateProfile>,
    jobs: Vec<JobPosting>,
) -> (MemoryService, Arc<MemoryStore>) {
    let directory = Arc::new(MemoryDirectory::new(candidates));
    let catalog = Arc::new(MemoryCatalog::new(jobs));
    let store = Arc::new(MemoryStore::default());
    let service = RecommendationService::new(directory, catalog, store.clone(), matching_config());
    (service, store)
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    recommendation_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryDirectory {
    profiles: Arc<Mutex<HashMap<CandidateId, CandidateProfile>>>,
}

impl MemoryDirectory {
    pub(super) fn new(candidates: Vec<CandidateProfile>) -> Self {
        let profiles = candidates
            .into_iter()
            .map(|profile| (profile.id.clone(), profile))
            .collect();
        Self {
            profiles: Arc::new(Mutex::new(profiles)),
        }
    }
}

impl CandidateDirectory for MemoryDirectory {
    fn fetch(&self, id: &CandidateId) -> Result<Option<CandidateProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("directory mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryCatalog {
    postings: Arc<Mutex<Vec<JobPosting>>>,
}

impl MemoryCatalog {
    pub(super) fn new(jobs: Vec<JobPosting>) -> Self {
        Self {
            postings: Arc::new(Mutex::new(jobs)),
        }
    }
}

impl JobCatalog for MemoryCatalog {
    fn posted_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<JobPosting>, RepositoryError> {
        let guard = self.postings.lock().expect("catalog mutex poisoned");
        Ok(guard
            .iter()
            .filter(|job| job.posted_at >= cutoff)
            .cloned()
            .collect())
    }

    fn fetch(&self, id: &JobPostingId) -> Result<Option<JobPosting>, RepositoryError> {
        let guard = self.postings.lock().expect("catalog mutex poisoned");
        Ok(guard.iter().find(|job| &job.id == id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    records: Arc<Mutex<HashMap<RecommendationId, Recommendation>>>,
}

impl MemoryStore {
    pub(super) fn all(&self) -> Vec<Recommendation> {
        let guard = self.records.lock().expect("store mutex poisoned");
        guard.values().cloned().collect()
    }

    pub(super) fn fetch_expect(&self, id: &RecommendationId) -> Recommendation {
        let guard = self.records.lock().expect("store mutex poisoned");
        guard.get(id).cloned().expect("record present")
    }
}

impl RecommendationStore for MemoryStore {
    fn insert_new(
        &self,
        recommendation: Recommendation,
    ) -> Result<Recommendation, RepositoryError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let existing_id = guard
            .values()
            .find(|record| {
                record.candidate_id == recommendation.candidate_id
                    && record.job_id == recommendation.job_id
            })
            .map(|record| record.id.clone());
        if let Some(id) = existing_id {
            let existing = guard.get(&id).expect("record indexed");
            if existing.blocks_regeneration(recommendation.generated_at) {
                return Err(RepositoryError::Conflict);
            }
            guard.remove(&id);
        }
        guard.insert(recommendation.id.clone(), recommendation.clone());
        Ok(recommendation)
    }

    fn update(&self, recommendation: Recommendation) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&recommendation.id) {
            guard.insert(recommendation.id.clone(), recommendation);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &RecommendationId) -> Result<Option<Recommendation>, RepositoryError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn for_pair(
        &self,
        candidate_id: &CandidateId,
        job_id: &JobPostingId,
    ) -> Result<Option<Recommendation>, RepositoryError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| &record.candidate_id == candidate_id && &record.job_id == job_id)
            .max_by_key(|record| record.generated_at)
            .cloned())
    }

    fn active_for_candidate(
        &self,
        candidate_id: &CandidateId,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Recommendation>, RepositoryError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        let mut active: Vec<Recommendation> = guard
            .values()
            .filter(|record| {
                &record.candidate_id == candidate_id
                    && record.status == RecommendationStatus::Active
                    && !record.is_expired(now)
            })
            .cloned()
            .collect();
        rank_recommendations(&mut active);
        active.truncate(limit);
        Ok(active)
    }
}

/// Passes the pre-insert existence check but refuses every insert, simulating
/// a concurrent generator winning the write.
pub(super) struct RacyStore {
    pub(super) inner: MemoryStore,
}

impl RecommendationStore for RacyStore {
    fn insert_new(
        &self,
        _recommendation: Recommendation,
    ) -> Result<Recommendation, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, recommendation: Recommendation) -> Result<(), RepositoryError> {
        self.inner.update(recommendation)
    }

    fn fetch(&self, id: &RecommendationId) -> Result<Option<Recommendation>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn for_pair(
        &self,
        _candidate_id: &CandidateId,
        _job_id: &JobPostingId,
    ) -> Result<Option<Recommendation>, RepositoryError> {
        Ok(None)
    }

    fn active_for_candidate(
        &self,
        candidate_id: &CandidateId,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Recommendation>, RepositoryError> {
        self.inner.active_for_candidate(candidate_id, now, limit)
    }
}

pub(super) struct UnavailableStore;

impl RecommendationStore for UnavailableStore {
    fn insert_new(
        &self,
        _recommendation: Recommendation,
    ) -> Result<Recommendation, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _recommendation: Recommendation) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &RecommendationId) -> Result<Option<Recommendation>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_pair(
        &self,
        _candidate_id: &CandidateId,
        _job_id: &JobPostingId,
    ) -> Result<Option<Recommendation>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn active_for_candidate(
        &self,
        _candidate_id: &CandidateId,
        _now: DateTime<Utc>,
        _limit: usize,
    ) -> Result<Vec<Recommendation>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn days_ago(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::days(days)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
