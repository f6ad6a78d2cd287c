use chrono::{DateTime, Duration, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use rozgar_match::matching::{
    rank_recommendations, CandidateDirectory, CandidateId, CandidateProfile, JobCatalog,
    JobPosting, JobPostingId, JobType, MatchingConfig, Recommendation, RecommendationId,
    RecommendationService, RecommendationStatus, RecommendationStore, RepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type SeededService = RecommendationService<
    InMemoryCandidateDirectory,
    InMemoryJobCatalog,
    InMemoryRecommendationStore,
>;

/// Service wired against the in-memory repositories, pre-seeded with a small
/// candidate and posting roster for demos and local runs.
pub(crate) fn build_seeded_service(now: DateTime<Utc>) -> Arc<SeededService> {
    let directory = Arc::new(InMemoryCandidateDirectory::new(seed_candidates()));
    let catalog = Arc::new(InMemoryJobCatalog::new(seed_jobs(now)));
    let store = Arc::new(InMemoryRecommendationStore::default());
    Arc::new(RecommendationService::new(
        directory,
        catalog,
        store,
        MatchingConfig::default(),
    ))
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCandidateDirectory {
    profiles: Arc<Mutex<HashMap<CandidateId, CandidateProfile>>>,
}

impl InMemoryCandidateDirectory {
    pub(crate) fn new(candidates: Vec<CandidateProfile>) -> Self {
        let profiles = candidates
            .into_iter()
            .map(|profile| (profile.id.clone(), profile))
            .collect();
        Self {
            profiles: Arc::new(Mutex::new(profiles)),
        }
    }
}

impl CandidateDirectory for InMemoryCandidateDirectory {
    fn fetch(&self, id: &CandidateId) -> Result<Option<CandidateProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("directory mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryJobCatalog {
    postings: Arc<Mutex<Vec<JobPosting>>>,
}

impl InMemoryJobCatalog {
    pub(crate) fn new(jobs: Vec<JobPosting>) -> Self {
        Self {
            postings: Arc::new(Mutex::new(jobs)),
        }
    }
}

impl JobCatalog for InMemoryJobCatalog {
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
pub(crate) struct InMemoryRecommendationStore {
    records: Arc<Mutex<HashMap<RecommendationId, Recommendation>>>,
}

impl RecommendationStore for InMemoryRecommendationStore {
    fn insert_new(&self, recommendation: Recommendation) -> Result<Recommendation, RepositoryError> {
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

pub(crate) fn seed_candidates() -> Vec<CandidateProfile> {
    vec![
        CandidateProfile {
            id: CandidateId("cand-001".to_string()),
            name: "Asha Verma".to_string(),
            skills: vec!["React".to_string(), "TypeScript".to_string(), "Node".to_string()],
            location: Some("Mumbai, Maharashtra".to_string()),
            work_experience: Some("3 years as a mid-level frontend developer".to_string()),
        },
        CandidateProfile {
            id: CandidateId("cand-002".to_string()),
            name: "Rahul Nair".to_string(),
            skills: vec!["Java".to_string(), "Spring Boot".to_string(), "SQL".to_string()],
            location: Some("Bengaluru, Karnataka".to_string()),
            work_experience: Some("7 years, senior backend engineer".to_string()),
        },
        CandidateProfile {
            id: CandidateId("cand-003".to_string()),
            name: "Priya Sharma".to_string(),
            skills: vec!["Python".to_string(), "Django".to_string()],
            location: None,
            work_experience: None,
        },
    ]
}

pub(crate) fn seed_jobs(now: DateTime<Utc>) -> Vec<JobPosting> {
    vec![
        JobPosting {
            id: JobPostingId("job-frontend-mumbai".to_string()),
            title: "Frontend Engineer".to_string(),
            company: "Meridian Labs".to_string(),
            location: Some("Mumbai".to_string()),
            salary: Some("12-18 LPA".to_string()),
            job_type: JobType::FullTime,
            description: "Own the candidate-facing web experience end to end. You will build \
                          dashboard features in React and TypeScript, collaborate with design \
                          on the application flow, and keep page loads fast for users on \
                          low-bandwidth connections."
                .to_string(),
            required_skills: vec!["React".to_string(), "TypeScript".to_string()],
            required_experience: Some("mid-level, 2-4 years".to_string()),
            posted_at: now - Duration::days(2),
        },
        JobPosting {
            id: JobPostingId("job-backend-remote".to_string()),
            title: "Backend Developer".to_string(),
            company: "Kaveri Systems".to_string(),
            location: Some("Remote (India)".to_string()),
            salary: Some("20-28 LPA".to_string()),
            job_type: JobType::FullTime,
            description: "Design and scale the matching pipeline services. Remote-first team \
                          with quarterly meetups in Bengaluru."
                .to_string(),
            required_skills: vec!["Java".to_string(), "SQL".to_string()],
            required_experience: Some("senior, 5+ years".to_string()),
            posted_at: now - Duration::days(5),
        },
        JobPosting {
            id: JobPostingId("job-data-pune".to_string()),
            title: "Data Engineer".to_string(),
            company: "Sahyadri Analytics".to_string(),
            location: Some("Pune".to_string()),
            salary: Some("10-15 LPA".to_string()),
            job_type: JobType::Contract,
            description: "Build ingestion jobs for labour-market datasets in Python.".to_string(),
            required_skills: vec!["Python".to_string(), "Airflow".to_string()],
            required_experience: Some("mid-level".to_string()),
            posted_at: now - Duration::days(12),
        },
        JobPosting {
            id: JobPostingId("job-intern-mumbai".to_string()),
            title: "Engineering Intern".to_string(),
            company: "Meridian Labs".to_string(),
            location: Some("Mumbai".to_string()),
            salary: None,
            job_type: JobType::Internship,
            description: "Six-month internship across the web platform team.".to_string(),
            required_skills: vec!["JavaScript".to_string()],
            required_experience: Some("junior or fresher welcome".to_string()),
            posted_at: now - Duration::hours(18),
        },
    ]
}
