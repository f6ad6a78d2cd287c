use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::domain::{CandidateId, RecommendationId};
use super::repository::{CandidateDirectory, JobCatalog, RecommendationStore};
use super::service::{RecommendationService, ServiceError};

/// Router builder exposing the recommendation dashboard and interaction
/// endpoints.
pub fn recommendation_router<C, J, S>(service: Arc<RecommendationService<C, J, S>>) -> Router
where
    C: CandidateDirectory + 'static,
    J: JobCatalog + 'static,
    S: RecommendationStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/candidates/:candidate_id/recommendations",
            get(dashboard_handler::<C, J, S>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/recommendations/:recommendation_id/viewed",
            post(viewed_handler::<C, J, S>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/recommendations/:recommendation_id/clicked",
            post(clicked_handler::<C, J, S>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/recommendations/:recommendation_id/saved",
            post(saved_handler::<C, J, S>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/recommendations/:recommendation_id/dismissed",
            post(dismissed_handler::<C, J, S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct DashboardQuery {
    limit: Option<usize>,
}

pub(crate) async fn dashboard_handler<C, J, S>(
    State(service): State<Arc<RecommendationService<C, J, S>>>,
    Path(candidate_id): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> Response
where
    C: CandidateDirectory + 'static,
    J: JobCatalog + 'static,
    S: RecommendationStore + 'static,
{
    let candidate_id = CandidateId(candidate_id);
    match service.dashboard(&candidate_id, query.limit, Utc::now()) {
        Ok(dashboard) => (StatusCode::OK, axum::Json(dashboard)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn viewed_handler<C, J, S>(
    State(service): State<Arc<RecommendationService<C, J, S>>>,
    Path((candidate_id, recommendation_id)): Path<(String, String)>,
) -> Response
where
    C: CandidateDirectory + 'static,
    J: JobCatalog + 'static,
    S: RecommendationStore + 'static,
{
    let candidate_id = CandidateId(candidate_id);
    let recommendation_id = RecommendationId(recommendation_id);
    match service.mark_viewed(&candidate_id, &recommendation_id, Utc::now()) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn clicked_handler<C, J, S>(
    State(service): State<Arc<RecommendationService<C, J, S>>>,
    Path((candidate_id, recommendation_id)): Path<(String, String)>,
) -> Response
where
    C: CandidateDirectory + 'static,
    J: JobCatalog + 'static,
    S: RecommendationStore + 'static,
{
    let candidate_id = CandidateId(candidate_id);
    let recommendation_id = RecommendationId(recommendation_id);
    match service.mark_clicked(&candidate_id, &recommendation_id, Utc::now()) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn saved_handler<C, J, S>(
    State(service): State<Arc<RecommendationService<C, J, S>>>,
    Path((candidate_id, recommendation_id)): Path<(String, String)>,
) -> Response
where
    C: CandidateDirectory + 'static,
    J: JobCatalog + 'static,
    S: RecommendationStore + 'static,
{
    let candidate_id = CandidateId(candidate_id);
    let recommendation_id = RecommendationId(recommendation_id);
    match service.mark_saved(&candidate_id, &recommendation_id, Utc::now()) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn dismissed_handler<C, J, S>(
    State(service): State<Arc<RecommendationService<C, J, S>>>,
    Path((candidate_id, recommendation_id)): Path<(String, String)>,
) -> Response
where
    C: CandidateDirectory + 'static,
    J: JobCatalog + 'static,
    S: RecommendationStore + 'static,
{
    let candidate_id = CandidateId(candidate_id);
    let recommendation_id = RecommendationId(recommendation_id);
    match service.mark_dismissed(&candidate_id, &recommendation_id, Utc::now()) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ServiceError) -> Response {
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
