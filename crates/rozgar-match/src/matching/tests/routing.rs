use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use tower::ServiceExt;

use super::common::{build_service, candidate, job, read_json_body, router_with_service};

// The router handlers stamp requests with the real clock, so fixtures here are
// built relative to `Utc::now()` to keep the scored recency step stable.

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

#[tokio::test]
async fn dashboard_returns_ranked_cards() {
    let (service, _store) = build_service(vec![candidate()], vec![job("job-1", Utc::now())]);
    let router = router_with_service(service);

    let response = router
        .oneshot(get("/api/v1/candidates/cand-asha/recommendations"))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["candidate_id"], "cand-asha");
    assert_eq!(body["newly_generated"], 1);
    let cards = body["recommendations"]
        .as_array()
        .expect("card array present");
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["match_score"], 94);
    assert_eq!(
        cards[0]["reason"],
        "Perfect match for your skills and location!"
    );
    assert_eq!(cards[0]["match_factors"]["skill"], 100);
    assert_eq!(cards[0]["match_factors"]["recency"], 100);
}

#[tokio::test]
async fn dashboard_honors_the_limit_parameter() {
    let now = Utc::now();
    let (service, _store) = build_service(
        vec![candidate()],
        vec![job("job-a", now), job("job-b", now)],
    );
    let router = router_with_service(service);

    let response = router
        .oneshot(get("/api/v1/candidates/cand-asha/recommendations?limit=1"))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(
        body["recommendations"]
            .as_array()
            .expect("card array present")
            .len(),
        1
    );
}

#[tokio::test]
async fn dashboard_for_unknown_candidate_is_not_found() {
    let (service, _store) = build_service(vec![candidate()], vec![job("job-1", Utc::now())]);
    let router = router_with_service(service);

    let response = router
        .oneshot(get("/api/v1/candidates/nobody/recommendations"))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("not found"));
}

#[tokio::test]
async fn clicked_endpoint_backfills_view_flags() {
    let now = Utc::now();
    let (service, store) = build_service(vec![candidate()], vec![job("job-1", now)]);
    service
        .generate_for_candidate(&candidate().id, None, now)
        .expect("generation succeeds");
    let id = store.all().remove(0).id;
    let router = router_with_service(service);

    let response = router
        .oneshot(post(&format!(
            "/api/v1/candidates/cand-asha/recommendations/{id}/clicked"
        )))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["clicked"], true);
    assert_eq!(body["viewed"], true);
    assert_eq!(body["status"], "active");
}

#[tokio::test]
async fn interaction_on_foreign_recommendation_is_not_found() {
    let now = Utc::now();
    let (service, store) = build_service(vec![candidate()], vec![job("job-1", now)]);
    service
        .generate_for_candidate(&candidate().id, None, now)
        .expect("generation succeeds");
    let id = store.all().remove(0).id;
    let router = router_with_service(service);

    let response = router
        .oneshot(post(&format!(
            "/api/v1/candidates/cand-other/recommendations/{id}/viewed"
        )))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dismissed_endpoint_updates_status() {
    let now = Utc::now();
    let (service, store) = build_service(vec![candidate()], vec![job("job-1", now)]);
    service
        .generate_for_candidate(&candidate().id, None, now)
        .expect("generation succeeds");
    let id = store.all().remove(0).id;
    let router = router_with_service(service);

    let response = router
        .oneshot(post(&format!(
            "/api/v1/candidates/cand-asha/recommendations/{id}/dismissed"
        )))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["status"], "dismissed");
    assert_eq!(body["dismissed"], true);
}
