use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::config::ScoringConfig;
use crate::scoring::router::{
    assessment_handler, rate_handler, risk_handler, trust_router, RateRequest, RiskQuery,
    ScaleQuery,
};
use crate::scoring::service::TrustScoringService;
use crate::scoring::strategy::ScoreScale;

fn json_request(uri: &str, payload: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn score_route_scores_raw_payloads() {
    let router = trust_router(Arc::new(build_service()));
    let payload = json!({
        "assessed_at": "2025-06-01T00:00:00Z",
        "identity": { "address": "0xabc", "is_verified": true, "method": "gist" },
        "profile": { "login": "octo", "followers": 120, "following": 40, "bio": "builder" },
        "repositories": [
            { "name": "vault", "stargazers_count": 12, "language": "Rust", "size": 4000 }
        ]
    });

    let response = router
        .oneshot(json_request("/api/v1/trust/score", &payload))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["scale"], "comprehensive");
    assert_eq!(body["assessed_at"], "2025-06-01T00:00:00Z");
    assert_eq!(body["detail"]["kind"], "comprehensive");
    assert_eq!(body["detail"]["factors"]["verification"]["score"], 100.0);
}

#[tokio::test]
async fn score_route_honours_scale_query() {
    let router = trust_router(Arc::new(build_service()));

    let response = router
        .oneshot(json_request("/api/v1/trust/score?scale=legacy", &json!({})))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["scale"], "legacy");
    assert_eq!(body["score"], 100);
    assert_eq!(body["risk_category"], "high");
}

#[tokio::test]
async fn score_route_rejects_non_object_payloads() {
    let router = trust_router(Arc::new(build_service()));

    let response = router
        .oneshot(json_request("/api/v1/trust/score", &json!([1, 2, 3])))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn applicant_route_maps_provider_outcomes() {
    let service = Arc::new(build_service());

    let found = trust_router(service.clone())
        .oneshot(get_request("/api/v1/trust/applicants/octo"))
        .await
        .expect("route executes");
    assert_eq!(found.status(), StatusCode::OK);
    let body = read_json_body(found).await;
    assert_eq!(body["result"]["risk_category"], "low");
    assert_eq!(body["interest"]["multiplier"], 1.0);
    assert_eq!(body["eligibility"]["eligible"], true);

    let missing = trust_router(service)
        .oneshot(get_request("/api/v1/trust/applicants/ghost"))
        .await
        .expect("route executes");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(missing).await;
    assert_eq!(
        body["error"],
        "scoring error: no evidence found for applicant 'ghost'"
    );
}

#[tokio::test]
async fn unavailable_provider_returns_service_unavailable() {
    let service = Arc::new(TrustScoringService::new(
        Arc::new(OfflineProvider),
        ScoringConfig::default(),
    ));

    let response = assessment_handler(
        State(service),
        Path("octo".to_string()),
        Query(ScaleQuery::default()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("unavailable"));
}

#[tokio::test]
async fn eligibility_route_rejects_other_scale() {
    let router = trust_router(Arc::new(build_service()));

    let response = router
        .oneshot(get_request(
            "/api/v1/trust/applicants/octo/eligibility?scale=legacy",
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .starts_with("scoring error: "));
}

#[tokio::test]
async fn eligibility_route_reports_shortfall() {
    let router = trust_router(Arc::new(build_service()));

    let response = router
        .oneshot(get_request("/api/v1/trust/applicants/newcomer/eligibility"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["eligible"], false);
    assert_eq!(body["minimum_score"], 60);
}

#[tokio::test]
async fn rate_handler_applies_table() {
    let service = Arc::new(build_service());

    let response = rate_handler(
        State(service),
        axum::Json(RateRequest {
            trust_score: 650,
            scale: Some(ScoreScale::Legacy),
            base_rate: Some(8.0),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["multiplier"], 1.25);
    assert_eq!(body["recommended_rate"], 10.0);
}

#[tokio::test]
async fn rate_route_validates_inputs() {
    let service = Arc::new(build_service());

    let out_of_range = trust_router(service.clone())
        .oneshot(json_request(
            "/api/v1/trust/rate",
            &json!({ "trust_score": 650 }),
        ))
        .await
        .expect("route executes");
    assert_eq!(out_of_range.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let negative_rate = trust_router(service)
        .oneshot(json_request(
            "/api/v1/trust/rate",
            &json!({ "trust_score": 65, "base_rate": -1.0 }),
        ))
        .await
        .expect("route executes");
    assert_eq!(negative_rate.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(negative_rate).await;
    assert_eq!(
        body["error"],
        "invalid input: base_rate must be a non-negative number"
    );
}

#[tokio::test]
async fn risk_handler_classifies_per_scale() {
    let comprehensive = risk_handler(Query(RiskQuery {
        score: 70,
        scale: None,
    }))
    .await;
    let body = read_json_body(comprehensive).await;
    assert_eq!(body["risk_category"], "medium");

    let legacy = risk_handler(Query(RiskQuery {
        score: 700,
        scale: Some(ScoreScale::Legacy),
    }))
    .await;
    let body = read_json_body(legacy).await;
    assert_eq!(body["risk_category"], "medium");

    let invalid = risk_handler(Query(RiskQuery {
        score: 2000,
        scale: None,
    }))
    .await;
    assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn risk_route_parses_query() {
    let router = trust_router(Arc::new(build_service()));

    let response = router
        .oneshot(get_request("/api/v1/trust/risk?score=820&scale=legacy"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["risk_category"], "low");
}
