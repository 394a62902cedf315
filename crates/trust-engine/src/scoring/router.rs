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
use serde_json::{json, Value};

use super::domain::ApplicantHandle;
use super::intake::bundle_from_payload;
use super::provider::EvidenceProvider;
use super::risk::classify;
use super::service::TrustScoringService;
use super::strategy::ScoreScale;
use crate::error::AppError;

/// Router builder exposing the scoring engine over HTTP.
pub fn trust_router<P>(service: Arc<TrustScoringService<P>>) -> Router
where
    P: EvidenceProvider + 'static,
{
    Router::new()
        .route("/api/v1/trust/score", post(score_handler::<P>))
        .route(
            "/api/v1/trust/applicants/:handle",
            get(assessment_handler::<P>),
        )
        .route(
            "/api/v1/trust/applicants/:handle/eligibility",
            get(eligibility_handler::<P>),
        )
        .route("/api/v1/trust/rate", post(rate_handler::<P>))
        .route("/api/v1/trust/risk", get(risk_handler))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ScaleQuery {
    #[serde(default)]
    pub(crate) scale: Option<ScoreScale>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RateRequest {
    pub(crate) trust_score: u32,
    #[serde(default)]
    pub(crate) scale: Option<ScoreScale>,
    #[serde(default)]
    pub(crate) base_rate: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RiskQuery {
    pub(crate) score: u32,
    #[serde(default)]
    pub(crate) scale: Option<ScoreScale>,
}

fn invalid_input(message: impl Into<String>) -> Response {
    AppError::InvalidInput(message.into()).into_response()
}

pub(crate) async fn score_handler<P>(
    State(service): State<Arc<TrustScoringService<P>>>,
    Query(query): Query<ScaleQuery>,
    axum::Json(payload): axum::Json<Value>,
) -> Response
where
    P: EvidenceProvider + 'static,
{
    if !payload.is_object() {
        return invalid_input("evidence payload must be a JSON object");
    }

    let evidence = bundle_from_payload(&payload, Utc::now());
    let result = service.score_bundle(&evidence, query.scale);
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn assessment_handler<P>(
    State(service): State<Arc<TrustScoringService<P>>>,
    Path(handle): Path<String>,
    Query(query): Query<ScaleQuery>,
) -> Response
where
    P: EvidenceProvider + 'static,
{
    match service.assess(&ApplicantHandle::new(handle), query.scale) {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn eligibility_handler<P>(
    State(service): State<Arc<TrustScoringService<P>>>,
    Path(handle): Path<String>,
    Query(query): Query<ScaleQuery>,
) -> Response
where
    P: EvidenceProvider + 'static,
{
    match service.check_eligibility(&ApplicantHandle::new(handle), query.scale) {
        Ok(decision) => (StatusCode::OK, axum::Json(decision)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}

pub(crate) async fn rate_handler<P>(
    State(service): State<Arc<TrustScoringService<P>>>,
    axum::Json(request): axum::Json<RateRequest>,
) -> Response
where
    P: EvidenceProvider + 'static,
{
    let scale = request.scale.unwrap_or(service.config().default_scale);
    if !scale.contains(request.trust_score) {
        let (low, high) = scale.range();
        return invalid_input(format!(
            "trust_score must be between {low} and {high} on the {scale} scale"
        ));
    }
    if let Some(rate) = request.base_rate {
        if !rate.is_finite() || rate < 0.0 {
            return invalid_input("base_rate must be a non-negative number");
        }
    }

    let advice = service.advise_rate(scale, request.trust_score, request.base_rate);
    (StatusCode::OK, axum::Json(advice)).into_response()
}

pub(crate) async fn risk_handler(Query(query): Query<RiskQuery>) -> Response {
    let scale = query.scale.unwrap_or(ScoreScale::Comprehensive);
    if !scale.contains(query.score) {
        let (low, high) = scale.range();
        return invalid_input(format!(
            "score must be between {low} and {high} on the {scale} scale"
        ));
    }

    let payload = json!({
        "scale": scale,
        "score": query.score,
        "risk_category": classify(scale, query.score),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
