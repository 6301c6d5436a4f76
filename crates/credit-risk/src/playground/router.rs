use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicantSubmission, ProfileOptions};
use super::inference::InferenceAdapter;
use super::service::{PlaygroundError, RiskAssessment, RiskPlaygroundService};

/// Body of a what-if request: a submission plus the probability to compose against.
#[derive(Debug, Clone, Deserialize)]
pub struct WhatIfRequest {
    pub profile: ApplicantSubmission,
    pub raw_probability: f64,
}

/// Router builder exposing the playground scoring endpoints.
pub fn playground_router<I>(service: Arc<RiskPlaygroundService<I>>) -> Router
where
    I: InferenceAdapter + ?Sized + 'static,
{
    Router::new()
        .route("/api/v1/playground/score", post(score_handler::<I>))
        .route("/api/v1/playground/what-if", post(what_if_handler::<I>))
        .route("/api/v1/playground/options", get(options_handler))
        .with_state(service)
}

pub(crate) async fn score_handler<I>(
    State(service): State<Arc<RiskPlaygroundService<I>>>,
    Json(submission): Json<ApplicantSubmission>,
) -> Response
where
    I: InferenceAdapter + ?Sized + 'static,
{
    assessment_response(service.assess(submission))
}

pub(crate) async fn what_if_handler<I>(
    State(service): State<Arc<RiskPlaygroundService<I>>>,
    Json(request): Json<WhatIfRequest>,
) -> Response
where
    I: InferenceAdapter + ?Sized + 'static,
{
    assessment_response(service.what_if(request.profile, request.raw_probability))
}

pub(crate) async fn options_handler() -> Json<ProfileOptions> {
    Json(ProfileOptions::catalog())
}

fn assessment_response(result: Result<RiskAssessment, PlaygroundError>) -> Response {
    match result {
        Ok(assessment) => (StatusCode::OK, Json(assessment)).into_response(),
        Err(PlaygroundError::Scoring(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(PlaygroundError::Inference(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
        }
    }
}
