use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::playground::inference::{StaticProbability, UnavailableModel};
use crate::playground::router::{playground_router, score_handler};
use crate::playground::scoring::ScoringConfig;
use crate::playground::service::RiskPlaygroundService;

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize")))
        .expect("request")
}

fn static_router(probability: f64) -> axum::Router {
    let service = RiskPlaygroundService::new(
        Arc::new(StaticProbability(probability)),
        ScoringConfig::default(),
    )
    .expect("default calibration");
    playground_router(Arc::new(service))
}

#[tokio::test]
async fn score_route_returns_breakdown() {
    let body = serde_json::to_value(submission(risky_profile())).expect("serialize");

    let response = static_router(0.10)
        .oneshot(json_post("/api/v1/playground/score", body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["breakdown"]["final_score"], 80.0);
    assert_eq!(payload["breakdown"]["zone"], "HighRisk");
    assert_eq!(
        payload["breakdown"]["triggered_penalties"],
        json!(["no_tech", "no_card_history", "high_risk_region", "high_expenses"])
    );
    assert_eq!(payload["profile"]["district_name"], "Most");
}

#[tokio::test]
async fn score_handler_rejects_unknown_vocabulary() {
    let (service, adapter) = build_service(0.1);
    let service = Arc::new(service);
    let mut raw = submission(baseline_profile());
    raw.card_usage_category = Some("Invalid".to_string());

    let response = score_handler(State(service), axum::Json(raw)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("card_usage_category"));
    assert_eq!(adapter.calls(), 0);
}

#[tokio::test]
async fn score_route_reports_unavailable_model() {
    let service = RiskPlaygroundService::new(
        Arc::new(UnavailableModel::new("model not loaded")),
        ScoringConfig::default(),
    )
    .expect("default calibration");
    let router = playground_router(Arc::new(service));
    let body = serde_json::to_value(submission(baseline_profile())).expect("serialize");

    let response = router
        .oneshot(json_post("/api/v1/playground/score", body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn what_if_route_rejects_out_of_range_probability() {
    let body = json!({
        "profile": submission(safe_profile()),
        "raw_probability": 1.4,
    });

    let response = static_router(0.1)
        .oneshot(json_post("/api/v1/playground/what-if", body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn what_if_route_scores_supplied_probability() {
    let body = json!({
        "profile": submission(safe_profile()),
        "raw_probability": 0.05,
    });

    let response = static_router(0.9)
        .oneshot(json_post("/api/v1/playground/what-if", body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["breakdown"]["final_score"], 1.0);
    assert_eq!(payload["breakdown"]["bonus_total"], 40);
}

#[tokio::test]
async fn options_route_lists_vocabularies() {
    let response = static_router(0.1)
        .oneshot(
            Request::get("/api/v1/playground/options")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["district_name"].as_array().map(Vec::len), Some(77));
    assert_eq!(payload["loan_duration_bucket"], json!(["short_term", "long_term"]));
}
