use crate::infra::{AppState, PlaygroundService};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use credit_risk::analytics::{analytics_router, QueryExecutor};
use credit_risk::playground::playground_router;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_service_routes(
    playground: Arc<PlaygroundService>,
    analytics: Arc<dyn QueryExecutor>,
) -> Router {
    playground_router(playground)
        .merge(analytics_router(analytics))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready", "model": state.model })
    } else {
        json!({ "status": "initializing", "model": state.model })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{playground_service, ModelStatus};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use credit_risk::analytics::UnconfiguredExecutor;
    use credit_risk::playground::UnavailableModel;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> Router {
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            model: ModelStatus::Unavailable,
        };
        let playground = playground_service(Arc::new(UnavailableModel::new("no artifact")))
            .expect("default calibration");
        with_service_routes(playground, Arc::new(UnconfiguredExecutor)).layer(Extension(state))
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, serde_json::from_slice(&bytes).expect("json"))
    }

    #[tokio::test]
    async fn readiness_reports_model_status() {
        let (status, body) = get(app(true), "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["model"], "unavailable");

        let (status, body) = get(app(false), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "initializing");
    }

    #[tokio::test]
    async fn feature_routes_are_mounted() {
        let (status, body) = get(app(true), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = get(app(true), "/api/v1/playground/options").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["age_range"], json!([18, 80]));

        let (status, _) = get(app(true), "/api/v1/analytics/overall_default_rate").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
