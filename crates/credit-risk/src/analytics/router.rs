use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use super::catalog::{catalog, AnalyticsQuery, QueryDescriptor};
use super::executor::{AnalyticsError, QueryExecutor};
use super::insights::{correlation_insight, CorrelationInsight};

/// Response body for a single executed query.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsResponse {
    pub query: &'static str,
    pub title: &'static str,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight: Option<CorrelationInsight>,
}

/// Router exposing the query catalog and query results.
pub fn analytics_router(executor: Arc<dyn QueryExecutor>) -> Router {
    Router::new()
        .route("/api/v1/analytics", get(catalog_handler))
        .route("/api/v1/analytics/:query", get(query_handler))
        .with_state(executor)
}

pub(crate) async fn catalog_handler() -> Json<Vec<QueryDescriptor>> {
    Json(catalog())
}

pub(crate) async fn query_handler(
    State(executor): State<Arc<dyn QueryExecutor>>,
    Path(key): Path<String>,
) -> Response {
    match run_query(executor.as_ref(), &key) {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(error) => {
            let status = match &error {
                AnalyticsError::UnknownQuery(_) => StatusCode::NOT_FOUND,
                AnalyticsError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                AnalyticsError::MissingSnapshot { .. } | AnalyticsError::Snapshot { .. } => {
                    warn!(%error, "analytics query failed");
                    StatusCode::BAD_GATEWAY
                }
            };
            let payload = json!({
                "error": error.to_string(),
            });
            (status, Json(payload)).into_response()
        }
    }
}

fn run_query(
    executor: &dyn QueryExecutor,
    key: &str,
) -> Result<AnalyticsResponse, AnalyticsError> {
    let query =
        AnalyticsQuery::from_key(key).ok_or_else(|| AnalyticsError::UnknownQuery(key.to_string()))?;
    let result = executor.execute(query)?;
    let insight = correlation_insight(query, &result);

    Ok(AnalyticsResponse {
        query: query.key(),
        title: query.title(),
        columns: result.columns,
        rows: result.rows,
        insight,
    })
}
