use credit_risk::analytics::{QueryExecutor, SnapshotQueryExecutor, UnconfiguredExecutor};
use credit_risk::error::AppError;
use credit_risk::playground::{
    InferenceAdapter, LinearModelAdapter, RiskPlaygroundService, ScoringConfig, UnavailableModel,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) type PlaygroundService = RiskPlaygroundService<dyn InferenceAdapter>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) model: ModelStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ModelStatus {
    Loaded,
    Unavailable,
}

/// Load the artifact once; a missing or broken model degrades scoring to 503s instead of aborting.
pub(crate) fn load_inference_adapter(path: &Path) -> (Arc<dyn InferenceAdapter>, ModelStatus) {
    match LinearModelAdapter::from_path(path) {
        Ok(adapter) => {
            info!(
                path = %path.display(),
                coefficients = adapter.artifact().coefficients.len(),
                "risk model loaded"
            );
            (Arc::new(adapter), ModelStatus::Loaded)
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "risk model unavailable; scoring disabled");
            (
                Arc::new(UnavailableModel::new(error.to_string())),
                ModelStatus::Unavailable,
            )
        }
    }
}

pub(crate) fn playground_service(
    adapter: Arc<dyn InferenceAdapter>,
) -> Result<Arc<PlaygroundService>, AppError> {
    let service = RiskPlaygroundService::new(adapter, ScoringConfig::default())?;
    Ok(Arc::new(service))
}

pub(crate) fn analytics_executor(snapshot_dir: Option<&Path>) -> Arc<dyn QueryExecutor> {
    match snapshot_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "serving analytics from snapshots");
            Arc::new(SnapshotQueryExecutor::from_dir(dir))
        }
        None => {
            warn!("ANALYTICS_SNAPSHOT_DIR not set; analytics queries disabled");
            Arc::new(UnconfiguredExecutor)
        }
    }
}
