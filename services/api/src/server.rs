use crate::cli::ServeArgs;
use crate::infra::{analytics_executor, load_inference_adapter, playground_service, AppState};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use credit_risk::config::AppConfig;
use credit_risk::error::AppError;
use credit_risk::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(model) = args.model.take() {
        config.data.model_path = model;
    }
    if let Some(snapshots) = args.snapshots.take() {
        config.data.snapshot_dir = Some(snapshots);
    }

    telemetry::init(&config.telemetry)?;

    let (adapter, model_status) = load_inference_adapter(&config.data.model_path);
    let playground = playground_service(adapter)?;
    let analytics = analytics_executor(config.data.snapshot_dir.as_deref());

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        model: model_status,
    };

    let app = with_service_routes(playground, analytics)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, model = ?model_status, "credit risk service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
