use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryEvidenceProvider};
use crate::routes::with_trust_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use trust_engine::config::AppConfig;
use trust_engine::error::AppError;
use trust_engine::scoring::TrustScoringService;
use trust_engine::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let provider = Arc::new(InMemoryEvidenceProvider::with_demo_applicants(Utc::now()));
    let scoring_service = Arc::new(TrustScoringService::new(
        provider.clone(),
        config.scoring.clone(),
    ));

    let app = with_trust_routes(scoring_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        scale = %config.scoring.default_scale,
        applicants = provider.len(),
        "trust scoring service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
