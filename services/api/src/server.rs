use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryRecruitingStore, RecordingChangeFeed};
use crate::routes::with_service_routes;
use agency_ats::config::AppConfig;
use agency_ats::error::AppError;
use agency_ats::recruiting::RecruitingService;
use agency_ats::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let store = Arc::new(InMemoryRecruitingStore::default());
    let feed = Arc::new(RecordingChangeFeed::default());
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        audit: feed.clone(),
    };

    let service = Arc::new(RecruitingService::new(
        store,
        feed,
        config.scoring.clone(),
    ));

    let app = with_service_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        free_email_domains = config.scoring.free_email_domains.len(),
        "agency applicant tracking service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
