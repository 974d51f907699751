use crate::infra::AppState;
use agency_ats::recruiting::{
    recruiting_router, ApplicationEvent, ChangeFeed, RecruitingService, RecruitingStore,
};
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AuditQuery {
    /// Skip the first `since` events; lets pollers fetch only what is new.
    #[serde(default)]
    pub(crate) since: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AuditResponse {
    pub(crate) total: usize,
    pub(crate) events: Vec<ApplicationEvent>,
}

pub(crate) fn with_service_routes<S, F>(service: Arc<RecruitingService<S, F>>) -> axum::Router
where
    S: RecruitingStore + 'static,
    F: ChangeFeed + 'static,
{
    recruiting_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/audit", axum::routing::get(audit_endpoint))
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
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
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

pub(crate) async fn audit_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<AuditQuery>,
) -> Json<AuditResponse> {
    let total = state.audit.events().len();
    let events = state.audit.events_since(query.since.unwrap_or(0));
    Json(AuditResponse { total, events })
}
