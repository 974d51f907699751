use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, patch, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::domain::{
    ApplicationId, ApplicationStatus, ApplicationSubmission, ApplicationSummaryView,
    JobOpening, JobOpeningId, OpeningDraft,
};
use super::filter::FilterQuery;
use super::repository::{ChangeFeed, RecruitingStore};
use super::scoring::ScoreComponent;
use super::service::RecruitingService;
use super::session::ReviewerSession;
use crate::error::AppError;

pub const REVIEWER_ID_HEADER: &str = "x-reviewer-id";
pub const REVIEWER_NAME_HEADER: &str = "x-reviewer-name";

/// Router builder exposing openings, intake, and reviewer endpoints.
pub fn recruiting_router<S, F>(service: Arc<RecruitingService<S, F>>) -> Router
where
    S: RecruitingStore + 'static,
    F: ChangeFeed + 'static,
{
    Router::new()
        .route(
            "/api/v1/openings",
            post(create_opening_handler::<S, F>).get(list_openings_handler::<S, F>),
        )
        .route("/api/v1/openings/:opening_id", get(opening_handler::<S, F>))
        .route(
            "/api/v1/applications",
            post(submit_handler::<S, F>).get(list_applications_handler::<S, F>),
        )
        .route(
            "/api/v1/applications/:application_id",
            get(application_handler::<S, F>).delete(delete_handler::<S, F>),
        )
        .route(
            "/api/v1/applications/:application_id/status",
            patch(status_handler::<S, F>),
        )
        .route("/api/v1/applications/:application_id/star", put(star_handler::<S, F>))
        .with_state(service)
}

/// Body accepted by the status route.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: ApplicationStatus,
}

/// Body accepted by the star route.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StarChange {
    pub starred: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmissionReceipt {
    pub(crate) application: ApplicationSummaryView,
    pub(crate) components: Vec<ScoreComponent>,
}

pub(crate) async fn create_opening_handler<S, F>(
    State(service): State<Arc<RecruitingService<S, F>>>,
    Json(draft): Json<OpeningDraft>,
) -> Result<(StatusCode, Json<JobOpening>), AppError>
where
    S: RecruitingStore + 'static,
    F: ChangeFeed + 'static,
{
    let opening = service.post_opening(draft)?;
    Ok((StatusCode::CREATED, Json(opening)))
}

pub(crate) async fn list_openings_handler<S, F>(
    State(service): State<Arc<RecruitingService<S, F>>>,
) -> Result<Json<Vec<JobOpening>>, AppError>
where
    S: RecruitingStore + 'static,
    F: ChangeFeed + 'static,
{
    Ok(Json(service.openings()?))
}

pub(crate) async fn opening_handler<S, F>(
    State(service): State<Arc<RecruitingService<S, F>>>,
    Path(opening_id): Path<String>,
) -> Result<Json<JobOpening>, AppError>
where
    S: RecruitingStore + 'static,
    F: ChangeFeed + 'static,
{
    Ok(Json(service.opening(&JobOpeningId(opening_id))?))
}

pub(crate) async fn submit_handler<S, F>(
    State(service): State<Arc<RecruitingService<S, F>>>,
    Json(submission): Json<ApplicationSubmission>,
) -> Result<(StatusCode, Json<SubmissionReceipt>), AppError>
where
    S: RecruitingStore + 'static,
    F: ChangeFeed + 'static,
{
    let scored = service.submit(submission)?;
    let receipt = SubmissionReceipt {
        application: scored.application.summary_view(),
        components: scored.report.components,
    };
    Ok((StatusCode::ACCEPTED, Json(receipt)))
}

pub(crate) async fn list_applications_handler<S, F>(
    State(service): State<Arc<RecruitingService<S, F>>>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<ApplicationSummaryView>>, AppError>
where
    S: RecruitingStore + 'static,
    F: ChangeFeed + 'static,
{
    let spec = query.into_spec()?;
    let views = service
        .list(&spec)?
        .iter()
        .map(|application| application.summary_view())
        .collect();
    Ok(Json(views))
}

pub(crate) async fn application_handler<S, F>(
    State(service): State<Arc<RecruitingService<S, F>>>,
    Path(application_id): Path<String>,
) -> Result<Json<ApplicationSummaryView>, AppError>
where
    S: RecruitingStore + 'static,
    F: ChangeFeed + 'static,
{
    let application = service.get(&ApplicationId(application_id))?;
    Ok(Json(application.summary_view()))
}

pub(crate) async fn status_handler<S, F>(
    State(service): State<Arc<RecruitingService<S, F>>>,
    headers: HeaderMap,
    Path(application_id): Path<String>,
    Json(change): Json<StatusChange>,
) -> Result<Json<ApplicationSummaryView>, AppError>
where
    S: RecruitingStore + 'static,
    F: ChangeFeed + 'static,
{
    let session = reviewer_session(&headers)?;
    let application =
        service.set_status(&session, &ApplicationId(application_id), change.status)?;
    Ok(Json(application.summary_view()))
}

pub(crate) async fn star_handler<S, F>(
    State(service): State<Arc<RecruitingService<S, F>>>,
    headers: HeaderMap,
    Path(application_id): Path<String>,
    Json(change): Json<StarChange>,
) -> Result<Json<ApplicationSummaryView>, AppError>
where
    S: RecruitingStore + 'static,
    F: ChangeFeed + 'static,
{
    let session = reviewer_session(&headers)?;
    let application =
        service.set_starred(&session, &ApplicationId(application_id), change.starred)?;
    Ok(Json(application.summary_view()))
}

pub(crate) async fn delete_handler<S, F>(
    State(service): State<Arc<RecruitingService<S, F>>>,
    headers: HeaderMap,
    Path(application_id): Path<String>,
) -> Result<StatusCode, AppError>
where
    S: RecruitingStore + 'static,
    F: ChangeFeed + 'static,
{
    let session = reviewer_session(&headers)?;
    service.delete(&session, &ApplicationId(application_id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Build the per-request reviewer session from headers.
pub(crate) fn reviewer_session(headers: &HeaderMap) -> Result<ReviewerSession, AppError> {
    let header_text = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    let reviewer_id = header_text(REVIEWER_ID_HEADER).unwrap_or_default();
    Ok(ReviewerSession::new(reviewer_id, header_text(REVIEWER_NAME_HEADER))?)
}
