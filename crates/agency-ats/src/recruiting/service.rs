use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{
    ApplicationId, ApplicationStatus, ApplicationSubmission, JobApplication, JobOpening,
    JobOpeningId, OpeningDraft,
};
use super::filter::FilterSpec;
use super::intake::{IntakeGuard, IntakeViolation};
use super::repository::{
    ApplicationEvent, ApplicationEventKind, ChangeFeed, RecruitingStore, RepositoryError,
    ReviewUpdate,
};
use super::scoring::{FitnessReport, FitnessScorer, ScoringConfig};
use super::session::ReviewerSession;

/// Service composing intake validation, fitness scoring, the record store and the feed.
pub struct RecruitingService<S, F> {
    guard: Arc<IntakeGuard>,
    store: Arc<S>,
    feed: Arc<F>,
    scorer: Arc<FitnessScorer>,
}

static OPENING_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_opening_id() -> JobOpeningId {
    let id = OPENING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    JobOpeningId(format!("job-{id:06}"))
}

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

/// A freshly persisted application together with the breakdown of its score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredApplication {
    pub application: JobApplication,
    pub report: FitnessReport,
}

impl<S, F> RecruitingService<S, F>
where
    S: RecruitingStore + 'static,
    F: ChangeFeed + 'static,
{
    pub fn new(store: Arc<S>, feed: Arc<F>, scoring: ScoringConfig) -> Self {
        Self::with_guard(IntakeGuard::default(), store, feed, scoring)
    }

    pub fn with_guard(
        guard: IntakeGuard,
        store: Arc<S>,
        feed: Arc<F>,
        scoring: ScoringConfig,
    ) -> Self {
        Self {
            guard: Arc::new(guard),
            store,
            feed,
            scorer: Arc::new(FitnessScorer::new(scoring)),
        }
    }

    pub fn scorer(&self) -> &FitnessScorer {
        &self.scorer
    }

    /// Publish a new opening stamped with the current time.
    pub fn post_opening(&self, draft: OpeningDraft) -> Result<JobOpening, RecruitingServiceError> {
        self.post_opening_at(draft, Utc::now())
    }

    pub fn post_opening_at(
        &self,
        draft: OpeningDraft,
        created_at: DateTime<Utc>,
    ) -> Result<JobOpening, RecruitingServiceError> {
        let opening = self
            .guard
            .opening_from_draft(draft, next_opening_id(), created_at)?;
        if self.scorer.keywords(&opening).is_empty() {
            warn!(opening_id = %opening.id, "opening has no keywords; keyword relevance will score zero");
        } else if !opening.is_scoreable() {
            warn!(opening_id = %opening.id, "opening is missing focus areas or requirements");
        }
        let stored = self.store.insert_opening(opening)?;
        info!(opening_id = %stored.id, title = %stored.title, "job opening published");
        Ok(stored)
    }

    pub fn opening(&self, id: &JobOpeningId) -> Result<JobOpening, RecruitingServiceError> {
        let opening = self
            .store
            .fetch_opening(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(opening)
    }

    pub fn openings(&self) -> Result<Vec<JobOpening>, RecruitingServiceError> {
        Ok(self.store.openings()?)
    }

    /// Submit an application stamped with the current time.
    pub fn submit(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<ScoredApplication, RecruitingServiceError> {
        self.submit_at(submission, Utc::now())
    }

    /// Validate, score once, persist, and announce a submission.
    pub fn submit_at(
        &self,
        submission: ApplicationSubmission,
        applied_at: DateTime<Utc>,
    ) -> Result<ScoredApplication, RecruitingServiceError> {
        let opening = self
            .store
            .fetch_opening(&submission.job_opening_id)?
            .ok_or_else(|| IntakeViolation::UnknownOpening(submission.job_opening_id.clone()))?;

        let mut application = self.guard.application_from_submission(
            submission,
            &opening,
            next_application_id(),
            applied_at,
        )?;

        let report = self.scorer.score(&opening, &application);
        application.ats_score = Some(report.total);

        let stored = self.store.insert_application(application)?;
        info!(
            application_id = %stored.id,
            opening_id = %stored.job_opening_id,
            ats_score = report.total,
            "application received"
        );

        self.announce(ApplicationEvent {
            application_id: stored.id.clone(),
            reviewer_id: None,
            reviewer_name: None,
            occurred_at: applied_at,
            kind: ApplicationEventKind::Submitted {
                job_opening_id: stored.job_opening_id.clone(),
                ats_score: report.total,
            },
        });

        Ok(ScoredApplication {
            application: stored,
            report,
        })
    }

    /// Fetch an application. The stored score is returned as-is, never recomputed.
    pub fn get(&self, id: &ApplicationId) -> Result<JobApplication, RecruitingServiceError> {
        let application = self
            .store
            .fetch_application(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(application)
    }

    /// Applications matching `spec`, newest first.
    pub fn list(&self, spec: &FilterSpec) -> Result<Vec<JobApplication>, RecruitingServiceError> {
        let applications = self.store.applications_by_recency()?;
        Ok(applications
            .into_iter()
            .filter(|application| spec.matches(application))
            .collect())
    }

    /// Move an application to `status`. Setting the current status is a silent no-op.
    pub fn set_status(
        &self,
        session: &ReviewerSession,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<JobApplication, RecruitingServiceError> {
        let change = self.store.update_review(id, ReviewUpdate::status(status))?;
        let (from, to) = (change.before.status, change.after.status);
        if from == to {
            return Ok(change.after);
        }

        info!(
            application_id = %id,
            reviewer = session.reviewer_id(),
            reviewer_name = session.display_name(),
            from = %from,
            to = %to,
            "application status changed"
        );
        self.announce(reviewer_event(
            session,
            id,
            ApplicationEventKind::StatusChanged { from, to },
        ));

        Ok(change.after)
    }

    pub fn set_starred(
        &self,
        session: &ReviewerSession,
        id: &ApplicationId,
        starred: bool,
    ) -> Result<JobApplication, RecruitingServiceError> {
        self.review_star(session, id, ReviewUpdate::starred(starred))
    }

    pub fn toggle_star(
        &self,
        session: &ReviewerSession,
        id: &ApplicationId,
    ) -> Result<JobApplication, RecruitingServiceError> {
        self.review_star(session, id, ReviewUpdate::toggle_star())
    }

    fn review_star(
        &self,
        session: &ReviewerSession,
        id: &ApplicationId,
        update: ReviewUpdate,
    ) -> Result<JobApplication, RecruitingServiceError> {
        let change = self.store.update_review(id, update)?;
        let starred = change.after.starred;
        if change.before.starred == starred {
            return Ok(change.after);
        }

        info!(
            application_id = %id,
            reviewer = session.reviewer_id(),
            reviewer_name = session.display_name(),
            starred,
            "application star toggled"
        );
        self.announce(reviewer_event(
            session,
            id,
            ApplicationEventKind::StarToggled { starred },
        ));

        Ok(change.after)
    }

    /// Administrative removal of an application.
    pub fn delete(
        &self,
        session: &ReviewerSession,
        id: &ApplicationId,
    ) -> Result<(), RecruitingServiceError> {
        self.store.delete_application(id)?;
        info!(
            application_id = %id,
            reviewer = session.reviewer_id(),
            reviewer_name = session.display_name(),
            "application deleted"
        );
        self.announce(reviewer_event(session, id, ApplicationEventKind::Deleted));

        Ok(())
    }

    /// Feed delivery is best effort: the store write has already happened.
    fn announce(&self, event: ApplicationEvent) {
        let application_id = event.application_id.clone();
        if let Err(err) = self.feed.publish(event) {
            warn!(application_id = %application_id, error = %err, "change feed publish failed");
        }
    }
}

fn reviewer_event(
    session: &ReviewerSession,
    id: &ApplicationId,
    kind: ApplicationEventKind,
) -> ApplicationEvent {
    ApplicationEvent {
        application_id: id.clone(),
        reviewer_id: Some(session.reviewer_id().to_string()),
        reviewer_name: Some(session.display_name().to_string()),
        occurred_at: Utc::now(),
        kind,
    }
}

/// Error raised by the recruiting service.
#[derive(Debug, thiserror::Error)]
pub enum RecruitingServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
