use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::recruiting::domain::{
    ApplicationId, ApplicationStatus, ApplicationSubmission, JobApplication, JobOpening,
    JobOpeningId, OpeningDraft,
};
use crate::recruiting::repository::{
    ApplicationEvent, ChangeFeed, FeedError, RecruitingStore, RepositoryError, ReviewChange,
    ReviewUpdate,
};
use crate::recruiting::session::ReviewerSession;
use crate::recruiting::{recruiting_router, RecruitingService, ScoringConfig};

pub(super) fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn hours_after_t0(hours: i64) -> DateTime<Utc> {
    t0() + Duration::hours(hours)
}

pub(super) fn react_opening() -> JobOpening {
    JobOpening {
        id: JobOpeningId("job-react".to_string()),
        title: "Frontend Developer".to_string(),
        focus_areas: vec!["React".to_string(), "Node".to_string()],
        requirements: "must know react and node development".to_string(),
        created_at: t0(),
    }
}

pub(super) fn react_draft() -> OpeningDraft {
    OpeningDraft {
        title: "Frontend Developer".to_string(),
        focus_areas: vec!["React".to_string(), "Node".to_string()],
        requirements: "must know react and node development".to_string(),
    }
}

/// Scenario A applicant: every factor present, strong keyword overlap.
pub(super) fn strong_application() -> JobApplication {
    JobApplication {
        id: ApplicationId("app-strong".to_string()),
        job_opening_id: JobOpeningId("job-react".to_string()),
        full_name: "Dana Vance".to_string(),
        email: "dev@outlook.com".to_string(),
        phone: Some("555-1234".to_string()),
        cover_letter: Some("I have 3 years of React and Node experience".to_string()),
        portfolio_url: Some("http://x.com".to_string()),
        applied_at: hours_after_t0(2),
        ats_score: None,
        starred: false,
        status: ApplicationStatus::Applied,
    }
}

/// Scenario B applicant: nothing optional, free email, late.
pub(super) fn bare_application() -> JobApplication {
    JobApplication {
        id: ApplicationId("app-bare".to_string()),
        job_opening_id: JobOpeningId("job-react".to_string()),
        full_name: "Sam Lowe".to_string(),
        email: "dev@gmail.com".to_string(),
        phone: None,
        cover_letter: None,
        portfolio_url: None,
        applied_at: hours_after_t0(100),
        ats_score: None,
        starred: false,
        status: ApplicationStatus::Applied,
    }
}

pub(super) fn reviewed(
    id: &str,
    full_name: &str,
    status: ApplicationStatus,
    ats_score: Option<u8>,
    starred: bool,
) -> JobApplication {
    JobApplication {
        id: ApplicationId(id.to_string()),
        job_opening_id: JobOpeningId("job-react".to_string()),
        full_name: full_name.to_string(),
        email: format!("{}@studio.io", id),
        phone: Some("+1 (555) 010-2000".to_string()),
        cover_letter: None,
        portfolio_url: None,
        applied_at: t0(),
        ats_score,
        starred,
        status,
    }
}

pub(super) fn submission_for(opening_id: &JobOpeningId) -> ApplicationSubmission {
    ApplicationSubmission {
        job_opening_id: opening_id.clone(),
        full_name: "  Dana Vance ".to_string(),
        email: "dev@outlook.com".to_string(),
        phone: Some("555-1234".to_string()),
        cover_letter: Some("I have 3 years of React and Node experience".to_string()),
        portfolio_url: Some("http://x.com".to_string()),
    }
}

pub(super) fn reviewer() -> ReviewerSession {
    ReviewerSession::new("rev-ana", Some("Ana".to_string())).expect("valid session")
}

#[derive(Default)]
pub(super) struct MemoryStore {
    openings: Mutex<HashMap<JobOpeningId, JobOpening>>,
    applications: Mutex<HashMap<ApplicationId, JobApplication>>,
}

impl MemoryStore {
    pub(super) fn seed_application(&self, application: JobApplication) {
        self.applications
            .lock()
            .expect("store mutex poisoned")
            .insert(application.id.clone(), application);
    }
}

impl RecruitingStore for MemoryStore {
    fn insert_opening(&self, opening: JobOpening) -> Result<JobOpening, RepositoryError> {
        let mut guard = self.openings.lock().expect("store mutex poisoned");
        if guard.contains_key(&opening.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(opening.id.clone(), opening.clone());
        Ok(opening)
    }

    fn fetch_opening(&self, id: &JobOpeningId) -> Result<Option<JobOpening>, RepositoryError> {
        Ok(self
            .openings
            .lock()
            .expect("store mutex poisoned")
            .get(id)
            .cloned())
    }

    fn openings(&self) -> Result<Vec<JobOpening>, RepositoryError> {
        let mut openings: Vec<JobOpening> = self
            .openings
            .lock()
            .expect("store mutex poisoned")
            .values()
            .cloned()
            .collect();
        openings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(openings)
    }

    fn insert_application(
        &self,
        application: JobApplication,
    ) -> Result<JobApplication, RepositoryError> {
        let mut guard = self.applications.lock().expect("store mutex poisoned");
        if guard.contains_key(&application.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn fetch_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<JobApplication>, RepositoryError> {
        Ok(self
            .applications
            .lock()
            .expect("store mutex poisoned")
            .get(id)
            .cloned())
    }

    fn applications_by_recency(&self) -> Result<Vec<JobApplication>, RepositoryError> {
        let mut applications: Vec<JobApplication> = self
            .applications
            .lock()
            .expect("store mutex poisoned")
            .values()
            .cloned()
            .collect();
        applications.sort_by(|a, b| {
            b.applied_at
                .cmp(&a.applied_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(applications)
    }

    fn update_review(
        &self,
        id: &ApplicationId,
        update: ReviewUpdate,
    ) -> Result<ReviewChange, RepositoryError> {
        let mut guard = self.applications.lock().expect("store mutex poisoned");
        let application = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        Ok(update.apply_in_place(application))
    }

    fn delete_application(&self, id: &ApplicationId) -> Result<(), RepositoryError> {
        let mut guard = self.applications.lock().expect("store mutex poisoned");
        guard
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

/// Knows the react opening but rejects every application write as a duplicate.
pub(super) struct ConflictStore;

impl RecruitingStore for ConflictStore {
    fn insert_opening(&self, _opening: JobOpening) -> Result<JobOpening, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch_opening(&self, id: &JobOpeningId) -> Result<Option<JobOpening>, RepositoryError> {
        let opening = react_opening();
        Ok((&opening.id == id).then_some(opening))
    }

    fn openings(&self) -> Result<Vec<JobOpening>, RepositoryError> {
        Ok(vec![react_opening()])
    }

    fn insert_application(
        &self,
        _application: JobApplication,
    ) -> Result<JobApplication, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch_application(
        &self,
        _id: &ApplicationId,
    ) -> Result<Option<JobApplication>, RepositoryError> {
        Ok(None)
    }

    fn applications_by_recency(&self) -> Result<Vec<JobApplication>, RepositoryError> {
        Ok(Vec::new())
    }

    fn update_review(
        &self,
        _id: &ApplicationId,
        _update: ReviewUpdate,
    ) -> Result<ReviewChange, RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn delete_application(&self, _id: &ApplicationId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }
}

pub(super) struct UnavailableStore;

impl RecruitingStore for UnavailableStore {
    fn insert_opening(&self, _opening: JobOpening) -> Result<JobOpening, RepositoryError> {
        Err(unavailable())
    }

    fn fetch_opening(&self, _id: &JobOpeningId) -> Result<Option<JobOpening>, RepositoryError> {
        Err(unavailable())
    }

    fn openings(&self) -> Result<Vec<JobOpening>, RepositoryError> {
        Err(unavailable())
    }

    fn insert_application(
        &self,
        _application: JobApplication,
    ) -> Result<JobApplication, RepositoryError> {
        Err(unavailable())
    }

    fn fetch_application(
        &self,
        _id: &ApplicationId,
    ) -> Result<Option<JobApplication>, RepositoryError> {
        Err(unavailable())
    }

    fn applications_by_recency(&self) -> Result<Vec<JobApplication>, RepositoryError> {
        Err(unavailable())
    }

    fn update_review(
        &self,
        _id: &ApplicationId,
        _update: ReviewUpdate,
    ) -> Result<ReviewChange, RepositoryError> {
        Err(unavailable())
    }

    fn delete_application(&self, _id: &ApplicationId) -> Result<(), RepositoryError> {
        Err(unavailable())
    }
}

/// Serves a fixed, outdated snapshot on point reads while writes hit the live records,
/// like a read replica lagging behind another reviewer's change.
pub(super) struct LaggingReadStore {
    pub(super) live: MemoryStore,
    pub(super) snapshot: JobApplication,
}

impl RecruitingStore for LaggingReadStore {
    fn insert_opening(&self, opening: JobOpening) -> Result<JobOpening, RepositoryError> {
        self.live.insert_opening(opening)
    }

    fn fetch_opening(&self, id: &JobOpeningId) -> Result<Option<JobOpening>, RepositoryError> {
        self.live.fetch_opening(id)
    }

    fn openings(&self) -> Result<Vec<JobOpening>, RepositoryError> {
        self.live.openings()
    }

    fn insert_application(
        &self,
        application: JobApplication,
    ) -> Result<JobApplication, RepositoryError> {
        self.live.insert_application(application)
    }

    fn fetch_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<JobApplication>, RepositoryError> {
        Ok((&self.snapshot.id == id).then(|| self.snapshot.clone()))
    }

    fn applications_by_recency(&self) -> Result<Vec<JobApplication>, RepositoryError> {
        self.live.applications_by_recency()
    }

    fn update_review(
        &self,
        id: &ApplicationId,
        update: ReviewUpdate,
    ) -> Result<ReviewChange, RepositoryError> {
        self.live.update_review(id, update)
    }

    fn delete_application(&self, id: &ApplicationId) -> Result<(), RepositoryError> {
        self.live.delete_application(id)
    }
}

fn unavailable() -> RepositoryError {
    RepositoryError::Unavailable("backend offline".to_string())
}

#[derive(Default)]
pub(super) struct MemoryFeed {
    events: Mutex<Vec<ApplicationEvent>>,
}

impl MemoryFeed {
    pub(super) fn events(&self) -> Vec<ApplicationEvent> {
        self.events.lock().expect("feed mutex poisoned").clone()
    }
}

impl ChangeFeed for MemoryFeed {
    fn publish(&self, event: ApplicationEvent) -> Result<(), FeedError> {
        self.events.lock().expect("feed mutex poisoned").push(event);
        Ok(())
    }
}

pub(super) struct DisconnectedFeed;

impl ChangeFeed for DisconnectedFeed {
    fn publish(&self, _event: ApplicationEvent) -> Result<(), FeedError> {
        Err(FeedError::Transport("socket closed".to_string()))
    }
}

pub(super) type MemoryService = RecruitingService<MemoryStore, MemoryFeed>;

pub(super) fn build_service() -> (MemoryService, Arc<MemoryStore>, Arc<MemoryFeed>) {
    let store = Arc::new(MemoryStore::default());
    let feed = Arc::new(MemoryFeed::default());
    let service = RecruitingService::new(store.clone(), feed.clone(), ScoringConfig::default());
    (service, store, feed)
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    recruiting_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
