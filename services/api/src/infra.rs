use agency_ats::recruiting::{
    ApplicationEvent, ApplicationId, ChangeFeed, FeedError, JobApplication, JobOpening,
    JobOpeningId, RecruitingStore, RepositoryError, ReviewChange, ReviewUpdate,
};
use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) audit: Arc<RecordingChangeFeed>,
}

/// Process-local record store used until a hosted backend is wired in.
#[derive(Default, Clone)]
pub(crate) struct InMemoryRecruitingStore {
    openings: Arc<Mutex<HashMap<JobOpeningId, JobOpening>>>,
    applications: Arc<Mutex<HashMap<ApplicationId, JobApplication>>>,
}

impl RecruitingStore for InMemoryRecruitingStore {
    fn insert_opening(&self, opening: JobOpening) -> Result<JobOpening, RepositoryError> {
        let mut guard = self.openings.lock().expect("repository mutex poisoned");
        if guard.contains_key(&opening.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(opening.id.clone(), opening.clone());
        Ok(opening)
    }

    fn fetch_opening(&self, id: &JobOpeningId) -> Result<Option<JobOpening>, RepositoryError> {
        let guard = self.openings.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn openings(&self) -> Result<Vec<JobOpening>, RepositoryError> {
        let guard = self.openings.lock().expect("repository mutex poisoned");
        let mut openings: Vec<JobOpening> = guard.values().cloned().collect();
        openings.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(openings)
    }

    fn insert_application(
        &self,
        application: JobApplication,
    ) -> Result<JobApplication, RepositoryError> {
        let mut guard = self.applications.lock().expect("repository mutex poisoned");
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
        let guard = self.applications.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn applications_by_recency(&self) -> Result<Vec<JobApplication>, RepositoryError> {
        let guard = self.applications.lock().expect("repository mutex poisoned");
        let mut applications: Vec<JobApplication> = guard.values().cloned().collect();
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
        let mut guard = self.applications.lock().expect("repository mutex poisoned");
        let application = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        Ok(update.apply_in_place(application))
    }

    fn delete_application(&self, id: &ApplicationId) -> Result<(), RepositoryError> {
        let mut guard = self.applications.lock().expect("repository mutex poisoned");
        match guard.remove(id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound),
        }
    }
}

/// Change feed that keeps every event so it can be served as an audit trail.
#[derive(Default, Clone)]
pub(crate) struct RecordingChangeFeed {
    events: Arc<Mutex<Vec<ApplicationEvent>>>,
}

impl ChangeFeed for RecordingChangeFeed {
    fn publish(&self, event: ApplicationEvent) -> Result<(), FeedError> {
        let mut guard = self.events.lock().expect("feed mutex poisoned");
        guard.push(event);
        Ok(())
    }
}

impl RecordingChangeFeed {
    pub(crate) fn events(&self) -> Vec<ApplicationEvent> {
        self.events.lock().expect("feed mutex poisoned").clone()
    }

    /// Events recorded after the first `seen`, for incremental consumers.
    pub(crate) fn events_since(&self, seen: usize) -> Vec<ApplicationEvent> {
        let guard = self.events.lock().expect("feed mutex poisoned");
        guard.iter().skip(seen).cloned().collect()
    }
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 timestamp ({err})"))
}
