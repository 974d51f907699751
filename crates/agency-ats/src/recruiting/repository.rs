use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ApplicationId, ApplicationStatus, JobApplication, JobOpening, JobOpeningId};

/// Reviewer-editable fields. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewUpdate {
    #[serde(default)]
    pub status: Option<ApplicationStatus>,
    #[serde(default)]
    pub starred: Option<bool>,
    /// Flip the stored star flag. Takes precedence over `starred`.
    #[serde(default)]
    pub toggle_star: bool,
}

impl ReviewUpdate {
    pub fn status(status: ApplicationStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn starred(starred: bool) -> Self {
        Self {
            starred: Some(starred),
            ..Self::default()
        }
    }

    pub fn toggle_star() -> Self {
        Self {
            toggle_star: true,
            ..Self::default()
        }
    }

    pub fn apply_to(&self, application: &mut JobApplication) {
        if let Some(status) = self.status {
            application.status = status;
        }
        if self.toggle_star {
            application.starred = !application.starred;
        } else if let Some(starred) = self.starred {
            application.starred = starred;
        }
    }

    /// Apply to a stored record, returning the record as it was and as it is now.
    pub fn apply_in_place(&self, application: &mut JobApplication) -> ReviewChange {
        let before = application.clone();
        self.apply_to(application);
        ReviewChange {
            before,
            after: application.clone(),
        }
    }
}

/// Snapshot pair taken inside a single store update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewChange {
    pub before: JobApplication,
    pub after: JobApplication,
}

/// Keyed record store holding openings and applications.
pub trait RecruitingStore: Send + Sync {
    fn insert_opening(&self, opening: JobOpening) -> Result<JobOpening, RepositoryError>;
    fn fetch_opening(&self, id: &JobOpeningId) -> Result<Option<JobOpening>, RepositoryError>;
    /// Newest first.
    fn openings(&self) -> Result<Vec<JobOpening>, RepositoryError>;

    fn insert_application(
        &self,
        application: JobApplication,
    ) -> Result<JobApplication, RepositoryError>;
    fn fetch_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<JobApplication>, RepositoryError>;
    /// Every application ordered by `applied_at` descending.
    fn applications_by_recency(&self) -> Result<Vec<JobApplication>, RepositoryError>;
    /// Apply `update` atomically. The returned `before` is the record the update saw.
    fn update_review(
        &self,
        id: &ApplicationId,
        update: ReviewUpdate,
    ) -> Result<ReviewChange, RepositoryError>;
    fn delete_application(&self, id: &ApplicationId) -> Result<(), RepositoryError>;
}

/// Error enumeration for record store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// Outbound change notifications, consumed by live review boards and the audit trail.
pub trait ChangeFeed: Send + Sync {
    fn publish(&self, event: ApplicationEvent) -> Result<(), FeedError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationEvent {
    pub application_id: ApplicationId,
    /// `None` when the candidate triggered the change.
    pub reviewer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_name: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub kind: ApplicationEventKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ApplicationEventKind {
    Submitted {
        job_opening_id: JobOpeningId,
        ats_score: u8,
    },
    StatusChanged {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    StarToggled {
        starred: bool,
    },
    Deleted,
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("change feed transport unavailable: {0}")]
    Transport(String),
}
