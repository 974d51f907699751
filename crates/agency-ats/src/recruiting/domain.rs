use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for published job openings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobOpeningId(pub String);

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl fmt::Display for JobOpeningId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Untrusted opening payload as posted by staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningDraft {
    pub title: String,
    #[serde(default)]
    pub focus_areas: Vec<String>,
    #[serde(default)]
    pub requirements: String,
}

/// A published opening. Focus areas are trimmed and de-duplicated at intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOpening {
    pub id: JobOpeningId,
    pub title: String,
    pub focus_areas: Vec<String>,
    pub requirements: String,
    pub created_at: DateTime<Utc>,
}

impl JobOpening {
    /// Listing-quality check: both focus areas and requirements are filled in. Keyword
    /// relevance draws on the union of the two, so an opening with only one of them
    /// still awards keyword points.
    pub fn is_scoreable(&self) -> bool {
        !self.focus_areas.is_empty() && !self.requirements.trim().is_empty()
    }
}

/// Untrusted application payload as submitted by a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub job_opening_id: JobOpeningId,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub portfolio_url: Option<String>,
}

/// Application record as persisted in the record store.
///
/// `ats_score` is computed once at submission. Rows written by other clients may lack
/// it, so it stays optional on read and filters treat a missing score as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: ApplicationId,
    pub job_opening_id: JobOpeningId,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub portfolio_url: Option<String>,
    pub applied_at: DateTime<Utc>,
    #[serde(default)]
    pub ats_score: Option<u8>,
    #[serde(default)]
    pub starred: bool,
    pub status: ApplicationStatus,
}

impl JobApplication {
    pub fn score_or_zero(&self) -> u8 {
        self.ats_score.unwrap_or(0)
    }

    pub fn summary_view(&self) -> ApplicationSummaryView {
        ApplicationSummaryView {
            application_id: self.id.clone(),
            job_opening_id: self.job_opening_id.clone(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            status: self.status.label(),
            starred: self.starred,
            ats_score: self.score_or_zero(),
            applied_at: self.applied_at,
        }
    }
}

/// Reviewer workflow state. Any state may move to any other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
    Reviewed,
    Shortlisted,
    Interviewed,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    pub const fn all() -> [Self; 6] {
        [
            Self::Applied,
            Self::Reviewed,
            Self::Shortlisted,
            Self::Interviewed,
            Self::Hired,
            Self::Rejected,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::Reviewed => "Reviewed",
            Self::Shortlisted => "Shortlisted",
            Self::Interviewed => "Interviewed",
            Self::Hired => "Hired",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application status '{0}'")]
pub struct UnknownStatus(pub String);

/// Labels are matched exactly; `"hired"` is not `Hired`.
impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|status| status.label() == value)
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

/// Public list/detail representation for reviewers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationSummaryView {
    pub application_id: ApplicationId,
    pub job_opening_id: JobOpeningId,
    pub full_name: String,
    pub email: String,
    pub status: &'static str,
    pub starred: bool,
    pub ats_score: u8,
    pub applied_at: DateTime<Utc>,
}
