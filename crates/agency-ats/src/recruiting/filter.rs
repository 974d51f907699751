//! Review list filters.
//!
//! All active criteria are AND-combined. The legacy admin panel returned the search
//! match on its own whenever a search term was present, silently ignoring status, score
//! range and starred. That precedence was a bug; a search term here only narrows the
//! other criteria (see `search_does_not_bypass_other_criteria` in the filter tests).

use serde::{Deserialize, Serialize};

use super::domain::{ApplicationStatus, JobApplication, UnknownStatus};
use super::scoring::MAX_SCORE;

/// Status criterion: every status, or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ApplicationStatus),
}

impl StatusFilter {
    pub fn matches(self, status: ApplicationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(expected) => expected == status,
        }
    }
}

/// Validated filter selection. `Default` is the identity filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub status: StatusFilter,
    pub score_min: u8,
    pub score_max: u8,
    pub starred: bool,
    pub search: String,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            status: StatusFilter::All,
            score_min: 0,
            score_max: MAX_SCORE,
            starred: false,
            search: String::new(),
        }
    }
}

impl FilterSpec {
    pub fn matches(&self, application: &JobApplication) -> bool {
        if !self.status.matches(application.status) {
            return false;
        }

        let score = application.score_or_zero();
        if score < self.score_min || score > self.score_max {
            return false;
        }

        if self.starred && !application.starred {
            return false;
        }

        self.search.is_empty() || self.matches_search(application)
    }

    /// Name and email compare case-insensitively; phone compares the raw term.
    fn matches_search(&self, application: &JobApplication) -> bool {
        let needle = self.search.to_lowercase();
        application.full_name.to_lowercase().contains(&needle)
            || application.email.to_lowercase().contains(&needle)
            || application
                .phone
                .as_deref()
                .map(|phone| phone.contains(self.search.as_str()))
                .unwrap_or(false)
    }

    /// Borrowing selection; input order is preserved.
    pub fn select<'a>(&self, applications: &'a [JobApplication]) -> Vec<&'a JobApplication> {
        applications
            .iter()
            .filter(|application| self.matches(application))
            .collect()
    }
}

/// Owned convenience over [`FilterSpec::select`].
pub fn filter_applications(
    applications: &[JobApplication],
    spec: &FilterSpec,
) -> Vec<JobApplication> {
    spec.select(applications).into_iter().cloned().collect()
}

/// Untrusted filter selection as received from a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub score_min: Option<u8>,
    #[serde(default)]
    pub score_max: Option<u8>,
    #[serde(default)]
    pub starred: Option<bool>,
    #[serde(default)]
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error(transparent)]
    Status(#[from] UnknownStatus),
    #[error("score bound {0} exceeds 100")]
    ScoreOutOfRange(u8),
}

impl FilterQuery {
    pub fn into_spec(self) -> Result<FilterSpec, FilterError> {
        let status = match self.status.as_deref() {
            None | Some("all") => StatusFilter::All,
            Some(label) => StatusFilter::Only(label.parse()?),
        };

        let score_min = self.score_min.unwrap_or(0);
        let score_max = self.score_max.unwrap_or(MAX_SCORE);
        for bound in [score_min, score_max] {
            if bound > MAX_SCORE {
                return Err(FilterError::ScoreOutOfRange(bound));
            }
        }

        Ok(FilterSpec {
            status,
            score_min,
            score_max,
            starred: self.starred.unwrap_or(false),
            search: self.search.unwrap_or_default(),
        })
    }
}
