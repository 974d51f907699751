use std::sync::Arc;

use super::domain::JobApplication;
use super::filter::FilterSpec;
use super::repository::{ApplicationEvent, RecruitingStore, RepositoryError};

/// A reviewer's live, filtered view of the application list.
///
/// Change-feed events carry no row data; every event triggers a fresh read of the store
/// followed by a fresh filter pass.
pub struct ReviewBoard<S> {
    store: Arc<S>,
    spec: FilterSpec,
    rows: Vec<JobApplication>,
    refreshes: u64,
}

impl<S> ReviewBoard<S>
where
    S: RecruitingStore,
{
    pub fn open(store: Arc<S>, spec: FilterSpec) -> Result<Self, RepositoryError> {
        let mut board = Self {
            store,
            spec,
            rows: Vec::new(),
            refreshes: 0,
        };
        board.refresh()?;
        Ok(board)
    }

    pub fn rows(&self) -> &[JobApplication] {
        &self.rows
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }

    /// Swap the filter and re-run it against a fresh read.
    pub fn set_filter(&mut self, spec: FilterSpec) -> Result<&[JobApplication], RepositoryError> {
        self.spec = spec;
        self.refresh()
    }

    pub fn on_event(
        &mut self,
        _event: &ApplicationEvent,
    ) -> Result<&[JobApplication], RepositoryError> {
        self.refresh()
    }

    pub fn refresh(&mut self) -> Result<&[JobApplication], RepositoryError> {
        let applications = self.store.applications_by_recency()?;
        self.rows = applications
            .into_iter()
            .filter(|application| self.spec.matches(application))
            .collect();
        self.refreshes += 1;
        Ok(&self.rows)
    }
}
