//! Job openings, candidate intake, fitness scoring, and reviewer workflow.

pub mod board;
pub mod domain;
pub mod filter;
pub mod intake;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use board::ReviewBoard;
pub use domain::{
    ApplicationId, ApplicationStatus, ApplicationSubmission, ApplicationSummaryView,
    JobApplication, JobOpening, JobOpeningId, OpeningDraft, UnknownStatus,
};
pub use filter::{filter_applications, FilterError, FilterQuery, FilterSpec, StatusFilter};
pub use intake::{IntakeGuard, IntakePolicy, IntakeViolation};
pub use repository::{
    ApplicationEvent, ApplicationEventKind, ChangeFeed, FeedError, RecruitingStore,
    RepositoryError, ReviewChange, ReviewUpdate,
};
pub use router::recruiting_router;
pub use scoring::{
    fitness_score, FitnessReport, FitnessScorer, ScoreComponent, ScoreFactor, ScoringConfig,
    MAX_SCORE,
};
pub use service::{RecruitingService, RecruitingServiceError, ScoredApplication};
pub use session::{ReviewerSession, SessionError};
