//! Applicant tracking back office for agency job openings.
//!
//! The `recruiting` module holds the domain: intake validation, fitness scoring, review
//! filters, and the service/router pair used by the API binary.

pub mod config;
pub mod error;
pub mod recruiting;
pub mod telemetry;
