mod config;
mod rules;

pub use config::ScoringConfig;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{ApplicationId, JobApplication, JobOpening};

/// Stateless scorer applying the rubric configuration to an (application, opening) pair.
#[derive(Debug, Clone, Default)]
pub struct FitnessScorer {
    config: ScoringConfig,
}

impl FitnessScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Lower-cased keywords an opening offers to the keyword relevance factor.
    pub fn keywords(&self, opening: &JobOpening) -> BTreeSet<String> {
        rules::keyword_set(opening, &self.config)
    }

    pub fn score(&self, opening: &JobOpening, application: &JobApplication) -> FitnessReport {
        let components = vec![
            rules::keyword_relevance(opening, application, &self.config),
            rules::portfolio_presence(application, &self.config),
            rules::response_latency(opening, application, &self.config),
            rules::phone_provided(application, &self.config),
            rules::professional_email(application, &self.config),
        ];

        let sum: f64 = components.iter().map(|component| component.points).sum();
        let total = sum.round().clamp(0.0, MAX_SCORE as f64) as u8;

        FitnessReport {
            application_id: application.id.clone(),
            total,
            components,
        }
    }
}

/// Upper bound of the fitness score.
pub const MAX_SCORE: u8 = 100;

/// Score an application with the default rubric.
pub fn fitness_score(opening: &JobOpening, application: &JobApplication) -> u8 {
    FitnessScorer::default().score(opening, application).total
}

/// Rubric factors, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    KeywordRelevance,
    PortfolioPresence,
    ResponseLatency,
    PhoneProvided,
    ProfessionalEmail,
}

/// Discrete contribution to a fitness score, kept for reviewer audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: f64,
    pub notes: String,
}

/// Final score plus the per-factor breakdown that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessReport {
    pub application_id: ApplicationId,
    pub total: u8,
    pub components: Vec<ScoreComponent>,
}

impl FitnessReport {
    pub fn points_for(&self, factor: ScoreFactor) -> f64 {
        self.components
            .iter()
            .filter(|component| component.factor == factor)
            .map(|component| component.points)
            .sum()
    }
}
