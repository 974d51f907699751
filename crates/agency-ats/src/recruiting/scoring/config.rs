use serde::{Deserialize, Serialize};

/// Weights and thresholds for the fitness rubric. `Default` is the production rubric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub keyword_max_points: f64,
    pub requirement_word_min_chars: usize,
    pub portfolio_points: f64,
    pub fast_response_hours: i64,
    pub fast_response_points: f64,
    pub moderate_response_hours: i64,
    pub moderate_response_points: f64,
    pub phone_points: f64,
    pub professional_email_points: f64,
    pub free_email_domains: Vec<String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            keyword_max_points: 50.0,
            requirement_word_min_chars: 4,
            portfolio_points: 10.0,
            fast_response_hours: 24,
            fast_response_points: 20.0,
            moderate_response_hours: 72,
            moderate_response_points: 10.0,
            phone_points: 10.0,
            professional_email_points: 10.0,
            free_email_domains: vec![
                "gmail.com".to_string(),
                "hotmail.com".to_string(),
                "yahoo.com".to_string(),
            ],
        }
    }
}

impl ScoringConfig {
    pub fn is_free_email_domain(&self, domain: &str) -> bool {
        self.free_email_domains
            .iter()
            .any(|free| free.eq_ignore_ascii_case(domain))
    }
}
