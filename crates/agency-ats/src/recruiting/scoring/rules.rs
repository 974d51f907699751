use std::collections::BTreeSet;

use super::super::domain::{JobApplication, JobOpening};
use super::config::ScoringConfig;
use super::{ScoreComponent, ScoreFactor};

/// Focus areas plus the long words of the requirements text, lower-cased.
pub(crate) fn keyword_set(opening: &JobOpening, config: &ScoringConfig) -> BTreeSet<String> {
    let mut keywords: BTreeSet<String> = opening
        .focus_areas
        .iter()
        .map(|area| area.trim().to_lowercase())
        .filter(|area| !area.is_empty())
        .collect();

    let requirements = opening.requirements.to_lowercase();
    keywords.extend(
        requirements
            .split_whitespace()
            .filter(|word| word.chars().count() >= config.requirement_word_min_chars)
            .map(str::to_string),
    );

    keywords
}

pub(crate) fn keyword_relevance(
    opening: &JobOpening,
    application: &JobApplication,
    config: &ScoringConfig,
) -> ScoreComponent {
    let keywords = keyword_set(opening, config);
    if keywords.is_empty() {
        return component(
            ScoreFactor::KeywordRelevance,
            0.0,
            "opening lists no keywords".to_string(),
        );
    }

    let Some(letter) = application.cover_letter.as_deref() else {
        return component(
            ScoreFactor::KeywordRelevance,
            0.0,
            "no cover letter".to_string(),
        );
    };

    let letter = letter.to_lowercase();
    let matches = keywords
        .iter()
        .filter(|keyword| letter.contains(keyword.as_str()))
        .count();

    let points = (config.keyword_max_points * matches as f64 / keywords.len() as f64)
        .min(config.keyword_max_points);

    component(
        ScoreFactor::KeywordRelevance,
        points,
        format!("{matches} of {} keywords found in cover letter", keywords.len()),
    )
}

pub(crate) fn portfolio_presence(
    application: &JobApplication,
    config: &ScoringConfig,
) -> ScoreComponent {
    if is_present(application.portfolio_url.as_deref()) {
        component(
            ScoreFactor::PortfolioPresence,
            config.portfolio_points,
            "portfolio link provided".to_string(),
        )
    } else {
        component(
            ScoreFactor::PortfolioPresence,
            0.0,
            "no portfolio link".to_string(),
        )
    }
}

/// Applications stamped before the opening's creation time earn nothing here.
pub(crate) fn response_latency(
    opening: &JobOpening,
    application: &JobApplication,
    config: &ScoringConfig,
) -> ScoreComponent {
    let hours = (application.applied_at - opening.created_at).num_seconds() as f64 / 3600.0;

    let points = if hours < 0.0 {
        0.0
    } else if hours < config.fast_response_hours as f64 {
        config.fast_response_points
    } else if hours < config.moderate_response_hours as f64 {
        config.moderate_response_points
    } else {
        0.0
    };

    let notes = if hours < 0.0 {
        format!("applied {:.1}h before opening was published", -hours)
    } else {
        format!("applied {hours:.1}h after opening was published")
    };

    component(ScoreFactor::ResponseLatency, points, notes)
}

pub(crate) fn phone_provided(
    application: &JobApplication,
    config: &ScoringConfig,
) -> ScoreComponent {
    if is_present(application.phone.as_deref()) {
        component(
            ScoreFactor::PhoneProvided,
            config.phone_points,
            "phone number provided".to_string(),
        )
    } else {
        component(
            ScoreFactor::PhoneProvided,
            0.0,
            "no phone number".to_string(),
        )
    }
}

pub(crate) fn professional_email(
    application: &JobApplication,
    config: &ScoringConfig,
) -> ScoreComponent {
    match email_domain(&application.email) {
        None => component(
            ScoreFactor::ProfessionalEmail,
            0.0,
            "email has no domain".to_string(),
        ),
        Some(domain) if config.is_free_email_domain(&domain) => component(
            ScoreFactor::ProfessionalEmail,
            0.0,
            format!("free email provider {domain}"),
        ),
        Some(domain) => component(
            ScoreFactor::ProfessionalEmail,
            config.professional_email_points,
            format!("professional email domain {domain}"),
        ),
    }
}

/// Text between the first `@` and the next one, if any. `None` for malformed addresses.
pub(crate) fn email_domain(email: &str) -> Option<String> {
    let domain = email.split('@').nth(1)?.trim().to_ascii_lowercase();
    if domain.is_empty() {
        None
    } else {
        Some(domain)
    }
}

fn is_present(value: Option<&str>) -> bool {
    value.map(|raw| !raw.trim().is_empty()).unwrap_or(false)
}

fn component(factor: ScoreFactor, points: f64, notes: String) -> ScoreComponent {
    ScoreComponent {
        factor,
        points: points.max(0.0),
        notes,
    }
}
