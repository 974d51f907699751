use chrono::{DateTime, Utc};

use super::domain::{
    ApplicationId, ApplicationStatus, ApplicationSubmission, JobApplication, JobOpening,
    JobOpeningId, OpeningDraft,
};

/// Validation errors raised while turning drafts into records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("opening title is required")]
    BlankTitle,
    #[error("opening lists {found} focus areas (max {max})")]
    TooManyFocusAreas { max: usize, found: usize },
    #[error("applicant full name is required")]
    BlankFullName,
    #[error("applicant email is required")]
    BlankEmail,
    #[error("cover letter is {found} characters (max {max})")]
    CoverLetterTooLong { max: usize, found: usize },
    #[error("portfolio url must use http or https: {0}")]
    InvalidPortfolioUrl(String),
    #[error("job opening {0} does not exist")]
    UnknownOpening(JobOpeningId),
}

const DEFAULT_MAX_FOCUS_AREAS: usize = 32;
const DEFAULT_MAX_COVER_LETTER_CHARS: usize = 20_000;

/// Size limits applied at intake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakePolicy {
    max_focus_areas: usize,
    max_cover_letter_chars: usize,
}

impl IntakePolicy {
    /// Zero limits fall back to the defaults.
    pub fn new(max_focus_areas: usize, max_cover_letter_chars: usize) -> Self {
        Self {
            max_focus_areas: if max_focus_areas == 0 {
                DEFAULT_MAX_FOCUS_AREAS
            } else {
                max_focus_areas
            },
            max_cover_letter_chars: if max_cover_letter_chars == 0 {
                DEFAULT_MAX_COVER_LETTER_CHARS
            } else {
                max_cover_letter_chars
            },
        }
    }

    pub fn max_focus_areas(&self) -> usize {
        self.max_focus_areas
    }

    pub fn max_cover_letter_chars(&self) -> usize {
        self.max_cover_letter_chars
    }
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FOCUS_AREAS, DEFAULT_MAX_COVER_LETTER_CHARS)
    }
}

/// Guard responsible for producing `JobOpening` and `JobApplication` records.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard {
    policy: IntakePolicy,
}

impl IntakeGuard {
    pub fn with_policy(policy: IntakePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &IntakePolicy {
        &self.policy
    }

    pub fn opening_from_draft(
        &self,
        draft: OpeningDraft,
        id: JobOpeningId,
        created_at: DateTime<Utc>,
    ) -> Result<JobOpening, IntakeViolation> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(IntakeViolation::BlankTitle);
        }

        let mut focus_areas: Vec<String> = Vec::with_capacity(draft.focus_areas.len());
        for area in draft.focus_areas {
            let area = area.trim();
            if area.is_empty() {
                continue;
            }
            if focus_areas
                .iter()
                .any(|existing| existing.eq_ignore_ascii_case(area))
            {
                continue;
            }
            focus_areas.push(area.to_string());
        }

        if focus_areas.len() > self.policy.max_focus_areas {
            return Err(IntakeViolation::TooManyFocusAreas {
                max: self.policy.max_focus_areas,
                found: focus_areas.len(),
            });
        }

        Ok(JobOpening {
            id,
            title: title.to_string(),
            focus_areas,
            requirements: draft.requirements.trim().to_string(),
            created_at,
        })
    }

    /// Validate a submission against the opening it targets. The returned record is
    /// unscored; the service assigns `ats_score` before persisting it.
    pub fn application_from_submission(
        &self,
        submission: ApplicationSubmission,
        opening: &JobOpening,
        id: ApplicationId,
        applied_at: DateTime<Utc>,
    ) -> Result<JobApplication, IntakeViolation> {
        if submission.job_opening_id != opening.id {
            return Err(IntakeViolation::UnknownOpening(submission.job_opening_id));
        }

        let full_name = submission.full_name.trim();
        if full_name.is_empty() {
            return Err(IntakeViolation::BlankFullName);
        }

        let email = submission.email.trim();
        if email.is_empty() {
            return Err(IntakeViolation::BlankEmail);
        }

        let cover_letter = non_blank(submission.cover_letter);
        if let Some(letter) = &cover_letter {
            let found = letter.chars().count();
            if found > self.policy.max_cover_letter_chars {
                return Err(IntakeViolation::CoverLetterTooLong {
                    max: self.policy.max_cover_letter_chars,
                    found,
                });
            }
        }

        let portfolio_url = non_blank(submission.portfolio_url);
        if let Some(url) = &portfolio_url {
            let lowered = url.to_ascii_lowercase();
            if !(lowered.starts_with("http://") || lowered.starts_with("https://")) {
                return Err(IntakeViolation::InvalidPortfolioUrl(url.clone()));
            }
        }

        Ok(JobApplication {
            id,
            job_opening_id: opening.id.clone(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            phone: non_blank(submission.phone),
            cover_letter,
            portfolio_url,
            applied_at,
            ats_score: None,
            starred: false,
            status: ApplicationStatus::Applied,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}
