use serde::{Deserialize, Serialize};

/// Identity of the staff member performing review actions.
///
/// Constructed per request and passed explicitly to mutating service calls; nothing in
/// the crate reads reviewer identity from process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewerSession {
    reviewer_id: String,
    display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("reviewer id is required for review actions")]
    MissingReviewer,
}

impl ReviewerSession {
    pub fn new(
        reviewer_id: impl Into<String>,
        display_name: Option<String>,
    ) -> Result<Self, SessionError> {
        let reviewer_id = reviewer_id.into().trim().to_string();
        if reviewer_id.is_empty() {
            return Err(SessionError::MissingReviewer);
        }

        Ok(Self {
            reviewer_id,
            display_name: display_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
        })
    }

    pub fn reviewer_id(&self) -> &str {
        &self.reviewer_id
    }

    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.reviewer_id)
    }
}
