use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NoSelection,
    UnknownCandidate,
    SubmissionInProgress,
    RecommendationUnavailable,
    CommitFailed,
}

/// Failures a panel recovers from locally by notifying the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("Please select a delivery window")]
    NoSelection,
    #[error("unknown candidate '{id}'")]
    UnknownCandidate { id: String },
    #[error("a submission is already in progress")]
    SubmissionInProgress,
    #[error("delivery recommendations unavailable: {reason}")]
    RecommendationUnavailable { reason: String },
    #[error("delivery scheduling failed: {reason}")]
    CommitFailed { reason: String },
}

impl PanelError {
    pub fn unknown_candidate(id: impl ToString) -> Self {
        Self::UnknownCandidate { id: id.to_string() }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::RecommendationUnavailable {
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PanelError::NoSelection => ErrorCode::NoSelection,
            PanelError::UnknownCandidate { .. } => ErrorCode::UnknownCandidate,
            PanelError::SubmissionInProgress => ErrorCode::SubmissionInProgress,
            PanelError::RecommendationUnavailable { .. } => ErrorCode::RecommendationUnavailable,
            PanelError::CommitFailed { .. } => ErrorCode::CommitFailed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&PanelError> for ErrorPayload {
    fn from(value: &PanelError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}
