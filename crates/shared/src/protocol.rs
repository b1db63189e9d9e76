use serde::{Deserialize, Serialize};

use crate::{
    domain::{PanelTab, SlotId},
    error::{ErrorPayload, PanelError},
};

pub const SCHEDULED_CONFIRMATION: &str =
    "Delivery scheduled successfully! You'll receive SMS/email confirmation.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl From<&PanelError> for Notification {
    fn from(value: &PanelError) -> Self {
        Notification::error(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    Pending { slot_id: SlotId },
    Success { slot_id: SlotId, confirmation: String },
    Failure { slot_id: SlotId, error: ErrorPayload },
}

/// Events a mounted page reports to whoever renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum PanelEvent {
    TabChanged { tab: PanelTab },
    RecommendationsReady { count: usize },
    RecommendationsUnavailable { error: ErrorPayload },
    Submission(SubmissionOutcome),
    Notified(Notification),
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
