use super::*;
use serde_json::json;

#[test]
fn panel_error_becomes_an_error_toast() {
    let notification = Notification::from(&PanelError::NoSelection);
    assert_eq!(notification.level, NoticeLevel::Error);
    assert_eq!(notification.message, "Please select a delivery window");
}

#[test]
fn submission_outcome_is_tagged_by_outcome() {
    let failure = SubmissionOutcome::Failure {
        slot_id: SlotId::from("2"),
        error: ErrorPayload::from(&PanelError::CommitFailed {
            reason: "depot closed".into(),
        }),
    };

    assert_eq!(
        serde_json::to_value(&failure).expect("serialize"),
        json!({
            "outcome": "failure",
            "slot_id": "2",
            "error": {
                "code": "commit_failed",
                "message": "delivery scheduling failed: depot closed"
            }
        })
    );
}

#[test]
fn panel_events_use_type_and_payload() {
    let event = PanelEvent::TabChanged {
        tab: PanelTab::Analytics,
    };
    assert_eq!(
        serde_json::to_value(&event).expect("serialize"),
        json!({ "type": "tab_changed", "payload": { "tab": "analytics" } })
    );

    let raw = json!({
        "type": "submission",
        "payload": { "outcome": "pending", "slot_id": "3" }
    });
    let parsed: PanelEvent = serde_json::from_value(raw).expect("deserialize");
    assert_eq!(
        parsed,
        PanelEvent::Submission(SubmissionOutcome::Pending {
            slot_id: SlotId::from("3")
        })
    );
}
