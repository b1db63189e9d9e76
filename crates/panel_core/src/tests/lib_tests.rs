use super::*;
use crate::test_support::{customer, RecordingNotifier};
use shared::protocol::NoticeLevel;

#[tokio::test]
async fn catalog_recommendations_serve_curated_batch() {
    let slots = CatalogRecommendations::default()
        .recommend(&RecommendationRequest::default())
        .await
        .expect("recommendations");
    assert_eq!(slots.len(), 4);
    assert_eq!(slots[0].success_probability, 94);
}

#[tokio::test]
async fn missing_collaborators_always_fail() {
    let err = MissingRecommendationSource
        .recommend(&RecommendationRequest::default())
        .await
        .expect_err("missing source");
    assert!(err.to_string().contains("unavailable"));

    let request = ScheduleRequest {
        slot_id: SlotId::from("1"),
        customer: customer(),
    };
    let err = MissingSchedulingBackend
        .commit(&request)
        .await
        .expect_err("missing backend");
    assert!(err.to_string().contains("slot 1"));
}

#[tokio::test]
async fn simulated_scheduler_echoes_slot_or_reports_configured_failure() {
    let request = ScheduleRequest {
        slot_id: SlotId::from("3"),
        customer: customer(),
    };
    let receipt = SimulatedScheduler::default()
        .commit(&request)
        .await
        .expect("receipt");
    assert_eq!(receipt.slot_id, SlotId::from("3"));
    assert_eq!(receipt.confirmation_code, "SD-3");

    let err = SimulatedScheduler::failing("depot closed")
        .commit(&request)
        .await
        .expect_err("failure");
    assert_eq!(err.to_string(), "depot closed");
}

#[test]
fn default_timings_match_page_delays() {
    let timings = PanelTimings::default();
    assert_eq!(timings.recommendation_delay, Duration::from_millis(1000));
    assert_eq!(timings.submission_delay, Duration::from_millis(2000));
}

#[test]
fn context_notify_reaches_notifier_and_subscribers() {
    let notifier = RecordingNotifier::new();
    let context = PanelContext::new(notifier.clone(), 8);
    let mut rx = context.subscribe();

    context.notify(Notification::success("hello"));

    assert_eq!(notifier.at_level(NoticeLevel::Success), vec!["hello".to_string()]);
    assert_eq!(
        rx.try_recv().expect("event"),
        PanelEvent::Notified(Notification::success("hello"))
    );
}

#[test]
fn emit_without_subscribers_is_silent() {
    let context = PanelContext::new(Arc::new(TracingNotifier), 1);
    context.emit(PanelEvent::RecommendationsReady { count: 4 });
}
