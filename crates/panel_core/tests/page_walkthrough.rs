use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use panel_core::{DemoPage, LoadPhase, MountedPanel, Notifier, PanelServices, PanelTimings};
use shared::{
    domain::{DeliveryId, DeliveryStatus, PanelTab, SlotId},
    protocol::{NoticeLevel, Notification, PanelEvent, SubmissionOutcome, SCHEDULED_CONFIRMATION},
};

#[derive(Default)]
struct Toasts(Mutex<Vec<Notification>>);

impl Toasts {
    fn messages(&self, level: NoticeLevel) -> Vec<String> {
        self.0
            .lock()
            .expect("toasts lock")
            .iter()
            .filter(|notification| notification.level == level)
            .map(|notification| notification.message.clone())
            .collect()
    }
}

impl Notifier for Toasts {
    fn notify(&self, notification: &Notification) {
        self.0.lock().expect("toasts lock").push(notification.clone());
    }
}

fn page_with_toasts() -> (DemoPage, Arc<Toasts>) {
    let toasts = Arc::new(Toasts::default());
    let services = PanelServices::simulated(PanelTimings::default()).with_notifier(toasts.clone());
    (DemoPage::mount(services), toasts)
}

#[tokio::test(start_paused = true)]
async fn page_opens_on_the_scheduler_tab() {
    let (mut page, _) = page_with_toasts();
    assert_eq!(page.active_tab(), PanelTab::Schedule);
    assert!(matches!(page.active(), MountedPanel::Schedule(_)));
    assert!(page.tracking().is_none());
    assert!(page.analytics().is_none());
}

#[tokio::test(start_paused = true)]
async fn schedule_then_track_walkthrough() {
    let (mut page, toasts) = page_with_toasts();
    let mut rx = page.subscribe();

    let scheduler = page.scheduler().expect("scheduler tab");
    scheduler.set_customer_name("Robert Chen");
    scheduler.set_address("456 Pine Avenue, Suburbs");
    let slots = scheduler.recommendations().await.expect("recommendations");
    let probabilities: Vec<u8> = slots.iter().map(|slot| slot.success_probability).collect();
    assert_eq!(probabilities, vec![94, 89, 76, 72]);

    scheduler.select_slot(&SlotId::from("3")).expect("select premium");
    scheduler.submit().expect("submit");
    let outcome = scheduler.submission_settled().await.expect("settled");
    assert!(matches!(outcome, SubmissionOutcome::Success { .. }));

    assert!(page.select_tab(PanelTab::Tracking));
    let tracking = page.tracking().expect("tracking tab");
    tracking
        .select_delivery(&DeliveryId::from("DEL002"))
        .expect("select delivery");
    let detail = tracking.detail().detail().cloned().expect("detail");
    assert_eq!(detail.status, DeliveryStatus::InTransit);
    assert_eq!(detail.progress_percent, 45);
    assert!(detail.optimization_note.is_some());

    let events = DemoPage::drain_events(&mut rx);
    assert!(events.contains(&PanelEvent::RecommendationsReady { count: 4 }));
    assert_eq!(DemoPage::completed_submissions(&events), vec![&outcome]);
    assert_eq!(
        events.last(),
        Some(&PanelEvent::TabChanged {
            tab: PanelTab::Tracking
        })
    );
    assert_eq!(
        toasts.messages(NoticeLevel::Success),
        vec![SCHEDULED_CONFIRMATION.to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn switching_tabs_mid_load_discards_the_load() {
    let (mut page, toasts) = page_with_toasts();
    let mut rx = page.subscribe();

    assert!(page.select_tab(PanelTab::Analytics));
    tokio::time::sleep(Duration::from_secs(5)).await;

    let events = DemoPage::drain_events(&mut rx);
    assert_eq!(
        events,
        vec![PanelEvent::TabChanged {
            tab: PanelTab::Analytics
        }]
    );
    assert!(toasts.0.lock().expect("toasts lock").is_empty());
}

#[tokio::test(start_paused = true)]
async fn returning_to_the_scheduler_starts_fresh() {
    let (mut page, _) = page_with_toasts();
    {
        let scheduler = page.scheduler().expect("scheduler tab");
        scheduler.recommendations().await.expect("first load");
        scheduler.select_slot(&SlotId::from("1")).expect("select");
    }

    assert!(page.select_tab(PanelTab::Tracking));
    assert!(page.select_tab(PanelTab::Schedule));
    assert!(!page.select_tab(PanelTab::Schedule));

    let scheduler = page.scheduler().expect("scheduler tab");
    assert_eq!(scheduler.load_phase(), LoadPhase::Loading);
    assert!(scheduler.selected_slot().is_none());
    assert_eq!(scheduler.recommendations().await.expect("reload").len(), 4);
}

#[tokio::test(start_paused = true)]
async fn analytics_tab_serves_the_dashboard() {
    let (mut page, _) = page_with_toasts();
    page.select_tab(PanelTab::Analytics);

    let view = page.analytics().expect("analytics tab").view();
    assert!(!view.metrics.is_empty());
    assert_eq!(view.weekly_volume.len(), 7);
    assert_eq!(view.weekly_summary.busiest_day.as_deref(), Some("Friday"));
}
