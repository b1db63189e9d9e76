use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use shared::{
    domain::CandidateSlot,
    protocol::{NoticeLevel, Notification},
};

use crate::{
    CustomerDetails, Notifier, PanelContext, PanelServices, PanelTimings, RecommendationRequest,
    RecommendationSource,
};

#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().expect("notifier lock").clone()
    }

    pub fn at_level(&self, level: NoticeLevel) -> Vec<String> {
        self.notifications()
            .into_iter()
            .filter(|notification| notification.level == level)
            .map(|notification| notification.message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.seen
            .lock()
            .expect("notifier lock")
            .push(notification.clone());
    }
}

pub fn context_for(notifier: &Arc<RecordingNotifier>) -> PanelContext {
    PanelContext::new(notifier.clone(), 64)
}

pub fn services_for(notifier: &Arc<RecordingNotifier>) -> PanelServices {
    PanelServices::simulated(PanelTimings::default()).with_notifier(notifier.clone())
}

pub fn customer() -> CustomerDetails {
    CustomerDetails {
        name: "Robert Chen".into(),
        address: "456 Pine Avenue, Suburbs".into(),
    }
}

/// Never answers.
pub struct StalledSource;

#[async_trait]
impl RecommendationSource for StalledSource {
    async fn recommend(&self, _request: &RecommendationRequest) -> Result<Vec<CandidateSlot>> {
        std::future::pending().await
    }
}

/// Fails until `fixed` is set, then serves the catalog batch.
#[derive(Default)]
pub struct FlakySource {
    pub fixed: std::sync::atomic::AtomicBool,
}

#[async_trait]
impl RecommendationSource for FlakySource {
    async fn recommend(&self, _request: &RecommendationRequest) -> Result<Vec<CandidateSlot>> {
        if self.fixed.load(std::sync::atomic::Ordering::SeqCst) {
            Ok(shared::catalog::recommended_slots())
        } else {
            Err(anyhow::anyhow!("model warming up"))
        }
    }
}
