use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::{
    catalog,
    domain::{CandidateSlot, SlotId},
    protocol::{NoticeLevel, Notification, PanelEvent},
};
use tokio::sync::broadcast;
use tracing::{info, warn};

pub mod loader;
pub mod page;
pub mod panels;
pub mod presenter;
pub mod selection;
pub mod submission;
mod task;

pub use loader::{LoadPhase, RecommendationLoader};
pub use page::{DemoPage, MountedPanel};
pub use panels::{AnalyticsPanel, SchedulerPanel, TrackingPanel};
pub use presenter::{present, DeliveryDetail, DeliveryView, DetailPresenter};
pub use selection::SelectionTracker;
pub use submission::{SubmissionController, SubmissionPhase};
pub use task::DelayedTask;

const DEFAULT_RECOMMENDATION_DELAY: Duration = Duration::from_millis(1000);
const DEFAULT_SUBMISSION_DELAY: Duration = Duration::from_millis(2000);
const DEFAULT_COLLABORATOR_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Artificial delays standing in for remote work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelTimings {
    pub recommendation_delay: Duration,
    pub submission_delay: Duration,
    /// Upper bound on a single collaborator call once its delay has elapsed.
    pub collaborator_timeout: Duration,
}

impl Default for PanelTimings {
    fn default() -> Self {
        Self {
            recommendation_delay: DEFAULT_RECOMMENDATION_DELAY,
            submission_delay: DEFAULT_SUBMISSION_DELAY,
            collaborator_timeout: DEFAULT_COLLABORATOR_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub customer: CustomerDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub slot_id: SlotId,
    pub customer: CustomerDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleReceipt {
    pub slot_id: SlotId,
    pub confirmation_code: String,
}

#[async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn recommend(&self, request: &RecommendationRequest) -> Result<Vec<CandidateSlot>>;
}

#[async_trait]
pub trait SchedulingBackend: Send + Sync {
    async fn commit(&self, request: &ScheduleRequest) -> Result<ScheduleReceipt>;
}

/// Delivers user-facing toasts.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

pub struct MissingRecommendationSource;

#[async_trait]
impl RecommendationSource for MissingRecommendationSource {
    async fn recommend(&self, _request: &RecommendationRequest) -> Result<Vec<CandidateSlot>> {
        Err(anyhow!("recommendation service is unavailable"))
    }
}

pub struct MissingSchedulingBackend;

#[async_trait]
impl SchedulingBackend for MissingSchedulingBackend {
    async fn commit(&self, request: &ScheduleRequest) -> Result<ScheduleReceipt> {
        Err(anyhow!(
            "scheduling backend is unavailable for slot {}",
            request.slot_id
        ))
    }
}

/// Serves a fixed candidate batch, by default the curated catalog.
pub struct CatalogRecommendations {
    slots: Vec<CandidateSlot>,
}

impl CatalogRecommendations {
    pub fn new(slots: Vec<CandidateSlot>) -> Self {
        Self { slots }
    }
}

impl Default for CatalogRecommendations {
    fn default() -> Self {
        Self::new(catalog::recommended_slots())
    }
}

#[async_trait]
impl RecommendationSource for CatalogRecommendations {
    async fn recommend(&self, _request: &RecommendationRequest) -> Result<Vec<CandidateSlot>> {
        Ok(self.slots.clone())
    }
}

/// Accepts every commit unless configured with a failure reason.
#[derive(Default)]
pub struct SimulatedScheduler {
    fail_with: Option<String>,
}

impl SimulatedScheduler {
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            fail_with: Some(reason.into()),
        }
    }
}

#[async_trait]
impl SchedulingBackend for SimulatedScheduler {
    async fn commit(&self, request: &ScheduleRequest) -> Result<ScheduleReceipt> {
        if let Some(reason) = &self.fail_with {
            return Err(anyhow!(reason.clone()));
        }
        Ok(ScheduleReceipt {
            slot_id: request.slot_id.clone(),
            confirmation_code: format!("SD-{}", request.slot_id),
        })
    }
}

pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.level {
            NoticeLevel::Error => warn!(message = %notification.message, "user notification"),
            NoticeLevel::Success => info!(message = %notification.message, "user notification"),
        }
    }
}

/// Collaborators a page hands to every panel it mounts.
#[derive(Clone)]
pub struct PanelServices {
    pub recommendations: Arc<dyn RecommendationSource>,
    pub scheduling: Arc<dyn SchedulingBackend>,
    pub notifier: Arc<dyn Notifier>,
    pub timings: PanelTimings,
    pub event_capacity: usize,
}

impl PanelServices {
    /// Catalog data, an always-accepting scheduler and tracing toasts.
    pub fn simulated(timings: PanelTimings) -> Self {
        Self {
            recommendations: Arc::new(CatalogRecommendations::default()),
            scheduling: Arc::new(SimulatedScheduler::default()),
            notifier: Arc::new(TracingNotifier),
            timings,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }

    pub fn with_scheduling(mut self, scheduling: Arc<dyn SchedulingBackend>) -> Self {
        self.scheduling = scheduling;
        self
    }

    pub fn with_recommendations(mut self, recommendations: Arc<dyn RecommendationSource>) -> Self {
        self.recommendations = recommendations;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }
}

/// Outbound side of a mounted page: toasts plus the event stream.
#[derive(Clone)]
pub struct PanelContext {
    notifier: Arc<dyn Notifier>,
    events: broadcast::Sender<PanelEvent>,
}

impl PanelContext {
    pub fn new(notifier: Arc<dyn Notifier>, capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self { notifier, events }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PanelEvent> {
        self.events.subscribe()
    }

    pub fn emit(&self, event: PanelEvent) {
        // No subscribers is fine; nobody is rendering.
        let _ = self.events.send(event);
    }

    pub fn notify(&self, notification: Notification) {
        self.notifier.notify(&notification);
        self.emit(PanelEvent::Notified(notification));
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
