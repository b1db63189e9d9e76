use std::sync::Arc;

use serde::Serialize;
use shared::{
    domain::{CandidateSlot, ProbabilityTier, SlotId},
    error::PanelError,
    protocol::SubmissionOutcome,
};
use tracing::{debug, info};

use crate::{
    loader::{LoadPhase, RecommendationLoader},
    selection::SelectionTracker,
    submission::SubmissionController,
    CustomerDetails, PanelContext, PanelServices, RecommendationRequest,
};

pub const SUBMIT_LABEL: &str = "Schedule Smart Delivery";
pub const SUBMIT_BUSY_LABEL: &str = "Scheduling Delivery...";
pub const LOADING_MESSAGE: &str = "AI is analyzing optimal delivery windows...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotRow {
    pub id: SlotId,
    pub date_label: String,
    pub window: String,
    pub success_probability: u8,
    pub tier: ProbabilityTier,
    pub reason: String,
    pub express_badge: Option<String>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SlotListView {
    Loading { message: String },
    Unavailable { message: String },
    Ready { slots: Vec<SlotRow> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchedulerView {
    pub customer: CustomerDetails,
    pub slots: SlotListView,
    pub submit_enabled: bool,
    pub submit_label: String,
}

/// The delivery scheduler: customer inputs, recommended windows and the
/// schedule action.
pub struct SchedulerPanel {
    customer: CustomerDetails,
    loader: RecommendationLoader,
    selection: SelectionTracker<SlotId>,
    submission: SubmissionController,
    context: PanelContext,
}

impl SchedulerPanel {
    /// Mounts the panel and starts loading recommendations.
    pub fn mount(services: &PanelServices, context: PanelContext) -> Self {
        let mut loader = RecommendationLoader::new(
            Arc::clone(&services.recommendations),
            services.timings,
            context.clone(),
        );
        loader.load(RecommendationRequest::default());
        info!("scheduler panel mounted");
        Self {
            customer: CustomerDetails::default(),
            loader,
            selection: SelectionTracker::new(),
            submission: SubmissionController::new(
                Arc::clone(&services.scheduling),
                services.timings,
                context.clone(),
            ),
            context,
        }
    }

    pub fn customer(&self) -> &CustomerDetails {
        &self.customer
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.customer.name = name.into();
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.customer.address = address.into();
    }

    pub fn load_phase(&self) -> LoadPhase {
        self.loader.phase()
    }

    /// Waits for the recommendation load and returns the batch.
    pub async fn recommendations(&mut self) -> Result<Arc<[CandidateSlot]>, PanelError> {
        let slots = self.loader.ready().await?;
        self.sync_candidates();
        Ok(slots)
    }

    /// Starts another load after the previous one came back unavailable.
    pub fn reload(&mut self) -> bool {
        let request = RecommendationRequest {
            customer: self.customer.clone(),
        };
        self.loader.load(request)
    }

    pub fn selected_slot(&self) -> Option<&SlotId> {
        self.selection.current()
    }

    pub fn select_slot(&mut self, id: &SlotId) -> Result<(), PanelError> {
        self.sync_candidates();
        self.selection
            .select(id)
            .inspect_err(|err| self.context.notify(err.into()))
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn can_submit(&self) -> bool {
        self.selection.current().is_some() && !self.submission.is_busy()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submission.is_busy() {
            SUBMIT_BUSY_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Schedules the selected window. Rejections are surfaced as toasts and
    /// returned to the caller.
    pub fn submit(&mut self) -> Result<(), PanelError> {
        self.submission
            .submit(self.selection.current(), &self.customer)
            .inspect_err(|err| self.context.notify(err.into()))
    }

    pub async fn submission_settled(&self) -> Option<SubmissionOutcome> {
        self.submission.settled().await
    }

    pub fn submission(&self) -> &SubmissionController {
        &self.submission
    }

    pub fn view(&self) -> SchedulerView {
        let slots = match self.loader.phase() {
            LoadPhase::Idle | LoadPhase::Loading => SlotListView::Loading {
                message: LOADING_MESSAGE.to_string(),
            },
            LoadPhase::Unavailable(err) => SlotListView::Unavailable {
                message: err.to_string(),
            },
            LoadPhase::Ready(slots) => SlotListView::Ready {
                slots: slots.iter().map(|slot| self.row(slot)).collect(),
            },
        };
        SchedulerView {
            customer: self.customer.clone(),
            slots,
            submit_enabled: self.can_submit(),
            submit_label: self.submit_label().to_string(),
        }
    }

    fn row(&self, slot: &CandidateSlot) -> SlotRow {
        SlotRow {
            id: slot.id.clone(),
            date_label: slot.date_label.clone(),
            window: slot.window.clone(),
            success_probability: slot.success_probability,
            tier: slot.tier(),
            reason: slot.reason.clone(),
            express_badge: slot.express_badge(),
            selected: self.selection.is_selected(&slot.id),
        }
    }

    fn sync_candidates(&mut self) {
        match self.loader.phase() {
            LoadPhase::Ready(slots) => self
                .selection
                .replace_candidates(slots.iter().map(|slot| slot.id.clone())),
            _ => self.selection.replace_candidates(std::iter::empty()),
        }
    }

    /// Cancels pending work; nothing the panel started reports back after this.
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for SchedulerPanel {
    fn drop(&mut self) {
        self.loader.cancel();
        self.submission.cancel();
        debug!("scheduler panel unmounted");
    }
}

#[cfg(test)]
#[path = "tests/scheduler_tests.rs"]
mod tests;
