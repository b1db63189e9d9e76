use std::collections::HashSet;

use serde::Serialize;
use shared::{
    catalog,
    domain::{DeliveryId, DeliveryRecord},
    error::PanelError,
};
use tracing::{debug, info, warn};

use crate::{
    presenter::{DeliveryView, DetailPresenter},
    selection::SelectionTracker,
    PanelContext,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryRow {
    pub id: DeliveryId,
    pub customer_name: String,
    pub address: String,
    pub status_label: String,
    pub driver_name: String,
    pub estimated_time: String,
    pub progress_percent: u8,
    pub ai_optimized: bool,
    pub selected: bool,
}

/// Live delivery list with a detail pane for the selected record.
pub struct TrackingPanel {
    deliveries: Vec<DeliveryRecord>,
    revision: u64,
    selection: SelectionTracker<DeliveryId>,
    presenter: DetailPresenter,
    context: PanelContext,
}

impl TrackingPanel {
    pub fn mount(context: PanelContext) -> Self {
        Self::with_deliveries(catalog::active_deliveries(), context)
    }

    /// Mounts over `deliveries`; the first record starts out selected.
    pub fn with_deliveries(deliveries: Vec<DeliveryRecord>, context: PanelContext) -> Self {
        let deliveries = normalize_feed(deliveries);
        let first = deliveries.first().map(|record| record.id.clone());
        let selection = SelectionTracker::with_selection(&deliveries, first);
        info!(count = deliveries.len(), "tracking panel mounted");
        Self {
            deliveries,
            revision: 0,
            selection,
            presenter: DetailPresenter::default(),
            context,
        }
    }

    pub fn deliveries(&self) -> &[DeliveryRecord] {
        &self.deliveries
    }

    pub fn selected_delivery(&self) -> Option<&DeliveryId> {
        self.selection.current()
    }

    pub fn select_delivery(&mut self, id: &DeliveryId) -> Result<(), PanelError> {
        self.selection
            .select(id)
            .inspect_err(|err| self.context.notify(err.into()))
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Replaces the collection, as a tracking feed would.
    pub fn apply_feed(&mut self, deliveries: Vec<DeliveryRecord>) {
        let deliveries = normalize_feed(deliveries);
        self.selection
            .replace_candidates(deliveries.iter().map(|record| record.id.clone()));
        self.deliveries = deliveries;
        self.revision += 1;
        debug!(revision = self.revision, "tracking feed applied");
    }

    pub fn rows(&self) -> Vec<DeliveryRow> {
        self.deliveries
            .iter()
            .map(|record| DeliveryRow {
                id: record.id.clone(),
                customer_name: record.customer_name.clone(),
                address: record.address.clone(),
                status_label: record.status.label(),
                driver_name: record.driver_name.clone(),
                estimated_time: record.estimated_time.clone(),
                progress_percent: record.progress_percent,
                ai_optimized: record.ai_optimized,
                selected: self.selection.is_selected(&record.id),
            })
            .collect()
    }

    pub fn detail(&mut self) -> &DeliveryView {
        self.presenter
            .view(self.selection.current(), &self.deliveries, self.revision)
    }

    pub fn presenter(&self) -> &DetailPresenter {
        &self.presenter
    }
}

/// Keeps the first record for each id and caps progress at 100%.
pub fn normalize_feed(deliveries: Vec<DeliveryRecord>) -> Vec<DeliveryRecord> {
    let mut seen = HashSet::with_capacity(deliveries.len());
    deliveries
        .into_iter()
        .filter_map(|mut record| {
            if !seen.insert(record.id.clone()) {
                warn!(id = %record.id, "dropping duplicate delivery record");
                return None;
            }
            if record.progress_percent > 100 {
                warn!(
                    id = %record.id,
                    progress = record.progress_percent,
                    "capping delivery progress"
                );
                record.progress_percent = 100;
            }
            Some(record)
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/tracking_tests.rs"]
mod tests;
