use std::f64::consts::PI;

use serde::Serialize;
use shared::{
    catalog::OPTIMIZATION_NOTE,
    domain::{DeliveryId, DeliveryRecord, DeliveryStatus},
};

const PROGRESS_RING_RADIUS: f64 = 56.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryDetail {
    pub id: DeliveryId,
    pub customer_name: String,
    pub address: String,
    pub status: DeliveryStatus,
    pub status_label: String,
    pub driver_name: String,
    pub estimated_time: String,
    pub actual_time: Option<String>,
    pub progress_percent: u8,
    pub ai_optimized: bool,
    /// Text of the optimization panel; absent when the route was not optimized.
    pub optimization_note: Option<String>,
    pub ring_dash_offset: f64,
}

impl DeliveryDetail {
    fn from_record(record: &DeliveryRecord) -> Self {
        let progress = record.progress_percent.min(100);
        Self {
            id: record.id.clone(),
            customer_name: record.customer_name.clone(),
            address: record.address.clone(),
            status: record.status,
            status_label: record.status.label(),
            driver_name: record.driver_name.clone(),
            estimated_time: record.estimated_time.clone(),
            actual_time: record.actual_time.clone(),
            progress_percent: progress,
            ai_optimized: record.ai_optimized,
            optimization_note: record
                .ai_optimized
                .then(|| OPTIMIZATION_NOTE.to_string()),
            ring_dash_offset: ring_dash_offset(progress),
        }
    }

    pub fn ai_optimized_label(&self) -> &'static str {
        if self.ai_optimized {
            "Yes"
        } else {
            "No"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DeliveryView {
    NoSelection,
    Selected(DeliveryDetail),
}

impl DeliveryView {
    pub fn detail(&self) -> Option<&DeliveryDetail> {
        match self {
            DeliveryView::Selected(detail) => Some(detail),
            DeliveryView::NoSelection => None,
        }
    }
}

/// Circumference left undrawn on the progress ring.
pub fn ring_dash_offset(progress_percent: u8) -> f64 {
    let circumference = 2.0 * PI * PROGRESS_RING_RADIUS;
    circumference * (1.0 - f64::from(progress_percent.min(100)) / 100.0)
}

pub fn present(selected: Option<&DeliveryId>, collection: &[DeliveryRecord]) -> DeliveryView {
    selected
        .and_then(|id| collection.iter().find(|record| &record.id == id))
        .map(|record| DeliveryView::Selected(DeliveryDetail::from_record(record)))
        .unwrap_or(DeliveryView::NoSelection)
}

/// Caches the last view, keyed by selection and collection revision.
#[derive(Debug, Default)]
pub struct DetailPresenter {
    key: Option<(Option<DeliveryId>, u64)>,
    view: Option<DeliveryView>,
    recomputations: u64,
}

impl DetailPresenter {
    pub fn view(
        &mut self,
        selected: Option<&DeliveryId>,
        collection: &[DeliveryRecord],
        revision: u64,
    ) -> &DeliveryView {
        let key = (selected.cloned(), revision);
        if self.key.as_ref() != Some(&key) || self.view.is_none() {
            self.recomputations += 1;
            self.key = Some(key);
            self.view = Some(present(selected, collection));
        }
        self.view.get_or_insert(DeliveryView::NoSelection)
    }

    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}

#[cfg(test)]
#[path = "tests/presenter_tests.rs"]
mod tests;
