//! The three panels of the page: scheduler, tracking and analytics.

pub mod analytics;
pub mod scheduler;
pub mod tracking;

pub use analytics::{AnalyticsPanel, AnalyticsView, WeeklySummary};
pub use scheduler::{SchedulerPanel, SchedulerView, SlotListView, SlotRow};
pub use tracking::{DeliveryRow, TrackingPanel};
