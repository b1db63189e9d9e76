use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(SlotId);
id_newtype!(DeliveryId);

/// Anything a panel can list and let the user pick by id.
pub trait Identified {
    type Id: Clone + Eq + std::hash::Hash + fmt::Display;

    fn id(&self) -> &Self::Id;
}

/// Price in whole cents; rendered as `$4.99`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(pub u32);

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotKind {
    Standard,
    Premium { price: Cents },
}

impl SlotKind {
    pub fn is_premium(&self) -> bool {
        matches!(self, SlotKind::Premium { .. })
    }

    pub fn surcharge(&self) -> Option<Cents> {
        match self {
            SlotKind::Standard => None,
            SlotKind::Premium { price } => Some(*price),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSlot {
    pub id: SlotId,
    pub window: String,
    pub date_label: String,
    pub success_probability: u8,
    pub reason: String,
    #[serde(flatten)]
    pub kind: SlotKind,
}

impl CandidateSlot {
    pub fn tier(&self) -> ProbabilityTier {
        ProbabilityTier::from_probability(self.success_probability)
    }

    /// Badge text shown next to a premium window, e.g. `Express +$4.99`.
    pub fn express_badge(&self) -> Option<String> {
        self.kind
            .surcharge()
            .map(|price| format!("Express +{price}"))
    }
}

impl Identified for CandidateSlot {
    type Id = SlotId;

    fn id(&self) -> &SlotId {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilityTier {
    Low,
    Fair,
    Good,
    Excellent,
}

impl ProbabilityTier {
    pub fn from_probability(probability: u8) -> Self {
        match probability {
            90.. => ProbabilityTier::Excellent,
            80..=89 => ProbabilityTier::Good,
            70..=79 => ProbabilityTier::Fair,
            _ => ProbabilityTier::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryStatus {
    Pending,
    InTransit,
    OutForDelivery,
    Delivered,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::InTransit => "in-transit",
            DeliveryStatus::OutForDelivery => "out-for-delivery",
            DeliveryStatus::Delivered => "delivered",
        }
    }

    /// Human label: `in transit`, `out for delivery`.
    pub fn label(&self) -> String {
        self.as_str().replace('-', " ")
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub id: DeliveryId,
    pub customer_name: String,
    pub address: String,
    pub status: DeliveryStatus,
    pub estimated_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_time: Option<String>,
    pub driver_name: String,
    pub progress_percent: u8,
    pub ai_optimized: bool,
}

impl Identified for DeliveryRecord {
    type Id = DeliveryId;

    fn id(&self) -> &DeliveryId {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelTab {
    #[default]
    Schedule,
    Tracking,
    Analytics,
}

impl PanelTab {
    pub const ALL: [PanelTab; 3] = [PanelTab::Schedule, PanelTab::Tracking, PanelTab::Analytics];

    pub fn as_str(&self) -> &'static str {
        match self {
            PanelTab::Schedule => "schedule",
            PanelTab::Tracking => "tracking",
            PanelTab::Analytics => "analytics",
        }
    }
}

impl fmt::Display for PanelTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown panel tab '{0}'")]
pub struct UnknownTab(pub String);

impl FromStr for PanelTab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        PanelTab::ALL
            .into_iter()
            .find(|tab| tab.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownTab(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiMetric {
    pub title: String,
    pub value: String,
    pub change: String,
    pub trend: Trend,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyVolume {
    pub day: String,
    pub packages: u32,
    pub success_percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceTrend {
    pub label: String,
    /// Percentage in tenths, `948` is 94.8%.
    pub permille: u16,
}

impl PerformanceTrend {
    pub fn percent(&self) -> f64 {
        f64::from(self.permille) / 10.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactHighlight {
    pub value: String,
    pub label: String,
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
