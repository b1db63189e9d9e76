use serde::Serialize;
use shared::{
    catalog,
    domain::{DailyVolume, ImpactHighlight, Insight, KpiMetric, PerformanceTrend},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummary {
    pub total_packages: u32,
    /// Success rate weighted by each day's package volume.
    pub weighted_success_percent: f64,
    pub busiest_day: Option<String>,
    pub best_day: Option<String>,
    pub worst_day: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsView {
    pub metrics: Vec<KpiMetric>,
    pub trends: Vec<PerformanceTrend>,
    pub weekly_volume: Vec<DailyVolume>,
    pub weekly_summary: WeeklySummary,
    pub insights: Vec<Insight>,
    pub highlights: Vec<ImpactHighlight>,
}

/// Read-only KPI dashboard.
#[derive(Debug, Clone)]
pub struct AnalyticsPanel {
    metrics: Vec<KpiMetric>,
    trends: Vec<PerformanceTrend>,
    weekly_volume: Vec<DailyVolume>,
    insights: Vec<Insight>,
    highlights: Vec<ImpactHighlight>,
}

impl AnalyticsPanel {
    pub fn mount() -> Self {
        Self {
            metrics: catalog::kpi_metrics(),
            trends: catalog::performance_trends(),
            weekly_volume: catalog::weekly_volume(),
            insights: catalog::insights(),
            highlights: catalog::impact_highlights(),
        }
    }

    pub fn weekly_summary(&self) -> WeeklySummary {
        summarize_week(&self.weekly_volume)
    }

    /// Insights with the highest impact first, catalog order otherwise.
    pub fn insights_by_impact(&self) -> Vec<Insight> {
        let mut insights = self.insights.clone();
        insights.sort_by(|a, b| b.impact.cmp(&a.impact));
        insights
    }

    pub fn view(&self) -> AnalyticsView {
        AnalyticsView {
            metrics: self.metrics.clone(),
            trends: self.trends.clone(),
            weekly_volume: self.weekly_volume.clone(),
            weekly_summary: self.weekly_summary(),
            insights: self.insights_by_impact(),
            highlights: self.highlights.clone(),
        }
    }
}

pub fn summarize_week(days: &[DailyVolume]) -> WeeklySummary {
    let total_packages: u32 = days.iter().map(|day| day.packages).sum();
    let delivered: f64 = days
        .iter()
        .map(|day| f64::from(day.packages) * f64::from(day.success_percent))
        .sum();
    let weighted_success_percent = if total_packages == 0 {
        0.0
    } else {
        delivered / f64::from(total_packages)
    };

    // max_by_key keeps the last maximum; reverse so ties go to the earlier day.
    let busiest_day = days
        .iter()
        .rev()
        .max_by_key(|day| day.packages)
        .map(|day| day.day.clone());
    let best_day = days
        .iter()
        .rev()
        .max_by_key(|day| day.success_percent)
        .map(|day| day.day.clone());
    let worst_day = days
        .iter()
        .min_by_key(|day| day.success_percent)
        .map(|day| day.day.clone());

    WeeklySummary {
        total_packages,
        weighted_success_percent,
        busiest_day,
        best_day,
        worst_day,
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::Impact;

    use super::*;

    #[test]
    fn weekly_summary_matches_catalog_volume() {
        let summary = AnalyticsPanel::mount().weekly_summary();
        assert_eq!(summary.total_packages, 8061);
        assert_eq!(summary.busiest_day.as_deref(), Some("Friday"));
        assert_eq!(summary.best_day.as_deref(), Some("Wednesday"));
        assert_eq!(summary.worst_day.as_deref(), Some("Friday"));
        assert!((summary.weighted_success_percent - 93.4).abs() < 0.1);
    }

    #[test]
    fn empty_week_has_no_days_and_zero_rate() {
        let summary = summarize_week(&[]);
        assert_eq!(summary.total_packages, 0);
        assert_eq!(summary.weighted_success_percent, 0.0);
        assert!(summary.best_day.is_none());
    }

    #[test]
    fn high_impact_insights_come_first_in_catalog_order() {
        let titles: Vec<(Impact, String)> = AnalyticsPanel::mount()
            .insights_by_impact()
            .into_iter()
            .map(|insight| (insight.impact, insight.title))
            .collect();
        assert_eq!(
            titles,
            vec![
                (Impact::High, "Peak Delivery Windows Identified".to_string()),
                (Impact::High, "Route Efficiency Opportunity".to_string()),
                (Impact::Medium, "Customer Behavior Pattern".to_string()),
                (Impact::Medium, "Weather Impact Analysis".to_string()),
            ]
        );
    }
}
