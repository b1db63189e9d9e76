use panel_core::{
    panels::{AnalyticsView, DeliveryRow, SchedulerView, SlotListView},
    DeliveryView,
};
use shared::protocol::{NoticeLevel, PanelEvent, SubmissionOutcome};

pub fn scheduler(view: &SchedulerView) -> String {
    let mut out = format!(
        "Customer: {} <{}>\n",
        or_dash(&view.customer.name),
        or_dash(&view.customer.address)
    );
    match &view.slots {
        SlotListView::Loading { message } => out.push_str(&format!("  {message}\n")),
        SlotListView::Unavailable { message } => out.push_str(&format!("  ! {message}\n")),
        SlotListView::Ready { slots } => {
            for slot in slots {
                let marker = if slot.selected { '*' } else { ' ' };
                let badge = slot
                    .express_badge
                    .as_deref()
                    .map(|badge| format!(" [{badge}]"))
                    .unwrap_or_default();
                out.push_str(&format!(
                    " {marker} [{}] {} {}  {}% ({:?}){badge}\n      {}\n",
                    slot.id,
                    slot.date_label,
                    slot.window,
                    slot.success_probability,
                    slot.tier,
                    slot.reason
                ));
            }
        }
    }
    let state = if view.submit_enabled { "enabled" } else { "disabled" };
    out.push_str(&format!("  <{}> ({state})\n", view.submit_label));
    out
}

pub fn deliveries(rows: &[DeliveryRow]) -> String {
    rows.iter()
        .map(|row| {
            let marker = if row.selected { '*' } else { ' ' };
            format!(
                " {marker} {} {:<14} {:<18} {:>3}%  ETA {}  driver {}\n",
                row.id,
                row.customer_name,
                row.status_label,
                row.progress_percent,
                row.estimated_time,
                row.driver_name
            )
        })
        .collect()
}

pub fn detail(view: &DeliveryView) -> String {
    let Some(detail) = view.detail() else {
        return "  Select a delivery to view details\n".to_string();
    };
    let mut out = format!(
        "Delivery {}: {}\n  {}\n  status: {}  progress: {}%  ring offset: {:.1}\n  driver: {}  estimated: {}\n",
        detail.id,
        detail.customer_name,
        detail.address,
        detail.status_label,
        detail.progress_percent,
        detail.ring_dash_offset,
        detail.driver_name,
        detail.estimated_time,
    );
    if let Some(actual) = &detail.actual_time {
        out.push_str(&format!("  delivered at: {actual}\n"));
    }
    out.push_str(&format!("  AI optimized: {}\n", detail.ai_optimized_label()));
    if let Some(note) = &detail.optimization_note {
        out.push_str(&format!("  {note}\n"));
    }
    out
}

pub fn analytics(view: &AnalyticsView) -> String {
    let mut out = String::from("Key metrics\n");
    for metric in &view.metrics {
        out.push_str(&format!(
            "  {:<28} {:>8}  {} ({:?})\n",
            metric.title, metric.value, metric.change, metric.trend
        ));
    }
    out.push_str("Performance trends\n");
    for trend in &view.trends {
        out.push_str(&format!("  {:<28} {:>5.1}%\n", trend.label, trend.percent()));
    }
    let summary = &view.weekly_summary;
    out.push_str(&format!(
        "Weekly volume: {} packages, {:.1}% success, busiest {}\n",
        summary.total_packages,
        summary.weighted_success_percent,
        summary.busiest_day.as_deref().unwrap_or("-")
    ));
    for day in &view.weekly_volume {
        out.push_str(&format!(
            "  {:<10} {:>5}  {}%\n",
            day.day, day.packages, day.success_percent
        ));
    }
    out.push_str("Insights\n");
    for insight in &view.insights {
        out.push_str(&format!(
            "  [{:?}] {}: {}\n",
            insight.impact, insight.title, insight.description
        ));
    }
    for highlight in &view.highlights {
        out.push_str(&format!("  {} {}\n", highlight.value, highlight.label));
    }
    out
}

pub fn event(event: &PanelEvent) -> String {
    match event {
        PanelEvent::TabChanged { tab } => format!("tab -> {tab}"),
        PanelEvent::RecommendationsReady { count } => format!("{count} delivery windows ready"),
        PanelEvent::RecommendationsUnavailable { error } => {
            format!("recommendations unavailable: {}", error.message)
        }
        PanelEvent::Submission(outcome) => submission(outcome),
        PanelEvent::Notified(notification) => {
            let level = match notification.level {
                NoticeLevel::Success => "success",
                NoticeLevel::Error => "error",
            };
            format!("[{level}] {}", notification.message)
        }
    }
}

pub fn submission(outcome: &SubmissionOutcome) -> String {
    match outcome {
        SubmissionOutcome::Pending { slot_id } => format!("scheduling window {slot_id}..."),
        SubmissionOutcome::Success { slot_id, .. } => format!("window {slot_id} scheduled"),
        SubmissionOutcome::Failure { slot_id, error } => {
            format!("window {slot_id} failed: {}", error.message)
        }
    }
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}
