//! The tabbed page. It owns exactly one mounted panel; switching tabs tears
//! the old one down (cancelling its pending work) and mounts a fresh one.

use shared::{
    domain::PanelTab,
    protocol::{PanelEvent, SubmissionOutcome},
};
use tokio::sync::broadcast;
use tracing::info;

use crate::{
    panels::{AnalyticsPanel, SchedulerPanel, TrackingPanel},
    PanelContext, PanelServices,
};

pub enum MountedPanel {
    Schedule(SchedulerPanel),
    Tracking(TrackingPanel),
    Analytics(AnalyticsPanel),
}

impl MountedPanel {
    fn mount(tab: PanelTab, services: &PanelServices, context: &PanelContext) -> Self {
        match tab {
            PanelTab::Schedule => {
                MountedPanel::Schedule(SchedulerPanel::mount(services, context.clone()))
            }
            PanelTab::Tracking => MountedPanel::Tracking(TrackingPanel::mount(context.clone())),
            PanelTab::Analytics => MountedPanel::Analytics(AnalyticsPanel::mount()),
        }
    }

    pub fn tab(&self) -> PanelTab {
        match self {
            MountedPanel::Schedule(_) => PanelTab::Schedule,
            MountedPanel::Tracking(_) => PanelTab::Tracking,
            MountedPanel::Analytics(_) => PanelTab::Analytics,
        }
    }
}

pub struct DemoPage {
    services: PanelServices,
    context: PanelContext,
    active: MountedPanel,
}

impl DemoPage {
    /// Mounts the page on its default tab. Must run inside a tokio runtime.
    pub fn mount(services: PanelServices) -> Self {
        Self::mount_at(services, PanelTab::default())
    }

    pub fn mount_at(services: PanelServices, tab: PanelTab) -> Self {
        let context = PanelContext::new(services.notifier.clone(), services.event_capacity);
        let active = MountedPanel::mount(tab, &services, &context);
        info!(%tab, "page mounted");
        Self {
            services,
            context,
            active,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PanelEvent> {
        self.context.subscribe()
    }

    pub fn active_tab(&self) -> PanelTab {
        self.active.tab()
    }

    /// Returns `false` when `tab` is already showing.
    pub fn select_tab(&mut self, tab: PanelTab) -> bool {
        if self.active.tab() == tab {
            return false;
        }
        let previous = self.active.tab();
        // Assigning drops the previous panel, which cancels its tasks.
        self.active = MountedPanel::mount(tab, &self.services, &self.context);
        info!(from = %previous, to = %tab, "tab changed");
        self.context.emit(PanelEvent::TabChanged { tab });
        true
    }

    pub fn active(&self) -> &MountedPanel {
        &self.active
    }

    pub fn scheduler(&mut self) -> Option<&mut SchedulerPanel> {
        match &mut self.active {
            MountedPanel::Schedule(panel) => Some(panel),
            _ => None,
        }
    }

    pub fn tracking(&mut self) -> Option<&mut TrackingPanel> {
        match &mut self.active {
            MountedPanel::Tracking(panel) => Some(panel),
            _ => None,
        }
    }

    pub fn analytics(&self) -> Option<&AnalyticsPanel> {
        match &self.active {
            MountedPanel::Analytics(panel) => Some(panel),
            _ => None,
        }
    }

    /// Drains events emitted since the last call on `rx`, dropping any the
    /// receiver lagged behind on.
    pub fn drain_events(rx: &mut broadcast::Receiver<PanelEvent>) -> Vec<PanelEvent> {
        let mut events = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(event) => events.push(event),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
        events
    }

    /// Submission outcomes among `events`, pending ones excluded.
    pub fn completed_submissions(events: &[PanelEvent]) -> Vec<&SubmissionOutcome> {
        events
            .iter()
            .filter_map(|event| match event {
                PanelEvent::Submission(outcome)
                    if !matches!(outcome, SubmissionOutcome::Pending { .. }) =>
                {
                    Some(outcome)
                }
                _ => None,
            })
            .collect()
    }
}
