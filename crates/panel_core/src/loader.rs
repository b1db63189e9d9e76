//! Recommendation loader: `idle -> loading -> ready`, or `unavailable` when the
//! source comes back empty, malformed, failing or late.

use std::{collections::HashSet, sync::Arc, time::Duration};

use shared::{domain::CandidateSlot, error::PanelError, protocol::PanelEvent};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    task::DelayedTask, PanelContext, PanelTimings, RecommendationRequest, RecommendationSource,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Ready(Arc<[CandidateSlot]>),
    Unavailable(PanelError),
}

impl LoadPhase {
    pub fn candidates(&self) -> Option<&Arc<[CandidateSlot]>> {
        match self {
            LoadPhase::Ready(slots) => Some(slots),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadPhase::Loading)
    }
}

#[derive(Debug, Default)]
struct LoaderState {
    epoch: u64,
    phase: LoadPhase,
}

pub struct RecommendationLoader {
    source: Arc<dyn RecommendationSource>,
    timings: PanelTimings,
    context: PanelContext,
    state: Arc<watch::Sender<LoaderState>>,
    task: Option<DelayedTask>,
}

impl RecommendationLoader {
    pub fn new(
        source: Arc<dyn RecommendationSource>,
        timings: PanelTimings,
        context: PanelContext,
    ) -> Self {
        let (state, _) = watch::channel(LoaderState::default());
        Self {
            source,
            timings,
            context,
            state: Arc::new(state),
            task: None,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.state.borrow().phase.clone()
    }

    /// Starts a load. Returns `false` when one is already running or the
    /// batch is already in hand.
    pub fn load(&mut self, request: RecommendationRequest) -> bool {
        let mut started = None;
        self.state.send_if_modified(|state| match state.phase {
            LoadPhase::Idle | LoadPhase::Unavailable(_) => {
                state.epoch += 1;
                state.phase = LoadPhase::Loading;
                started = Some(state.epoch);
                true
            }
            LoadPhase::Loading | LoadPhase::Ready(_) => false,
        });
        let Some(epoch) = started else {
            debug!("recommendation load already started");
            return false;
        };

        info!(epoch, "loading delivery recommendations");
        let state = Arc::clone(&self.state);
        let source = Arc::clone(&self.source);
        let context = self.context.clone();
        let timings = self.timings;
        self.task = Some(DelayedTask::spawn("recommendation_load", async move {
            tokio::time::sleep(timings.recommendation_delay).await;
            let outcome = fetch(source.as_ref(), &request, timings.collaborator_timeout).await;

            let applied = state.send_if_modified(|state| {
                if state.epoch != epoch {
                    return false;
                }
                state.phase = match &outcome {
                    Ok(slots) => LoadPhase::Ready(Arc::clone(slots)),
                    Err(err) => LoadPhase::Unavailable(err.clone()),
                };
                true
            });
            if !applied {
                debug!(epoch, "discarding recommendations for a cancelled load");
                return;
            }

            match outcome {
                Ok(slots) => {
                    info!(epoch, count = slots.len(), "delivery recommendations ready");
                    context.emit(PanelEvent::RecommendationsReady { count: slots.len() });
                }
                Err(err) => {
                    warn!(epoch, error = %err, "delivery recommendations unavailable");
                    context.emit(PanelEvent::RecommendationsUnavailable {
                        error: (&err).into(),
                    });
                    context.notify((&err).into());
                }
            }
        }));
        true
    }

    /// Waits for the running load to settle and returns the batch.
    pub async fn ready(&self) -> Result<Arc<[CandidateSlot]>, PanelError> {
        let mut rx = self.state.subscribe();
        let settled = rx
            .wait_for(|state| !state.phase.is_loading())
            .await
            .map(|state| state.phase.clone())
            .map_err(|_| PanelError::unavailable("recommendation loader was dropped"))?;

        match settled {
            LoadPhase::Ready(slots) => Ok(slots),
            LoadPhase::Unavailable(err) => Err(err),
            LoadPhase::Idle | LoadPhase::Loading => {
                Err(PanelError::unavailable("no recommendation load in progress"))
            }
        }
    }

    /// Drops an in-flight load; the loader goes back to idle.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
        }
        self.state.send_if_modified(|state| {
            if !state.phase.is_loading() {
                return false;
            }
            state.epoch += 1;
            state.phase = LoadPhase::Idle;
            true
        });
    }
}

async fn fetch(
    source: &dyn RecommendationSource,
    request: &RecommendationRequest,
    limit: Duration,
) -> Result<Arc<[CandidateSlot]>, PanelError> {
    let slots = tokio::time::timeout(limit, source.recommend(request))
        .await
        .map_err(|_| PanelError::unavailable(format!("no answer within {limit:?}")))?
        .map_err(|err| PanelError::unavailable(format!("{err:#}")))?;
    validate_batch(slots)
}

/// A usable batch is non-empty with unique ids and probabilities within
/// 0..=100; order is kept as supplied.
pub fn validate_batch(slots: Vec<CandidateSlot>) -> Result<Arc<[CandidateSlot]>, PanelError> {
    if slots.is_empty() {
        return Err(PanelError::unavailable("no delivery windows offered"));
    }
    let mut seen = HashSet::with_capacity(slots.len());
    for slot in &slots {
        if !seen.insert(&slot.id) {
            return Err(PanelError::unavailable(format!(
                "duplicate delivery window id '{}'",
                slot.id
            )));
        }
        if slot.success_probability > 100 {
            return Err(PanelError::unavailable(format!(
                "delivery window '{}' has success probability {}%",
                slot.id, slot.success_probability
            )));
        }
    }
    Ok(slots.into())
}

#[cfg(test)]
#[path = "tests/loader_tests.rs"]
mod tests;
