//! Submission controller: `idle -> busy -> {success, failure} -> idle`.
//!
//! Validation of the selection happens inside the same state update that
//! enters `busy`, so a rejected submission is never observable as busy.
//!
//! Every accepted submission reports exactly one outcome, as a
//! [`PanelEvent::Submission`] plus a toast, before the controller returns to
//! idle. Only one submission may be in flight at a time.

use std::sync::Arc;

use shared::{
    domain::SlotId,
    error::PanelError,
    protocol::{Notification, PanelEvent, SubmissionOutcome, SCHEDULED_CONFIRMATION},
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    task::DelayedTask, CustomerDetails, PanelContext, PanelTimings, ScheduleRequest,
    SchedulingBackend,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Busy {
        slot_id: SlotId,
    },
    Settled(SubmissionOutcome),
}

impl SubmissionPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, SubmissionPhase::Idle)
    }
}

#[derive(Debug, Default)]
struct SubmissionState {
    epoch: u64,
    phase: SubmissionPhase,
    last_outcome: Option<SubmissionOutcome>,
}

pub struct SubmissionController {
    backend: Arc<dyn SchedulingBackend>,
    timings: PanelTimings,
    context: PanelContext,
    state: Arc<watch::Sender<SubmissionState>>,
    task: Option<DelayedTask>,
}

impl SubmissionController {
    pub fn new(
        backend: Arc<dyn SchedulingBackend>,
        timings: PanelTimings,
        context: PanelContext,
    ) -> Self {
        let (state, _) = watch::channel(SubmissionState::default());
        Self {
            backend,
            timings,
            context,
            state: Arc::new(state),
            task: None,
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.state.borrow().phase.clone()
    }

    pub fn is_busy(&self) -> bool {
        !self.state.borrow().phase.is_idle()
    }

    pub fn last_outcome(&self) -> Option<SubmissionOutcome> {
        self.state.borrow().last_outcome.clone()
    }

    /// Validates the selection and starts the simulated commit.
    ///
    /// A re-entrant call fails with [`PanelError::SubmissionInProgress`] and
    /// leaves the running commit alone; an empty selection fails with
    /// [`PanelError::NoSelection`] without ever going busy.
    pub fn submit(
        &mut self,
        selected: Option<&SlotId>,
        customer: &CustomerDetails,
    ) -> Result<(), PanelError> {
        let mut verdict = Err(PanelError::SubmissionInProgress);
        self.state.send_if_modified(|state| {
            if !state.phase.is_idle() {
                return false;
            }
            let Some(slot_id) = selected else {
                verdict = Err(PanelError::NoSelection);
                return false;
            };
            state.epoch += 1;
            state.phase = SubmissionPhase::Busy {
                slot_id: slot_id.clone(),
            };
            verdict = Ok((state.epoch, slot_id.clone()));
            true
        });
        let (epoch, slot_id) =
            verdict.inspect_err(|err| debug!(error = %err, "submission rejected"))?;

        info!(epoch, slot = %slot_id, "scheduling delivery");
        self.context
            .emit(PanelEvent::Submission(SubmissionOutcome::Pending {
                slot_id: slot_id.clone(),
            }));

        let request = ScheduleRequest {
            slot_id,
            customer: customer.clone(),
        };
        let state = Arc::clone(&self.state);
        let backend = Arc::clone(&self.backend);
        let context = self.context.clone();
        let timings = self.timings;
        self.task = Some(DelayedTask::spawn("delivery_commit", async move {
            tokio::time::sleep(timings.submission_delay).await;
            let outcome = match tokio::time::timeout(
                timings.collaborator_timeout,
                backend.commit(&request),
            )
            .await
            {
                Ok(Ok(receipt)) => {
                    debug!(code = %receipt.confirmation_code, "commit acknowledged");
                    Ok(SCHEDULED_CONFIRMATION.to_string())
                }
                Ok(Err(err)) => Err(PanelError::CommitFailed {
                    reason: format!("{err:#}"),
                }),
                Err(_) => Err(PanelError::CommitFailed {
                    reason: format!("no answer within {:?}", timings.collaborator_timeout),
                }),
            };
            let slot_id = request.slot_id;
            let (reported, notification) = match outcome {
                Ok(confirmation) => (
                    SubmissionOutcome::Success {
                        slot_id,
                        confirmation: confirmation.clone(),
                    },
                    Notification::success(confirmation),
                ),
                Err(err) => (
                    SubmissionOutcome::Failure {
                        slot_id,
                        error: (&err).into(),
                    },
                    Notification::from(&err),
                ),
            };

            let applied = state.send_if_modified(|state| {
                if state.epoch != epoch {
                    return false;
                }
                state.phase = SubmissionPhase::Settled(reported.clone());
                state.last_outcome = Some(reported.clone());
                true
            });
            if !applied {
                debug!(epoch, "discarding outcome of a cancelled submission");
                return;
            }

            match &reported {
                SubmissionOutcome::Failure { error, .. } => {
                    warn!(epoch, error = %error.message, "delivery scheduling failed")
                }
                _ => info!(epoch, "delivery scheduled"),
            }
            context.emit(PanelEvent::Submission(reported));
            context.notify(notification);

            state.send_if_modified(|state| {
                if state.epoch != epoch {
                    return false;
                }
                state.phase = SubmissionPhase::Idle;
                true
            });
        }));
        Ok(())
    }

    /// Waits until the controller is idle again and returns the most recent
    /// outcome, if any submission has completed.
    pub async fn settled(&self) -> Option<SubmissionOutcome> {
        let mut rx = self.state.subscribe();
        let outcome = rx
            .wait_for(|state| state.phase.is_idle())
            .await
            .ok()
            .and_then(|state| state.last_outcome.clone());
        outcome
    }

    /// Drops an in-flight commit without reporting it.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
        }
        self.state.send_if_modified(|state| {
            if state.phase.is_idle() {
                return false;
            }
            state.epoch += 1;
            state.phase = SubmissionPhase::Idle;
            true
        });
    }
}

#[cfg(test)]
#[path = "tests/submission_tests.rs"]
mod tests;
