use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shared::domain::{FormField, FormState, SubmissionStatus};
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::{
    config::ClientSettings,
    service::{HttpSignupService, SignupAccepted, SignupError, SignupService},
    validation::validate,
};

pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Could not reach the server. Check the base URL and that the backend is running.";
pub const REJECTION_FALLBACK_MESSAGE: &str = "Signup failed. Please try again.";
pub const SUCCESS_FALLBACK_MESSAGE: &str = "Signup successful! Welcome to FurNest 🐾";

/// Change notifications for whatever renders the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    FieldChanged { field: FormField },
    FormReset,
    StatusChanged(SubmissionStatus),
}

struct ControllerState {
    form: FormState,
    status: SubmissionStatus,
}

// Never held across an await, so a blocking mutex is enough and `PendingGuard`
// can take it from `Drop`.
pub struct SignupFormController {
    service: Arc<dyn SignupService>,
    inner: Mutex<ControllerState>,
    events: broadcast::Sender<FormEvent>,
}

/// Puts the previous status back if a submission is dropped before the
/// service answers.
struct PendingGuard<'a> {
    controller: &'a SignupFormController,
    previous: Option<SubmissionStatus>,
}

impl PendingGuard<'_> {
    fn complete(mut self) {
        self.previous = None;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let Some(previous) = self.previous.take() else {
            return;
        };
        warn!("signup dropped while in flight; clearing pending status");
        self.controller.state().status = previous.clone();
        let _ = self
            .controller
            .events
            .send(FormEvent::StatusChanged(previous));
    }
}

impl SignupFormController {
    pub fn new(service: Arc<dyn SignupService>) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            service,
            inner: Mutex::new(ControllerState {
                form: FormState::default(),
                status: SubmissionStatus::Idle,
            }),
            events,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> anyhow::Result<Arc<Self>> {
        let service = HttpSignupService::new(settings)?;
        Ok(Self::new(Arc::new(service)))
    }

    fn state(&self) -> MutexGuard<'_, ControllerState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<FormEvent> {
        self.events.subscribe()
    }

    pub fn form(&self) -> FormState {
        self.state().form.clone()
    }

    pub fn status(&self) -> SubmissionStatus {
        self.state().status.clone()
    }

    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        self.state().form.set_field(field, value);
        let _ = self.events.send(FormEvent::FieldChanged { field });
    }

    pub fn set_full_name(&self, value: impl Into<String>) {
        self.set_field(FormField::FullName, value);
    }

    pub fn set_email(&self, value: impl Into<String>) {
        self.set_field(FormField::Email, value);
    }

    pub fn set_password(&self, value: impl Into<String>) {
        self.set_field(FormField::Password, value);
    }

    /// Clears the fields and returns the status to `Idle`.
    pub fn reset(&self) {
        {
            let mut guard = self.state();
            guard.form.clear();
            guard.status = SubmissionStatus::Idle;
        }
        let _ = self.events.send(FormEvent::FormReset);
        let _ = self
            .events
            .send(FormEvent::StatusChanged(SubmissionStatus::Idle));
    }

    /// Validates the current form and, if it passes, sends one signup request.
    ///
    /// Returns `Pending` without sending anything while an earlier submission
    /// is still waiting on the server. Dropping the returned future before it
    /// resolves restores the status that preceded the submission.
    pub async fn submit(&self) -> SubmissionStatus {
        self.submit_inner(None).await
    }

    /// Replaces the form with `form` and submits it.
    pub async fn submit_form(&self, form: FormState) -> SubmissionStatus {
        self.submit_inner(Some(form)).await
    }

    async fn submit_inner(&self, replacement: Option<FormState>) -> SubmissionStatus {
        let (request, previous) = {
            let mut guard = self.state();
            if guard.status.is_pending() {
                warn!("signup already in flight; ignoring submit");
                return SubmissionStatus::Pending;
            }
            if let Some(form) = replacement {
                guard.form = form;
            }

            let validated = validate(&guard.form);
            match validated {
                Ok(request) => {
                    let previous =
                        std::mem::replace(&mut guard.status, SubmissionStatus::Pending);
                    (request, previous)
                }
                Err(err) => {
                    let status = status_for_outcome(Err(err.into()));
                    guard.status = status.clone();
                    drop(guard);
                    let _ = self.events.send(FormEvent::StatusChanged(status.clone()));
                    return status;
                }
            }
        };
        let pending = PendingGuard {
            controller: self,
            previous: Some(previous),
        };
        let _ = self
            .events
            .send(FormEvent::StatusChanged(SubmissionStatus::Pending));

        let outcome = self.service.submit(&request).await;
        pending.complete();
        match &outcome {
            Ok(_) => info!("signup accepted"),
            Err(err) => warn!(error = %err, "signup failed"),
        }
        let accepted = outcome.is_ok();
        let status = status_for_outcome(outcome);

        {
            let mut guard = self.state();
            if accepted {
                guard.form.clear();
            }
            guard.status = status.clone();
        }
        if accepted {
            let _ = self.events.send(FormEvent::FormReset);
        }
        let _ = self.events.send(FormEvent::StatusChanged(status.clone()));
        status
    }
}

/// Maps a submission result onto the single message shown to the user.
pub fn status_for_outcome(outcome: Result<SignupAccepted, SignupError>) -> SubmissionStatus {
    match outcome {
        Ok(accepted) => SubmissionStatus::Success(
            accepted
                .message
                .unwrap_or_else(|| SUCCESS_FALLBACK_MESSAGE.to_string()),
        ),
        Err(SignupError::Validation(err)) => SubmissionStatus::Error(err.to_string()),
        Err(SignupError::Transport(_)) => {
            SubmissionStatus::Error(TRANSPORT_FAILURE_MESSAGE.to_string())
        }
        Err(SignupError::Rejected { message, .. }) => SubmissionStatus::Error(
            message.unwrap_or_else(|| REJECTION_FALLBACK_MESSAGE.to_string()),
        ),
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
