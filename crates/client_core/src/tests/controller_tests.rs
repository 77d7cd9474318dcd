use super::*;
use std::time::Duration;

use async_trait::async_trait;
use shared::protocol::SignupRequest;
use tokio::sync::Notify;

struct RecordingSignupService {
    outcome: Result<SignupAccepted, SignupError>,
    calls: Arc<Mutex<Vec<SignupRequest>>>,
    gate: Option<Arc<Notify>>,
}

impl RecordingSignupService {
    fn accepting(message: Option<&str>) -> Self {
        Self::with_outcome(Ok(SignupAccepted {
            message: message.map(str::to_string),
        }))
    }

    fn with_outcome(outcome: Result<SignupAccepted, SignupError>) -> Self {
        Self {
            outcome,
            calls: Arc::new(Mutex::new(Vec::new())),
            gate: None,
        }
    }

    fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait]
impl SignupService for RecordingSignupService {
    async fn submit(&self, request: &SignupRequest) -> Result<SignupAccepted, SignupError> {
        self.calls.lock().expect("calls").push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.outcome.clone()
    }
}

fn controller_with(
    service: RecordingSignupService,
) -> (Arc<SignupFormController>, Arc<Mutex<Vec<SignupRequest>>>) {
    let calls = service.calls.clone();
    (SignupFormController::new(Arc::new(service)), calls)
}

fn fill(controller: &SignupFormController, name: &str, email: &str, password: &str) {
    controller.set_full_name(name);
    controller.set_email(email);
    controller.set_password(password);
}

#[tokio::test]
async fn missing_name_or_email_never_reaches_service() {
    let (controller, calls) = controller_with(RecordingSignupService::accepting(None));

    fill(&controller, "  ", "jane@example.com", "abc12345");
    let status = controller.submit().await;

    assert_eq!(
        status,
        SubmissionStatus::Error("Please enter your full name and email.".into())
    );
    assert!(calls.lock().expect("calls").is_empty());
}

#[tokio::test]
async fn invalid_email_never_reaches_service() {
    let (controller, calls) = controller_with(RecordingSignupService::accepting(None));

    fill(&controller, "Jane Doe", "jane@example", "abc12345");
    let status = controller.submit().await;

    assert_eq!(
        status,
        SubmissionStatus::Error("Please enter a valid email address.".into())
    );
    assert!(calls.lock().expect("calls").is_empty());
}

#[tokio::test]
async fn weak_password_never_reaches_service() {
    let (controller, calls) = controller_with(RecordingSignupService::accepting(None));

    for password in ["abc1234", "abcdefgh", "12345678", "abc_12345"] {
        fill(&controller, "Jane Doe", "jane@example.com", password);
        let status = controller.submit().await;
        assert_eq!(
            status,
            SubmissionStatus::Error(
                "Password must be at least 8 characters and include letters & numbers.".into()
            ),
            "password={password:?}"
        );
    }
    assert!(calls.lock().expect("calls").is_empty());
}

#[tokio::test]
async fn sends_trimmed_lowercased_request() {
    let (controller, calls) = controller_with(RecordingSignupService::accepting(None));

    let status = controller
        .submit_form(FormState::new("Jane Doe", "Jane@Example.com", "abc12345"))
        .await;
    assert!(status.is_success());

    let calls = calls.lock().expect("calls");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].full_name, "Jane Doe");
    assert_eq!(calls[0].email, "jane@example.com");
    assert_eq!(calls[0].password, "abc12345");
}

#[tokio::test]
async fn transport_failure_keeps_form_and_reports_connectivity() {
    let (controller, calls) = controller_with(RecordingSignupService::with_outcome(Err(
        SignupError::transport("connection refused"),
    )));

    fill(&controller, "Jane Doe", "Jane@Example.com", "abc12345");
    let before = controller.form();
    let status = controller.submit().await;

    assert_eq!(
        status,
        SubmissionStatus::Error(TRANSPORT_FAILURE_MESSAGE.to_string())
    );
    assert_eq!(controller.form(), before);
    assert_eq!(calls.lock().expect("calls").len(), 1);
}

#[tokio::test]
async fn server_rejection_surfaces_server_message() {
    let (controller, _calls) = controller_with(RecordingSignupService::with_outcome(Err(
        SignupError::Rejected {
            status: 409,
            message: Some("Email already in use".into()),
        },
    )));

    fill(&controller, "Jane Doe", "jane@example.com", "abc12345");
    let status = controller.submit().await;

    assert_eq!(status, SubmissionStatus::Error("Email already in use".into()));
    assert!(!controller.form().is_empty());
}

#[tokio::test]
async fn success_reports_message_and_clears_form() {
    let (controller, _calls) = controller_with(RecordingSignupService::accepting(Some("Welcome")));

    fill(&controller, "Jane Doe", "jane@example.com", "abc12345");
    let status = controller.submit().await;

    assert_eq!(status, SubmissionStatus::Success("Welcome".into()));
    assert_eq!(controller.status(), status);
    assert!(controller.form().is_empty());
}

#[tokio::test]
async fn sequential_submits_issue_independent_requests() {
    let (controller, calls) = controller_with(RecordingSignupService::accepting(None));
    let form = FormState::new("Jane Doe", "jane@example.com", "abc12345");

    controller.submit_form(form.clone()).await;
    controller.submit_form(form).await;

    assert_eq!(calls.lock().expect("calls").len(), 2);
}

#[tokio::test]
async fn overlapping_submit_is_ignored_while_pending() {
    let gate = Arc::new(Notify::new());
    let (controller, calls) =
        controller_with(RecordingSignupService::accepting(Some("Welcome")).gated(gate.clone()));
    fill(&controller, "Jane Doe", "jane@example.com", "abc12345");

    let mut events = controller.subscribe_events();
    let first = tokio::spawn({
        let controller = controller.clone();
        async move { controller.submit().await }
    });

    loop {
        if let FormEvent::StatusChanged(SubmissionStatus::Pending) =
            events.recv().await.expect("event")
        {
            break;
        }
    }

    assert_eq!(controller.submit().await, SubmissionStatus::Pending);
    assert_eq!(controller.status(), SubmissionStatus::Pending);

    gate.notify_one();
    let status = first.await.expect("join");

    assert_eq!(status, SubmissionStatus::Success("Welcome".into()));
    assert_eq!(calls.lock().expect("calls").len(), 1);
}

#[tokio::test]
async fn emits_field_and_status_events() {
    let (controller, _calls) = controller_with(RecordingSignupService::accepting(None));
    let mut events = controller.subscribe_events();

    fill(&controller, "Jane Doe", "jane@example.com", "abc12345");
    controller.submit().await;

    let mut received = Vec::new();
    while let Ok(event) = events.try_recv() {
        received.push(event);
    }

    assert_eq!(
        received,
        vec![
            FormEvent::FieldChanged {
                field: FormField::FullName
            },
            FormEvent::FieldChanged {
                field: FormField::Email
            },
            FormEvent::FieldChanged {
                field: FormField::Password
            },
            FormEvent::StatusChanged(SubmissionStatus::Pending),
            FormEvent::FormReset,
            FormEvent::StatusChanged(SubmissionStatus::Success(
                SUCCESS_FALLBACK_MESSAGE.to_string()
            )),
        ]
    );
}

#[tokio::test]
async fn reset_clears_form_and_status() {
    let (controller, _calls) = controller_with(RecordingSignupService::accepting(None));

    fill(&controller, "Jane Doe", "bad-email", "abc12345");
    assert!(controller.submit().await.is_error());

    controller.reset();
    assert!(controller.form().is_empty());
    assert_eq!(controller.status(), SubmissionStatus::Idle);
}

#[test]
fn missing_server_messages_fall_back_to_defaults() {
    assert_eq!(
        status_for_outcome(Ok(SignupAccepted::default())),
        SubmissionStatus::Success(SUCCESS_FALLBACK_MESSAGE.to_string())
    );
    assert_eq!(
        status_for_outcome(Err(SignupError::Rejected {
            status: 500,
            message: None,
        })),
        SubmissionStatus::Error(REJECTION_FALLBACK_MESSAGE.to_string())
    );
    assert_eq!(
        status_for_outcome(Err(SignupError::Validation(
            shared::error::ValidationError::WeakPassword
        ))),
        SubmissionStatus::Error(
            "Password must be at least 8 characters and include letters & numbers.".into()
        )
    );
}

#[tokio::test]
async fn dropped_submit_restores_previous_status() {
    let gate = Arc::new(Notify::new());
    let (controller, calls) =
        controller_with(RecordingSignupService::accepting(Some("Welcome")).gated(gate.clone()));
    fill(&controller, "Jane Doe", "jane@example.com", "abc12345");

    let timed_out = tokio::time::timeout(Duration::from_millis(50), controller.submit()).await;
    assert!(timed_out.is_err());
    assert_eq!(controller.status(), SubmissionStatus::Idle);
    assert!(!controller.form().is_empty());

    gate.notify_one();
    let status = controller.submit().await;

    assert_eq!(status, SubmissionStatus::Success("Welcome".into()));
    assert_eq!(calls.lock().expect("calls").len(), 2);
}
