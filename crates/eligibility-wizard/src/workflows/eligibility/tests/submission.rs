use super::common::*;
use crate::workflows::eligibility::content::{
    SUBMISSION_FAILED_MESSAGE, WELLNESS_LIST_CONFIRMATION,
};
use crate::workflows::eligibility::domain::{Answer, Direction, Route, Step, WizardState};
use crate::workflows::eligibility::gateway::GatewayError;
use crate::workflows::eligibility::{SubmissionOutcome, WizardError};

#[tokio::test]
async fn eligible_submission_moves_to_submitted() {
    let gateway = ScriptedGateway::default();
    let mut wizard = wizard_at(Step::EmailCapture);
    wizard.set_email("patient@example.com").expect("form shown");

    let outcome = wizard.submit(&gateway).await.expect("submission starts");

    assert!(matches!(outcome, SubmissionOutcome::Submitted(_)));
    assert_eq!(wizard.state(), WizardState::Submitted);
    assert_eq!(wizard.direction(), Direction::Forward);
    let requests = gateway.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].route, Route::Eligible);
    assert_eq!(requests[0].email, "patient@example.com");
    assert_eq!(requests[0].answers.pregnant, Some(false));
}

#[tokio::test]
async fn failed_submission_keeps_step_and_sets_error() {
    let gateway = ScriptedGateway::failing_then_succeeding(1);
    let mut wizard = wizard_at(Step::EmailCapture);
    wizard.set_email("patient@example.com").expect("form shown");

    let outcome = wizard.submit(&gateway).await.expect("submission starts");

    match outcome {
        SubmissionOutcome::Failed { message } => assert_eq!(message, SUBMISSION_FAILED_MESSAGE),
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(wizard.state(), WizardState::Step(Step::EmailCapture));
    assert_eq!(wizard.error(), Some(SUBMISSION_FAILED_MESSAGE));

    let retry = wizard.submit(&gateway).await.expect("resubmission starts");
    assert!(matches!(retry, SubmissionOutcome::Submitted(_)));
    assert!(wizard.error().is_none());
    assert_eq!(wizard.state(), WizardState::Submitted);
    assert_eq!(gateway.requests().len(), 2);
}

#[tokio::test]
async fn blank_email_is_rejected_before_any_request() {
    let gateway = ScriptedGateway::default();
    let mut wizard = wizard_at(Step::EmailCapture);
    wizard.set_email("   ").expect("form shown");

    assert_eq!(
        wizard.submit(&gateway).await,
        Err(WizardError::EmailRequired)
    );
    assert!(gateway.requests().is_empty());
    assert_eq!(wizard.state(), WizardState::Step(Step::EmailCapture));
}

#[tokio::test]
async fn submissions_outside_email_screens_are_rejected() {
    let gateway = ScriptedGateway::default();
    let mut wizard = wizard_at(Step::PregnancyStatus);

    assert!(matches!(
        wizard.submit(&gateway).await,
        Err(WizardError::EmailUnavailable(_))
    ));
    assert!(gateway.requests().is_empty());
}

#[tokio::test]
async fn ineligible_signup_shows_confirmation_and_stays_disqualified() {
    let gateway = ScriptedGateway::default();
    let mut wizard = disqualified_wizard();
    wizard.set_email(" fan@example.com ").expect("form shown");

    let outcome = wizard.submit(&gateway).await.expect("submission starts");

    assert!(matches!(outcome, SubmissionOutcome::Acknowledged(_)));
    assert_eq!(wizard.state(), WizardState::Disqualified);
    assert_eq!(wizard.notice(), Some(WELLNESS_LIST_CONFIRMATION));
    let requests = gateway.requests();
    assert_eq!(requests[0].route, Route::Ineligible);
    assert_eq!(requests[0].email, "fan@example.com");
}

#[test]
fn duplicate_submissions_are_not_guarded() {
    let mut wizard = wizard_at(Step::EmailCapture);
    wizard.set_email("patient@example.com").expect("form shown");

    let first = wizard.prepare_submission().expect("first submit");
    let second = wizard.prepare_submission().expect("second submit while first pending");
    assert_eq!(first.request(), second.request());

    let outcome = wizard.resolve_submission(first, Ok(receipt(Route::Eligible)));
    assert!(matches!(outcome, SubmissionOutcome::Submitted(_)));

    let late = wizard.resolve_submission(second, Ok(receipt(Route::Eligible)));
    assert!(matches!(late, SubmissionOutcome::Stale(_)));
    assert_eq!(wizard.state(), WizardState::Submitted);
}

#[test]
fn success_after_navigating_away_does_not_transition() {
    let mut wizard = wizard_at(Step::EmailCapture);
    wizard.set_email("patient@example.com").expect("form shown");
    let pending = wizard.prepare_submission().expect("submit");
    assert_eq!(pending.origin(), WizardState::Step(Step::EmailCapture));

    wizard.back().expect("back while pending");
    wizard.answer(Answer::Yes).expect("pregnancy answered");

    let outcome = wizard.resolve_submission(pending, Ok(receipt(Route::Eligible)));
    assert!(matches!(outcome, SubmissionOutcome::Stale(_)));
    assert_eq!(wizard.state(), WizardState::Disqualified);
    assert!(wizard.notice().is_none());
}

#[test]
fn failure_after_restart_does_not_reach_the_new_session() {
    let mut wizard = disqualified_wizard();
    wizard.set_email("fan@example.com").expect("form shown");
    let pending = wizard.prepare_submission().expect("submit");

    wizard.restart().expect("restart while pending");
    answer_all(&mut wizard, &QUALIFYING_PATH);

    let outcome = wizard.resolve_submission(
        pending,
        Err(GatewayError::Transport("timed out".to_string())),
    );
    assert!(matches!(outcome, SubmissionOutcome::Failed { .. }));
    assert_eq!(wizard.state(), WizardState::Step(Step::EmailCapture));
    assert!(wizard.error().is_none());
}

#[test]
fn new_submission_clears_previous_error() {
    let mut wizard = wizard_at(Step::EmailCapture);
    wizard.set_email("patient@example.com").expect("form shown");
    let pending = wizard.prepare_submission().expect("submit");
    wizard.resolve_submission(
        pending,
        Err(GatewayError::Transport("timed out".to_string())),
    );
    assert!(wizard.error().is_some());

    let pending = wizard.prepare_submission().expect("resubmit");
    assert!(wizard.error().is_none());
    assert_eq!(pending.route(), Route::Eligible);
}
