use tracing::{debug, info, warn};

use super::content::SubmissionMessages;
use super::domain::{Answer, AnswerRecord, Direction, Progress, Route, Step, WizardState};
use super::gateway::{GatewayError, SubmissionGateway, SubmissionReceipt, SubmissionRequest};
use super::rules::{rule_for, Advance};

/// Owns the questionnaire state and every transition between screens.
#[derive(Debug, Clone)]
pub struct EligibilityWizard {
    state: WizardState,
    direction: Direction,
    answers: AnswerRecord,
    error: Option<String>,
    notice: Option<String>,
    messages: SubmissionMessages,
}

/// Submission handed out by [`EligibilityWizard::prepare_submission`] while the request is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    origin: WizardState,
    request: SubmissionRequest,
}

impl PendingSubmission {
    pub fn route(&self) -> Route {
        self.request.route
    }

    pub fn origin(&self) -> WizardState {
        self.origin
    }

    pub fn request(&self) -> &SubmissionRequest {
        &self.request
    }
}

/// What a settled submission did to the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Eligible capture accepted; the wizard is now [`WizardState::Submitted`].
    Submitted(SubmissionReceipt),
    /// Wellness list signup accepted; the confirmation notice is set.
    Acknowledged(SubmissionReceipt),
    /// Accepted after the user had already left the originating screen.
    Stale(SubmissionReceipt),
    /// Delivery failed; the state is unchanged and the error message is set if the
    /// originating screen is still shown.
    Failed { message: String },
}

/// Misuse of the controller, e.g. answering on a screen without a question.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("no yes/no question is asked in {0}")]
    NoQuestion(WizardState),
    #[error("cannot go back from {0}")]
    BackUnavailable(WizardState),
    #[error("restart is only offered after disqualification (currently {0})")]
    RestartUnavailable(WizardState),
    #[error("no email form is shown in {0}")]
    EmailUnavailable(WizardState),
    #[error("email address is required")]
    EmailRequired,
}

impl Default for EligibilityWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl EligibilityWizard {
    pub fn new() -> Self {
        Self::with_messages(SubmissionMessages::default())
    }

    pub fn with_messages(messages: SubmissionMessages) -> Self {
        Self {
            state: WizardState::initial(),
            direction: Direction::Forward,
            answers: AnswerRecord::default(),
            error: None,
            notice: None,
            messages,
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn progress(&self) -> Option<Progress> {
        self.state.step().map(Progress::for_step)
    }

    pub fn can_go_back(&self) -> bool {
        matches!(self.state.step(), Some(step) if step.previous().is_some())
    }

    /// Record the answer to the current question and move on.
    pub fn answer(&mut self, answer: Answer) -> Result<WizardState, WizardError> {
        let rule = self
            .state
            .step()
            .and_then(rule_for)
            .ok_or(WizardError::NoQuestion(self.state))?;

        self.direction = Direction::Forward;
        self.answers.record(rule.question, answer);

        let next = match rule.apply(answer) {
            Advance::Next(step) => WizardState::Step(step),
            Advance::Disqualify => WizardState::Disqualified,
        };
        debug!(from = %self.state, to = %next, ?answer, "questionnaire answer recorded");
        self.state = next;
        Ok(next)
    }

    /// Step back one screen, keeping recorded answers.
    pub fn back(&mut self) -> Result<WizardState, WizardError> {
        let previous = self
            .state
            .step()
            .and_then(Step::previous)
            .ok_or(WizardError::BackUnavailable(self.state))?;

        self.direction = Direction::Backward;
        let next = WizardState::Step(previous);
        debug!(from = %self.state, to = %next, "questionnaire navigated back");
        self.state = next;
        Ok(next)
    }

    /// Discard the session and start over from the first question.
    pub fn restart(&mut self) -> Result<WizardState, WizardError> {
        if self.state != WizardState::Disqualified {
            return Err(WizardError::RestartUnavailable(self.state));
        }

        self.answers = AnswerRecord::default();
        self.error = None;
        self.notice = None;
        self.direction = Direction::Backward;
        self.state = WizardState::initial();
        debug!("questionnaire restarted");
        Ok(self.state)
    }

    /// Direct text input into the email field of the current screen.
    pub fn set_email(&mut self, email: impl Into<String>) -> Result<(), WizardError> {
        if self.state.submission_route().is_none() {
            return Err(WizardError::EmailUnavailable(self.state));
        }
        self.answers.email_capture = email.into();
        Ok(())
    }

    /// Start a submission from the current email form.
    ///
    /// Clears the previous error and notice. Nothing prevents a second call before the first
    /// request settles; each call yields an independent pending submission.
    pub fn prepare_submission(&mut self) -> Result<PendingSubmission, WizardError> {
        let route = self
            .state
            .submission_route()
            .ok_or(WizardError::EmailUnavailable(self.state))?;
        if !self.answers.has_email() {
            return Err(WizardError::EmailRequired);
        }

        self.error = None;
        self.notice = None;

        Ok(PendingSubmission {
            origin: self.state,
            request: SubmissionRequest {
                route,
                email: self.answers.email().trim().to_string(),
                answers: self.answers.clone(),
            },
        })
    }

    /// Apply the settled gateway result for a pending submission.
    pub fn resolve_submission(
        &mut self,
        pending: PendingSubmission,
        result: Result<SubmissionReceipt, GatewayError>,
    ) -> SubmissionOutcome {
        let receipt = match result {
            Ok(receipt) => receipt,
            Err(err) => {
                warn!(route = %pending.route(), error = %err, "submission failed");
                let message = self.messages.failure.clone();
                // Only the form that sent the request shows its failure.
                if self.state == pending.origin {
                    self.error = Some(message.clone());
                }
                return SubmissionOutcome::Failed { message };
            }
        };

        if self.state != pending.origin {
            warn!(
                route = %pending.route(),
                origin = %pending.origin,
                current = %self.state,
                "submission settled after leaving its screen"
            );
            return SubmissionOutcome::Stale(receipt);
        }

        match pending.route() {
            Route::Eligible => {
                self.direction = Direction::Forward;
                self.state = WizardState::Submitted;
                info!(route = %Route::Eligible, "questionnaire submitted");
                SubmissionOutcome::Submitted(receipt)
            }
            Route::Ineligible => {
                self.notice = Some(self.messages.wellness_confirmation.clone());
                info!(route = %Route::Ineligible, "wellness signup recorded");
                SubmissionOutcome::Acknowledged(receipt)
            }
        }
    }

    /// Submit the current email form through `gateway` and apply the result.
    pub async fn submit<G>(&mut self, gateway: &G) -> Result<SubmissionOutcome, WizardError>
    where
        G: SubmissionGateway + ?Sized,
    {
        let pending = self.prepare_submission()?;
        let result = gateway.submit(pending.request()).await;
        Ok(self.resolve_submission(pending, result))
    }
}
