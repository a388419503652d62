use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::workflows::eligibility::domain::{Answer, Route, Step, WizardState};
use crate::workflows::eligibility::gateway::{
    GatewayError, SubmissionGateway, SubmissionReceipt, SubmissionRequest,
};
use crate::workflows::eligibility::EligibilityWizard;

pub(super) const QUALIFYING_PATH: [Answer; 4] = [Answer::Yes, Answer::Yes, Answer::No, Answer::No];

/// Gateway that records requests and replays scripted results (success once the script runs out).
#[derive(Default)]
pub(super) struct ScriptedGateway {
    requests: Mutex<Vec<SubmissionRequest>>,
    failures: Mutex<VecDeque<bool>>,
}

impl ScriptedGateway {
    pub(super) fn failing_then_succeeding(failures: usize) -> Self {
        let gateway = Self::default();
        gateway
            .failures
            .lock()
            .expect("script mutex")
            .extend(std::iter::repeat(true).take(failures));
        gateway
    }

    pub(super) fn requests(&self) -> Vec<SubmissionRequest> {
        self.requests.lock().expect("request mutex").clone()
    }
}

#[async_trait]
impl SubmissionGateway for ScriptedGateway {
    async fn submit(
        &self,
        request: &SubmissionRequest,
    ) -> Result<SubmissionReceipt, GatewayError> {
        self.requests
            .lock()
            .expect("request mutex")
            .push(request.clone());
        let fail = self
            .failures
            .lock()
            .expect("script mutex")
            .pop_front()
            .unwrap_or(false);
        if fail {
            Err(GatewayError::Transport("connection reset".to_string()))
        } else {
            Ok(SubmissionReceipt::new(request.route, Some(200)))
        }
    }
}

pub(super) fn answer_all(wizard: &mut EligibilityWizard, answers: &[Answer]) -> WizardState {
    let mut state = wizard.state();
    for answer in answers {
        state = wizard.answer(*answer).expect("question available");
    }
    state
}

pub(super) fn wizard_at(step: Step) -> EligibilityWizard {
    let mut wizard = EligibilityWizard::new();
    let needed = usize::from(step.number() - 1);
    answer_all(&mut wizard, &QUALIFYING_PATH[..needed]);
    assert_eq!(wizard.state(), WizardState::Step(step));
    wizard
}

pub(super) fn disqualified_wizard() -> EligibilityWizard {
    let mut wizard = EligibilityWizard::new();
    wizard.answer(Answer::No).expect("age question");
    assert_eq!(wizard.state(), WizardState::Disqualified);
    wizard
}

pub(super) fn receipt(route: Route) -> SubmissionReceipt {
    SubmissionReceipt::new(route, None)
}
