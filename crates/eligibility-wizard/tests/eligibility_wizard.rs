//! End-to-end questionnaire sessions driven through the public controller, renderer, and gateway
//! seams.

mod common {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use eligibility_wizard::workflows::eligibility::{
        GatewayError, SubmissionGateway, SubmissionReceipt, SubmissionRequest,
    };

    #[derive(Default)]
    pub(super) struct MemoryGateway {
        pub(super) fail: bool,
        requests: Mutex<Vec<SubmissionRequest>>,
    }

    impl MemoryGateway {
        pub(super) fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub(super) fn requests(&self) -> Vec<SubmissionRequest> {
            self.requests.lock().expect("gateway mutex").clone()
        }
    }

    #[async_trait]
    impl SubmissionGateway for MemoryGateway {
        async fn submit(
            &self,
            request: &SubmissionRequest,
        ) -> Result<SubmissionReceipt, GatewayError> {
            self.requests
                .lock()
                .expect("gateway mutex")
                .push(request.clone());
            if self.fail {
                Err(GatewayError::Transport("endpoint unreachable".to_string()))
            } else {
                Ok(SubmissionReceipt::new(request.route, None))
            }
        }
    }
}

use common::MemoryGateway;
use eligibility_wizard::workflows::eligibility::{
    Answer, EligibilityWizard, Route, Step, StepRenderer, SubmissionGateway, SubmissionOutcome,
    WizardState, WizardView,
};
use std::sync::Arc;

#[tokio::test]
async fn eligible_session_submits_and_thanks_the_user() {
    let gateway = MemoryGateway::default();
    let renderer = StepRenderer::default();
    let mut wizard = EligibilityWizard::new();

    for answer in [Answer::Yes, Answer::Yes, Answer::No, Answer::No] {
        wizard.answer(answer).expect("question available");
    }
    assert!(matches!(renderer.render(&wizard), WizardView::EmailCapture(_)));

    wizard.set_email("patient@example.com").expect("capture form");
    let outcome = wizard.submit(&gateway).await.expect("submission starts");

    assert!(matches!(outcome, SubmissionOutcome::Submitted(_)));
    assert!(matches!(renderer.render(&wizard), WizardView::Submitted(_)));
    let requests = gateway.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].route, Route::Eligible);
}

#[tokio::test]
async fn ineligible_session_can_join_wellness_list_then_restart() {
    let gateway = MemoryGateway::default();
    let mut wizard = EligibilityWizard::new();

    wizard.answer(Answer::Yes).expect("age");
    wizard.answer(Answer::No).expect("treatments");
    assert_eq!(wizard.state(), WizardState::Disqualified);

    wizard.set_email("wellness@example.com").expect("wellness form");
    let outcome = wizard.submit(&gateway).await.expect("signup starts");
    assert!(matches!(outcome, SubmissionOutcome::Acknowledged(_)));
    assert!(wizard.notice().is_some());
    assert_eq!(gateway.requests()[0].route, Route::Ineligible);

    wizard.restart().expect("restart offered");
    assert_eq!(wizard.state(), WizardState::Step(Step::AgeConfirmation));
    assert!(wizard.answers().is_blank());
    assert!(wizard.notice().is_none());
}

#[tokio::test]
async fn failing_gateway_leaves_user_on_capture_step() {
    let gateway: Arc<dyn SubmissionGateway> = Arc::new(MemoryGateway::failing());
    let mut wizard = EligibilityWizard::new();
    for answer in [Answer::Yes, Answer::Yes, Answer::No, Answer::No] {
        wizard.answer(answer).expect("question available");
    }
    wizard.set_email("patient@example.com").expect("capture form");

    let outcome = wizard.submit(&gateway).await.expect("submission starts");

    assert!(matches!(outcome, SubmissionOutcome::Failed { .. }));
    assert_eq!(wizard.state(), WizardState::Step(Step::EmailCapture));
    assert!(wizard.error().is_some_and(|message| !message.is_empty()));
}
