use crate::infra::ScriptedAction;
use crate::session::Console;
use eligibility_wizard::error::AppError;
use std::io::Write;
use tracing::debug;

/// Apply scripted actions, submit `email` if the script ends on an email form, print the final screen.
pub(crate) async fn run_replay<W: Write>(
    console: &mut Console,
    actions: &[ScriptedAction],
    email: Option<String>,
    output: &mut W,
) -> Result<(), AppError> {
    for action in actions {
        let wizard = console.wizard_mut();
        let state = match action {
            ScriptedAction::Answer(answer) => wizard.answer(*answer)?,
            ScriptedAction::Back => wizard.back()?,
            ScriptedAction::Restart => wizard.restart()?,
        };
        debug!(?action, %state, "replayed action");
    }

    let form_shown = console.wizard().state().submission_route().is_some();
    let mut submission = Ok(());
    if let (Some(email), true) = (email, form_shown) {
        console.wizard_mut().set_email(email)?;
        // Delivery failures are shown by the email form on the final screen.
        submission = console.submit(output).await.map(|_| ());
    }

    console.show(output)?;
    submission
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryGateway;
    use crate::session::OutputFormat;
    use eligibility_wizard::workflows::eligibility::{
        Answer, Route, Step, StepRenderer, WizardError, WizardState,
    };
    use std::sync::Arc;

    fn console(gateway: InMemoryGateway) -> Console {
        Console::new(StepRenderer::default(), Arc::new(gateway), OutputFormat::Text)
    }

    #[tokio::test]
    async fn replay_with_back_still_reaches_submission() {
        let gateway = InMemoryGateway::default();
        let mut console = console(gateway.clone());
        let actions = [
            ScriptedAction::Answer(Answer::Yes),
            ScriptedAction::Answer(Answer::Yes),
            ScriptedAction::Back,
            ScriptedAction::Answer(Answer::Yes),
            ScriptedAction::Answer(Answer::No),
            ScriptedAction::Answer(Answer::No),
        ];
        let mut output = Vec::new();

        run_replay(
            &mut console,
            &actions,
            Some("patient@example.com".to_string()),
            &mut output,
        )
        .await
        .expect("replay runs");

        assert_eq!(console.wizard().state(), WizardState::Submitted);
        assert_eq!(gateway.requests()[0].route, Route::Eligible);
    }

    #[tokio::test]
    async fn replay_stops_at_disqualification_without_email() {
        let gateway = InMemoryGateway::default();
        let mut console = console(gateway.clone());
        let actions = [
            ScriptedAction::Answer(Answer::Yes),
            ScriptedAction::Answer(Answer::Yes),
            ScriptedAction::Answer(Answer::Yes),
        ];
        let mut output = Vec::new();

        run_replay(&mut console, &actions, None, &mut output)
            .await
            .expect("replay runs");

        assert_eq!(console.wizard().state(), WizardState::Disqualified);
        assert!(gateway.requests().is_empty());
        let text = String::from_utf8(output).expect("utf8 output");
        assert!(text.contains("You're not eligible"));
    }

    #[tokio::test]
    async fn replay_rejects_actions_past_a_terminal_screen() {
        let mut console = console(InMemoryGateway::default());
        let actions = [
            ScriptedAction::Answer(Answer::No),
            ScriptedAction::Answer(Answer::Yes),
        ];
        let mut output = Vec::new();

        match run_replay(&mut console, &actions, None, &mut output).await {
            Err(AppError::Wizard(WizardError::NoQuestion(WizardState::Disqualified))) => {}
            other => panic!("expected wizard error, got {other:?}"),
        }
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn replay_prints_final_screen_before_reporting_blank_email() {
        let gateway = InMemoryGateway::default();
        let mut console = console(gateway.clone());
        let actions = [
            ScriptedAction::Answer(Answer::Yes),
            ScriptedAction::Answer(Answer::Yes),
            ScriptedAction::Answer(Answer::No),
            ScriptedAction::Answer(Answer::No),
        ];
        let mut output = Vec::new();

        let result = run_replay(&mut console, &actions, Some("  ".to_string()), &mut output).await;

        assert!(matches!(
            result,
            Err(AppError::Wizard(WizardError::EmailRequired))
        ));
        assert!(gateway.requests().is_empty());
        let text = String::from_utf8(output).expect("utf8 output");
        assert!(text.contains("Good news! You're eligible for treatment."));
    }

    #[tokio::test]
    async fn replay_ignores_email_when_no_form_is_shown() {
        let gateway = InMemoryGateway::default();
        let mut console = console(gateway.clone());
        let mut output = Vec::new();

        run_replay(
            &mut console,
            &[ScriptedAction::Answer(Answer::Yes)],
            Some("early@example.com".to_string()),
            &mut output,
        )
        .await
        .expect("replay runs");

        assert_eq!(
            console.wizard().state(),
            WizardState::Step(Step::PriorTreatments)
        );
        assert!(gateway.requests().is_empty());
    }
}
