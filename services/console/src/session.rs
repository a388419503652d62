use crate::render::render_text;
use eligibility_wizard::error::AppError;
use eligibility_wizard::workflows::eligibility::{
    Answer, EligibilityWizard, ScriptTagLoader, StepRenderer, SubmissionGateway,
    SubmissionOutcome, WizardState,
};
use std::io::{BufRead, Write};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Terminal host for one questionnaire session.
pub(crate) struct Console {
    wizard: EligibilityWizard,
    renderer: StepRenderer,
    gateway: Arc<dyn SubmissionGateway>,
    loader: ScriptTagLoader,
    format: OutputFormat,
}

/// Line typed by the user, interpreted against the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConsoleInput {
    Answer(Answer),
    Back,
    Restart,
    Quit,
    Submit,
    Email(String),
    Unknown,
}

pub(crate) fn parse_input(line: &str, state: WizardState) -> ConsoleInput {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => return ConsoleInput::Quit,
        "b" | "back" => return ConsoleInput::Back,
        "r" | "restart" => return ConsoleInput::Restart,
        _ => {}
    }

    if state.submission_route().is_some() {
        return if trimmed.is_empty() {
            ConsoleInput::Submit
        } else {
            ConsoleInput::Email(trimmed.to_string())
        };
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "y" | "yes" => ConsoleInput::Answer(Answer::Yes),
        "n" | "no" => ConsoleInput::Answer(Answer::No),
        _ => ConsoleInput::Unknown,
    }
}

impl Console {
    pub(crate) fn new(
        renderer: StepRenderer,
        gateway: Arc<dyn SubmissionGateway>,
        format: OutputFormat,
    ) -> Self {
        Self {
            wizard: EligibilityWizard::new(),
            renderer,
            gateway,
            loader: ScriptTagLoader,
            format,
        }
    }

    pub(crate) fn wizard(&self) -> &EligibilityWizard {
        &self.wizard
    }

    pub(crate) fn wizard_mut(&mut self) -> &mut EligibilityWizard {
        &mut self.wizard
    }

    pub(crate) fn show<W: Write>(&self, output: &mut W) -> Result<(), AppError> {
        let screen = self.renderer.screen(&self.wizard);
        match self.format {
            OutputFormat::Text => {
                writeln!(output, "{}", render_text(&screen, &self.loader))?;
            }
            OutputFormat::Json => {
                let json = serde_json::to_string(&screen).map_err(std::io::Error::from)?;
                writeln!(output, "{json}")?;
            }
        }
        Ok(())
    }

    /// Submit the current email form and report the outcome line.
    pub(crate) async fn submit<W: Write>(
        &mut self,
        output: &mut W,
    ) -> Result<SubmissionOutcome, AppError> {
        let outcome = self.wizard.submit(&self.gateway).await?;
        if let SubmissionOutcome::Stale(receipt) = &outcome {
            writeln!(output, "(late {} submission ignored)", receipt.route)?;
        }
        Ok(outcome)
    }

    async fn apply<W: Write>(
        &mut self,
        input: ConsoleInput,
        output: &mut W,
    ) -> Result<(), AppError> {
        match input {
            ConsoleInput::Answer(answer) => {
                self.wizard.answer(answer)?;
            }
            ConsoleInput::Back => {
                self.wizard.back()?;
            }
            ConsoleInput::Restart => {
                self.wizard.restart()?;
            }
            ConsoleInput::Email(email) => {
                self.wizard.set_email(email)?;
                self.submit(output).await?;
            }
            ConsoleInput::Submit => {
                self.submit(output).await?;
            }
            ConsoleInput::Unknown => writeln!(output, "Please answer y or n.")?,
            ConsoleInput::Quit => {}
        }
        Ok(())
    }

    /// Interactive loop until the user quits, input ends, or the questionnaire is submitted.
    pub(crate) async fn run<R, W>(&mut self, input: R, output: &mut W) -> Result<(), AppError>
    where
        R: BufRead,
        W: Write,
    {
        let mut lines = input.lines();
        loop {
            self.show(output)?;
            if self.wizard.state() == WizardState::Submitted {
                return Ok(());
            }
            write!(output, "> ")?;
            output.flush()?;

            let Some(line) = lines.next().transpose()? else {
                return Ok(());
            };

            let input = parse_input(&line, self.wizard.state());
            if input == ConsoleInput::Quit {
                return Ok(());
            }

            match self.apply(input, output).await {
                Ok(()) => {}
                Err(AppError::Wizard(err)) => writeln!(output, "! {err}")?,
                Err(other) => return Err(other),
            }
        }
    }
}
