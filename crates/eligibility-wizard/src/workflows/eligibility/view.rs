use serde::Serialize;

use super::content::{Link, WizardContent};
use super::controller::EligibilityWizard;
use super::domain::{Answer, Direction, Progress, Route, Step, WizardState};
use super::embed::{EmbedCatalog, EmbedWidget};

/// Action a screen offers to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardAction {
    AnswerYes,
    AnswerNo,
    Back,
    EditEmail,
    Submit,
    Restart,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub step: u8,
    pub progress: Progress,
    pub progress_percent: u8,
    pub prompt: String,
    pub hint: Option<String>,
    pub previous_answer: Option<Answer>,
    pub actions: Vec<WizardAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailFormView {
    pub label: String,
    pub placeholder: String,
    pub submit_label: String,
    pub email: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailCaptureView {
    pub step: u8,
    pub progress: Progress,
    pub progress_percent: u8,
    pub heading: String,
    pub form: EmailFormView,
    pub actions: Vec<WizardAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisqualifiedView {
    pub heading: String,
    pub body: Vec<String>,
    pub form: EmailFormView,
    pub notice: Option<String>,
    pub offers: Vec<Link>,
    pub links: Vec<Link>,
    pub restart_label: String,
    pub widget: Option<EmbedWidget>,
    pub actions: Vec<WizardAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmittedView {
    pub heading: String,
    pub body: String,
    pub links: Vec<Link>,
    pub widget: Option<EmbedWidget>,
}

/// Everything needed to draw the current screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum WizardView {
    Question(QuestionView),
    EmailCapture(EmailCaptureView),
    Disqualified(DisqualifiedView),
    Submitted(SubmittedView),
}

/// Envelope with the shared page chrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenView {
    pub title: String,
    pub subtitle: String,
    pub back_label: String,
    pub direction: Direction,
    pub view: WizardView,
}

/// Maps controller state onto display content. Holds no state of its own.
#[derive(Debug, Clone, Default)]
pub struct StepRenderer {
    content: WizardContent,
    embeds: EmbedCatalog,
}

impl StepRenderer {
    pub fn new(content: WizardContent, embeds: EmbedCatalog) -> Self {
        Self { content, embeds }
    }

    pub fn screen(&self, wizard: &EligibilityWizard) -> ScreenView {
        ScreenView {
            title: self.content.title.clone(),
            subtitle: self.content.subtitle.clone(),
            back_label: self.content.back_label.clone(),
            direction: wizard.direction(),
            view: self.render(wizard),
        }
    }

    pub fn render(&self, wizard: &EligibilityWizard) -> WizardView {
        match wizard.state() {
            WizardState::Step(Step::EmailCapture) => {
                WizardView::EmailCapture(self.email_capture(wizard))
            }
            WizardState::Step(step) => WizardView::Question(self.question(wizard, step)),
            WizardState::Disqualified => WizardView::Disqualified(self.disqualified(wizard)),
            WizardState::Submitted => WizardView::Submitted(self.submitted()),
        }
    }

    fn question(&self, wizard: &EligibilityWizard, step: Step) -> QuestionView {
        let progress = Progress::for_step(step);
        let question = step.question();
        let copy = question.and_then(|question| self.content.question(question));

        let mut actions = vec![WizardAction::AnswerYes, WizardAction::AnswerNo];
        if wizard.can_go_back() {
            actions.push(WizardAction::Back);
        }

        QuestionView {
            step: step.number(),
            progress,
            progress_percent: progress.percent(),
            prompt: copy.map(|copy| copy.prompt.clone()).unwrap_or_default(),
            hint: copy.and_then(|copy| copy.hint.clone()),
            previous_answer: question.and_then(|question| wizard.answers().get(question)),
            actions,
        }
    }

    fn email_capture(&self, wizard: &EligibilityWizard) -> EmailCaptureView {
        let step = Step::EmailCapture;
        let progress = Progress::for_step(step);
        let form = &self.content.eligible_form;

        EmailCaptureView {
            step: step.number(),
            progress,
            progress_percent: progress.percent(),
            heading: self.content.eligible_heading.clone(),
            form: EmailFormView {
                label: form.label.clone(),
                placeholder: form.placeholder.clone(),
                submit_label: form.submit_label.clone(),
                email: wizard.answers().email().to_string(),
                error: wizard.error().map(str::to_string),
            },
            actions: vec![
                WizardAction::EditEmail,
                WizardAction::Submit,
                WizardAction::Back,
            ],
        }
    }

    fn disqualified(&self, wizard: &EligibilityWizard) -> DisqualifiedView {
        let copy = &self.content.disqualified;

        DisqualifiedView {
            heading: copy.heading.clone(),
            body: copy.body.clone(),
            form: EmailFormView {
                label: copy.email_form.label.clone(),
                placeholder: copy.email_form.placeholder.clone(),
                submit_label: copy.email_form.submit_label.clone(),
                email: wizard.answers().email().to_string(),
                error: wizard.error().map(str::to_string),
            },
            notice: wizard.notice().map(str::to_string),
            offers: copy.offers.clone(),
            links: copy.links.clone(),
            restart_label: copy.restart_label.clone(),
            widget: self.embeds.widget_for(Route::Ineligible),
            actions: vec![
                WizardAction::EditEmail,
                WizardAction::Submit,
                WizardAction::Restart,
            ],
        }
    }

    fn submitted(&self) -> SubmittedView {
        let copy = &self.content.submitted;
        SubmittedView {
            heading: copy.heading.clone(),
            body: copy.body.clone(),
            links: copy.links.clone(),
            widget: self.embeds.widget_for(Route::Eligible),
        }
    }
}
