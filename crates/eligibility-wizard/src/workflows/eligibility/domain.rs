use std::fmt;

use serde::{Deserialize, Serialize};

/// Yes/no response to a screening question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub const fn as_bool(self) -> bool {
        matches!(self, Answer::Yes)
    }

    pub const fn from_bool(value: bool) -> Self {
        if value {
            Answer::Yes
        } else {
            Answer::No
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Answer::Yes => "Yes",
            Answer::No => "No",
        }
    }
}

/// Screening questions asked before the email capture step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Question {
    AgeOver18,
    OfferedTwoTreatments,
    PsychosisDiagnosis,
    PregnantOrBreastfeeding,
}

/// Linear steps of the questionnaire, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    AgeConfirmation,
    PriorTreatments,
    PsychosisHistory,
    PregnancyStatus,
    EmailCapture,
}

impl Step {
    pub const FIRST: Step = Step::AgeConfirmation;

    pub const ALL: [Step; 5] = [
        Step::AgeConfirmation,
        Step::PriorTreatments,
        Step::PsychosisHistory,
        Step::PregnancyStatus,
        Step::EmailCapture,
    ];

    pub const fn number(self) -> u8 {
        match self {
            Step::AgeConfirmation => 1,
            Step::PriorTreatments => 2,
            Step::PsychosisHistory => 3,
            Step::PregnancyStatus => 4,
            Step::EmailCapture => 5,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.number() == number)
    }

    /// Question asked on this step; the capture step has none.
    pub const fn question(self) -> Option<Question> {
        match self {
            Step::AgeConfirmation => Some(Question::AgeOver18),
            Step::PriorTreatments => Some(Question::OfferedTwoTreatments),
            Step::PsychosisHistory => Some(Question::PsychosisDiagnosis),
            Step::PregnancyStatus => Some(Question::PregnantOrBreastfeeding),
            Step::EmailCapture => None,
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }
}

/// Controller state. Terminal screens are separate variants so a step number
/// can never coexist with a terminal flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "step", rename_all = "snake_case")]
pub enum WizardState {
    Step(Step),
    Disqualified,
    Submitted,
}

impl WizardState {
    pub const fn initial() -> Self {
        WizardState::Step(Step::FIRST)
    }

    pub const fn step(self) -> Option<Step> {
        match self {
            WizardState::Step(step) => Some(step),
            WizardState::Disqualified | WizardState::Submitted => None,
        }
    }

    /// Route carried by a submission made from this state, if it has an email form.
    pub const fn submission_route(self) -> Option<Route> {
        match self {
            WizardState::Step(Step::EmailCapture) => Some(Route::Eligible),
            WizardState::Disqualified => Some(Route::Ineligible),
            _ => None,
        }
    }
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardState::Step(step) => write!(f, "step {}", step.number()),
            WizardState::Disqualified => f.write_str("disqualified"),
            WizardState::Submitted => f.write_str("submitted"),
        }
    }
}

/// Direction of the most recent navigation, used for screen transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

/// Label attached to a captured email so the receiver can segment leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Eligible,
    Ineligible,
}

impl Route {
    pub const fn label(self) -> &'static str {
        match self {
            Route::Eligible => "eligible",
            Route::Ineligible => "ineligible",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Flat record of everything the questionnaire collects in one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub age_confirmed: Option<bool>,
    pub offered_two_treatments: Option<bool>,
    pub psychosis: Option<bool>,
    pub pregnant: Option<bool>,
    #[serde(rename = "emailcapture")]
    pub email_capture: String,
}

impl AnswerRecord {
    pub fn get(&self, question: Question) -> Option<Answer> {
        self.slot(question).map(Answer::from_bool)
    }

    pub(crate) fn record(&mut self, question: Question, answer: Answer) {
        let value = Some(answer.as_bool());
        match question {
            Question::AgeOver18 => self.age_confirmed = value,
            Question::OfferedTwoTreatments => self.offered_two_treatments = value,
            Question::PsychosisDiagnosis => self.psychosis = value,
            Question::PregnantOrBreastfeeding => self.pregnant = value,
        }
    }

    /// True when nothing has been answered or typed yet.
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    pub fn answered(&self) -> usize {
        [
            self.age_confirmed,
            self.offered_two_treatments,
            self.psychosis,
            self.pregnant,
        ]
        .iter()
        .filter(|slot| slot.is_some())
        .count()
    }

    pub fn email(&self) -> &str {
        &self.email_capture
    }

    pub fn has_email(&self) -> bool {
        !self.email_capture.trim().is_empty()
    }

    fn slot(&self, question: Question) -> Option<bool> {
        match question {
            Question::AgeOver18 => self.age_confirmed,
            Question::OfferedTwoTreatments => self.offered_two_treatments,
            Question::PsychosisDiagnosis => self.psychosis,
            Question::PregnantOrBreastfeeding => self.pregnant,
        }
    }
}

/// Position shown by the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub current: u8,
    pub total: u8,
}

impl Progress {
    /// The bar has one slot more than the numbered steps; the last slot is the result screen.
    pub const TOTAL_SLOTS: u8 = 6;

    pub const fn for_step(step: Step) -> Self {
        Self {
            current: step.number(),
            total: Self::TOTAL_SLOTS,
        }
    }

    pub fn percent(self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((u16::from(self.current) * 100) / u16::from(self.total)) as u8
    }
}
