use super::domain::{Answer, Question, Step};

/// Screening rule for one step: which answer ends the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreeningRule {
    pub step: Step,
    pub question: Question,
    pub disqualifying_answer: Answer,
}

/// Result of applying an answer to a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next(Step),
    Disqualify,
}

pub(crate) const SCREENING_RULES: [ScreeningRule; 4] = [
    ScreeningRule {
        step: Step::AgeConfirmation,
        question: Question::AgeOver18,
        disqualifying_answer: Answer::No,
    },
    ScreeningRule {
        step: Step::PriorTreatments,
        question: Question::OfferedTwoTreatments,
        disqualifying_answer: Answer::No,
    },
    ScreeningRule {
        step: Step::PsychosisHistory,
        question: Question::PsychosisDiagnosis,
        disqualifying_answer: Answer::Yes,
    },
    ScreeningRule {
        step: Step::PregnancyStatus,
        question: Question::PregnantOrBreastfeeding,
        disqualifying_answer: Answer::Yes,
    },
];

pub fn rule_for(step: Step) -> Option<&'static ScreeningRule> {
    SCREENING_RULES.iter().find(|rule| rule.step == step)
}

impl ScreeningRule {
    pub fn disqualifies(&self, answer: Answer) -> bool {
        answer == self.disqualifying_answer
    }

    pub fn apply(&self, answer: Answer) -> Advance {
        if self.disqualifies(answer) {
            return Advance::Disqualify;
        }
        // Screening steps all precede the capture step.
        Advance::Next(self.step.next().unwrap_or(Step::EmailCapture))
    }
}
