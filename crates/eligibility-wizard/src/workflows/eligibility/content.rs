use serde::Serialize;

use super::domain::Question;

pub const SUBMISSION_FAILED_MESSAGE: &str = "There was a problem submitting your email.";
pub const WELLNESS_LIST_CONFIRMATION: &str = "Thanks! You've been added to our wellness list.";

const CLINIC_URL: &str = "https://indra.clinic/";
const MEDICAL_QUESTIONNAIRE_URL: &str =
    "https://questionnaire.semble.io/ea1e3bdc75995ead08de93bc3b6adb61396a24c6";

/// Labelled outbound link shown on a screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

impl Link {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionCopy {
    pub question: Question,
    pub prompt: String,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailFormCopy {
    pub label: String,
    pub placeholder: String,
    pub submit_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmittedCopy {
    pub heading: String,
    pub body: String,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisqualifiedCopy {
    pub heading: String,
    pub body: Vec<String>,
    pub offers: Vec<Link>,
    pub email_form: EmailFormCopy,
    pub links: Vec<Link>,
    pub restart_label: String,
}

/// All user-facing text of the questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardContent {
    pub title: String,
    pub subtitle: String,
    pub back_label: String,
    pub questions: Vec<QuestionCopy>,
    pub eligible_heading: String,
    pub eligible_form: EmailFormCopy,
    pub submitted: SubmittedCopy,
    pub disqualified: DisqualifiedCopy,
}

impl WizardContent {
    pub fn standard() -> Self {
        Self {
            title: "Eligibility Questionnaire".to_string(),
            subtitle: "Let's find out if you're eligible.".to_string(),
            back_label: "Go Back".to_string(),
            questions: vec![
                QuestionCopy {
                    question: Question::AgeOver18,
                    prompt: "Are you over 18 years old?".to_string(),
                    hint: Some("You must be over 18 to qualify for treatment.".to_string()),
                },
                QuestionCopy {
                    question: Question::OfferedTwoTreatments,
                    prompt: "Have you been offered at least 2 different consultations/treatments for your condition?".to_string(),
                    hint: Some("If you've only had 1 consultation, select 'Yes'. We still recommend booking a consultation with us.".to_string()),
                },
                QuestionCopy {
                    question: Question::PsychosisDiagnosis,
                    prompt: "Have you ever been diagnosed with psychosis or schizophrenia?"
                        .to_string(),
                    hint: None,
                },
                QuestionCopy {
                    question: Question::PregnantOrBreastfeeding,
                    prompt: "Are you pregnant or breastfeeding?".to_string(),
                    hint: None,
                },
            ],
            eligible_heading: "Good news! You're eligible for treatment.".to_string(),
            eligible_form: EmailFormCopy {
                label: "Enter your email to continue:".to_string(),
                placeholder: "you@example.com".to_string(),
                submit_label: "Submit".to_string(),
            },
            submitted: SubmittedCopy {
                heading: "Thank you!".to_string(),
                body: "We've received your information and will follow up shortly.".to_string(),
                links: vec![
                    Link::new("Continue to Medical Questionnaire", MEDICAL_QUESTIONNAIRE_URL),
                    Link::new("Back to Indra Clinic", CLINIC_URL),
                ],
            },
            disqualified: DisqualifiedCopy {
                heading: "You're not eligible".to_string(),
                body: vec![
                    "Don't worry! You're eligible for Indra's full range of wellness services."
                        .to_string(),
                    "Explore options below. These can support sleep, stress, focus and overall wellbeing.".to_string(),
                ],
                offers: ["Hypnotherapy", "Counselling", "Sound Healing", "Functional Mushrooms", "Supplements"]
                    .into_iter()
                    .map(|title| Link::new(title, CLINIC_URL))
                    .collect(),
                email_form: EmailFormCopy {
                    label: "Get wellness updates & offers:".to_string(),
                    placeholder: "you@example.com".to_string(),
                    submit_label: "Submit".to_string(),
                },
                links: vec![Link::new("Back to Indra Clinic", CLINIC_URL)],
                restart_label: "Start questionnaire again".to_string(),
            },
        }
    }

    pub fn question(&self, question: Question) -> Option<&QuestionCopy> {
        self.questions.iter().find(|copy| copy.question == question)
    }
}

impl Default for WizardContent {
    fn default() -> Self {
        Self::standard()
    }
}

/// Messages the controller shows after a submission settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionMessages {
    pub failure: String,
    pub wellness_confirmation: String,
}

impl Default for SubmissionMessages {
    fn default() -> Self {
        Self {
            failure: SUBMISSION_FAILED_MESSAGE.to_string(),
            wellness_confirmation: WELLNESS_LIST_CONFIRMATION.to_string(),
        }
    }
}
