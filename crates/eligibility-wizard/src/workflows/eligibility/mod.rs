//! Eligibility questionnaire: screening steps, terminal screens, and the outbound boundaries
//! used when an email address is captured.

pub mod content;
pub mod controller;
pub mod domain;
pub mod embed;
pub mod gateway;
pub(crate) mod rules;
pub mod view;

#[cfg(test)]
mod tests;

pub use content::{Link, SubmissionMessages, WizardContent};
pub use controller::{EligibilityWizard, PendingSubmission, SubmissionOutcome, WizardError};
pub use domain::{
    Answer, AnswerRecord, Direction, Progress, Question, Route, Step, WizardState,
};
pub use embed::{
    EmbedCatalog, EmbedConfig, EmbedError, EmbedWidget, ScriptTagLoader, WidgetLoader,
    WidgetMount,
};
pub use gateway::{
    DeliveryMode, GatewayConfig, GatewayError, PayloadShape, SubmissionGateway,
    SubmissionReceipt, SubmissionRequest, WebhookGateway,
};
pub use view::{ScreenView, StepRenderer, WizardAction, WizardView};
