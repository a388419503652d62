//! Outbound delivery of captured emails.
//!
//! The controller hands a [`SubmissionRequest`] to whichever [`SubmissionGateway`] the host
//! wires in. Delivery is best effort: there is no retry, no idempotency key, and a user who
//! submits twice produces two external records.

mod webhook;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AnswerRecord, Route};

pub use webhook::{GatewayConfig, WebhookGateway, SPREADSHEET_WEBHOOK_URL};

/// Everything a gateway may need to forward one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRequest {
    pub route: Route,
    pub email: String,
    pub answers: AnswerRecord,
}

/// Proof of a settled request. `status` is `None` when the delivery mode does not inspect responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub route: Route,
    pub delivered_at: DateTime<Utc>,
    pub status: Option<u16>,
}

impl SubmissionReceipt {
    pub fn new(route: Route, status: Option<u16>) -> Self {
        Self {
            route,
            delivered_at: Utc::now(),
            status,
        }
    }
}

/// JSON body sent to the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadShape {
    /// `{"email": .., "route": ..}`
    EmailAndRoute,
    /// The whole answer record plus `route`.
    AnswerRecord,
}

impl PayloadShape {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "email_and_route" | "email" => Some(Self::EmailAndRoute),
            "answer_record" | "record" | "full" => Some(Self::AnswerRecord),
            _ => None,
        }
    }
}

/// How much of the response the gateway looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    /// Any response counts as delivered; only transport failures are errors.
    Opaque,
    /// Non-success statuses are reported as [`GatewayError::Rejected`].
    Inspected,
}

impl DeliveryMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "opaque" | "no-cors" | "no_cors" => Some(Self::Opaque),
            "inspected" | "cors" => Some(Self::Inspected),
            _ => None,
        }
    }
}

/// Async seam so the controller can be exercised without a network.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn submit(&self, request: &SubmissionRequest)
        -> Result<SubmissionReceipt, GatewayError>;
}

#[async_trait]
impl<G> SubmissionGateway for std::sync::Arc<G>
where
    G: SubmissionGateway + ?Sized,
{
    async fn submit(
        &self,
        request: &SubmissionRequest,
    ) -> Result<SubmissionReceipt, GatewayError> {
        (**self).submit(request).await
    }
}

#[async_trait]
impl<G> SubmissionGateway for Box<G>
where
    G: SubmissionGateway + ?Sized,
{
    async fn submit(
        &self,
        request: &SubmissionRequest,
    ) -> Result<SubmissionReceipt, GatewayError> {
        (**self).submit(request).await
    }
}

/// Delivery failure raised by a gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("invalid submission endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("unable to build http client: {0}")]
    Client(String),
    #[error("submission transport failed: {0}")]
    Transport(String),
    #[error("submission rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}
