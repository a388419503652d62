use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::{
    DeliveryMode, GatewayError, PayloadShape, SubmissionGateway, SubmissionReceipt,
    SubmissionRequest,
};

/// Spreadsheet-backed webhook the questionnaire posts to by default.
pub const SPREADSHEET_WEBHOOK_URL: &str = "https://script.google.com/macros/s/AKfycbzq_FZ5akGKf7y__sr52TOPbH7MzwwFq7HXEn9wjL3nZs24h7gVIbXhDQnBj3e4G2b8ug/exec";

/// Settings for [`WebhookGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub endpoint: String,
    pub delivery: DeliveryMode,
    pub payload: PayloadShape,
    pub timeout_ms: u64,
}

impl GatewayConfig {
    pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

    /// Email and route posted without inspecting the response.
    pub fn spreadsheet_webhook(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            delivery: DeliveryMode::Opaque,
            payload: PayloadShape::EmailAndRoute,
            timeout_ms: Self::DEFAULT_TIMEOUT_MS,
        }
    }

    /// Full answer record posted to an endpoint whose status is checked.
    pub fn placeholder_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            delivery: DeliveryMode::Inspected,
            payload: PayloadShape::AnswerRecord,
            timeout_ms: Self::DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn endpoint_url(&self) -> Result<Url, GatewayError> {
        let url = Url::parse(self.endpoint.trim()).map_err(|err| GatewayError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason: err.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(GatewayError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                reason: format!("unsupported scheme '{other}'"),
            }),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::spreadsheet_webhook(SPREADSHEET_WEBHOOK_URL)
    }
}

/// Posts submissions as JSON to a fixed endpoint.
pub struct WebhookGateway {
    client: Client,
    endpoint: Url,
    config: GatewayConfig,
}

impl std::fmt::Debug for WebhookGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookGateway")
            .field("endpoint", &self.endpoint.as_str())
            .field("delivery", &self.config.delivery)
            .field("payload", &self.config.payload)
            .field("timeout_ms", &self.config.timeout_ms)
            .finish()
    }
}

impl WebhookGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let endpoint = config.endpoint_url()?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(format!("eligibility-wizard/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| GatewayError::Client(err.to_string()))?;

        debug!(endpoint = %endpoint, delivery = ?config.delivery, "webhook gateway ready");

        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Request body for the configured payload shape.
    pub fn payload(&self, request: &SubmissionRequest) -> Value {
        build_payload(self.config.payload, request)
    }
}

pub(crate) fn build_payload(shape: PayloadShape, request: &SubmissionRequest) -> Value {
    match shape {
        PayloadShape::EmailAndRoute => json!({
            "email": request.email,
            "route": request.route.label(),
        }),
        PayloadShape::AnswerRecord => {
            let mut body = serde_json::to_value(&request.answers).unwrap_or_else(|_| json!({}));
            if let Value::Object(map) = &mut body {
                map.insert("emailcapture".to_string(), json!(request.email));
                map.insert("route".to_string(), json!(request.route.label()));
            }
            body
        }
    }
}

#[async_trait]
impl SubmissionGateway for WebhookGateway {
    async fn submit(
        &self,
        request: &SubmissionRequest,
    ) -> Result<SubmissionReceipt, GatewayError> {
        let body = self.payload(request);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                warn!(route = %request.route, error = %err, "submission transport failed");
                GatewayError::Transport(err.to_string())
            })?;

        let status = response.status();
        match self.config.delivery {
            DeliveryMode::Opaque => {
                info!(route = %request.route, "submission dispatched");
                Ok(SubmissionReceipt::new(request.route, None))
            }
            DeliveryMode::Inspected if status.is_success() => {
                info!(route = %request.route, status = status.as_u16(), "submission accepted");
                Ok(SubmissionReceipt::new(request.route, Some(status.as_u16())))
            }
            DeliveryMode::Inspected => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                warn!(route = %request.route, status = status.as_u16(), "submission rejected");
                Err(GatewayError::Rejected {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}
