use async_trait::async_trait;
use eligibility_wizard::config::AppConfig;
use eligibility_wizard::error::AppError;
use eligibility_wizard::workflows::eligibility::{
    Answer, EmbedCatalog, GatewayConfig, GatewayError, StepRenderer, SubmissionGateway,
    SubmissionReceipt, SubmissionRequest, WebhookGateway, WizardContent,
};
use std::sync::{Arc, Mutex};
use tracing::info;

/// Gateway used by `--dry-run`: accepts everything and keeps the requests.
#[derive(Default, Clone)]
pub(crate) struct InMemoryGateway {
    requests: Arc<Mutex<Vec<SubmissionRequest>>>,
}

impl InMemoryGateway {
    #[cfg(test)]
    pub(crate) fn requests(&self) -> Vec<SubmissionRequest> {
        self.requests.lock().expect("gateway mutex poisoned").clone()
    }
}

#[async_trait]
impl SubmissionGateway for InMemoryGateway {
    async fn submit(
        &self,
        request: &SubmissionRequest,
    ) -> Result<SubmissionReceipt, GatewayError> {
        let mut guard = self.requests.lock().expect("gateway mutex poisoned");
        guard.push(request.clone());
        info!(route = %request.route, "dry run submission kept in memory");
        Ok(SubmissionReceipt::new(request.route, None))
    }
}

pub(crate) fn build_gateway(
    config: &GatewayConfig,
    dry_run: bool,
) -> Result<Arc<dyn SubmissionGateway>, AppError> {
    if dry_run {
        return Ok(Arc::new(InMemoryGateway::default()));
    }
    Ok(Arc::new(WebhookGateway::new(config.clone())?))
}

pub(crate) fn build_renderer(config: &AppConfig) -> StepRenderer {
    let embeds = match &config.embed {
        Some(embed) => EmbedCatalog::new(embed.clone()),
        None => EmbedCatalog::disabled(),
    };
    StepRenderer::new(WizardContent::standard(), embeds)
}

/// One step of a replayed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScriptedAction {
    Answer(Answer),
    Back,
    Restart,
}

pub(crate) fn parse_action(raw: &str) -> Result<ScriptedAction, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(ScriptedAction::Answer(Answer::Yes)),
        "n" | "no" => Ok(ScriptedAction::Answer(Answer::No)),
        "b" | "back" => Ok(ScriptedAction::Back),
        "r" | "restart" => Ok(ScriptedAction::Restart),
        other => Err(format!(
            "unknown action '{other}' (expected yes, no, back or restart)"
        )),
    }
}
