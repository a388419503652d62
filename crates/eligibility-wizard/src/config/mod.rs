use std::env;
use std::fmt;

use url::Url;

use crate::workflows::eligibility::embed::{EmbedConfig, DEFAULT_MOUNT_POINT};
use crate::workflows::eligibility::gateway::{
    DeliveryMode, GatewayConfig, PayloadShape, SPREADSHEET_WEBHOOK_URL,
};
use crate::workflows::eligibility::Route;

/// Distinguishes runtime behavior for different stages of the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub gateway: GatewayConfig,
    pub embed: Option<EmbedConfig>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            gateway: load_gateway()?,
            embed: load_embed()?,
        })
    }
}

fn load_gateway() -> Result<GatewayConfig, ConfigError> {
    let endpoint =
        env::var("WIZARD_WEBHOOK_URL").unwrap_or_else(|_| SPREADSHEET_WEBHOOK_URL.to_string());
    parse_http_url("WIZARD_WEBHOOK_URL", &endpoint)?;

    let delivery = match env::var("WIZARD_DELIVERY_MODE") {
        Ok(raw) => DeliveryMode::parse(&raw).ok_or(ConfigError::InvalidValue {
            key: "WIZARD_DELIVERY_MODE",
            value: raw,
        })?,
        Err(_) => DeliveryMode::Opaque,
    };

    let payload = match env::var("WIZARD_PAYLOAD") {
        Ok(raw) => PayloadShape::parse(&raw).ok_or(ConfigError::InvalidValue {
            key: "WIZARD_PAYLOAD",
            value: raw,
        })?,
        Err(_) => PayloadShape::EmailAndRoute,
    };

    let timeout_ms = env::var("WIZARD_TIMEOUT_MS")
        .unwrap_or_else(|_| GatewayConfig::DEFAULT_TIMEOUT_MS.to_string())
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidTimeout)?;

    Ok(GatewayConfig {
        endpoint,
        delivery,
        payload,
        timeout_ms,
    })
}

fn load_embed() -> Result<Option<EmbedConfig>, ConfigError> {
    let Ok(raw) = env::var("WIZARD_EMBED_SCRIPT_URL") else {
        return Ok(None);
    };
    let script_src = parse_http_url("WIZARD_EMBED_SCRIPT_URL", &raw)?;

    let mut config = EmbedConfig::new(script_src);
    config.mount_point =
        env::var("WIZARD_EMBED_MOUNT").unwrap_or_else(|_| DEFAULT_MOUNT_POINT.to_string());

    for (key, route) in [
        ("WIZARD_EMBED_ELIGIBLE_FORM", Route::Eligible),
        ("WIZARD_EMBED_INELIGIBLE_FORM", Route::Ineligible),
    ] {
        if let Ok(form_id) = env::var(key) {
            if !form_id.trim().is_empty() {
                config = config.with_form(route, form_id.trim());
            }
        }
    }

    Ok(Some(config))
}

fn parse_http_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl { key, source })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme {
            key,
            scheme: other.to_string(),
        }),
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidTimeout,
    InvalidValue {
        key: &'static str,
        value: String,
    },
    InvalidUrl {
        key: &'static str,
        source: url::ParseError,
    },
    UnsupportedScheme {
        key: &'static str,
        scheme: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTimeout => {
                write!(f, "WIZARD_TIMEOUT_MS must be a whole number of milliseconds")
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "{key} has unsupported value '{value}'")
            }
            ConfigError::InvalidUrl { key, .. } => write!(f, "{key} must be an absolute URL"),
            ConfigError::UnsupportedScheme { key, scheme } => {
                write!(f, "{key} must use http or https, not '{scheme}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidTimeout
            | ConfigError::InvalidValue { .. }
            | ConfigError::UnsupportedScheme { .. } => None,
            ConfigError::InvalidUrl { source, .. } => Some(source),
        }
    }
}
