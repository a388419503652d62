//! Third-party email capture widgets.
//!
//! Screens ask for a widget declaratively through [`EmbedWidget`]; a [`WidgetLoader`] owned by
//! the host decides how the vendor script is mounted.

use std::collections::BTreeMap;

use serde::Serialize;
use url::Url;

use super::domain::Route;

pub const DEFAULT_MOUNT_POINT: &str = "embed-form";

/// Vendor script location plus the form identifier used for each route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedConfig {
    pub script_src: Url,
    pub mount_point: String,
    pub forms: BTreeMap<Route, String>,
}

impl EmbedConfig {
    pub fn new(script_src: Url) -> Self {
        Self {
            script_src,
            mount_point: DEFAULT_MOUNT_POINT.to_string(),
            forms: BTreeMap::new(),
        }
    }

    pub fn with_form(mut self, route: Route, form_id: impl Into<String>) -> Self {
        self.forms.insert(route, form_id.into());
        self
    }
}

/// Request to show the vendor form for one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedWidget {
    pub route: Route,
    pub form_id: String,
    pub script_src: String,
    pub mount_point: String,
}

/// Resolves which widget, if any, a terminal screen should load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbedCatalog {
    config: Option<EmbedConfig>,
}

impl EmbedCatalog {
    pub fn disabled() -> Self {
        Self { config: None }
    }

    pub fn new(config: EmbedConfig) -> Self {
        Self {
            config: Some(config),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_some()
    }

    pub fn widget_for(&self, route: Route) -> Option<EmbedWidget> {
        let config = self.config.as_ref()?;
        let form_id = config.forms.get(&route)?;

        let mut src = config.script_src.clone();
        src.query_pairs_mut().append_pair("form", form_id);

        Some(EmbedWidget {
            route,
            form_id: form_id.clone(),
            script_src: src.to_string(),
            mount_point: config.mount_point.clone(),
        })
    }
}

/// Widget placed into its mount point by a loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetMount {
    pub mount_point: String,
    pub markup: String,
}

#[derive(Debug, thiserror::Error)]
pub enum EmbedError {
    #[error("widget mount point must not be empty")]
    MissingMountPoint,
    #[error("widget form id must not be empty for route {0}")]
    MissingFormId(Route),
}

/// Boundary adapter that turns a widget request into something the host can display.
pub trait WidgetLoader: Send + Sync {
    fn load(&self, widget: &EmbedWidget) -> Result<WidgetMount, EmbedError>;
}

/// Renders the vendor `<script>` element for the widget's mount point.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptTagLoader;

impl WidgetLoader for ScriptTagLoader {
    fn load(&self, widget: &EmbedWidget) -> Result<WidgetMount, EmbedError> {
        if widget.mount_point.trim().is_empty() {
            return Err(EmbedError::MissingMountPoint);
        }
        if widget.form_id.trim().is_empty() {
            return Err(EmbedError::MissingFormId(widget.route));
        }

        let markup = format!(
            "<script src=\"{}\" data-form-id=\"{}\" data-route=\"{}\" async></script>",
            escape_attribute(&widget.script_src),
            escape_attribute(&widget.form_id),
            widget.route.label(),
        );

        Ok(WidgetMount {
            mount_point: widget.mount_point.clone(),
            markup,
        })
    }
}

fn escape_attribute(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}
