//! Analytics event payloads.

use serde::{Deserialize, Serialize};

const TAG_SCRIPT_BASE: &str = "https://www.googletagmanager.com/gtag/js";

/// One tracked event, as handed to the site's tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub action: String,
    pub category: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

impl AnalyticsEvent {
    fn pwa(action: &str, label: &str) -> Self {
        Self { action: action.to_string(), category: "PWA".to_string(), label: label.to_string(), value: None }
    }

    pub fn install_prompt_shown() -> Self {
        Self::pwa("PWA Install Prompt", "Install Prompt Shown")
    }

    pub fn install_accepted() -> Self {
        Self::pwa("PWA Install Accepted", "Install Accepted")
    }

    pub fn install_dismissed() -> Self {
        Self::pwa("PWA Install Dismissed", "Install Dismissed")
    }

    /// Counted as one conversion.
    pub fn installed() -> Self {
        Self { value: Some(1), ..Self::pwa("PWA Installed", "PWA Installed") }
    }
}

/// Loader URL for the tag script of a measurement id.
pub fn tag_script_url(measurement_id: &str) -> String {
    let id: String = url::form_urlencoded::byte_serialize(measurement_id.as_bytes()).collect();
    format!("{TAG_SCRIPT_BASE}?id={id}")
}
