//! "Add to home screen" popup workflow.
//!
//! The browser offers an install prompt once per page load. The site defers
//! it, shows its own popup, and only triggers the native prompt when the
//! visitor clicks install. Once the app is installed the popup never shows
//! again; that flag survives restarts in the `preferences` table.
//!
//! [`InstallPrompt::handle`] is pure: it returns the effects the page must
//! carry out instead of performing them.

use serde::{Deserialize, Serialize};

use super::analytics::AnalyticsEvent;
use crate::{CacheDb, Error};

/// Preference key holding the installed flag.
pub const INSTALLED_KEY: &str = "pwa_installed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptState {
    /// Popup not on screen.
    Hidden,
    /// Popup on screen, native prompt stashed.
    Visible,
    /// Native prompt open, waiting for the visitor's choice.
    Prompting,
    /// App already installed; nothing is shown any more.
    Suppressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallChoice {
    Accepted,
    Dismissed,
}

/// Browser events and clicks fed into the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptInput {
    BeforeInstallPrompt,
    InstallClicked,
    UserChoice(InstallChoice),
    CloseClicked,
    AppInstalled,
}

/// What the page has to do in response to an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEffect {
    ShowPopup,
    HidePopup,
    ShowNativePrompt,
    PersistInstalled,
    Track(AnalyticsEvent),
}

#[derive(Debug, Clone)]
pub struct InstallPrompt {
    state: PromptState,
    deferred: bool,
}

impl InstallPrompt {
    pub fn new(installed: bool) -> Self {
        let state = if installed { PromptState::Suppressed } else { PromptState::Hidden };
        Self { state, deferred: false }
    }

    /// Build the workflow from the persisted installed flag.
    pub async fn load(db: &CacheDb) -> Result<Self, Error> {
        let installed = db.get_preference(INSTALLED_KEY).await?.as_deref() == Some("true");
        Ok(Self::new(installed))
    }

    /// Persist the installed flag, as asked for by [`PromptEffect::PersistInstalled`].
    pub async fn persist_installed(db: &CacheDb) -> Result<(), Error> {
        db.set_preference(INSTALLED_KEY, "true").await
    }

    pub fn state(&self) -> PromptState {
        self.state
    }

    /// Whether a native prompt is stashed and can be shown.
    pub fn has_deferred_prompt(&self) -> bool {
        self.deferred
    }

    pub fn handle(&mut self, input: PromptInput) -> Vec<PromptEffect> {
        if self.state == PromptState::Suppressed {
            return Vec::new();
        }

        match input {
            PromptInput::BeforeInstallPrompt => {
                self.deferred = true;
                self.state = PromptState::Visible;
                vec![PromptEffect::ShowPopup, PromptEffect::Track(AnalyticsEvent::install_prompt_shown())]
            }
            PromptInput::InstallClicked if self.deferred => {
                self.state = PromptState::Prompting;
                vec![PromptEffect::ShowNativePrompt]
            }
            PromptInput::InstallClicked => Vec::new(),
            PromptInput::UserChoice(choice) if self.state == PromptState::Prompting => {
                // A native prompt can only be used once.
                self.deferred = false;
                self.state = PromptState::Hidden;
                let event = match choice {
                    InstallChoice::Accepted => AnalyticsEvent::install_accepted(),
                    InstallChoice::Dismissed => AnalyticsEvent::install_dismissed(),
                };
                tracing::debug!(?choice, "install prompt answered");
                vec![PromptEffect::Track(event), PromptEffect::HidePopup]
            }
            PromptInput::UserChoice(_) => Vec::new(),
            PromptInput::CloseClicked => {
                self.state = PromptState::Hidden;
                vec![PromptEffect::HidePopup]
            }
            PromptInput::AppInstalled => {
                self.deferred = false;
                self.state = PromptState::Suppressed;
                vec![
                    PromptEffect::PersistInstalled,
                    PromptEffect::HidePopup,
                    PromptEffect::Track(AnalyticsEvent::installed()),
                ]
            }
        }
    }
}
