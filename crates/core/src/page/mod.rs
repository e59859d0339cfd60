//! Page-side helpers for the static site.
//!
//! None of these touch the offline cache manager. They hold the logic of the
//! site's own scripts so it can be tested away from a browser:
//!
//! - [`search`]: the list filter behind the search bar
//! - [`install_prompt`]: the "add to home screen" popup workflow
//! - [`analytics`]: event payloads and the tag loader URL

pub mod analytics;
pub mod install_prompt;
pub mod search;

pub use analytics::{AnalyticsEvent, tag_script_url};
pub use install_prompt::{InstallChoice, InstallPrompt, PromptEffect, PromptInput, PromptState};
pub use search::{Visibility, filter_visibility};
