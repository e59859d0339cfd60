//! Lifecycle states of the offline cache manager.

use serde::{Deserialize, Serialize};

/// Where the manager is in its install/activate lifecycle.
///
/// `Idle → Installing → Installed → Activating → Active`. A failed phase
/// falls back to the state it started from, and a re-install that started
/// from `Active` ends there again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WorkerState {
    #[default]
    Idle,
    Installing,
    Installed,
    Activating,
    Active,
}

impl WorkerState {
    /// Only an active manager answers fetches.
    pub fn can_intercept_fetch(&self) -> bool {
        matches!(self, WorkerState::Active)
    }

    /// States from which an install may start.
    pub fn can_install(&self) -> bool {
        matches!(self, WorkerState::Idle | WorkerState::Installed | WorkerState::Active)
    }

    /// Activation needs a completed install.
    pub fn can_activate(&self) -> bool {
        matches!(self, WorkerState::Installed)
    }
}

impl std::fmt::Display for WorkerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerState::Idle => write!(f, "idle"),
            WorkerState::Installing => write!(f, "installing"),
            WorkerState::Installed => write!(f, "installed"),
            WorkerState::Activating => write!(f, "activating"),
            WorkerState::Active => write!(f, "active"),
        }
    }
}
