//! Timing and intake limits for the wizard.
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::timer::Millis;

const DEFAULT_WIZARD_DATA: &str = include_str!("../assets/wizard.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WizardConfig {
    #[serde(default)]
    pub transition: TransitionCfg,
    #[serde(default)]
    pub orientation: OrientationCfg,
    #[serde(default)]
    pub analysis: AnalysisCfg,
}

impl WizardConfig {
    /// Parse the embedded asset, falling back to compiled defaults.
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_WIZARD_DATA).unwrap_or_default()
    }

    /// Shared copy of the embedded configuration.
    #[must_use]
    pub fn default_config() -> &'static Self {
        static CONFIG: OnceLock<WizardConfig> = OnceLock::new();
        CONFIG.get_or_init(Self::load_from_static)
    }

    /// Parse a JSON override document; missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON for this shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Stage/sub-step hand-off choreography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionCfg {
    /// Delay before the displayed key swaps and the enter phase begins.
    #[serde(default = "default_exit_ms")]
    pub exit_ms: Millis,
    /// Delay, from the key change, until the orchestrator is idle again.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: Millis,
}

impl Default for TransitionCfg {
    fn default() -> Self {
        Self {
            exit_ms: default_exit_ms(),
            settle_ms: default_settle_ms(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrientationCfg {
    #[serde(default = "default_popup_ms")]
    pub popup_auto_dismiss_ms: Millis,
    #[serde(default = "default_debounce_ms")]
    pub location_debounce_ms: Millis,
}

impl Default for OrientationCfg {
    fn default() -> Self {
        Self {
            popup_auto_dismiss_ms: default_popup_ms(),
            location_debounce_ms: default_debounce_ms(),
        }
    }
}

/// Simulated resume analysis and upload limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisCfg {
    #[serde(default = "default_first_run_ms")]
    pub first_run_ms: Millis,
    #[serde(default = "default_retry_ms")]
    pub retry_ms: Millis,
    #[serde(default = "default_rotation_ms")]
    pub message_rotation_ms: Millis,
    #[serde(default = "default_retry_threshold")]
    pub retry_threshold_secs: u64,
    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: u64,
}

impl Default for AnalysisCfg {
    fn default() -> Self {
        Self {
            first_run_ms: default_first_run_ms(),
            retry_ms: default_retry_ms(),
            message_rotation_ms: default_rotation_ms(),
            retry_threshold_secs: default_retry_threshold(),
            max_upload_bytes: default_max_upload(),
        }
    }
}

const fn default_exit_ms() -> Millis {
    110
}

const fn default_settle_ms() -> Millis {
    320
}

const fn default_popup_ms() -> Millis {
    5_000
}

const fn default_debounce_ms() -> Millis {
    300
}

const fn default_first_run_ms() -> Millis {
    3_000
}

const fn default_retry_ms() -> Millis {
    2_000
}

const fn default_rotation_ms() -> Millis {
    2_000
}

const fn default_retry_threshold() -> u64 {
    15
}

const fn default_max_upload() -> u64 {
    5 * 1024 * 1024
}
