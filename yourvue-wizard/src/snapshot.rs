//! Everything a host needs to render one frame of the wizard.
use serde::Serialize;

use crate::aptitudes::AptitudesView;
use crate::orientation::OrientationView;
use crate::shell::ShellView;
use crate::stage::StageId;
use crate::timer::Millis;
use crate::transition::TransitionPhase;
use crate::values::ValuesView;

/// Content of the mounted stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageView {
    Orientation(OrientationView),
    Values(ValuesView),
    Aptitudes(Box<AptitudesView>),
    /// Stages without built content; the host may mark them valid.
    Placeholder {
        stage: StageId,
        label: &'static str,
        valid: bool,
    },
}

impl StageView {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Orientation(_) => "orientation",
            Self::Values(_) => "values",
            Self::Aptitudes(_) => "aptitudes",
            Self::Placeholder { .. } => "placeholder",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionView<K> {
    pub displayed: K,
    pub phase: TransitionPhase,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub stage: StageId,
    pub sub_step: String,
    pub completed_stages: Vec<StageId>,
    pub has_unsaved_changes: bool,
    pub shell: ShellView,
    pub stage_transition: TransitionView<StageId>,
    pub content_transition: TransitionView<String>,
    pub view: StageView,
    pub next_deadline: Option<Millis>,
}

impl SessionSnapshot {
    /// JSON for hosts that render outside Rust.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
