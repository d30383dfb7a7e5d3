//! Stage catalog: the fixed eight-stage pipeline and its sub-step tokens.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::WizardError;

/// Number of top-level stages in the assessment.
pub const TOTAL_STAGES: u8 = 8;

/// Identifier of a top-level stage, always in `1..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StageId(u8);

impl StageId {
    pub const ORIENTATION: Self = Self(1);
    pub const VALUES: Self = Self(2);
    pub const APTITUDES: Self = Self(3);
    pub const INTERESTS: Self = Self(4);
    pub const PREFERENCES: Self = Self(5);
    pub const REPORT: Self = Self(6);
    pub const PLAN_PREFERENCES: Self = Self(7);
    pub const ACTION_PLAN: Self = Self(8);

    pub const FIRST: Self = Self::ORIENTATION;
    pub const LAST: Self = Self::ACTION_PLAN;

    /// Build a stage id, returning `None` outside `1..=8`.
    #[must_use]
    pub const fn new(raw: u8) -> Option<Self> {
        if raw >= 1 && raw <= TOTAL_STAGES {
            Some(Self(raw))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_first(self) -> bool {
        self.0 == Self::FIRST.0
    }

    #[must_use]
    pub const fn is_last(self) -> bool {
        self.0 == Self::LAST.0
    }

    /// The following stage, or `None` at the end of the pipeline.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    /// The preceding stage, or `None` at the start of the pipeline.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        Self::new(self.0.saturating_sub(1))
    }

    /// Iterate every stage in pipeline order.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=TOTAL_STAGES).map(Self)
    }

    /// Static catalog entry for this stage.
    #[must_use]
    pub fn info(self) -> &'static StageInfo {
        &STAGES[usize::from(self.0 - 1)]
    }

    /// First sub-step token of the stage, used whenever a stage is (re)entered.
    #[must_use]
    pub fn initial_sub_step(self) -> &'static str {
        self.info().sub_steps.first().copied().unwrap_or("default")
    }
}

impl Default for StageId {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u8> for StageId {
    type Error = WizardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(WizardError::InvalidStage(value))
    }
}

impl From<StageId> for u8 {
    fn from(value: StageId) -> Self {
        value.0
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog entry describing one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageInfo {
    pub id: u8,
    pub label: &'static str,
    pub short_label: &'static str,
    pub sub_steps: &'static [&'static str],
}

pub const STAGES: [StageInfo; TOTAL_STAGES as usize] = [
    StageInfo {
        id: 1,
        label: "Orientation",
        short_label: "S1",
        sub_steps: &["welcome", "career_stage", "goals"],
    },
    StageInfo {
        id: 2,
        label: "Values",
        short_label: "S2",
        sub_steps: &[
            "category_selection",
            "refinement",
            "explanation",
            "likert_questions",
            "motivation",
        ],
    },
    StageInfo {
        id: 3,
        label: "Aptitudes",
        short_label: "S3",
        sub_steps: &["self_rating", "evidence", "confirmation"],
    },
    StageInfo {
        id: 4,
        label: "Interests",
        short_label: "S4",
        sub_steps: &["holland_codes", "exploration", "priorities"],
    },
    StageInfo {
        id: 5,
        label: "Preferences",
        short_label: "S5",
        sub_steps: &["work_style", "environment", "culture"],
    },
    StageInfo {
        id: 6,
        label: "Report",
        short_label: "S6",
        sub_steps: &["generating", "overview", "deep_dive"],
    },
    StageInfo {
        id: 7,
        label: "Plan Preferences",
        short_label: "S7",
        sub_steps: &["timeline", "constraints", "priorities"],
    },
    StageInfo {
        id: 8,
        label: "Action Plan",
        short_label: "S8",
        sub_steps: &["milestones", "resources", "commitment"],
    },
];
