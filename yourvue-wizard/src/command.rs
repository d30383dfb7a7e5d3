//! Every user interaction the host can forward, and what became of it.
use serde::{Deserialize, Serialize};

use crate::aptitudes::{EntryField, EntrySection, FileDescriptor, ResumeMode, ScenarioAnswer, TagSection};
use crate::likert::LikertScore;
use crate::orientation::{CareerStage, ListKey};
use crate::stage::StageId;
use crate::values::{CareerMotivation, CoreValue};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    // Shell
    ClickStage { stage: StageId },
    Continue,
    Back,
    RequestExit,
    Stay,
    Leave,
    MarkStageValid { valid: bool },
    SetLoading { loading: bool },
    Reset,

    // Stage 1
    SelectCareerStage { stage: CareerStage },
    ContinueFromOverview,
    BackToOverview,
    TypeLocation { text: String },
    PickLocation { location: String },
    FocusLocation,
    DismissSuggestions,
    LocationKey { key: ListKey },
    ContinueFromLocation,
    SkipLocation,
    PopupInteract,
    StartNow,
    MaybeLater,

    // Stage 2
    ToggleValue { category: String, value: String },
    ToggleCoreValue { value: CoreValue },
    SetExplanation { text: String },
    AnswerValuesLikert { question: String, score: LikertScore },
    ChooseMotivation { motivation: CareerMotivation },
    ValuesContinue,
    ValuesBack,

    // Stage 3
    SetResumeMode { mode: ResumeMode },
    SetPastedText { text: String },
    ChooseFile { file: FileDescriptor },
    RemoveFile,
    SetConsent { consented: bool },
    Analyze,
    RetryAnalysis,
    ToggleSectionEdit { section: EntrySection },
    UpdateEntry { section: EntrySection, id: String, field: EntryField },
    AddEntry { section: EntrySection },
    DeleteEntry { section: EntrySection, id: String },
    AddTag { section: TagSection, text: String },
    RemoveTag { section: TagSection, text: String },
    AnswerAptitudeLikert { question: String, score: LikertScore },
    AnswerScenario { scenario: String, answer: ScenarioAnswer },
    AptitudesContinue,
    AptitudesBack,
}

impl Command {
    /// Short name for logs and reports.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ClickStage { .. } => "click_stage",
            Self::Continue => "continue",
            Self::Back => "back",
            Self::RequestExit => "request_exit",
            Self::Stay => "stay",
            Self::Leave => "leave",
            Self::MarkStageValid { .. } => "mark_stage_valid",
            Self::SetLoading { .. } => "set_loading",
            Self::Reset => "reset",
            Self::SelectCareerStage { .. } => "select_career_stage",
            Self::ContinueFromOverview => "continue_from_overview",
            Self::BackToOverview => "back_to_overview",
            Self::TypeLocation { .. } => "type_location",
            Self::PickLocation { .. } => "pick_location",
            Self::FocusLocation => "focus_location",
            Self::DismissSuggestions => "dismiss_suggestions",
            Self::LocationKey { .. } => "location_key",
            Self::ContinueFromLocation => "continue_from_location",
            Self::SkipLocation => "skip_location",
            Self::PopupInteract => "popup_interact",
            Self::StartNow => "start_now",
            Self::MaybeLater => "maybe_later",
            Self::ToggleValue { .. } => "toggle_value",
            Self::ToggleCoreValue { .. } => "toggle_core_value",
            Self::SetExplanation { .. } => "set_explanation",
            Self::AnswerValuesLikert { .. } => "answer_values_likert",
            Self::ChooseMotivation { .. } => "choose_motivation",
            Self::ValuesContinue => "values_continue",
            Self::ValuesBack => "values_back",
            Self::SetResumeMode { .. } => "set_resume_mode",
            Self::SetPastedText { .. } => "set_pasted_text",
            Self::ChooseFile { .. } => "choose_file",
            Self::RemoveFile => "remove_file",
            Self::SetConsent { .. } => "set_consent",
            Self::Analyze => "analyze",
            Self::RetryAnalysis => "retry_analysis",
            Self::ToggleSectionEdit { .. } => "toggle_section_edit",
            Self::UpdateEntry { .. } => "update_entry",
            Self::AddEntry { .. } => "add_entry",
            Self::DeleteEntry { .. } => "delete_entry",
            Self::AddTag { .. } => "add_tag",
            Self::RemoveTag { .. } => "remove_tag",
            Self::AnswerAptitudeLikert { .. } => "answer_aptitude_likert",
            Self::AnswerScenario { .. } => "answer_scenario",
            Self::AptitudesContinue => "aptitudes_continue",
            Self::AptitudesBack => "aptitudes_back",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    Applied,
    Rejected(String),
    /// The user confirmed leaving; the host should navigate away.
    Exited,
}

impl Outcome {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_use_a_type_tag() {
        let cmd: Command =
            serde_json::from_str(r#"{"type":"select_career_stage","stage":"EXPLORER"}"#).unwrap();
        assert_eq!(
            cmd,
            Command::SelectCareerStage {
                stage: CareerStage::Explorer
            }
        );
        assert_eq!(cmd.name(), "select_career_stage");
        let unit: Command = serde_json::from_str(r#"{"type":"continue"}"#).unwrap();
        assert_eq!(unit, Command::Continue);
    }

    #[test]
    fn entry_updates_nest_the_field() {
        let json = r#"{"type":"update_entry","section":"education","id":"e1","field":{"field":"year","value":"2021"}}"#;
        let cmd: Command = serde_json::from_str(json).unwrap();
        assert_eq!(
            cmd,
            Command::UpdateEntry {
                section: EntrySection::Education,
                id: "e1".into(),
                field: EntryField::Year("2021".into()),
            }
        );
    }

    #[test]
    fn out_of_range_scores_do_not_parse() {
        let bad = r#"{"type":"answer_values_likert","question":"VAL_F1_Q1","score":6}"#;
        assert!(serde_json::from_str::<Command>(bad).is_err());
    }

    #[test]
    fn outcomes_serialize_with_reason() {
        let rejected = Outcome::Rejected("nope".into());
        assert_eq!(
            serde_json::to_string(&rejected).unwrap(),
            r#"{"outcome":"rejected","reason":"nope"}"#
        );
        assert_eq!(
            serde_json::to_string(&Outcome::Applied).unwrap(),
            r#"{"outcome":"applied"}"#
        );
        assert!(rejected.is_rejected());
    }
}
