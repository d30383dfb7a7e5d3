//! Seeded command generator for random walks.
//!
//! Most commands target the mounted stage using ids taken from the current
//! snapshot; the rest are shell actions and stray commands that belong to
//! another stage, which the wizard must refuse cleanly.

use rand::Rng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

use yourvue_wizard::values::VALUE_CATEGORIES;
use yourvue_wizard::{
    CareerMotivation, CareerStage, Command, CoreValue, EntrySection, FileDescriptor, LikertScore,
    ListKey, ResumeMode, ScenarioAnswer, SessionSnapshot, StageId, StageView, TagSection,
};

const LOCATIONS: [&str; 4] = ["Ber", "Lon", "Remote", "Tokyo, Japan"];
const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

fn score(rng: &mut ChaCha20Rng) -> LikertScore {
    LikertScore::SCALE[rng.gen_range(0..LikertScore::SCALE.len())]
}

pub fn next_command(rng: &mut ChaCha20Rng, snapshot: &SessionSnapshot) -> Command {
    if rng.gen_bool(0.15) {
        return shell_command(rng);
    }
    match &snapshot.view {
        StageView::Orientation(_) => orientation_command(rng),
        StageView::Values(view) => {
            let mut cmd = values_command(rng);
            if let Command::AnswerValuesLikert { question, .. } = &mut cmd
                && let Some(item) = view.questions.choose(rng)
            {
                *question = item.id.to_string();
            }
            if let Command::ToggleCoreValue { value } = &mut cmd
                && let Some(pick) = view.pool.choose(rng)
            {
                *value = pick.clone();
            }
            cmd
        }
        StageView::Aptitudes(view) => {
            let mut cmd = aptitudes_command(rng);
            if let Command::AnswerAptitudeLikert { question, .. } = &mut cmd
                && let Some(id) = view.likert_order.choose(rng)
            {
                *question = (*id).to_string();
            }
            cmd
        }
        StageView::Placeholder { .. } => match rng.gen_range(0..3) {
            0 => Command::MarkStageValid {
                valid: rng.gen_bool(0.8),
            },
            _ => Command::Continue,
        },
    }
}

fn shell_command(rng: &mut ChaCha20Rng) -> Command {
    match rng.gen_range(0..6) {
        0 => Command::ClickStage {
            stage: StageId::new(rng.gen_range(1..=8)).unwrap_or_default(),
        },
        1 => Command::Back,
        2 => Command::Continue,
        3 => Command::RequestExit,
        4 => Command::Stay,
        _ => Command::SetLoading {
            loading: rng.gen_bool(0.5),
        },
    }
}

fn orientation_command(rng: &mut ChaCha20Rng) -> Command {
    match rng.gen_range(0..12) {
        0 | 1 => Command::SelectCareerStage {
            stage: *CareerStage::ALL.choose(rng).unwrap_or(&CareerStage::Unsure),
        },
        2 => Command::ContinueFromOverview,
        3 => Command::BackToOverview,
        4 => Command::TypeLocation {
            text: (*LOCATIONS.choose(rng).unwrap_or(&"")).to_string(),
        },
        5 => Command::FocusLocation,
        6 => Command::LocationKey {
            key: *[ListKey::Down, ListKey::Up, ListKey::Enter, ListKey::Escape]
                .choose(rng)
                .unwrap_or(&ListKey::Down),
        },
        7 => Command::ContinueFromLocation,
        8 => Command::SkipLocation,
        9 => Command::PopupInteract,
        10 => Command::StartNow,
        _ => Command::MaybeLater,
    }
}

fn values_command(rng: &mut ChaCha20Rng) -> Command {
    match rng.gen_range(0..10) {
        0..=2 => {
            let category = &VALUE_CATEGORIES[rng.gen_range(0..VALUE_CATEGORIES.len())];
            Command::ToggleValue {
                category: category.id.to_string(),
                value: (*category.values.choose(rng).unwrap_or(&"")).to_string(),
            }
        }
        3 => {
            let category = &VALUE_CATEGORIES[rng.gen_range(0..VALUE_CATEGORIES.len())];
            Command::ToggleCoreValue {
                value: CoreValue::new(category.values[0], category.label),
            }
        }
        4 => Command::SetExplanation {
            text: "These values shape how I want to work.".to_string(),
        },
        5 => Command::AnswerValuesLikert {
            question: String::new(),
            score: score(rng),
        },
        6 => Command::ChooseMotivation {
            motivation: *CareerMotivation::ALL
                .choose(rng)
                .unwrap_or(&CareerMotivation::Learning),
        },
        7 => Command::ValuesBack,
        _ => Command::ValuesContinue,
    }
}

fn aptitudes_command(rng: &mut ChaCha20Rng) -> Command {
    match rng.gen_range(0..14) {
        0 => Command::SetResumeMode {
            mode: if rng.gen_bool(0.5) {
                ResumeMode::Upload
            } else {
                ResumeMode::Paste
            },
        },
        1 => Command::SetPastedText {
            text: "Analyst, 4 years. SQL, Python.".to_string(),
        },
        2 => Command::ChooseFile {
            file: FileDescriptor {
                name: "resume.docx".to_string(),
                size: rng.gen_range(1_000..7_000_000),
                mime_type: DOCX.to_string(),
            },
        },
        3 => Command::SetConsent {
            consented: rng.gen_bool(0.8),
        },
        4 => Command::Analyze,
        5 => Command::ToggleSectionEdit {
            section: *EntrySection::ALL.choose(rng).unwrap_or(&EntrySection::Education),
        },
        6 => Command::AddEntry {
            section: *EntrySection::ALL.choose(rng).unwrap_or(&EntrySection::Projects),
        },
        7 => Command::AddTag {
            section: TagSection::HardSkills,
            text: "Rust".to_string(),
        },
        8 => Command::AnswerAptitudeLikert {
            question: String::new(),
            score: score(rng),
        },
        9 | 10 => Command::AnswerScenario {
            scenario: format!("SCN_Q{}", rng.gen_range(1..=3)),
            answer: *ScenarioAnswer::ALL.choose(rng).unwrap_or(&ScenarioAnswer::A),
        },
        11 => Command::AptitudesBack,
        _ => Command::AptitudesContinue,
    }
}
