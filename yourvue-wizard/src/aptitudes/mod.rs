//! Stage 3: resume intake and review, aptitude ratings, behavioral scenarios.
pub mod analysis;
pub mod catalog;
pub mod intake;
pub mod resume;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::config::AnalysisCfg;
use crate::error::{Rejection, StepResult};
use crate::likert::{LikertResponses, LikertScore, all_answered, answered_count, normalize_responses, seeded_order};
use crate::orientation::{CareerStage, stored_career_stage};
use crate::progress::StageNavigator;
use crate::storage::{PersistedRecord, SharedStorage, load_record, save_record};
use crate::timer::Millis;

pub use analysis::{AnalysisEvent, AnalysisRun, LOADING_MESSAGES};
pub use catalog::{APTITUDES_LIKERT_QUESTIONS, ScenarioAnswer, ScenarioQuestion, scenarios_for};
pub use intake::{ACCEPTED_MIME_TYPES, FileDescriptor, ResumeIntake, ResumeMode, validate_file};
pub use resume::{
    CannedExtractor, EducationEntry, EntryField, EntryIds, EntrySection, ExperienceEntry,
    ParsedResume, ProjectEntry, ResumeExtractor, TagSection,
};

pub const S3_DATA_KEY: &str = "yourvue-s3-data";

const LIKERT_DOMAIN: &[u8] = b"aptitudes.likert";

/// Scenario id → chosen letter, `None` while unanswered.
pub type ScenarioResponses = BTreeMap<String, Option<ScenarioAnswer>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AptitudesDraft {
    #[serde(default)]
    pub resume_mode: ResumeMode,
    #[serde(default)]
    pub pasted_text: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub consented: bool,
    #[serde(default)]
    pub parsed_data: ParsedResume,
    #[serde(default)]
    pub likert_responses: LikertResponses,
    #[serde(default)]
    pub scenario_responses: ScenarioResponses,
    #[serde(default)]
    pub parsing_done: bool,
}

impl PersistedRecord for AptitudesDraft {
    const KEY: &'static str = S3_DATA_KEY;

    fn fallback() -> Self {
        Self::default()
    }

    fn normalized(mut self) -> Self {
        normalize_responses(&mut self.likert_responses, &APTITUDES_LIKERT_QUESTIONS);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AptitudesStep {
    Intake,
    Review,
    Likert,
    Scenarios,
}

impl AptitudesStep {
    pub const COUNT: u8 = 4;

    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Intake => 1,
            Self::Review => 2,
            Self::Likert => 3,
            Self::Scenarios => 4,
        }
    }

    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Intake => None,
            Self::Review => Some(Self::Intake),
            Self::Likert => Some(Self::Review),
            Self::Scenarios => Some(Self::Likert),
        }
    }

    #[must_use]
    pub const fn continue_label(self) -> &'static str {
        match self {
            Self::Review => "Confirm & Continue",
            Self::Scenarios => "Continue to Interests",
            Self::Intake | Self::Likert => "Continue",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisView {
    pub message: &'static str,
    pub elapsed_secs: u64,
    pub retry_available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioView {
    pub id: &'static str,
    pub text: &'static str,
    pub options: [(ScenarioAnswer, &'static str); 3],
    pub answer: Option<ScenarioAnswer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AptitudesView {
    pub sub_step: u8,
    pub total_sub_steps: u8,
    pub career_stage: CareerStage,
    pub resume_mode: ResumeMode,
    pub pasted_text: String,
    pub file: Option<FileDescriptor>,
    pub file_error: Option<String>,
    pub consented: bool,
    pub can_analyze: bool,
    pub analysis: Option<AnalysisView>,
    pub parsed_data: ParsedResume,
    pub editing: Vec<EntrySection>,
    pub likert_order: Vec<&'static str>,
    pub likert_answered: usize,
    pub scenarios: Vec<ScenarioView>,
    pub nav_visible: bool,
    pub can_continue: bool,
    pub continue_label: &'static str,
}

#[derive(Debug)]
pub struct AptitudesController {
    storage: SharedStorage,
    cfg: AnalysisCfg,
    draft: AptitudesDraft,
    step: AptitudesStep,
    career_stage: CareerStage,
    intake: ResumeIntake,
    analysis: AnalysisRun,
    analyzed_file: Option<String>,
    extractor: Box<dyn ResumeExtractor>,
    ids: EntryIds,
    editing: HashSet<EntrySection>,
    likert_order: Vec<&'static str>,
}

impl AptitudesController {
    #[must_use]
    pub fn mount(storage: SharedStorage, cfg: AnalysisCfg, seed: u64) -> Self {
        Self::with_extractor(storage, cfg, seed, Box::new(CannedExtractor))
    }

    /// Mount with a specific extractor. Resumes at the review step once a
    /// resume has been parsed.
    #[must_use]
    pub fn with_extractor(
        storage: SharedStorage,
        cfg: AnalysisCfg,
        seed: u64,
        extractor: Box<dyn ResumeExtractor>,
    ) -> Self {
        let mut draft = load_record::<AptitudesDraft>(storage.as_ref());
        let mut ids = EntryIds::default();
        draft.parsed_data.assign_ids(&mut ids);
        let career_stage = stored_career_stage(&storage);
        let step = if draft.parsing_done {
            AptitudesStep::Review
        } else {
            AptitudesStep::Intake
        };
        Self {
            storage,
            cfg,
            draft,
            step,
            career_stage,
            intake: ResumeIntake::default(),
            analysis: AnalysisRun::default(),
            analyzed_file: None,
            extractor,
            ids,
            editing: HashSet::new(),
            likert_order: seeded_order(&APTITUDES_LIKERT_QUESTIONS, seed, LIKERT_DOMAIN),
        }
    }

    #[must_use]
    pub const fn step(&self) -> AptitudesStep {
        self.step
    }

    #[must_use]
    pub const fn draft(&self) -> &AptitudesDraft {
        &self.draft
    }

    #[must_use]
    pub const fn career_stage(&self) -> CareerStage {
        self.career_stage
    }

    #[must_use]
    pub const fn is_analyzing(&self) -> bool {
        self.analysis.is_running()
    }

    #[must_use]
    pub fn likert_order(&self) -> &[&'static str] {
        &self.likert_order
    }

    #[must_use]
    pub const fn scenarios(&self) -> &'static [ScenarioQuestion; 3] {
        scenarios_for(self.career_stage)
    }

    /// Stage 3 drives its own navigation, so the shell never continues.
    #[must_use]
    pub const fn validity(&self) -> bool {
        false
    }

    #[must_use]
    pub fn content_key(&self) -> String {
        format!("s3-step{}", self.step.number())
    }

    #[must_use]
    pub fn nav_visible(&self) -> bool {
        self.step != AptitudesStep::Intake && !self.is_analyzing()
    }

    #[must_use]
    pub fn can_analyze(&self) -> bool {
        self.intake
            .has_content(self.draft.resume_mode, &self.draft.pasted_text)
            && self.draft.consented
    }

    #[must_use]
    pub fn scenarios_complete(&self) -> bool {
        self.scenarios()
            .iter()
            .all(|s| matches!(self.draft.scenario_responses.get(s.id), Some(Some(_))))
    }

    #[must_use]
    pub fn can_continue(&self) -> bool {
        match self.step {
            AptitudesStep::Intake => false,
            AptitudesStep::Review => true,
            AptitudesStep::Likert => {
                all_answered(&self.draft.likert_responses, &APTITUDES_LIKERT_QUESTIONS)
            }
            AptitudesStep::Scenarios => self.scenarios_complete(),
        }
    }

    #[must_use]
    pub fn is_editing(&self, section: EntrySection) -> bool {
        self.editing.contains(&section)
    }

    fn persist(&self) {
        save_record(self.storage.as_ref(), &self.draft);
    }

    fn expect_step(&self, step: AptitudesStep) -> StepResult {
        if self.is_analyzing() {
            return Err(Rejection::new("resume analysis is in progress"));
        }
        if self.step == step {
            Ok(())
        } else {
            Err(Rejection::new(format!(
                "aptitudes is on sub-step {}, not {}",
                self.step.number(),
                step.number()
            )))
        }
    }

    fn edit_draft<F>(&mut self, step: AptitudesStep, apply: F) -> StepResult
    where
        F: FnOnce(&mut AptitudesDraft) -> StepResult,
    {
        self.expect_step(step)?;
        apply(&mut self.draft)?;
        self.persist();
        Ok(())
    }

    /// # Errors
    ///
    /// Rejected off the intake step.
    pub fn set_resume_mode(&mut self, mode: ResumeMode) -> StepResult {
        self.edit_draft(AptitudesStep::Intake, |draft| {
            draft.resume_mode = mode;
            Ok(())
        })
    }

    /// # Errors
    ///
    /// Rejected off the intake step.
    pub fn set_pasted_text(&mut self, text: &str) -> StepResult {
        self.edit_draft(AptitudesStep::Intake, |draft| {
            text.clone_into(&mut draft.pasted_text);
            Ok(())
        })
    }

    /// # Errors
    ///
    /// Rejected off the intake step.
    pub fn set_consent(&mut self, consented: bool) -> StepResult {
        self.edit_draft(AptitudesStep::Intake, |draft| {
            draft.consented = consented;
            Ok(())
        })
    }

    /// # Errors
    ///
    /// Rejected off the intake step, or with the file-validation message.
    pub fn choose_file(&mut self, file: FileDescriptor) -> StepResult {
        self.expect_step(AptitudesStep::Intake)?;
        self.intake
            .choose(file, self.cfg.max_upload_bytes)
            .map_err(|rejection| Rejection::new(rejection.to_string()))
    }

    /// # Errors
    ///
    /// Rejected off the intake step.
    pub fn remove_file(&mut self) -> StepResult {
        self.expect_step(AptitudesStep::Intake)?;
        self.intake.remove();
        Ok(())
    }

    /// Begin the simulated analysis.
    ///
    /// # Errors
    ///
    /// Rejected without content for the active mode or without consent.
    pub fn analyze(&mut self, now: Millis) -> StepResult {
        self.expect_step(AptitudesStep::Intake)?;
        if !self.can_analyze() {
            return Err(Rejection::new(
                "add your resume and give consent before analyzing",
            ));
        }
        self.analyzed_file = match self.draft.resume_mode {
            ResumeMode::Upload => self.intake.file().map(|f| f.name.clone()),
            ResumeMode::Paste => None,
        };
        self.analysis.start(now, &self.cfg);
        Ok(())
    }

    /// # Errors
    ///
    /// Rejected until the retry affordance is offered.
    pub fn retry_analysis(&mut self, now: Millis) -> StepResult {
        if !self.analysis.retry_available(&self.cfg) {
            return Err(Rejection::new("retry is not available yet"));
        }
        self.analysis.retry(now, &self.cfg);
        Ok(())
    }

    fn finish_analysis(&mut self) {
        let mut parsed = self.extractor.extract();
        parsed.assign_ids(&mut self.ids);
        self.draft.parsed_data = parsed;
        self.draft.parsing_done = true;
        self.draft.file_name = self.analyzed_file.take();
        self.persist();
        self.editing.clear();
        self.step = AptitudesStep::Review;
        log::debug!("resume analysis complete");
    }

    /// # Errors
    ///
    /// Rejected off the review step.
    pub fn toggle_section_edit(&mut self, section: EntrySection) -> StepResult {
        self.expect_step(AptitudesStep::Review)?;
        if !self.editing.remove(&section) {
            self.editing.insert(section);
        }
        Ok(())
    }

    fn expect_editing(&self, section: EntrySection) -> StepResult {
        self.expect_step(AptitudesStep::Review)?;
        if self.is_editing(section) {
            Ok(())
        } else {
            Err(Rejection::new(format!(
                "{} is not in edit mode",
                section.title()
            )))
        }
    }

    /// # Errors
    ///
    /// Rejected unless the section is in edit mode, or for unknown entries.
    pub fn update_entry(&mut self, section: EntrySection, id: &str, field: EntryField) -> StepResult {
        self.expect_editing(section)?;
        self.draft.parsed_data.update_entry(section, id, field)?;
        self.persist();
        Ok(())
    }

    /// Returns the new entry id.
    ///
    /// # Errors
    ///
    /// Rejected unless the section is in edit mode.
    pub fn add_entry(&mut self, section: EntrySection) -> Result<String, Rejection> {
        self.expect_editing(section)?;
        let id = self.draft.parsed_data.add_entry(section, &mut self.ids);
        self.persist();
        Ok(id)
    }

    /// # Errors
    ///
    /// Rejected unless the section is in edit mode, or for unknown entries.
    pub fn delete_entry(&mut self, section: EntrySection, id: &str) -> StepResult {
        self.expect_editing(section)?;
        self.draft.parsed_data.delete_entry(section, id)?;
        self.persist();
        Ok(())
    }

    /// # Errors
    ///
    /// Rejected off the review step, or for blank and duplicate tags.
    pub fn add_tag(&mut self, section: TagSection, text: &str) -> StepResult {
        self.edit_draft(AptitudesStep::Review, |draft| {
            if draft.parsed_data.add_tag(section, text) {
                Ok(())
            } else {
                Err(Rejection::new("tag is empty or already listed"))
            }
        })
    }

    /// # Errors
    ///
    /// Rejected off the review step.
    pub fn remove_tag(&mut self, section: TagSection, text: &str) -> StepResult {
        self.edit_draft(AptitudesStep::Review, |draft| {
            draft.parsed_data.remove_tag(section, text);
            Ok(())
        })
    }

    /// # Errors
    ///
    /// Rejected off the questionnaire step or for unknown questions.
    pub fn answer_likert(&mut self, question_id: &str, score: LikertScore) -> StepResult {
        self.edit_draft(AptitudesStep::Likert, |draft| {
            if !APTITUDES_LIKERT_QUESTIONS.iter().any(|q| q.id == question_id) {
                return Err(Rejection::new(format!("unknown question `{question_id}`")));
            }
            draft
                .likert_responses
                .insert(question_id.to_string(), Some(score));
            Ok(())
        })
    }

    /// # Errors
    ///
    /// Rejected off the scenario step or for unknown scenario ids.
    pub fn answer_scenario(&mut self, scenario_id: &str, answer: ScenarioAnswer) -> StepResult {
        let known = self.scenarios().iter().any(|s| s.id == scenario_id);
        self.edit_draft(AptitudesStep::Scenarios, |draft| {
            if !known {
                return Err(Rejection::new(format!("unknown scenario `{scenario_id}`")));
            }
            draft
                .scenario_responses
                .insert(scenario_id.to_string(), Some(answer));
            Ok(())
        })
    }

    /// # Errors
    ///
    /// Rejected on the intake step (analysis moves past it) and while the
    /// current sub-step is incomplete.
    pub fn continue_step(&mut self, nav: &mut dyn StageNavigator) -> StepResult {
        if self.is_analyzing() {
            return Err(Rejection::new("resume analysis is in progress"));
        }
        if !self.can_continue() {
            return Err(Rejection::new(match self.step {
                AptitudesStep::Intake => "analyze your resume to continue",
                _ => "answer every question to continue",
            }));
        }
        match self.step {
            AptitudesStep::Intake => {}
            AptitudesStep::Review => self.step = AptitudesStep::Likert,
            AptitudesStep::Likert => self.step = AptitudesStep::Scenarios,
            AptitudesStep::Scenarios => nav.go_to_next_stage(),
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Rejected on the intake step and while analysis runs.
    pub fn back_step(&mut self) -> StepResult {
        if self.is_analyzing() {
            return Err(Rejection::new("resume analysis is in progress"));
        }
        let previous = self
            .step
            .previous()
            .ok_or_else(|| Rejection::new("already on the first aptitudes sub-step"))?;
        self.step = previous;
        Ok(())
    }

    pub fn tick(&mut self, now: Millis) -> bool {
        match self.analysis.tick(now) {
            AnalysisEvent::Idle => false,
            AnalysisEvent::Progressed => true,
            AnalysisEvent::Completed => {
                self.finish_analysis();
                true
            }
        }
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.analysis.next_deadline()
    }

    #[must_use]
    pub fn view(&self) -> AptitudesView {
        let analysis = self.is_analyzing().then(|| AnalysisView {
            message: self.analysis.message(),
            elapsed_secs: self.analysis.elapsed_secs(),
            retry_available: self.analysis.retry_available(&self.cfg),
        });
        let scenarios = self
            .scenarios()
            .iter()
            .map(|s| ScenarioView {
                id: s.id,
                text: s.text,
                options: s.options,
                answer: self.draft.scenario_responses.get(s.id).copied().flatten(),
            })
            .collect();
        let editing = EntrySection::ALL
            .into_iter()
            .filter(|section| self.is_editing(*section))
            .collect();
        AptitudesView {
            sub_step: self.step.number(),
            total_sub_steps: AptitudesStep::COUNT,
            career_stage: self.career_stage,
            resume_mode: self.draft.resume_mode,
            pasted_text: self.draft.pasted_text.clone(),
            file: self.intake.file().cloned(),
            file_error: self.intake.error_message(),
            consented: self.draft.consented,
            can_analyze: self.can_analyze(),
            analysis,
            parsed_data: self.draft.parsed_data.clone(),
            editing,
            likert_order: self.likert_order.clone(),
            likert_answered: answered_count(
                &self.draft.likert_responses,
                &APTITUDES_LIKERT_QUESTIONS,
            ),
            scenarios,
            nav_visible: self.nav_visible(),
            can_continue: self.can_continue(),
            continue_label: self.step.continue_label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::{OrientationDraft, S1_DATA_KEY};
    use crate::storage::{MemoryStorage, WizardStorage};
    use std::rc::Rc;

    #[derive(Default)]
    struct Nav(u32);

    impl StageNavigator for Nav {
        fn go_to_next_stage(&mut self) {
            self.0 += 1;
        }

        fn go_to_previous_stage(&mut self) {}
    }

    fn pdf() -> FileDescriptor {
        FileDescriptor {
            name: "cv.pdf".into(),
            size: 120_000,
            mime_type: "application/pdf".into(),
        }
    }

    fn mount(storage: &Rc<MemoryStorage>) -> AptitudesController {
        AptitudesController::mount(storage.clone(), AnalysisCfg::default(), 11)
    }

    fn analyzed(storage: &Rc<MemoryStorage>) -> AptitudesController {
        let mut s3 = mount(storage);
        s3.choose_file(pdf()).unwrap();
        s3.set_consent(true).unwrap();
        s3.analyze(0).unwrap();
        s3.tick(3_000);
        s3
    }

    #[test]
    fn analyze_requires_content_and_consent() {
        let storage = MemoryStorage::shared();
        let mut s3 = mount(&storage);
        assert!(s3.analyze(0).is_err());
        s3.choose_file(pdf()).unwrap();
        assert!(s3.analyze(0).is_err());
        s3.set_consent(true).unwrap();
        s3.set_resume_mode(ResumeMode::Paste).unwrap();
        assert!(!s3.can_analyze());
        s3.set_pasted_text("Ten years of Rust").unwrap();
        assert!(s3.can_analyze());
    }

    #[test]
    fn rejected_file_reports_message() {
        let storage = MemoryStorage::shared();
        let mut s3 = mount(&storage);
        let big = FileDescriptor {
            size: 6 * 1024 * 1024,
            ..pdf()
        };
        assert_eq!(
            s3.choose_file(big),
            Err(Rejection::new("File must be under 5 MB."))
        );
        assert_eq!(
            s3.view().file_error.as_deref(),
            Some("File must be under 5 MB.")
        );
    }

    #[test]
    fn analysis_completes_into_review_and_persists() {
        let storage = MemoryStorage::shared();
        let mut s3 = mount(&storage);
        s3.choose_file(pdf()).unwrap();
        s3.set_consent(true).unwrap();
        s3.analyze(500).unwrap();
        assert!(s3.is_analyzing());
        assert!(!s3.nav_visible());
        assert!(s3.set_consent(false).is_err());
        assert!(!s3.tick(501));
        assert!(s3.tick(3_500));
        assert_eq!(s3.step(), AptitudesStep::Review);
        assert!(s3.nav_visible());

        let stored = load_record::<AptitudesDraft>(storage.as_ref());
        assert!(stored.parsing_done);
        assert_eq!(stored.file_name.as_deref(), Some("cv.pdf"));
        assert_eq!(stored.parsed_data.experience.len(), 2);
    }

    #[test]
    fn parsed_resume_resumes_at_review() {
        let storage = MemoryStorage::shared();
        drop(analyzed(&storage));
        let s3 = mount(&storage);
        assert_eq!(s3.step(), AptitudesStep::Review);
        assert_eq!(s3.content_key(), "s3-step2");
    }

    #[test]
    fn retry_only_after_threshold() {
        let storage = MemoryStorage::shared();
        let cfg = AnalysisCfg {
            first_run_ms: 100_000,
            ..AnalysisCfg::default()
        };
        let mut s3 = AptitudesController::mount(storage.clone(), cfg, 1);
        s3.set_resume_mode(ResumeMode::Paste).unwrap();
        s3.set_pasted_text("resume").unwrap();
        s3.set_consent(true).unwrap();
        s3.analyze(0).unwrap();
        assert!(s3.retry_analysis(1_000).is_err());
        s3.tick(16_000);
        assert!(s3.view().analysis.unwrap().retry_available);
        s3.retry_analysis(16_000).unwrap();
        s3.tick(18_000);
        assert_eq!(s3.step(), AptitudesStep::Review);
        assert!(s3.draft().file_name.is_none());
        assert!(!s3.tick(100_000));
    }

    #[test]
    fn section_edits_require_edit_mode() {
        let storage = MemoryStorage::shared();
        let mut s3 = analyzed(&storage);
        let field = EntryField::Degree("MSc".into());
        assert!(
            s3.update_entry(EntrySection::Education, "e1", field.clone())
                .is_err()
        );
        s3.toggle_section_edit(EntrySection::Education).unwrap();
        s3.update_entry(EntrySection::Education, "e1", field).unwrap();
        assert!(s3.add_entry(EntrySection::Projects).is_err());
        let id = s3.add_entry(EntrySection::Education).unwrap();
        s3.delete_entry(EntrySection::Education, &id).unwrap();
        s3.toggle_section_edit(EntrySection::Education).unwrap();
        assert!(!s3.is_editing(EntrySection::Education));

        let stored = load_record::<AptitudesDraft>(storage.as_ref());
        assert_eq!(stored.parsed_data.education[0].degree, "MSc");
        assert_eq!(stored.parsed_data.education.len(), 1);
    }

    #[test]
    fn tags_editable_without_edit_mode() {
        let storage = MemoryStorage::shared();
        let mut s3 = analyzed(&storage);
        s3.add_tag(TagSection::SoftSkills, " Empathy ").unwrap();
        assert!(s3.add_tag(TagSection::SoftSkills, "Empathy").is_err());
        s3.remove_tag(TagSection::Awards, "Employee of the Year 2021")
            .unwrap();
        assert_eq!(s3.draft().parsed_data.awards.len(), 1);
        assert!(s3.draft().parsed_data.soft_skills.contains(&"Empathy".to_string()));
    }

    #[test]
    fn scenarios_follow_stage_one_career_stage() {
        let storage = MemoryStorage::shared();
        let s1 = OrientationDraft {
            career_stage: Some(CareerStage::Advancer),
            preferred_location: String::new(),
        };
        storage
            .set(S1_DATA_KEY, &serde_json::to_string(&s1).unwrap())
            .unwrap();
        let s3 = mount(&storage);
        assert_eq!(s3.career_stage(), CareerStage::Advancer);
        assert_eq!(s3.scenarios()[0].text, "If your project is delayed, you...");
        assert_eq!(mount(&MemoryStorage::shared()).career_stage(), CareerStage::Unsure);
    }

    #[test]
    fn full_flow_advances_the_stage() {
        let storage = MemoryStorage::shared();
        let mut nav = Nav::default();
        let mut s3 = analyzed(&storage);
        assert_eq!(s3.view().continue_label, "Confirm & Continue");
        s3.continue_step(&mut nav).unwrap();
        assert!(s3.continue_step(&mut nav).is_err());
        for q in &APTITUDES_LIKERT_QUESTIONS {
            s3.answer_likert(q.id, LikertScore::new(3).unwrap()).unwrap();
        }
        s3.continue_step(&mut nav).unwrap();
        assert_eq!(s3.view().continue_label, "Continue to Interests");
        assert!(s3.answer_scenario("SCN_Q9", ScenarioAnswer::A).is_err());
        for id in ["SCN_Q1", "SCN_Q2", "SCN_Q3"] {
            s3.answer_scenario(id, ScenarioAnswer::B).unwrap();
        }
        s3.continue_step(&mut nav).unwrap();
        assert_eq!(nav.0, 1);
        assert!(!s3.validity());
    }

    #[test]
    fn back_returns_to_intake_from_review() {
        let storage = MemoryStorage::shared();
        let mut s3 = analyzed(&storage);
        s3.back_step().unwrap();
        assert_eq!(s3.step(), AptitudesStep::Intake);
        assert!(s3.back_step().is_err());
        assert!(!s3.nav_visible());
    }
}
