//! Composition root: the store, the shell, both transitions and the mounted stage.
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::aptitudes::AptitudesController;
use crate::command::{Command, Outcome};
use crate::config::WizardConfig;
use crate::error::{Rejection, StepResult};
use crate::orientation::OrientationController;
use crate::progress::{SubscriptionId, WizardProgress, WizardStore};
use crate::shell;
use crate::snapshot::{SessionSnapshot, StageView, TransitionView};
use crate::stage::StageId;
use crate::storage::SharedStorage;
use crate::timer::{Millis, earliest};
use crate::transition::TransitionOrchestrator;
use crate::values::ValuesController;

/// The controller for the current stage. Replaced whenever the stage changes,
/// which drops its timers with it.
#[derive(Debug)]
enum ActiveStage {
    Orientation(OrientationController),
    Values(ValuesController),
    Aptitudes(Box<AptitudesController>),
    Placeholder(StageId),
}

impl ActiveStage {
    fn mount(stage: StageId, storage: &SharedStorage, cfg: &WizardConfig, seed: u64) -> Self {
        let storage = SharedStorage::clone(storage);
        match stage {
            StageId::ORIENTATION => {
                Self::Orientation(OrientationController::mount(storage, cfg.orientation))
            }
            StageId::VALUES => Self::Values(ValuesController::mount(storage, seed)),
            StageId::APTITUDES => Self::Aptitudes(Box::new(AptitudesController::mount(
                storage,
                cfg.analysis,
                seed,
            ))),
            other => Self::Placeholder(other),
        }
    }

    fn validity(&self) -> Option<bool> {
        match self {
            Self::Orientation(s1) => Some(s1.validity()),
            Self::Values(s2) => Some(s2.validity()),
            Self::Aptitudes(s3) => Some(s3.validity()),
            Self::Placeholder(_) => None,
        }
    }

    fn content_key(&self) -> String {
        match self {
            Self::Orientation(s1) => s1.content_key(),
            Self::Values(s2) => s2.content_key(),
            Self::Aptitudes(s3) => s3.content_key(),
            Self::Placeholder(stage) => format!("s{stage}"),
        }
    }

    fn tick(&mut self, now: Millis) -> bool {
        match self {
            Self::Orientation(s1) => s1.tick(now),
            Self::Aptitudes(s3) => s3.tick(now),
            Self::Values(_) | Self::Placeholder(_) => false,
        }
    }

    fn next_deadline(&self) -> Option<Millis> {
        match self {
            Self::Orientation(s1) => s1.next_deadline(),
            Self::Aptitudes(s3) => s3.next_deadline(),
            Self::Values(_) | Self::Placeholder(_) => None,
        }
    }

    fn orientation(&mut self) -> Result<&mut OrientationController, Rejection> {
        match self {
            Self::Orientation(s1) => Ok(s1),
            _ => Err(not_on("orientation")),
        }
    }

    fn values(&mut self) -> Result<&mut ValuesController, Rejection> {
        match self {
            Self::Values(s2) => Ok(s2),
            _ => Err(not_on("values")),
        }
    }

    fn aptitudes(&mut self) -> Result<&mut AptitudesController, Rejection> {
        match self {
            Self::Aptitudes(s3) => Ok(&mut **s3),
            _ => Err(not_on("aptitudes")),
        }
    }

    fn placeholder(&self) -> Result<StageId, Rejection> {
        match self {
            Self::Placeholder(stage) => Ok(*stage),
            _ => Err(Rejection::new("this stage reports its own validity")),
        }
    }
}

fn not_on(stage: &str) -> Rejection {
    Rejection::new(format!("the {stage} stage is not mounted"))
}

/// One assessment run against a storage backend.
#[derive(Debug)]
pub struct AssessmentSession {
    cfg: WizardConfig,
    storage: SharedStorage,
    store: WizardStore,
    rng: ChaCha20Rng,
    active: ActiveStage,
    mounted: StageId,
    stage_transition: TransitionOrchestrator<StageId>,
    content_transition: TransitionOrchestrator<String>,
}

impl AssessmentSession {
    /// Rehydrate progress and mount the current stage. `seed` drives the
    /// questionnaire shuffles of every mount in this session.
    #[must_use]
    pub fn new(storage: SharedStorage, cfg: WizardConfig, seed: u64) -> Self {
        let store = WizardStore::load(SharedStorage::clone(&storage));
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mounted = store.current_stage();
        let active = ActiveStage::mount(mounted, &storage, &cfg, rng.next_u64());
        let stage_transition = TransitionOrchestrator::new(mounted, cfg.transition);
        let content_transition = TransitionOrchestrator::new(active.content_key(), cfg.transition);
        log::info!("session started at stage {mounted} (seed {seed})");
        let mut session = Self {
            cfg,
            storage,
            store,
            rng,
            active,
            mounted,
            stage_transition,
            content_transition,
        };
        session.sync_validity();
        session
    }

    #[must_use]
    pub const fn store(&self) -> &WizardStore {
        &self.store
    }

    #[must_use]
    pub const fn config(&self) -> &WizardConfig {
        &self.cfg
    }

    #[must_use]
    pub const fn current_stage(&self) -> StageId {
        self.store.current_stage()
    }

    /// Observe every progress mutation.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&WizardProgress) + 'static,
    {
        self.store.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Apply one user interaction at host time `now`.
    pub fn apply(&mut self, command: Command, now: Millis) -> Outcome {
        let name = command.name();
        let exiting = matches!(command, Command::Leave);
        let forced_remount = matches!(command, Command::Reset);
        let result = self.dispatch(command, now);
        self.settle(now, forced_remount && result.is_ok());
        match result {
            Ok(()) if exiting => Outcome::Exited,
            Ok(()) => Outcome::Applied,
            Err(rejection) => {
                log::debug!("{name} rejected: {rejection}");
                Outcome::Rejected(rejection.reason)
            }
        }
    }

    fn dispatch(&mut self, command: Command, now: Millis) -> StepResult {
        let store = &mut self.store;
        match command {
            Command::ClickStage { stage } => shell::click_stage(store, stage),
            Command::Continue => shell::continue_stage(store, self.active.validity()),
            Command::Back => shell::back_stage(store),
            Command::RequestExit => {
                shell::request_exit(store);
                Ok(())
            }
            Command::Stay => {
                shell::stay(store);
                Ok(())
            }
            Command::Leave => shell::leave(store),
            Command::MarkStageValid { valid } => {
                let stage = self.active.placeholder()?;
                store.mark_stage_valid(stage, valid);
                Ok(())
            }
            Command::SetLoading { loading } => {
                store.set_is_loading(loading);
                Ok(())
            }
            Command::Reset => {
                store.reset_wizard();
                Ok(())
            }

            Command::SelectCareerStage { stage } => self.active.orientation()?.select_career_stage(stage),
            Command::ContinueFromOverview => self.active.orientation()?.continue_from_overview(),
            Command::BackToOverview => self.active.orientation()?.back_to_overview(),
            Command::TypeLocation { text } => self.active.orientation()?.type_location(&text, now),
            Command::PickLocation { location } => {
                self.active.orientation()?.pick_location(&location)
            }
            Command::FocusLocation => self.active.orientation()?.focus_location(),
            Command::DismissSuggestions => self.active.orientation()?.dismiss_suggestions(),
            Command::LocationKey { key } => self.active.orientation()?.location_key(key),
            Command::ContinueFromLocation => self
                .active
                .orientation()?
                .continue_from_location(store, now),
            Command::SkipLocation => self.active.orientation()?.skip_location(store, now),
            Command::PopupInteract => self.active.orientation()?.popup_interact(),
            Command::StartNow => self.active.orientation()?.start_now(store),
            Command::MaybeLater => self.active.orientation()?.maybe_later(),

            Command::ToggleValue { category, value } => {
                self.active.values()?.toggle_value(&category, &value)
            }
            Command::ToggleCoreValue { value } => self.active.values()?.toggle_core_value(&value),
            Command::SetExplanation { text } => self.active.values()?.set_explanation(&text),
            Command::AnswerValuesLikert { question, score } => {
                self.active.values()?.answer_likert(&question, score)
            }
            Command::ChooseMotivation { motivation } => {
                self.active.values()?.choose_motivation(motivation)
            }
            Command::ValuesContinue => self.active.values()?.continue_step(store),
            Command::ValuesBack => self.active.values()?.back_step(),

            Command::SetResumeMode { mode } => self.active.aptitudes()?.set_resume_mode(mode),
            Command::SetPastedText { text } => self.active.aptitudes()?.set_pasted_text(&text),
            Command::ChooseFile { file } => self.active.aptitudes()?.choose_file(file),
            Command::RemoveFile => self.active.aptitudes()?.remove_file(),
            Command::SetConsent { consented } => self.active.aptitudes()?.set_consent(consented),
            Command::Analyze => self.active.aptitudes()?.analyze(now),
            Command::RetryAnalysis => self.active.aptitudes()?.retry_analysis(now),
            Command::ToggleSectionEdit { section } => {
                self.active.aptitudes()?.toggle_section_edit(section)
            }
            Command::UpdateEntry { section, id, field } => {
                self.active.aptitudes()?.update_entry(section, &id, field)
            }
            Command::AddEntry { section } => self.active.aptitudes()?.add_entry(section).map(drop),
            Command::DeleteEntry { section, id } => {
                self.active.aptitudes()?.delete_entry(section, &id)
            }
            Command::AddTag { section, text } => self.active.aptitudes()?.add_tag(section, &text),
            Command::RemoveTag { section, text } => {
                self.active.aptitudes()?.remove_tag(section, &text)
            }
            Command::AnswerAptitudeLikert { question, score } => {
                self.active.aptitudes()?.answer_likert(&question, score)
            }
            Command::AnswerScenario { scenario, answer } => {
                self.active.aptitudes()?.answer_scenario(&scenario, answer)
            }
            Command::AptitudesContinue => self.active.aptitudes()?.continue_step(store),
            Command::AptitudesBack => self.active.aptitudes()?.back_step(),
        }
    }

    /// Remount on stage change, then point both transitions at what should
    /// now be on screen.
    fn settle(&mut self, now: Millis, force_remount: bool) {
        let stage = self.store.current_stage();
        if force_remount || stage != self.mounted {
            let seed = self.rng.next_u64();
            self.active = ActiveStage::mount(stage, &self.storage, &self.cfg, seed);
            self.mounted = stage;
            log::debug!("mounted stage {stage}");
        }
        self.stage_transition.set_key(stage, now);
        self.content_transition.set_key(self.active.content_key(), now);
        self.sync_validity();
    }

    /// Record the mounted controller's signal as the stage's last known validity.
    fn sync_validity(&mut self) {
        let Some(valid) = self.active.validity() else {
            return;
        };
        let stage = self.store.current_stage();
        if self.store.progress().stage_validation.get(&stage) != Some(&valid) {
            self.store.mark_stage_valid(stage, valid);
        }
    }

    /// Advance every owned timer; returns `true` if the snapshot changed.
    pub fn tick(&mut self, now: Millis) -> bool {
        let mut changed = self.active.tick(now);
        if changed {
            self.settle(now, false);
        }
        changed |= self.stage_transition.tick(now);
        changed |= self.content_transition.tick(now);
        changed
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        earliest([
            self.active.next_deadline(),
            self.stage_transition.next_deadline(),
            self.content_transition.next_deadline(),
        ])
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let progress = self.store.progress();
        let view = match &self.active {
            ActiveStage::Orientation(s1) => StageView::Orientation(s1.view()),
            ActiveStage::Values(s2) => StageView::Values(s2.view()),
            ActiveStage::Aptitudes(s3) => StageView::Aptitudes(Box::new(s3.view())),
            ActiveStage::Placeholder(stage) => StageView::Placeholder {
                stage: *stage,
                label: stage.info().label,
                valid: progress.is_valid(*stage),
            },
        };
        SessionSnapshot {
            stage: progress.current_stage,
            sub_step: progress.current_sub_step.clone(),
            completed_stages: progress.completed_stages.clone(),
            has_unsaved_changes: self.store.has_unsaved_changes(),
            shell: shell::view(&self.store, self.active.validity()),
            stage_transition: TransitionView {
                displayed: *self.stage_transition.displayed(),
                phase: self.stage_transition.phase(),
            },
            content_transition: TransitionView {
                displayed: self.content_transition.displayed().clone(),
                phase: self.content_transition.phase(),
            },
            view,
            next_deadline: self.next_deadline(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::CareerStage;
    use crate::storage::MemoryStorage;
    use crate::transition::TransitionPhase;

    fn session() -> AssessmentSession {
        AssessmentSession::new(MemoryStorage::shared(), WizardConfig::default(), 7)
    }

    #[test]
    fn fresh_session_mounts_orientation() {
        let session = session();
        let snap = session.snapshot();
        assert_eq!(snap.stage, StageId::ORIENTATION);
        assert_eq!(snap.view.kind(), "orientation");
        assert_eq!(snap.content_transition.displayed, "s1-step1");
        assert!(snap.shell.nav_bar.is_none());
        assert_eq!(snap.next_deadline, None);
    }

    #[test]
    fn commands_for_other_stages_are_rejected() {
        let mut session = session();
        let outcome = session.apply(Command::ValuesContinue, 0);
        assert_eq!(
            outcome,
            Outcome::Rejected("the values stage is not mounted".into())
        );
        assert!(session.apply(Command::MarkStageValid { valid: true }, 0).is_rejected());
    }

    #[test]
    fn sub_step_change_runs_content_transition() {
        let mut session = session();
        let select = Command::SelectCareerStage {
            stage: CareerStage::Starter,
        };
        assert!(session.apply(select, 0).is_applied());
        assert!(session.store().progress().is_valid(StageId::ORIENTATION));
        session.apply(Command::ContinueFromOverview, 1_000);
        let snap = session.snapshot();
        assert_eq!(snap.content_transition.phase, TransitionPhase::Exit);
        assert_eq!(snap.content_transition.displayed, "s1-step1");
        assert_eq!(snap.next_deadline, Some(1_110));
        assert!(session.tick(1_110));
        assert_eq!(session.snapshot().content_transition.displayed, "s1-step2");
        session.tick(1_320);
        assert_eq!(
            session.snapshot().content_transition.phase,
            TransitionPhase::Idle
        );
    }

    #[test]
    fn leave_reports_exit_without_touching_progress() {
        let mut session = session();
        assert!(session.apply(Command::Leave, 0).is_rejected());
        session.apply(Command::RequestExit, 0);
        assert!(session.snapshot().shell.exit_dialog_open);
        assert_eq!(session.apply(Command::Leave, 0), Outcome::Exited);
        assert!(!session.snapshot().shell.exit_dialog_open);
    }

    #[test]
    fn loading_flag_reaches_the_shell() {
        let mut session = session();
        session.apply(Command::SetLoading { loading: true }, 0);
        assert!(session.snapshot().shell.loading);
    }
}
