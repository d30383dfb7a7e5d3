//! Stage 1: orientation, career stage and preferred location.
pub mod catalog;
pub mod location;
pub mod popup;

use serde::{Deserialize, Serialize};

use crate::config::OrientationCfg;
use crate::error::{Rejection, StepResult};
use crate::progress::StageNavigator;
use crate::storage::{PersistedRecord, SharedStorage, load_record, save_record};
use crate::timer::{Millis, earliest};

pub use catalog::{CAREER_STAGE_OPTIONS, CareerStage, LOCATION_SUGGESTIONS, OVERVIEW_DIMENSIONS};
pub use location::{ListKey, LocationSearch, filter_suggestions};
pub use popup::MotivationPopup;

pub const S1_DATA_KEY: &str = "yourvue-s1-data";
pub const S1_POPUP_KEY: &str = "yourvue-s1-popup-shown";

pub const CAREER_STAGE_HINT: &str = "Please select your current stage";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientationDraft {
    #[serde(default)]
    pub career_stage: Option<CareerStage>,
    #[serde(default)]
    pub preferred_location: String,
}

impl PersistedRecord for OrientationDraft {
    const KEY: &'static str = S1_DATA_KEY;

    fn fallback() -> Self {
        Self::default()
    }
}

/// Whether the interstitial has ever been shown. Set once, never cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PopupShown(pub bool);

impl PersistedRecord for PopupShown {
    const KEY: &'static str = S1_POPUP_KEY;

    fn fallback() -> Self {
        Self(false)
    }
}

/// Career stage persisted by stage 1, `Unsure` when missing or unreadable.
#[must_use]
pub fn stored_career_stage(storage: &SharedStorage) -> CareerStage {
    load_record::<OrientationDraft>(storage.as_ref())
        .career_stage
        .unwrap_or(CareerStage::Unsure)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationStep {
    Overview,
    Location,
    Popup,
}

impl OrientationStep {
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Overview => 1,
            Self::Location => 2,
            Self::Popup => 3,
        }
    }
}

/// Read-only projection rendered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientationView {
    pub sub_step: u8,
    pub career_stage: Option<CareerStage>,
    pub preferred_location: String,
    pub hint: Option<&'static str>,
    pub suggestions: Vec<&'static str>,
    pub dropdown_open: bool,
    pub highlighted: Option<usize>,
    pub popup_open: bool,
}

#[derive(Debug, Clone)]
pub struct OrientationController {
    storage: SharedStorage,
    cfg: OrientationCfg,
    draft: OrientationDraft,
    step: OrientationStep,
    popup_seen_at_mount: bool,
    search: LocationSearch,
    popup: MotivationPopup,
}

impl OrientationController {
    #[must_use]
    pub fn mount(storage: SharedStorage, cfg: OrientationCfg) -> Self {
        let draft = load_record::<OrientationDraft>(storage.as_ref());
        let PopupShown(popup_seen_at_mount) = load_record::<PopupShown>(storage.as_ref());
        let search = LocationSearch::new(&draft.preferred_location, cfg.location_debounce_ms);
        Self {
            storage,
            cfg,
            draft,
            step: OrientationStep::Overview,
            popup_seen_at_mount,
            search,
            popup: MotivationPopup::default(),
        }
    }

    #[must_use]
    pub const fn step(&self) -> OrientationStep {
        self.step
    }

    #[must_use]
    pub const fn draft(&self) -> &OrientationDraft {
        &self.draft
    }

    /// Validity reported to the shell. Only the overview step gates on
    /// input; the later steps drive their own continuation.
    #[must_use]
    pub const fn validity(&self) -> bool {
        match self.step {
            OrientationStep::Overview => self.draft.career_stage.is_some(),
            OrientationStep::Location | OrientationStep::Popup => true,
        }
    }

    #[must_use]
    pub fn content_key(&self) -> String {
        format!("s1-step{}", self.step.number())
    }

    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        match (self.step, self.draft.career_stage) {
            (OrientationStep::Overview, None) => Some(CAREER_STAGE_HINT),
            _ => None,
        }
    }

    fn expect_step(&self, step: OrientationStep) -> StepResult {
        if self.step == step {
            Ok(())
        } else {
            Err(Rejection::new(format!(
                "orientation is on sub-step {}, not {}",
                self.step.number(),
                step.number()
            )))
        }
    }

    fn persist(&self) {
        save_record(self.storage.as_ref(), &self.draft);
    }

    /// # Errors
    ///
    /// Rejected outside the overview step.
    pub fn select_career_stage(&mut self, stage: CareerStage) -> StepResult {
        self.expect_step(OrientationStep::Overview)?;
        self.draft.career_stage = Some(stage);
        self.persist();
        Ok(())
    }

    /// # Errors
    ///
    /// Rejected until a career stage is selected.
    pub fn continue_from_overview(&mut self) -> StepResult {
        self.expect_step(OrientationStep::Overview)?;
        if self.draft.career_stage.is_none() {
            return Err(Rejection::new(CAREER_STAGE_HINT));
        }
        self.step = OrientationStep::Location;
        Ok(())
    }

    /// # Errors
    ///
    /// Rejected outside the location step.
    pub fn back_to_overview(&mut self) -> StepResult {
        self.expect_step(OrientationStep::Location)?;
        self.search.close();
        self.step = OrientationStep::Overview;
        Ok(())
    }

    /// Raw text typed into the location field.
    ///
    /// # Errors
    ///
    /// Rejected outside the location step.
    pub fn type_location(&mut self, text: &str, now: Millis) -> StepResult {
        self.expect_step(OrientationStep::Location)?;
        text.clone_into(&mut self.draft.preferred_location);
        self.persist();
        self.search.on_input(now);
        Ok(())
    }

    /// # Errors
    ///
    /// Rejected outside the location step.
    pub fn pick_location(&mut self, location: &str) -> StepResult {
        self.expect_step(OrientationStep::Location)?;
        location.clone_into(&mut self.draft.preferred_location);
        self.persist();
        self.search.on_pick();
        Ok(())
    }

    /// # Errors
    ///
    /// Rejected outside the location step.
    pub fn focus_location(&mut self) -> StepResult {
        self.expect_step(OrientationStep::Location)?;
        self.search.on_focus();
        Ok(())
    }

    /// # Errors
    ///
    /// Rejected outside the location step.
    pub fn dismiss_suggestions(&mut self) -> StepResult {
        self.expect_step(OrientationStep::Location)?;
        self.search.close();
        Ok(())
    }

    /// # Errors
    ///
    /// Rejected outside the location step.
    pub fn location_key(&mut self, key: ListKey) -> StepResult {
        self.expect_step(OrientationStep::Location)?;
        if let Some(picked) = self.search.on_key(key) {
            picked.clone_into(&mut self.draft.preferred_location);
            self.persist();
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Rejected outside the location step.
    pub fn continue_from_location(
        &mut self,
        nav: &mut dyn StageNavigator,
        now: Millis,
    ) -> StepResult {
        self.expect_step(OrientationStep::Location)?;
        self.leave_location(nav, now);
        Ok(())
    }

    /// Clear the location, then continue exactly like the continue button.
    ///
    /// # Errors
    ///
    /// Rejected outside the location step.
    pub fn skip_location(&mut self, nav: &mut dyn StageNavigator, now: Millis) -> StepResult {
        self.expect_step(OrientationStep::Location)?;
        self.draft.preferred_location.clear();
        self.persist();
        self.leave_location(nav, now);
        Ok(())
    }

    fn leave_location(&mut self, nav: &mut dyn StageNavigator, now: Millis) {
        self.search.close();
        if self.popup_seen_at_mount {
            nav.go_to_next_stage();
        } else {
            self.step = OrientationStep::Popup;
            self.popup.open(now, self.cfg.popup_auto_dismiss_ms);
            save_record(self.storage.as_ref(), &PopupShown(true));
            log::debug!("motivation popup shown");
        }
    }

    /// Pointer-down anywhere on the popup.
    ///
    /// # Errors
    ///
    /// Rejected unless the popup is open.
    pub fn popup_interact(&mut self) -> StepResult {
        self.expect_popup()?;
        self.popup.interact();
        Ok(())
    }

    /// # Errors
    ///
    /// Rejected unless the popup is open.
    pub fn start_now(&mut self, nav: &mut dyn StageNavigator) -> StepResult {
        self.expect_popup()?;
        self.popup.close();
        nav.go_to_next_stage();
        Ok(())
    }

    /// # Errors
    ///
    /// Rejected unless the popup is open.
    pub fn maybe_later(&mut self) -> StepResult {
        self.expect_popup()?;
        self.popup.close();
        self.step = OrientationStep::Location;
        Ok(())
    }

    fn expect_popup(&self) -> StepResult {
        self.expect_step(OrientationStep::Popup)?;
        if self.popup.is_open() {
            Ok(())
        } else {
            Err(Rejection::new("motivation popup is closed"))
        }
    }

    /// Advance owned timers; returns `true` if anything visible changed.
    pub fn tick(&mut self, now: Millis) -> bool {
        let mut changed = self.search.tick(now, &self.draft.preferred_location);
        if self.popup.tick(now) {
            log::debug!("motivation popup auto-dismissed");
            self.step = OrientationStep::Location;
            changed = true;
        }
        changed
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        earliest([self.search.next_deadline(), self.popup.next_deadline()])
    }

    #[must_use]
    pub fn view(&self) -> OrientationView {
        let on_location = self.step == OrientationStep::Location;
        OrientationView {
            sub_step: self.step.number(),
            career_stage: self.draft.career_stage,
            preferred_location: self.draft.preferred_location.clone(),
            hint: self.hint(),
            suggestions: if on_location {
                self.search.suggestions()
            } else {
                Vec::new()
            },
            dropdown_open: on_location && self.search.dropdown_visible(),
            highlighted: self.search.highlight(),
            popup_open: self.popup.is_open(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, WizardStorage};
    use std::rc::Rc;

    #[derive(Default)]
    struct CountingNav {
        forward: u32,
        back: u32,
    }

    impl StageNavigator for CountingNav {
        fn go_to_next_stage(&mut self) {
            self.forward += 1;
        }

        fn go_to_previous_stage(&mut self) {
            self.back += 1;
        }
    }

    fn mount(storage: &Rc<MemoryStorage>) -> OrientationController {
        OrientationController::mount(storage.clone(), OrientationCfg::default())
    }

    #[test]
    fn overview_requires_career_stage() {
        let storage = MemoryStorage::shared();
        let mut s1 = mount(&storage);
        assert!(!s1.validity());
        assert_eq!(s1.hint(), Some(CAREER_STAGE_HINT));
        assert_eq!(
            s1.continue_from_overview(),
            Err(Rejection::new(CAREER_STAGE_HINT))
        );
        s1.select_career_stage(CareerStage::Explorer).unwrap();
        assert!(s1.validity());
        s1.continue_from_overview().unwrap();
        assert_eq!(s1.step(), OrientationStep::Location);
        assert_eq!(s1.content_key(), "s1-step2");
    }

    #[test]
    fn first_continue_shows_popup_once() {
        let storage = MemoryStorage::shared();
        let mut nav = CountingNav::default();
        let mut s1 = mount(&storage);
        s1.select_career_stage(CareerStage::Starter).unwrap();
        s1.continue_from_overview().unwrap();
        s1.continue_from_location(&mut nav, 0).unwrap();
        assert_eq!(s1.step(), OrientationStep::Popup);
        assert_eq!(nav.forward, 0);
        assert_eq!(storage.raw(S1_POPUP_KEY).as_deref(), Some("true"));
        assert!(s1.validity());

        let mut remounted = mount(&storage);
        remounted.continue_from_overview().unwrap();
        remounted.continue_from_location(&mut nav, 0).unwrap();
        assert_eq!(nav.forward, 1);
    }

    #[test]
    fn skip_clears_location_before_continuing() {
        let storage = MemoryStorage::shared();
        storage.set(S1_POPUP_KEY, "true").unwrap();
        let mut nav = CountingNav::default();
        let mut s1 = mount(&storage);
        s1.select_career_stage(CareerStage::Shifter).unwrap();
        s1.continue_from_overview().unwrap();
        s1.type_location("Berlin", 0).unwrap();
        s1.skip_location(&mut nav, 10).unwrap();
        assert_eq!(nav.forward, 1);
        let saved = load_record::<OrientationDraft>(storage.as_ref());
        assert_eq!(saved.preferred_location, "");
        assert_eq!(saved.career_stage, Some(CareerStage::Shifter));
    }

    #[test]
    fn popup_auto_dismiss_returns_to_location() {
        let storage = MemoryStorage::shared();
        let mut nav = CountingNav::default();
        let mut s1 = mount(&storage);
        s1.select_career_stage(CareerStage::Unsure).unwrap();
        s1.continue_from_overview().unwrap();
        s1.continue_from_location(&mut nav, 1_000).unwrap();
        assert_eq!(s1.next_deadline(), Some(6_000));
        assert!(s1.tick(6_000));
        assert_eq!(s1.step(), OrientationStep::Location);
        assert!(!s1.view().popup_open);
        assert_eq!(nav.forward, 0);
    }

    #[test]
    fn popup_interaction_cancels_auto_dismiss() {
        let storage = MemoryStorage::shared();
        let mut nav = CountingNav::default();
        let mut s1 = mount(&storage);
        s1.select_career_stage(CareerStage::Advancer).unwrap();
        s1.continue_from_overview().unwrap();
        s1.continue_from_location(&mut nav, 0).unwrap();
        s1.popup_interact().unwrap();
        assert!(!s1.tick(10_000));
        assert_eq!(s1.step(), OrientationStep::Popup);
        s1.start_now(&mut nav).unwrap();
        assert_eq!(nav.forward, 1);
    }

    #[test]
    fn maybe_later_returns_to_location() {
        let storage = MemoryStorage::shared();
        let mut nav = CountingNav::default();
        let mut s1 = mount(&storage);
        s1.select_career_stage(CareerStage::Advancer).unwrap();
        s1.continue_from_overview().unwrap();
        s1.continue_from_location(&mut nav, 0).unwrap();
        s1.maybe_later().unwrap();
        assert_eq!(s1.step(), OrientationStep::Location);
        assert!(s1.maybe_later().is_err());
        assert_eq!(nav.back, 0);
    }

    #[test]
    fn location_search_debounces_typed_text() {
        let storage = MemoryStorage::shared();
        let mut s1 = mount(&storage);
        s1.select_career_stage(CareerStage::Explorer).unwrap();
        s1.continue_from_overview().unwrap();
        s1.type_location("To", 0).unwrap();
        s1.type_location("Tok", 100).unwrap();
        assert!(s1.view().suggestions.is_empty());
        s1.tick(400);
        assert_eq!(s1.view().suggestions, vec!["Tokyo, Japan"]);
        s1.location_key(ListKey::Down).unwrap();
        s1.location_key(ListKey::Enter).unwrap();
        assert_eq!(s1.draft().preferred_location, "Tokyo, Japan");
    }

    #[test]
    fn commands_for_other_steps_are_rejected() {
        let storage = MemoryStorage::shared();
        let mut nav = CountingNav::default();
        let mut s1 = mount(&storage);
        assert!(s1.type_location("x", 0).is_err());
        assert!(s1.start_now(&mut nav).is_err());
        assert!(s1.back_to_overview().is_err());
        assert_eq!(nav.forward, 0);
    }

    #[test]
    fn unreadable_stage_one_data_defaults_to_unsure() {
        let storage = MemoryStorage::shared();
        storage.set(S1_DATA_KEY, "not json").unwrap();
        let shared: SharedStorage = storage;
        assert_eq!(stored_career_stage(&shared), CareerStage::Unsure);
    }
}
