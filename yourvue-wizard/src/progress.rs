//! Global wizard progress: the persisted position plus navigation actions.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::stage::{StageId, TOTAL_STAGES};
use crate::storage::{PersistedRecord, SharedStorage, load_record, save_record};

/// Storage key of the global progress record.
pub const PROGRESS_KEY: &str = "yourvue-wizard-progress";

/// The persisted portion of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardProgress {
    #[serde(default)]
    pub current_stage: StageId,
    #[serde(default = "default_sub_step")]
    pub current_sub_step: String,
    #[serde(default)]
    pub completed_stages: Vec<StageId>,
    #[serde(default)]
    pub stage_validation: BTreeMap<StageId, bool>,
}

fn default_sub_step() -> String {
    StageId::FIRST.initial_sub_step().to_string()
}

impl Default for WizardProgress {
    fn default() -> Self {
        Self {
            current_stage: StageId::FIRST,
            current_sub_step: default_sub_step(),
            completed_stages: Vec::new(),
            stage_validation: BTreeMap::new(),
        }
    }
}

impl WizardProgress {
    #[must_use]
    pub fn is_completed(&self, stage: StageId) -> bool {
        self.completed_stages.contains(&stage)
    }

    #[must_use]
    pub fn is_valid(&self, stage: StageId) -> bool {
        self.stage_validation.get(&stage).copied().unwrap_or(false)
    }

    /// Overall completion for the current position, in percent.
    #[must_use]
    pub fn overall(&self) -> f64 {
        overall_progress(self.completed_stages.len(), self.current_stage)
    }

    fn insert_completed(&mut self, stage: StageId) -> bool {
        if self.is_completed(stage) {
            false
        } else {
            self.completed_stages.push(stage);
            true
        }
    }
}

impl PersistedRecord for WizardProgress {
    const KEY: &'static str = PROGRESS_KEY;

    fn fallback() -> Self {
        Self::default()
    }

    fn normalized(mut self) -> Self {
        let mut seen = Vec::with_capacity(self.completed_stages.len());
        self.completed_stages.retain(|stage| {
            if seen.contains(stage) {
                false
            } else {
                seen.push(*stage);
                true
            }
        });
        if self.current_sub_step.is_empty() {
            self.current_sub_step = self.current_stage.initial_sub_step().to_string();
        }
        self
    }
}

/// `max(completed / 8, (current - 1) / 8) * 100`.
#[must_use]
pub fn overall_progress(completed: usize, current: StageId) -> f64 {
    let total = f64::from(TOTAL_STAGES);
    let completed = f64::from(u32::try_from(completed).unwrap_or(u32::MAX));
    let by_completed = completed / total * 100.0;
    let by_position = f64::from(current.get() - 1) / total * 100.0;
    by_completed.max(by_position)
}

/// Forward/backward navigation handed to stage controllers.
pub trait StageNavigator {
    fn go_to_next_stage(&mut self);
    fn go_to_previous_stage(&mut self);
}

/// Handle returned by [`WizardStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&WizardProgress)>;

/// Owner of the global progress, persisting it through the shared storage.
pub struct WizardStore {
    storage: SharedStorage,
    progress: WizardProgress,
    is_loading: bool,
    show_exit_dialog: bool,
    has_unsaved_changes: bool,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl fmt::Debug for WizardStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WizardStore")
            .field("progress", &self.progress)
            .field("is_loading", &self.is_loading)
            .field("show_exit_dialog", &self.show_exit_dialog)
            .field("has_unsaved_changes", &self.has_unsaved_changes)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl WizardStore {
    /// Rehydrate from storage, or start from defaults.
    #[must_use]
    pub fn load(storage: SharedStorage) -> Self {
        let progress = load_record::<WizardProgress>(storage.as_ref());
        log::debug!(
            "store loaded at stage {} ({})",
            progress.current_stage,
            progress.current_sub_step
        );
        Self {
            storage,
            progress,
            is_loading: false,
            show_exit_dialog: false,
            has_unsaved_changes: false,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    #[must_use]
    pub const fn progress(&self) -> &WizardProgress {
        &self.progress
    }

    #[must_use]
    pub const fn current_stage(&self) -> StageId {
        self.progress.current_stage
    }

    #[must_use]
    pub fn current_sub_step(&self) -> &str {
        &self.progress.current_sub_step
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub const fn show_exit_dialog(&self) -> bool {
        self.show_exit_dialog
    }

    #[must_use]
    pub const fn has_unsaved_changes(&self) -> bool {
        self.has_unsaved_changes
    }

    #[must_use]
    pub fn storage(&self) -> SharedStorage {
        SharedStorage::clone(&self.storage)
    }

    /// Jump directly to `stage`; no validity check is performed.
    pub fn go_to_stage(&mut self, stage: StageId, sub_step: Option<&str>) {
        self.progress.current_stage = stage;
        self.progress.current_sub_step = sub_step
            .unwrap_or_else(|| stage.initial_sub_step())
            .to_string();
        self.commit();
    }

    pub fn set_sub_step(&mut self, sub_step: &str) {
        self.progress.current_sub_step = sub_step.to_string();
        self.commit();
    }

    pub fn mark_stage_valid(&mut self, stage: StageId, is_valid: bool) {
        self.progress.stage_validation.insert(stage, is_valid);
        self.commit();
    }

    pub fn mark_stage_complete(&mut self, stage: StageId) {
        self.progress.insert_completed(stage);
        self.commit();
    }

    pub fn set_has_unsaved_changes(&mut self, value: bool) {
        self.has_unsaved_changes = value;
        self.notify();
    }

    pub fn set_is_loading(&mut self, value: bool) {
        self.is_loading = value;
        self.notify();
    }

    pub fn set_show_exit_dialog(&mut self, value: bool) {
        self.show_exit_dialog = value;
        self.notify();
    }

    /// Restore every default and persist them.
    pub fn reset_wizard(&mut self) {
        self.progress = WizardProgress::default();
        self.is_loading = false;
        self.show_exit_dialog = false;
        self.has_unsaved_changes = false;
        self.commit();
    }

    /// Register a callback invoked after every mutation.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&WizardProgress) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    fn commit(&mut self) {
        save_record(self.storage.as_ref(), &self.progress);
        self.notify();
    }

    fn notify(&mut self) {
        let mut observers = std::mem::take(&mut self.observers);
        for (_, observer) in &mut observers {
            observer(&self.progress);
        }
        observers.append(&mut self.observers);
        self.observers = observers;
    }
}

impl StageNavigator for WizardStore {
    fn go_to_next_stage(&mut self) {
        let current = self.progress.current_stage;
        let Some(next) = current.next() else {
            return;
        };
        self.progress.insert_completed(current);
        self.progress.current_stage = next;
        self.progress.current_sub_step = next.initial_sub_step().to_string();
        self.has_unsaved_changes = false;
        log::debug!("advanced from stage {current} to {next}");
        self.commit();
    }

    fn go_to_previous_stage(&mut self) {
        let Some(previous) = self.progress.current_stage.previous() else {
            return;
        };
        self.progress.current_stage = previous;
        self.progress.current_sub_step = previous.initial_sub_step().to_string();
        self.commit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, WizardStorage};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn fresh() -> (Rc<MemoryStorage>, WizardStore) {
        let storage = MemoryStorage::shared();
        let store = WizardStore::load(storage.clone());
        (storage, store)
    }

    #[test]
    fn defaults_on_first_load() {
        let (_, store) = fresh();
        assert_eq!(store.current_stage(), StageId::ORIENTATION);
        assert_eq!(store.current_sub_step(), "welcome");
        assert!(store.progress().completed_stages.is_empty());
        assert!(!store.is_loading());
    }

    #[test]
    fn next_stage_marks_completion_once() {
        let (_, mut store) = fresh();
        store.go_to_next_stage();
        assert_eq!(store.current_stage(), StageId::VALUES);
        assert_eq!(store.current_sub_step(), "category_selection");
        store.go_to_previous_stage();
        store.go_to_next_stage();
        assert_eq!(store.progress().completed_stages, vec![StageId::ORIENTATION]);
    }

    #[test]
    fn navigation_is_clamped_at_both_ends() {
        let (_, mut store) = fresh();
        store.go_to_previous_stage();
        assert_eq!(store.current_stage(), StageId::ORIENTATION);

        store.go_to_stage(StageId::ACTION_PLAN, Some("resources"));
        let before = store.progress().clone();
        store.go_to_next_stage();
        assert_eq!(store.progress(), &before);
    }

    #[test]
    fn previous_stage_never_touches_completion() {
        let (_, mut store) = fresh();
        store.go_to_next_stage();
        store.go_to_next_stage();
        store.go_to_previous_stage();
        assert_eq!(store.current_stage(), StageId::VALUES);
        assert_eq!(store.progress().completed_stages.len(), 2);
    }

    #[test]
    fn next_stage_clears_unsaved_changes() {
        let (_, mut store) = fresh();
        store.set_has_unsaved_changes(true);
        store.go_to_next_stage();
        assert!(!store.has_unsaved_changes());
    }

    #[test]
    fn progress_persists_and_rehydrates() {
        let (storage, mut store) = fresh();
        store.go_to_next_stage();
        store.set_sub_step("refinement");
        store.mark_stage_valid(StageId::INTERESTS, true);
        store.set_show_exit_dialog(true);

        let raw = storage.raw(PROGRESS_KEY).unwrap();
        assert!(raw.contains("\"currentStage\":2"));
        assert!(raw.contains("\"stageValidation\":{\"4\":true}"));
        assert!(!raw.contains("showExitDialog"));

        let reloaded = WizardStore::load(storage);
        assert_eq!(reloaded.progress(), store.progress());
        assert!(!reloaded.show_exit_dialog());
    }

    #[test]
    fn corrupt_progress_falls_back_to_defaults() {
        let storage = MemoryStorage::shared();
        storage.set(PROGRESS_KEY, "{\"currentStage\":42}").unwrap();
        let store = WizardStore::load(storage);
        assert_eq!(store.progress(), &WizardProgress::default());
    }

    #[test]
    fn reset_restores_and_persists_defaults() {
        let (storage, mut store) = fresh();
        store.go_to_next_stage();
        store.mark_stage_complete(StageId::VALUES);
        store.reset_wizard();
        assert_eq!(store.progress(), &WizardProgress::default());
        let reloaded = WizardStore::load(storage);
        assert_eq!(reloaded.progress(), &WizardProgress::default());
    }

    #[test]
    fn observers_fire_until_unsubscribed() {
        let (_, mut store) = fresh();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = store.subscribe(move |progress| sink.borrow_mut().push(progress.current_stage));
        store.go_to_next_stage();
        store.set_is_loading(true);
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.go_to_next_stage();
        assert_eq!(*seen.borrow(), vec![StageId::VALUES, StageId::VALUES]);
    }

    #[test]
    fn overall_progress_takes_the_larger_measure() {
        assert!((overall_progress(0, StageId::ORIENTATION) - 0.0).abs() < f64::EPSILON);
        assert!((overall_progress(3, StageId::VALUES) - 37.5).abs() < f64::EPSILON);
        assert!((overall_progress(1, StageId::REPORT) - 62.5).abs() < f64::EPSILON);
        assert!((overall_progress(8, StageId::ACTION_PLAN) - 100.0).abs() < f64::EPSILON);
    }
}
