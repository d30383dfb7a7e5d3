//! Shell view-model: stepper, progress bar, stage navigation and the exit dialog.
use serde::Serialize;

use crate::error::{Rejection, StepResult};
use crate::progress::{StageNavigator, WizardProgress, WizardStore};
use crate::stage::StageId;

pub const CONTINUE_HELPER: &str = "Complete all required fields to continue";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    Completed,
    Current,
    Upcoming,
}

impl StepState {
    #[must_use]
    pub fn of(stage: StageId, progress: &WizardProgress) -> Self {
        if progress.is_completed(stage) {
            Self::Completed
        } else if stage == progress.current_stage {
            Self::Current
        } else {
            Self::Upcoming
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Current => "current",
            Self::Upcoming => "upcoming",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepperItem {
    pub stage: StageId,
    pub label: &'static str,
    pub short_label: &'static str,
    pub state: StepState,
    pub clickable: bool,
}

#[must_use]
pub fn stepper(progress: &WizardProgress) -> Vec<StepperItem> {
    StageId::all()
        .map(|stage| {
            let info = stage.info();
            let state = StepState::of(stage, progress);
            StepperItem {
                stage,
                label: info.label,
                short_label: info.short_label,
                state,
                clickable: state == StepState::Completed,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavBar {
    pub show_back: bool,
    pub continue_enabled: bool,
    pub continue_label: &'static str,
    pub helper: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellView {
    pub stepper: Vec<StepperItem>,
    pub progress: f64,
    pub progress_percent: u8,
    pub caption: String,
    pub nav_bar: Option<NavBar>,
    pub exit_dialog_open: bool,
    pub loading: bool,
}

/// Stages that render their own back/continue controls.
#[must_use]
pub const fn self_managed(stage: StageId) -> bool {
    stage.get() <= StageId::APTITUDES.get()
}

/// Mobile caption, e.g. `Stage 2: Values`.
#[must_use]
pub fn caption(stage: StageId) -> String {
    format!("Stage {stage}: {}", stage.info().label)
}

/// Whether the shell's continue is enabled. A mounted controller's signal
/// wins; otherwise the last recorded validity for the stage is used.
#[must_use]
pub fn can_continue(store: &WizardStore, controller_validity: Option<bool>) -> bool {
    controller_validity.unwrap_or_else(|| store.progress().is_valid(store.current_stage()))
}

#[must_use]
pub fn view(store: &WizardStore, controller_validity: Option<bool>) -> ShellView {
    let progress = store.progress();
    let stage = store.current_stage();
    let overall = progress.overall();
    let nav_bar = (!self_managed(stage)).then(|| {
        let enabled = can_continue(store, controller_validity);
        NavBar {
            show_back: !stage.is_first(),
            continue_enabled: enabled,
            continue_label: if stage.is_last() { "Finish" } else { "Continue" },
            helper: (!enabled).then_some(CONTINUE_HELPER),
        }
    });
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let progress_percent = overall.round().clamp(0.0, 100.0) as u8;
    ShellView {
        stepper: stepper(progress),
        progress: overall,
        progress_percent,
        caption: caption(stage),
        nav_bar,
        exit_dialog_open: store.show_exit_dialog(),
        loading: store.is_loading(),
    }
}

/// Stepper click: only completed stages can be entered directly.
///
/// # Errors
///
/// Rejected for stages not yet completed.
pub fn click_stage(store: &mut WizardStore, stage: StageId) -> StepResult {
    if !store.progress().is_completed(stage) {
        return Err(Rejection::new(format!(
            "stage {stage} has not been completed yet"
        )));
    }
    store.go_to_stage(stage, None);
    Ok(())
}

/// # Errors
///
/// Rejected when the stage renders its own controls or is not continuable.
pub fn continue_stage(store: &mut WizardStore, controller_validity: Option<bool>) -> StepResult {
    let stage = store.current_stage();
    if self_managed(stage) {
        return Err(Rejection::new(format!(
            "stage {stage} manages its own navigation"
        )));
    }
    if !can_continue(store, controller_validity) {
        return Err(Rejection::new(CONTINUE_HELPER));
    }
    store.go_to_next_stage();
    Ok(())
}

/// # Errors
///
/// Rejected on self-managed stages and on the first stage.
pub fn back_stage(store: &mut WizardStore) -> StepResult {
    let stage = store.current_stage();
    if self_managed(stage) {
        return Err(Rejection::new(format!(
            "stage {stage} manages its own navigation"
        )));
    }
    if stage.is_first() {
        return Err(Rejection::new("already on the first stage"));
    }
    store.go_to_previous_stage();
    Ok(())
}

pub fn request_exit(store: &mut WizardStore) {
    store.set_show_exit_dialog(true);
}

pub fn stay(store: &mut WizardStore) {
    store.set_show_exit_dialog(false);
}

/// Close the dialog. Progress and drafts stay in storage.
///
/// # Errors
///
/// Rejected when the dialog is not open.
pub fn leave(store: &mut WizardStore) -> StepResult {
    if !store.show_exit_dialog() {
        return Err(Rejection::new("the exit dialog is not open"));
    }
    store.set_show_exit_dialog(false);
    log::info!("assessment left at stage {}", store.current_stage());
    Ok(())
}
