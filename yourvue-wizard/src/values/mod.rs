//! Stage 2: values sorting, explanation, questionnaire and motivation.
pub mod catalog;
pub mod draft;

use serde::{Deserialize, Serialize};

use crate::error::{Rejection, StepResult};
use crate::likert::{LikertScore, answered_count, seeded_order};
use crate::progress::StageNavigator;
use crate::storage::{SharedStorage, load_record, save_record};

pub use catalog::{
    CareerMotivation, VALUE_CATEGORIES, VALUES_LIKERT_QUESTIONS, ValueCategory, category,
    category_by_label,
};
pub use draft::{CORE_VALUE_COUNT, CoreValue, PICKS_PER_CATEGORY, S2_DATA_KEY, ValuesDraft};

pub const SELECTION_HINT: &str = "Select 2 values from each category to continue";

const LIKERT_DOMAIN: &[u8] = b"values.likert";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuesStep {
    CategorySelection,
    Refinement,
    Explanation,
    Likert,
    Motivation,
}

impl ValuesStep {
    pub const COUNT: u8 = 5;

    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::CategorySelection => 1,
            Self::Refinement => 2,
            Self::Explanation => 3,
            Self::Likert => 4,
            Self::Motivation => 5,
        }
    }

    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::CategorySelection => Some(Self::Refinement),
            Self::Refinement => Some(Self::Explanation),
            Self::Explanation => Some(Self::Likert),
            Self::Likert => Some(Self::Motivation),
            Self::Motivation => None,
        }
    }

    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::CategorySelection => None,
            Self::Refinement => Some(Self::CategorySelection),
            Self::Explanation => Some(Self::Refinement),
            Self::Likert => Some(Self::Explanation),
            Self::Motivation => Some(Self::Likert),
        }
    }

    #[must_use]
    pub const fn continue_label(self) -> &'static str {
        match self {
            Self::Explanation => "These are my values",
            Self::Motivation => "Continue to Aptitudes",
            _ => "Continue",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub id: &'static str,
    pub label: &'static str,
    pub picks: Vec<String>,
    pub complete: bool,
    pub disabled: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikertItemView {
    pub id: &'static str,
    pub text: &'static str,
    pub answer: Option<LikertScore>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuesView {
    pub sub_step: u8,
    pub total_sub_steps: u8,
    pub categories: Vec<CategoryView>,
    pub pool: Vec<CoreValue>,
    pub core_values: Vec<CoreValue>,
    pub explanation: String,
    pub questions: Vec<LikertItemView>,
    pub answered: usize,
    pub motivation: Option<CareerMotivation>,
    pub can_continue: bool,
    pub show_back: bool,
    pub continue_label: &'static str,
    pub hint: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct ValuesController {
    storage: SharedStorage,
    draft: ValuesDraft,
    step: ValuesStep,
    likert_order: Vec<&'static str>,
}

impl ValuesController {
    /// Load the draft and fix the questionnaire order for this mount.
    #[must_use]
    pub fn mount(storage: SharedStorage, seed: u64) -> Self {
        let draft = load_record::<ValuesDraft>(storage.as_ref());
        Self {
            storage,
            draft,
            step: ValuesStep::CategorySelection,
            likert_order: seeded_order(&VALUES_LIKERT_QUESTIONS, seed, LIKERT_DOMAIN),
        }
    }

    #[must_use]
    pub const fn step(&self) -> ValuesStep {
        self.step
    }

    #[must_use]
    pub const fn draft(&self) -> &ValuesDraft {
        &self.draft
    }

    #[must_use]
    pub fn likert_order(&self) -> &[&'static str] {
        &self.likert_order
    }

    /// Stage 2 drives its own navigation, so the shell never continues.
    #[must_use]
    pub const fn validity(&self) -> bool {
        false
    }

    #[must_use]
    pub fn content_key(&self) -> String {
        format!("s2-step{}", self.step.number())
    }

    #[must_use]
    pub fn can_continue(&self) -> bool {
        match self.step {
            ValuesStep::CategorySelection => self.draft.all_categories_complete(),
            ValuesStep::Refinement => self.draft.core_complete(),
            ValuesStep::Explanation => self.draft.explanation_complete(),
            ValuesStep::Likert => self.draft.likert_complete(),
            ValuesStep::Motivation => self.draft.motivation_choice.is_some(),
        }
    }

    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        (self.step == ValuesStep::CategorySelection && !self.can_continue())
            .then_some(SELECTION_HINT)
    }

    fn expect_step(&self, step: ValuesStep) -> StepResult {
        if self.step == step {
            Ok(())
        } else {
            Err(Rejection::new(format!(
                "values is on sub-step {}, not {}",
                self.step.number(),
                step.number()
            )))
        }
    }

    fn persist(&self) {
        save_record(self.storage.as_ref(), &self.draft);
    }

    fn edit<F>(&mut self, step: ValuesStep, apply: F) -> StepResult
    where
        F: FnOnce(&mut ValuesDraft) -> StepResult,
    {
        self.expect_step(step)?;
        apply(&mut self.draft)?;
        self.persist();
        Ok(())
    }

    /// # Errors
    ///
    /// Rejected off the category step, for unknown values, or for a full category.
    pub fn toggle_value(&mut self, category_id: &str, value: &str) -> StepResult {
        self.edit(ValuesStep::CategorySelection, |draft| {
            draft.toggle_value(category_id, value)
        })
    }

    /// # Errors
    ///
    /// Rejected off the refinement step, outside the pool, or past three.
    pub fn toggle_core_value(&mut self, candidate: &CoreValue) -> StepResult {
        self.edit(ValuesStep::Refinement, |draft| {
            draft.toggle_core_value(candidate)
        })
    }

    /// # Errors
    ///
    /// Rejected off the explanation step.
    pub fn set_explanation(&mut self, text: &str) -> StepResult {
        self.edit(ValuesStep::Explanation, |draft| {
            text.clone_into(&mut draft.explanation);
            Ok(())
        })
    }

    /// # Errors
    ///
    /// Rejected off the questionnaire step or for unknown questions.
    pub fn answer_likert(&mut self, question_id: &str, score: LikertScore) -> StepResult {
        self.edit(ValuesStep::Likert, |draft| {
            draft.answer_likert(question_id, score)
        })
    }

    /// # Errors
    ///
    /// Rejected off the motivation step.
    pub fn choose_motivation(&mut self, motivation: CareerMotivation) -> StepResult {
        self.edit(ValuesStep::Motivation, |draft| {
            draft.motivation_choice = Some(motivation);
            Ok(())
        })
    }

    /// Move forward a sub-step, or finish the stage after the last one.
    ///
    /// # Errors
    ///
    /// Rejected while the current sub-step is incomplete.
    pub fn continue_step(&mut self, nav: &mut dyn StageNavigator) -> StepResult {
        if !self.can_continue() {
            return Err(Rejection::new(
                self.hint()
                    .unwrap_or("complete this step before continuing"),
            ));
        }
        match self.step.next() {
            Some(next) => self.step = next,
            None => nav.go_to_next_stage(),
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Rejected on the first sub-step; stage 2 never navigates back a stage.
    pub fn back_step(&mut self) -> StepResult {
        let previous = self
            .step
            .previous()
            .ok_or_else(|| Rejection::new("already on the first values sub-step"))?;
        self.step = previous;
        Ok(())
    }

    #[must_use]
    pub fn view(&self) -> ValuesView {
        let categories = VALUE_CATEGORIES
            .iter()
            .map(|cat| CategoryView {
                id: cat.id,
                label: cat.label,
                picks: self.draft.picks(cat.id).to_vec(),
                complete: self.draft.category_complete(cat.id),
                disabled: cat
                    .values
                    .iter()
                    .copied()
                    .filter(|value| self.draft.is_pick_disabled(cat.id, value))
                    .collect(),
            })
            .collect();
        let questions = self
            .likert_order
            .iter()
            .filter_map(|id| VALUES_LIKERT_QUESTIONS.iter().find(|q| q.id == *id))
            .map(|q| LikertItemView {
                id: q.id,
                text: q.text,
                answer: self.draft.likert_responses.get(q.id).copied().flatten(),
            })
            .collect();
        ValuesView {
            sub_step: self.step.number(),
            total_sub_steps: ValuesStep::COUNT,
            categories,
            pool: self.draft.pool(),
            core_values: self.draft.core_values.to_vec(),
            explanation: self.draft.explanation.clone(),
            questions,
            answered: answered_count(&self.draft.likert_responses, &VALUES_LIKERT_QUESTIONS),
            motivation: self.draft.motivation_choice,
            can_continue: self.can_continue(),
            show_back: self.step.previous().is_some(),
            continue_label: self.step.continue_label(),
            hint: self.hint(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[derive(Default)]
    struct Nav(u32);

    impl StageNavigator for Nav {
        fn go_to_next_stage(&mut self) {
            self.0 += 1;
        }

        fn go_to_previous_stage(&mut self) {}
    }

    fn score(v: u8) -> LikertScore {
        LikertScore::new(v).unwrap()
    }

    fn walk_to(s2: &mut ValuesController, nav: &mut Nav, target: ValuesStep) {
        while s2.step() != target {
            match s2.step() {
                ValuesStep::CategorySelection => {
                    for cat in &VALUE_CATEGORIES {
                        s2.toggle_value(cat.id, cat.values[0]).unwrap();
                        s2.toggle_value(cat.id, cat.values[1]).unwrap();
                    }
                }
                ValuesStep::Refinement => {
                    for core in &s2.draft().pool()[..3] {
                        s2.toggle_core_value(core).unwrap();
                    }
                }
                ValuesStep::Explanation => s2.set_explanation("They keep me honest.").unwrap(),
                ValuesStep::Likert => {
                    for q in &VALUES_LIKERT_QUESTIONS {
                        s2.answer_likert(q.id, score(4)).unwrap();
                    }
                }
                ValuesStep::Motivation => {
                    s2.choose_motivation(CareerMotivation::Learning).unwrap();
                }
            }
            s2.continue_step(nav).unwrap();
        }
    }

    #[test]
    fn gates_block_incomplete_steps() {
        let storage = MemoryStorage::shared();
        let mut nav = Nav::default();
        let mut s2 = ValuesController::mount(storage, 1);
        assert!(!s2.validity());
        assert_eq!(s2.hint(), Some(SELECTION_HINT));
        assert_eq!(
            s2.continue_step(&mut nav),
            Err(Rejection::new(SELECTION_HINT))
        );
        assert!(s2.back_step().is_err());
        walk_to(&mut s2, &mut nav, ValuesStep::Explanation);
        assert_eq!(s2.view().continue_label, "These are my values");
        s2.set_explanation("   ").unwrap();
        assert!(s2.continue_step(&mut nav).is_err());
        assert_eq!(nav.0, 0);
    }

    #[test]
    fn finishing_motivation_advances_the_stage() {
        let storage = MemoryStorage::shared();
        let mut nav = Nav::default();
        let mut s2 = ValuesController::mount(storage.clone(), 1);
        walk_to(&mut s2, &mut nav, ValuesStep::Motivation);
        assert_eq!(s2.view().continue_label, "Continue to Aptitudes");
        s2.choose_motivation(CareerMotivation::Values).unwrap();
        s2.continue_step(&mut nav).unwrap();
        assert_eq!(nav.0, 1);
        assert!(!s2.validity());

        let stored = load_record::<ValuesDraft>(storage.as_ref());
        assert_eq!(stored.core_values.len(), 3);
        assert_eq!(stored.motivation_choice, Some(CareerMotivation::Values));
    }

    #[test]
    fn back_keeps_answers() {
        let storage = MemoryStorage::shared();
        let mut nav = Nav::default();
        let mut s2 = ValuesController::mount(storage, 5);
        walk_to(&mut s2, &mut nav, ValuesStep::Likert);
        s2.back_step().unwrap();
        s2.back_step().unwrap();
        assert_eq!(s2.step(), ValuesStep::Refinement);
        assert_eq!(s2.content_key(), "s2-step2");
        assert!(s2.can_continue());
    }

    #[test]
    fn edits_are_scoped_to_their_step() {
        let storage = MemoryStorage::shared();
        let mut s2 = ValuesController::mount(storage, 1);
        assert!(s2.set_explanation("early").is_err());
        assert!(s2.answer_likert("VAL_F7_Q1", score(2)).is_err());
        assert!(s2.draft().explanation.is_empty());
    }

    #[test]
    fn likert_order_is_stable_per_mount_and_grouped() {
        let storage = MemoryStorage::shared();
        let first = ValuesController::mount(storage.clone(), 77);
        let second = ValuesController::mount(storage, 77);
        assert_eq!(first.likert_order(), second.likert_order());
        let groups: Vec<&str> = first
            .likert_order()
            .iter()
            .filter_map(|id| VALUES_LIKERT_QUESTIONS.iter().find(|q| q.id == *id))
            .map(|q| q.group)
            .collect();
        assert_eq!(
            groups,
            [
                "people_leadership",
                "people_leadership",
                "people_leadership",
                "service_responsibility",
                "service_responsibility",
                "service_responsibility",
                "emotional_awareness",
                "emotional_awareness",
                "emotional_awareness",
            ]
        );
    }

    #[test]
    fn view_reports_disabled_values_in_full_categories() {
        let storage = MemoryStorage::shared();
        let mut s2 = ValuesController::mount(storage, 1);
        s2.toggle_value("enjoyment", "Fun").unwrap();
        s2.toggle_value("enjoyment", "Humor").unwrap();
        let view = s2.view();
        let enjoyment = view
            .categories
            .iter()
            .find(|c| c.id == "enjoyment")
            .unwrap();
        assert!(enjoyment.complete);
        assert_eq!(enjoyment.disabled, ["Openness", "Uniqueness"]);
        assert_eq!(view.total_sub_steps, 5);
        assert!(!view.show_back);
    }
}
