//! Stage 2 draft: category picks, core values and questionnaire answers.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;

use super::catalog::{CareerMotivation, VALUE_CATEGORIES, VALUES_LIKERT_QUESTIONS, category};
use crate::error::{Rejection, StepResult};
use crate::likert::{LikertResponses, LikertScore, all_answered, normalize_responses};
use crate::storage::PersistedRecord;

pub const S2_DATA_KEY: &str = "yourvue-s2-data";

pub const PICKS_PER_CATEGORY: usize = 2;
pub const CORE_VALUE_COUNT: usize = 3;

pub type CategoryPicks = SmallVec<[String; PICKS_PER_CATEGORY]>;

/// A promoted value, tagged with its category *label*.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoreValue {
    pub name: String,
    pub category: String,
}

impl CoreValue {
    #[must_use]
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuesDraft {
    #[serde(default)]
    pub selections: BTreeMap<String, CategoryPicks>,
    #[serde(default)]
    pub core_values: SmallVec<[CoreValue; CORE_VALUE_COUNT]>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub likert_responses: LikertResponses,
    #[serde(default)]
    pub motivation_choice: Option<CareerMotivation>,
}

impl PersistedRecord for ValuesDraft {
    const KEY: &'static str = S2_DATA_KEY;

    fn fallback() -> Self {
        Self::default()
    }

    fn normalized(mut self) -> Self {
        self.normalize();
        self
    }
}

impl ValuesDraft {
    #[must_use]
    pub fn picks(&self, category_id: &str) -> &[String] {
        self.selections
            .get(category_id)
            .map(|picks| picks.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_picked(&self, category_id: &str, value: &str) -> bool {
        self.picks(category_id).iter().any(|v| v == value)
    }

    /// A value that cannot be added because its category is already full.
    #[must_use]
    pub fn is_pick_disabled(&self, category_id: &str, value: &str) -> bool {
        !self.is_picked(category_id, value) && self.picks(category_id).len() >= PICKS_PER_CATEGORY
    }

    #[must_use]
    pub fn category_complete(&self, category_id: &str) -> bool {
        self.picks(category_id).len() == PICKS_PER_CATEGORY
    }

    #[must_use]
    pub fn all_categories_complete(&self) -> bool {
        VALUE_CATEGORIES
            .iter()
            .all(|cat| self.category_complete(cat.id))
    }

    /// Toggle `value` in a category. Removing a pick also drops the matching
    /// core value.
    ///
    /// # Errors
    ///
    /// Rejected for unknown categories or values, and when adding to a full
    /// category.
    pub fn toggle_value(&mut self, category_id: &str, value: &str) -> StepResult {
        let cat = category(category_id)
            .ok_or_else(|| Rejection::new(format!("unknown value category `{category_id}`")))?;
        if !cat.contains(value) {
            return Err(Rejection::new(format!(
                "`{value}` is not part of {}",
                cat.label
            )));
        }

        let picks = self.selections.entry(cat.id.to_string()).or_default();
        if let Some(pos) = picks.iter().position(|v| v == value) {
            picks.remove(pos);
            self.core_values
                .retain(|core| !(core.category == cat.label && core.name == value));
            return Ok(());
        }
        if picks.len() >= PICKS_PER_CATEGORY {
            return Err(Rejection::new(format!(
                "{} already has {PICKS_PER_CATEGORY} values",
                cat.label
            )));
        }
        picks.push(value.to_string());
        Ok(())
    }

    /// Every picked value in catalog category order.
    #[must_use]
    pub fn pool(&self) -> Vec<CoreValue> {
        VALUE_CATEGORIES
            .iter()
            .flat_map(|cat| {
                self.picks(cat.id)
                    .iter()
                    .map(|name| CoreValue::new(name.clone(), cat.label))
            })
            .collect()
    }

    #[must_use]
    pub fn is_core(&self, candidate: &CoreValue) -> bool {
        self.core_values.contains(candidate)
    }

    #[must_use]
    pub fn core_complete(&self) -> bool {
        self.core_values.len() == CORE_VALUE_COUNT
    }

    /// # Errors
    ///
    /// Rejected when the value is not in the pool or three are already chosen.
    pub fn toggle_core_value(&mut self, candidate: &CoreValue) -> StepResult {
        if let Some(pos) = self.core_values.iter().position(|core| core == candidate) {
            self.core_values.remove(pos);
            return Ok(());
        }
        if !self.pool().contains(candidate) {
            return Err(Rejection::new(format!(
                "`{}` was not selected in {}",
                candidate.name, candidate.category
            )));
        }
        if self.core_values.len() >= CORE_VALUE_COUNT {
            return Err(Rejection::new("three core values are already selected"));
        }
        self.core_values.push(candidate.clone());
        Ok(())
    }

    #[must_use]
    pub fn explanation_complete(&self) -> bool {
        !self.explanation.trim().is_empty()
    }

    /// # Errors
    ///
    /// Rejected for question ids outside the values questionnaire.
    pub fn answer_likert(&mut self, question_id: &str, score: LikertScore) -> StepResult {
        if !VALUES_LIKERT_QUESTIONS.iter().any(|q| q.id == question_id) {
            return Err(Rejection::new(format!("unknown question `{question_id}`")));
        }
        self.likert_responses
            .insert(question_id.to_string(), Some(score));
        Ok(())
    }

    #[must_use]
    pub fn likert_complete(&self) -> bool {
        all_answered(&self.likert_responses, &VALUES_LIKERT_QUESTIONS)
    }

    /// Repair a draft read from storage so every invariant holds again.
    pub fn normalize(&mut self) {
        let mut selections = BTreeMap::new();
        for cat in &VALUE_CATEGORIES {
            let Some(stored) = self.selections.remove(cat.id) else {
                continue;
            };
            let mut picks = CategoryPicks::new();
            for value in stored {
                if picks.len() == PICKS_PER_CATEGORY {
                    break;
                }
                if cat.contains(&value) && !picks.contains(&value) {
                    picks.push(value);
                }
            }
            selections.insert(cat.id.to_string(), picks);
        }
        if !self.selections.is_empty() {
            log::debug!("dropping {} unknown value categories", self.selections.len());
        }
        self.selections = selections;

        let pool = self.pool();
        let mut cores: SmallVec<[CoreValue; CORE_VALUE_COUNT]> = SmallVec::new();
        for core in self.core_values.drain(..) {
            if cores.len() == CORE_VALUE_COUNT {
                break;
            }
            if pool.contains(&core) && !cores.contains(&core) {
                cores.push(core);
            }
        }
        self.core_values = cores;

        normalize_responses(&mut self.likert_responses, &VALUES_LIKERT_QUESTIONS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROWTH: &str = "Personal Growth & Self-Development";

    fn complete_selections(draft: &mut ValuesDraft) {
        for cat in &VALUE_CATEGORIES {
            draft.toggle_value(cat.id, cat.values[0]).unwrap();
            draft.toggle_value(cat.id, cat.values[1]).unwrap();
        }
    }

    #[test]
    fn third_pick_in_full_category_is_rejected() {
        let mut draft = ValuesDraft::default();
        draft.toggle_value("personal_growth", "Courage").unwrap();
        draft.toggle_value("personal_growth", "Vision").unwrap();
        assert!(draft.is_pick_disabled("personal_growth", "Wisdom"));
        assert!(draft.toggle_value("personal_growth", "Wisdom").is_err());
        assert_eq!(draft.picks("personal_growth"), ["Courage", "Vision"]);
    }

    #[test]
    fn unknown_categories_and_values_are_rejected() {
        let mut draft = ValuesDraft::default();
        assert!(draft.toggle_value("hobbies", "Chess").is_err());
        assert!(draft.toggle_value("enjoyment", "Courage").is_err());
        assert!(draft.selections.is_empty());
    }

    #[test]
    fn pool_follows_catalog_order() {
        let mut draft = ValuesDraft::default();
        draft.toggle_value("enjoyment", "Fun").unwrap();
        draft.toggle_value("personal_growth", "Vision").unwrap();
        draft.toggle_value("personal_growth", "Courage").unwrap();
        let names: Vec<String> = draft.pool().into_iter().map(|v| v.name).collect();
        assert_eq!(names, ["Vision", "Courage", "Fun"]);
    }

    #[test]
    fn deselecting_a_pick_prunes_the_matching_core_value() {
        let mut draft = ValuesDraft::default();
        complete_selections(&mut draft);
        let core = CoreValue::new("Achievement", GROWTH);
        draft.toggle_core_value(&core).unwrap();
        draft.toggle_value("personal_growth", "Achievement").unwrap();
        assert!(draft.core_values.is_empty());
    }

    #[test]
    fn shared_names_are_distinguished_by_category() {
        let mut draft = ValuesDraft::default();
        draft.toggle_value("values_principles", "Dignity").unwrap();
        draft.toggle_value("wellbeing", "Dignity").unwrap();
        let principled = CoreValue::new("Dignity", "Values & Principles");
        let inner = CoreValue::new("Dignity", "Well-being & Inner Life");
        draft.toggle_core_value(&principled).unwrap();
        draft.toggle_core_value(&inner).unwrap();
        draft.toggle_value("wellbeing", "Dignity").unwrap();
        assert_eq!(draft.core_values.as_slice(), [principled]);
    }

    #[test]
    fn core_values_are_capped_at_three() {
        let mut draft = ValuesDraft::default();
        complete_selections(&mut draft);
        let pool = draft.pool();
        assert_eq!(pool.len(), 14);
        for candidate in &pool[..3] {
            draft.toggle_core_value(candidate).unwrap();
        }
        assert!(draft.core_complete());
        assert!(draft.toggle_core_value(&pool[3]).is_err());
        draft.toggle_core_value(&pool[0]).unwrap();
        assert_eq!(draft.core_values.len(), 2);
        assert!(
            draft
                .toggle_core_value(&CoreValue::new("Wealth", "Lifestyle & Experience"))
                .is_err()
        );
    }

    #[test]
    fn normalization_repairs_stored_drafts() {
        let json = r#"{
            "selections": {
                "personal_growth": ["Courage", "Courage", "Vision", "Wisdom"],
                "made_up": ["Nothing"],
                "enjoyment": ["Fun", "Chess"]
            },
            "coreValues": [
                {"name": "Wisdom", "category": "Personal Growth & Self-Development"},
                {"name": "Fun", "category": "Enjoyment & Lightness"},
                {"name": "Fun", "category": "Enjoyment & Lightness"}
            ],
            "explanation": "because",
            "likertResponses": {"VAL_F7_Q1": 4, "BOGUS": 2},
            "motivationChoice": "MEANING"
        }"#;
        let mut draft: ValuesDraft = serde_json::from_str(json).unwrap();
        draft.normalize();
        assert_eq!(draft.picks("personal_growth"), ["Courage", "Vision"]);
        assert_eq!(draft.picks("enjoyment"), ["Fun"]);
        assert!(!draft.selections.contains_key("made_up"));
        assert_eq!(
            draft.core_values.as_slice(),
            [CoreValue::new("Fun", "Enjoyment & Lightness")]
        );
        assert_eq!(draft.likert_responses.len(), 9);
        assert!(!draft.likert_responses.contains_key("BOGUS"));
        assert_eq!(draft.motivation_choice, Some(CareerMotivation::Meaning));
    }

    #[test]
    fn explanation_requires_non_whitespace() {
        let mut draft = ValuesDraft::default();
        draft.explanation = "   \n".into();
        assert!(!draft.explanation_complete());
        draft.explanation = " growth ".into();
        assert!(draft.explanation_complete());
    }
}
