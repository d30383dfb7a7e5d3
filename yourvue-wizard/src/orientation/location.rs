//! Debounced location autocomplete.
use serde::{Deserialize, Serialize};

use super::catalog::LOCATION_SUGGESTIONS;
use crate::timer::{Millis, Timeout};

/// Keyboard interaction with the suggestion list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKey {
    Down,
    Up,
    Enter,
    Escape,
}

/// Suggestions whose text contains `query`, ignoring case.
#[must_use]
pub fn filter_suggestions(query: &str) -> Vec<&'static str> {
    let needle = query.trim();
    if needle.is_empty() {
        return Vec::new();
    }
    let needle = needle.to_lowercase();
    LOCATION_SUGGESTIONS
        .iter()
        .copied()
        .filter(|loc| loc.to_lowercase().contains(&needle))
        .collect()
}

/// Autocomplete state. The list filters on the debounced query, not the raw
/// input; every keystroke restarts the debounce.
#[derive(Debug, Clone)]
pub struct LocationSearch {
    debounced: String,
    debounce: Timeout,
    debounce_ms: Millis,
    open: bool,
    highlight: Option<usize>,
}

impl LocationSearch {
    #[must_use]
    pub fn new(initial: &str, debounce_ms: Millis) -> Self {
        Self {
            debounced: initial.to_string(),
            debounce: Timeout::idle(),
            debounce_ms,
            open: false,
            highlight: None,
        }
    }

    /// The raw input changed; the caller owns the text itself.
    pub fn on_input(&mut self, now: Millis) {
        self.debounce.arm(now, self.debounce_ms);
        self.open = true;
        self.highlight = None;
    }

    pub fn on_focus(&mut self) {
        self.open = true;
    }

    /// Outside click or explicit dismissal.
    pub fn close(&mut self) {
        self.open = false;
        self.highlight = None;
    }

    /// Apply the debounce once it elapses; `value` is the current input text.
    pub fn tick(&mut self, now: Millis, value: &str) -> bool {
        if self.debounce.fire(now) {
            value.clone_into(&mut self.debounced);
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.debounce.deadline()
    }

    #[must_use]
    pub fn debounced_query(&self) -> &str {
        &self.debounced
    }

    #[must_use]
    pub fn suggestions(&self) -> Vec<&'static str> {
        filter_suggestions(&self.debounced)
    }

    #[must_use]
    pub fn dropdown_visible(&self) -> bool {
        self.open && !self.suggestions().is_empty()
    }

    #[must_use]
    pub const fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    /// Handle a navigation key; returns the suggestion chosen with Enter.
    pub fn on_key(&mut self, key: ListKey) -> Option<&'static str> {
        if !self.dropdown_visible() {
            return None;
        }
        let options = self.suggestions();
        let last = options.len() - 1;
        match key {
            ListKey::Down => {
                self.highlight = Some(match self.highlight {
                    Some(i) if i < last => i + 1,
                    _ => 0,
                });
                None
            }
            ListKey::Up => {
                self.highlight = Some(match self.highlight {
                    Some(i) if i > 0 => i - 1,
                    _ => last,
                });
                None
            }
            ListKey::Enter => {
                let picked = self.highlight.and_then(|i| options.get(i).copied());
                if picked.is_some() {
                    self.close();
                }
                picked
            }
            ListKey::Escape => {
                self.open = false;
                None
            }
        }
    }

    /// A suggestion was chosen with the pointer.
    pub fn on_pick(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_is_case_insensitive_substring() {
        assert_eq!(filter_suggestions("  "), Vec::<&str>::new());
        assert_eq!(filter_suggestions("LOND"), vec!["London, UK"]);
        let uk = filter_suggestions("uk");
        assert_eq!(uk.len(), 4);
        assert_eq!(filter_suggestions("general").len(), 3);
    }

    #[test]
    fn debounce_resets_on_each_keystroke() {
        let mut search = LocationSearch::new("", 300);
        search.on_input(0);
        search.on_input(200);
        assert!(!search.tick(300, "Ber"));
        assert_eq!(search.debounced_query(), "");
        assert!(search.tick(500, "Berl"));
        assert_eq!(search.debounced_query(), "Berl");
        assert_eq!(search.suggestions(), vec!["Berlin, Germany"]);
        assert!(search.dropdown_visible());
    }

    #[test]
    fn keyboard_navigation_wraps_and_selects() {
        let mut search = LocationSearch::new("", 300);
        search.on_input(0);
        search.tick(300, "uk");
        assert_eq!(search.on_key(ListKey::Up), None);
        assert_eq!(search.highlight(), Some(3));
        search.on_key(ListKey::Down);
        assert_eq!(search.highlight(), Some(0));
        assert_eq!(search.on_key(ListKey::Enter), Some("London, UK"));
        assert!(!search.dropdown_visible());
    }

    #[test]
    fn enter_without_highlight_selects_nothing() {
        let mut search = LocationSearch::new("paris", 300);
        search.on_focus();
        assert_eq!(search.on_key(ListKey::Enter), None);
        search.on_key(ListKey::Escape);
        assert!(!search.dropdown_visible());
    }
}
