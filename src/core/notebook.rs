//! Session vocabulary state
//!
//! The notebook is the single mutable record of a chat session: the
//! extracted items, the theme label, the notes that produced them, and any
//! suggestions awaiting user selection. It is owned by the session and
//! mutated only through the action layer, never by rendering code.

use serde::{Deserialize, Serialize};

/// One vocabulary entry: an English/Chinese phrase pair with one example
/// sentence in each language. Free-form text, no uniqueness enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabItem {
    pub english: String,
    pub chinese: String,
    pub example_en: String,
    pub example_zh: String,
}

impl VocabItem {
    /// Single-line rendering used for suggestion rows.
    pub fn label(&self) -> String {
        format!(
            "{} {} 例句: {} {}",
            self.english, self.chinese, self.example_en, self.example_zh
        )
    }
}

#[derive(Debug, Default)]
pub struct Notebook {
    /// Ordered vocabulary list. Only grows or is replaced wholesale by a
    /// server response, or extended by adopted suggestions. Never reordered
    /// or deduplicated here.
    pub items: Vec<VocabItem>,
    /// Topic label for the session, may be empty.
    pub theme: String,
    /// Notes text of the last process-classified submission. Set when the
    /// request is issued and kept even if that request later fails, so a
    /// retry refines against the same context.
    pub original_notes: String,
    /// False until the first successful process/refine response.
    pub has_processed: bool,
    /// Candidate items pending selection. Replaced when new suggestions
    /// arrive, emptied on adopt or dismiss.
    pub suggestions: Vec<VocabItem>,
}

impl Notebook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return every field to its initial empty state.
    pub fn reset(&mut self) {
        self.items.clear();
        self.theme.clear();
        self.original_notes.clear();
        self.has_processed = false;
        self.suggestions.clear();
    }

    /// Apply the item list from a server response. A present list replaces
    /// the current one even when empty; an absent list keeps it.
    pub fn apply_items(&mut self, items: Option<Vec<VocabItem>>) {
        if let Some(items) = items {
            self.items = items;
        }
    }

    /// Apply the theme from a server response. Only a present, non-empty
    /// theme replaces the current one.
    pub fn apply_theme(&mut self, theme: Option<String>) {
        if let Some(theme) = theme {
            if !theme.is_empty() {
                self.theme = theme;
            }
        }
    }

    /// Store a fresh batch of suggestions, replacing any pending ones.
    pub fn set_suggestions(&mut self, suggestions: Vec<VocabItem>) {
        self.suggestions = suggestions;
    }

    /// Append the suggestions at `selected` (ascending positions into the
    /// pending batch) to the item list, preserving their original order,
    /// then drop the whole batch. Returns how many were adopted.
    pub fn adopt_suggestions(&mut self, selected: &[usize]) -> usize {
        let mut adopted = 0;
        for &idx in selected {
            if let Some(item) = self.suggestions.get(idx) {
                self.items.push(item.clone());
                adopted += 1;
            }
        }
        self.suggestions.clear();
        adopted
    }

    /// Drop pending suggestions without touching the item list.
    pub fn discard_suggestions(&mut self) {
        self.suggestions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::vocab_item;

    #[test]
    fn present_items_replace_even_when_empty() {
        let mut nb = Notebook::new();
        nb.items = vec![vocab_item("old", "旧")];
        nb.apply_items(Some(vec![]));
        assert!(nb.items.is_empty());
    }

    #[test]
    fn absent_items_keep_current() {
        let mut nb = Notebook::new();
        nb.items = vec![vocab_item("keep", "留")];
        nb.apply_items(None);
        assert_eq!(nb.items.len(), 1);
        assert_eq!(nb.items[0].english, "keep");
    }

    #[test]
    fn empty_theme_keeps_current() {
        let mut nb = Notebook::new();
        nb.theme = "旅行".to_string();
        nb.apply_theme(Some(String::new()));
        assert_eq!(nb.theme, "旅行");
        nb.apply_theme(None);
        assert_eq!(nb.theme, "旅行");
        nb.apply_theme(Some("美食".to_string()));
        assert_eq!(nb.theme, "美食");
    }

    #[test]
    fn adopt_appends_in_original_order() {
        let mut nb = Notebook::new();
        nb.items = vec![vocab_item("base", "基")];
        nb.set_suggestions(vec![
            vocab_item("first", "一"),
            vocab_item("second", "二"),
            vocab_item("third", "三"),
        ]);

        let adopted = nb.adopt_suggestions(&[0, 2]);

        assert_eq!(adopted, 2);
        assert_eq!(nb.items.len(), 3);
        assert_eq!(nb.items[1].english, "first");
        assert_eq!(nb.items[2].english, "third");
        assert!(nb.suggestions.is_empty());
    }

    #[test]
    fn adopt_ignores_out_of_range_positions() {
        let mut nb = Notebook::new();
        nb.set_suggestions(vec![vocab_item("only", "独")]);
        let adopted = nb.adopt_suggestions(&[0, 5]);
        assert_eq!(adopted, 1);
        assert_eq!(nb.items.len(), 1);
    }

    #[test]
    fn discard_leaves_items_alone() {
        let mut nb = Notebook::new();
        nb.items = vec![vocab_item("kept", "留")];
        nb.set_suggestions(vec![vocab_item("dropped", "弃")]);
        nb.discard_suggestions();
        assert!(nb.suggestions.is_empty());
        assert_eq!(nb.items.len(), 1);
    }

    #[test]
    fn reset_returns_every_field_to_initial() {
        let mut nb = Notebook::new();
        nb.items = vec![vocab_item("a", "甲")];
        nb.theme = "主题".to_string();
        nb.original_notes = "notes".to_string();
        nb.has_processed = true;
        nb.set_suggestions(vec![vocab_item("b", "乙")]);

        nb.reset();

        assert!(nb.items.is_empty());
        assert!(nb.theme.is_empty());
        assert!(nb.original_notes.is_empty());
        assert!(!nb.has_processed);
        assert!(nb.suggestions.is_empty());
    }
}
