//! Suggestions checklist overlay state
//!
//! A multi-select list over the pending suggestion batch. Row order always
//! matches the batch order, so checked indices can be handed straight to
//! the notebook when the user confirms.

#[derive(Debug, Clone)]
pub struct SuggestionRow {
    pub label: String,
    pub checked: bool,
}

#[derive(Debug, Clone)]
pub struct SuggestionPicker {
    pub rows: Vec<SuggestionRow>,
    pub cursor: usize,
}

impl SuggestionPicker {
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            rows: labels
                .into_iter()
                .map(|label| SuggestionRow {
                    label,
                    checked: false,
                })
                .collect(),
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn move_up(&mut self) {
        if !self.rows.is_empty() {
            if self.cursor == 0 {
                self.cursor = self.rows.len() - 1;
            } else {
                self.cursor -= 1;
            }
        }
    }

    pub fn move_down(&mut self) {
        if !self.rows.is_empty() {
            self.cursor = (self.cursor + 1) % self.rows.len();
        }
    }

    pub fn toggle(&mut self, index: usize) {
        if let Some(row) = self.rows.get_mut(index) {
            row.checked = !row.checked;
        }
    }

    pub fn toggle_current(&mut self) {
        self.toggle(self.cursor);
    }

    /// Check every row, or uncheck all when everything is already checked.
    pub fn toggle_all(&mut self) {
        let all_checked = !self.rows.is_empty() && self.rows.iter().all(|r| r.checked);
        for row in &mut self.rows {
            row.checked = !all_checked;
        }
    }

    /// Checked row positions in batch order.
    pub fn checked_indices(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.checked)
            .map(|(i, _)| i)
            .collect()
    }
}
