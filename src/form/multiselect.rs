//! Combobox multiselect state.
//!
//! The widget owns an immutable universe of options in creation order and
//! tracks the user's picks as a selection-ordered list of indexes into it.
//! The option pool (unselected options) and the visible list (pool filtered
//! by the search text) are derived index lists, so the pool and the selected
//! set always partition the universe and removing an option puts it back at
//! its original pool position.

use crate::form::text_input::TextInputState;

/// Rows shown in the dropdown before scrolling kicks in.
pub const DROPDOWN_ROWS: usize = 8;

/// One selectable option. Identity is `id`; `value` is both the display
/// text and the search key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub id: u64,
    pub value: String,
}

impl ChoiceOption {
    pub fn new(id: u64, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MultiSelectState {
    options: Vec<ChoiceOption>,
    /// Raw search text, stored verbatim.
    pub search: TextInputState,
    /// Indexes into `options`, in selection order.
    selected: Vec<usize>,
    /// Indexes of unselected options matching the current search text.
    visible: Vec<usize>,
    pub open: bool,
    /// Highlight cursor within the visible list.
    pub highlighted: usize,
    pub scroll_offset: usize,
}

impl MultiSelectState {
    pub fn new(options: Vec<ChoiceOption>) -> Self {
        let mut state = Self {
            options,
            search: TextInputState::new(),
            selected: Vec::new(),
            visible: Vec::new(),
            open: false,
            highlighted: 0,
            scroll_offset: 0,
        };
        state.apply_filter();
        state
    }

    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    /// Unselected options in creation order.
    pub fn pool(&self) -> Vec<&ChoiceOption> {
        self.options()
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.selected.contains(i))
            .map(|(_, o)| o)
            .collect()
    }

    /// Selected options in selection order.
    pub fn selected_options(&self) -> impl Iterator<Item = &ChoiceOption> {
        self.selected.iter().map(|&i| &self.options[i])
    }

    pub fn selected_len(&self) -> usize {
        self.selected.len()
    }

    /// Visible (filtered, unselected) options in pool order.
    pub fn visible_options(&self) -> impl Iterator<Item = &ChoiceOption> {
        self.visible.iter().map(|&i| &self.options[i])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Selected display values in selection order.
    pub fn selected_values(&self) -> Vec<String> {
        self.selected_options().map(|o| o.value.clone()).collect()
    }

    /// Recompute the visible list from the pool and the search text, then
    /// clamp the highlight and scroll cursors. Empty text keeps the full
    /// pool in pool order.
    pub fn apply_filter(&mut self) {
        let needle = self.search.text.to_lowercase();
        self.visible = self
            .options
            .iter()
            .enumerate()
            .filter(|(i, o)| {
                !self.selected.contains(i)
                    && (needle.is_empty() || o.value.to_lowercase().contains(&needle))
            })
            .map(|(i, _)| i)
            .collect();
        if self.highlighted >= self.visible.len() {
            self.highlighted = self.visible.len().saturating_sub(1);
        }
        if self.scroll_offset > self.highlighted {
            self.scroll_offset = self.highlighted;
        }
    }

    /// Replace the search text wholesale. Character-level edits go through
    /// `search` directly followed by `apply_filter`.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search.set_text(text);
        self.apply_filter();
    }

    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }

    /// Open forced by the search input gaining focus.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close forced by focus leaving the widget.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Move the option with `id` from the pool to the end of the selected
    /// set. No-op when already selected or unknown.
    pub fn add_option(&mut self, id: u64) {
        let Some(idx) = self.options.iter().position(|o| o.id == id) else {
            return;
        };
        if !self.selected.contains(&idx) {
            self.selected.push(idx);
            self.apply_filter();
        }
    }

    /// Add the highlighted visible option, returning its id when something
    /// was added.
    pub fn add_highlighted(&mut self) -> Option<u64> {
        let idx = *self.visible.get(self.highlighted)?;
        let id = self.options[idx].id;
        self.add_option(id);
        Some(id)
    }

    /// Return the option with `id` to the pool and drop it from the
    /// selected set.
    pub fn remove_option(&mut self, id: u64) {
        let before = self.selected.len();
        self.selected.retain(|&i| self.options[i].id != id);
        if self.selected.len() != before {
            self.apply_filter();
        }
    }

    /// Remove the most recently selected option. Bound to Backspace on an
    /// empty search text.
    pub fn remove_last(&mut self) -> bool {
        match self.selected.last().map(|&i| self.options[i].id) {
            Some(id) => {
                self.remove_option(id);
                true
            }
            None => false,
        }
    }

    pub fn move_up(&mut self) {
        if self.highlighted > 0 {
            self.highlighted -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.highlighted + 1 < self.visible.len() {
            self.highlighted += 1;
        }
    }

    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.highlighted < self.scroll_offset {
            self.scroll_offset = self.highlighted;
        } else if self.highlighted >= self.scroll_offset + height {
            self.scroll_offset = self.highlighted + 1 - height;
        }
    }

    pub fn reset(&mut self) {
        self.selected.clear();
        self.search.clear();
        self.open = false;
        self.highlighted = 0;
        self.scroll_offset = 0;
        self.apply_filter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> Vec<ChoiceOption> {
        vec![ChoiceOption::new(1, "blue"), ChoiceOption::new(2, "red")]
    }

    fn assert_partition(state: &MultiSelectState) {
        let pool_ids: Vec<u64> = state.pool().iter().map(|o| o.id).collect();
        let selected_ids: Vec<u64> = state.selected_options().map(|o| o.id).collect();
        for id in &selected_ids {
            assert!(!pool_ids.contains(id), "pool and selected must be disjoint");
        }
        let mut all: Vec<u64> = pool_ids.iter().chain(selected_ids.iter()).copied().collect();
        all.sort_unstable();
        let mut universe: Vec<u64> = state.options().iter().map(|o| o.id).collect();
        universe.sort_unstable();
        assert_eq!(all, universe, "pool and selected must cover the universe");
    }

    #[test]
    fn test_partition_holds_after_any_sequence() {
        let mut state = MultiSelectState::new(colors());
        assert_partition(&state);
        state.add_option(2);
        assert_partition(&state);
        state.add_option(1);
        assert_partition(&state);
        state.remove_option(2);
        assert_partition(&state);
        state.add_option(2);
        state.remove_last();
        assert_partition(&state);
    }

    #[test]
    fn test_add_then_remove_round_trips() {
        let mut state = MultiSelectState::new(vec![
            ChoiceOption::new(1, "blue"),
            ChoiceOption::new(2, "red"),
            ChoiceOption::new(3, "green"),
        ]);
        state.add_option(2);
        let pool_before: Vec<u64> = state.pool().iter().map(|o| o.id).collect();

        state.add_option(1);
        state.remove_option(1);

        let pool_after: Vec<u64> = state.pool().iter().map(|o| o.id).collect();
        assert_eq!(pool_before, pool_after, "pool order restored exactly");
        assert_eq!(state.selected_values(), vec!["red"]);
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut state = MultiSelectState::new(colors());
        state.add_option(1);
        state.add_option(1);
        assert_eq!(state.selected_len(), 1);
        assert_eq!(state.pool().len(), 1);
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let mut state = MultiSelectState::new(colors());
        state.set_search_text("BL");
        let visible: Vec<&str> = state.visible_options().map(|o| o.value.as_str()).collect();
        assert_eq!(visible, vec!["blue"]);
    }

    #[test]
    fn test_empty_search_restores_full_pool_in_order() {
        let mut state = MultiSelectState::new(colors());
        state.set_search_text("red");
        state.set_search_text("");
        let visible: Vec<&str> = state.visible_options().map(|o| o.value.as_str()).collect();
        assert_eq!(visible, vec!["blue", "red"]);
    }

    #[test]
    fn test_search_text_is_stored_verbatim() {
        let mut state = MultiSelectState::new(colors());
        state.set_search_text("  Re ");
        assert_eq!(state.search.text, "  Re ");
    }

    #[test]
    fn test_focus_type_select_and_remove_scenario() {
        let mut state = MultiSelectState::new(colors());
        assert!(!state.open);

        // Focus opens the dropdown.
        state.open();
        assert!(state.open);

        // Typing "r" narrows the visible list to red.
        state.search.insert_char('r');
        state.apply_filter();
        let visible: Vec<&str> = state.visible_options().map(|o| o.value.as_str()).collect();
        assert_eq!(visible, vec!["red"]);

        // Selecting red moves it out of the pool; "r" no longer matches
        // anything that is left.
        state.add_highlighted();
        assert_eq!(state.selected_values(), vec!["red"]);
        let pool: Vec<&str> = state.pool().iter().map(|o| o.value.as_str()).collect();
        assert_eq!(pool, vec!["blue"]);
        assert_eq!(state.visible_len(), 0);

        // Removing the token restores the pool.
        state.remove_option(2);
        assert_eq!(state.selected_len(), 0);
        let pool: Vec<&str> = state.pool().iter().map(|o| o.value.as_str()).collect();
        assert_eq!(pool, vec!["blue", "red"]);
    }

    #[test]
    fn test_highlight_clamped_when_visible_shrinks() {
        let mut state = MultiSelectState::new(vec![
            ChoiceOption::new(1, "alpha"),
            ChoiceOption::new(2, "beta"),
            ChoiceOption::new(3, "gamma"),
        ]);
        state.move_down();
        state.move_down();
        assert_eq!(state.highlighted, 2);
        state.set_search_text("beta");
        assert_eq!(state.highlighted, 0);
        state.set_search_text("zzz");
        assert_eq!(state.visible_len(), 0);
        assert_eq!(state.highlighted, 0);
    }

    #[test]
    fn test_remove_last_pops_in_selection_order() {
        let mut state = MultiSelectState::new(colors());
        state.add_option(2);
        state.add_option(1);
        assert!(state.remove_last());
        assert_eq!(state.selected_values(), vec!["red"]);
        assert!(state.remove_last());
        assert!(!state.remove_last());
    }

    #[test]
    fn test_empty_universe_is_legal() {
        let mut state = MultiSelectState::new(Vec::new());
        assert_eq!(state.visible_len(), 0);
        assert!(state.add_highlighted().is_none());
        state.set_search_text("anything");
        assert_eq!(state.visible_len(), 0);
    }

    #[test]
    fn test_toggle_focus_blur_state_machine() {
        let mut state = MultiSelectState::new(colors());
        state.toggle_open();
        assert!(state.open);
        state.toggle_open();
        assert!(!state.open);
        state.open();
        state.close();
        assert!(!state.open);
    }
}
