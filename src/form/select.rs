//! Single-select dropdown state.

use crate::form::multiselect::ChoiceOption;

#[derive(Debug, Default)]
pub struct SelectState {
    options: Vec<ChoiceOption>,
    /// Index into `options`; `None` renders the "Choose..." placeholder.
    pub selected: Option<usize>,
    pub open: bool,
    pub highlighted: usize,
}

impl SelectState {
    pub fn new(options: Vec<ChoiceOption>) -> Self {
        Self {
            options,
            selected: None,
            open: false,
            highlighted: 0,
        }
    }

    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    pub fn selected_option(&self) -> Option<&ChoiceOption> {
        self.selected.and_then(|i| self.options.get(i))
    }

    pub fn selected_value(&self) -> Option<String> {
        self.selected_option().map(|o| o.value.clone())
    }

    /// Open with the highlight on the current selection, if any.
    pub fn open(&mut self) {
        self.highlighted = self.selected.unwrap_or(0);
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn move_up(&mut self) {
        if self.highlighted > 0 {
            self.highlighted -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.highlighted + 1 < self.options.len() {
            self.highlighted += 1;
        }
    }

    /// Commit the highlighted option and close the dropdown.
    pub fn pick_highlighted(&mut self) {
        if self.highlighted < self.options.len() {
            self.selected = Some(self.highlighted);
        }
        self.open = false;
    }

    pub fn reset(&mut self) {
        self.selected = None;
        self.open = false;
        self.highlighted = 0;
    }
}
