use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::state::*;
use crate::form::multiselect::DROPDOWN_ROWS;
use crate::form::{Control, MultiSelectState, SelectState, TextInputState};
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, cevent)
        }
        AppEvent::Tick => handle_tick(state),
    }
}

fn handle_tick(state: &mut AppState) -> Vec<Action> {
    state.tick_count = state.tick_count.wrapping_add(1);
    let ttl = Duration::from_secs(state.config.ui.status_message_secs);
    if state.clear_expired_status(ttl) {
        state.dirty = true;
    }
    vec![]
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) => handle_key(state, key),
        CEvent::Resize(_, _) => {
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
        state.form.reset();
        state.refocus();
        state.set_status("Form reset", StatusKind::Info);
        return vec![];
    }

    // Tab moves through the fields and the submit button. Leaving a field
    // is its blur, entering one is its focus.
    match key.code {
        KeyCode::Tab => {
            state.cycle_focus();
            return vec![];
        }
        KeyCode::BackTab => {
            state.cycle_focus_back();
            return vec![];
        }
        _ => {}
    }

    match state.focus {
        FormFocus::Submit => handle_submit_key(state, key),
        FormFocus::Field(index) => handle_field_key(state, index, key),
    }
}

enum FieldOutcome {
    Handled,
    /// Move focus to the next field (Enter in a text field).
    Advance,
}

fn handle_field_key(state: &mut AppState, index: usize, key: KeyEvent) -> Vec<Action> {
    let Some(field) = state.form.fields.get_mut(index) else {
        return vec![];
    };
    let outcome = match &mut field.control {
        Control::Text(input) => handle_text_key(input, key),
        Control::Select(select) => handle_select_key(select, key),
        Control::MultiSelect(ms) => handle_multiselect_key(ms, key),
    };
    if matches!(outcome, FieldOutcome::Advance) {
        state.cycle_focus();
    }
    vec![]
}

fn handle_text_key(input: &mut TextInputState, key: KeyEvent) -> FieldOutcome {
    match key.code {
        KeyCode::Enter => return FieldOutcome::Advance,
        KeyCode::Backspace => {
            if key.modifiers.contains(KeyModifiers::ALT) {
                input.delete_word_back();
            } else {
                input.delete_back();
            }
        }
        KeyCode::Delete => input.delete_forward(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'a' => input.move_home(),
                    'e' => input.move_end(),
                    'w' => input.delete_word_back(),
                    'u' => input.clear(),
                    _ => {}
                }
            } else {
                input.insert_char(c);
            }
        }
        _ => {}
    }
    FieldOutcome::Handled
}

fn handle_select_key(select: &mut SelectState, key: KeyEvent) -> FieldOutcome {
    match key.code {
        KeyCode::Esc => select.close(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if select.open {
                select.pick_highlighted();
            } else {
                select.open();
            }
        }
        KeyCode::Up => {
            if select.open {
                select.move_up();
            } else {
                select.open();
            }
        }
        KeyCode::Down => {
            if select.open {
                select.move_down();
            } else {
                select.open();
            }
        }
        _ => {}
    }
    FieldOutcome::Handled
}

fn handle_multiselect_key(ms: &mut MultiSelectState, key: KeyEvent) -> FieldOutcome {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            // Dedicated open/close toggle
            KeyCode::Char(' ') => ms.toggle_open(),
            KeyCode::Char('a') => ms.search.move_home(),
            KeyCode::Char('e') => ms.search.move_end(),
            KeyCode::Char('w') => {
                ms.search.delete_word_back();
                ms.apply_filter();
            }
            KeyCode::Char('u') => ms.set_search_text(""),
            _ => {}
        }
        return FieldOutcome::Handled;
    }

    match key.code {
        KeyCode::Esc => ms.close(),
        KeyCode::Up => {
            ms.move_up();
            ms.ensure_visible(DROPDOWN_ROWS);
        }
        KeyCode::Down => {
            ms.move_down();
            ms.ensure_visible(DROPDOWN_ROWS);
        }
        KeyCode::Enter => {
            if ms.open {
                ms.add_highlighted();
                ms.ensure_visible(DROPDOWN_ROWS);
            } else {
                ms.open();
            }
        }
        KeyCode::Backspace => {
            if key.modifiers.contains(KeyModifiers::ALT) {
                ms.search.delete_word_back();
                ms.apply_filter();
            } else if ms.search.is_empty() {
                ms.remove_last();
            } else {
                ms.search.delete_back();
                ms.apply_filter();
            }
        }
        KeyCode::Delete => {
            ms.search.delete_forward();
            ms.apply_filter();
        }
        KeyCode::Left => ms.search.move_left(),
        KeyCode::Right => ms.search.move_right(),
        KeyCode::Home => ms.search.move_home(),
        KeyCode::End => ms.search.move_end(),
        KeyCode::Char(c) => {
            ms.search.insert_char(c);
            ms.apply_filter();
        }
        _ => {}
    }
    FieldOutcome::Handled
}

fn handle_submit_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => {
            if state.form.submitting {
                return vec![];
            }
            if state.form.validate() {
                state.form.submitting = true;
                let values = state.form.values();
                vec![Action::Submit { values }]
            } else {
                state.set_status("Fix the fields marked Required", StatusKind::Error);
                vec![]
            }
        }
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::form::FieldValue;

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Terminal(CEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl(c: char) -> AppEvent {
        AppEvent::Terminal(CEvent::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
        )))
    }

    fn new_state() -> AppState {
        // Default form: name (text), email (text), role (select),
        // favorite_colors (multiselect), then the submit button.
        AppState::new(AppConfig::default())
    }

    fn multiselect(state: &AppState) -> &MultiSelectState {
        match &state.form.fields[3].control {
            Control::MultiSelect(ms) => ms,
            _ => panic!("field 3 is the multiselect"),
        }
    }

    fn focus_multiselect(state: &mut AppState) {
        for _ in 0..3 {
            handle_event(state, key(KeyCode::Tab));
        }
        assert_eq!(state.focus, FormFocus::Field(3));
    }

    fn type_str(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_event(state, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_focus_opens_multiselect_and_blur_closes_it() {
        let mut state = new_state();
        focus_multiselect(&mut state);
        assert!(multiselect(&state).open);

        handle_event(&mut state, key(KeyCode::Tab));
        assert_eq!(state.focus, FormFocus::Submit);
        assert!(!multiselect(&state).open);

        handle_event(&mut state, key(KeyCode::BackTab));
        assert!(multiselect(&state).open);
    }

    #[test]
    fn test_toggle_overrides_focus_open() {
        let mut state = new_state();
        focus_multiselect(&mut state);
        handle_event(&mut state, ctrl(' '));
        assert!(!multiselect(&state).open);
        handle_event(&mut state, ctrl(' '));
        assert!(multiselect(&state).open);
    }

    #[test]
    fn test_typing_filters_and_enter_selects() {
        let mut state = new_state();
        focus_multiselect(&mut state);
        type_str(&mut state, "re");
        let visible: Vec<String> = multiselect(&state)
            .visible_options()
            .map(|o| o.value.clone())
            .collect();
        assert_eq!(visible, vec!["red", "green"]);

        handle_event(&mut state, key(KeyCode::Down));
        handle_event(&mut state, key(KeyCode::Enter));
        assert_eq!(multiselect(&state).selected_values(), vec!["green"]);
    }

    #[test]
    fn test_backspace_on_empty_search_pops_last_token() {
        let mut state = new_state();
        focus_multiselect(&mut state);
        type_str(&mut state, "red");
        handle_event(&mut state, key(KeyCode::Enter));
        assert_eq!(multiselect(&state).selected_values(), vec!["red"]);

        // First backspaces eat the search text, then one pops the token.
        for _ in 0..3 {
            handle_event(&mut state, key(KeyCode::Backspace));
        }
        assert_eq!(multiselect(&state).selected_values(), vec!["red"]);
        handle_event(&mut state, key(KeyCode::Backspace));
        assert_eq!(multiselect(&state).selected_len(), 0);
    }

    #[test]
    fn test_submit_with_missing_required_fields_sets_error() {
        let mut state = new_state();
        while state.focus != FormFocus::Submit {
            handle_event(&mut state, key(KeyCode::Tab));
        }
        let actions = handle_event(&mut state, key(KeyCode::Enter));
        assert!(actions.is_empty());
        assert!(state.form.fields[0].error.is_some());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn test_submit_valid_form_emits_action() {
        let mut state = new_state();
        type_str(&mut state, "Ada");

        // Jump to the role select and pick the first option.
        handle_event(&mut state, key(KeyCode::Tab));
        handle_event(&mut state, key(KeyCode::Tab));
        handle_event(&mut state, key(KeyCode::Enter));
        handle_event(&mut state, key(KeyCode::Enter));

        while state.focus != FormFocus::Submit {
            handle_event(&mut state, key(KeyCode::Tab));
        }
        let actions = handle_event(&mut state, key(KeyCode::Enter));
        assert_eq!(actions.len(), 1);
        match &actions[0] {
            Action::Submit { values } => {
                assert_eq!(values[0].1, FieldValue::Text("Ada".to_string()));
                assert_eq!(values[2].1, FieldValue::Choice(Some("admin".to_string())));
            }
            other => panic!("expected Submit, got {:?}", other),
        }
        assert!(state.form.submitting);

        // A second Enter while submitting is ignored.
        let actions = handle_event(&mut state, key(KeyCode::Enter));
        assert!(actions.is_empty());
    }

    #[test]
    fn test_ctrl_r_resets_form() {
        let mut state = new_state();
        type_str(&mut state, "Ada");
        focus_multiselect(&mut state);
        handle_event(&mut state, key(KeyCode::Enter));
        handle_event(&mut state, ctrl('r'));

        assert!(state.form.fields.iter().all(|f| f.control.is_empty()));
        // The focused multiselect reopens after the reset.
        assert!(multiselect(&state).open);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut state = new_state();
        let actions = handle_event(&mut state, ctrl('c'));
        assert!(matches!(actions[0], Action::Quit));
    }
}
