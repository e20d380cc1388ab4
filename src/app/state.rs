use crate::config::AppConfig;
use crate::form::FormState;
use std::time::{Duration, Instant};

/// Keyboard focus: one of the form's fields, or the submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Field(usize),
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub since: Instant,
}

pub struct AppState {
    pub config: AppConfig,
    pub form: FormState,
    pub focus: FormFocus,
    pub should_quit: bool,
    pub dirty: bool,
    pub status_message: Option<StatusMessage>,
    pub tick_count: u64,
    pub submissions: usize,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let form = FormState::from_config(&config.form);
        let focus = if form.field_count() > 0 {
            FormFocus::Field(0)
        } else {
            FormFocus::Submit
        };
        let mut state = Self {
            config,
            form,
            focus,
            should_quit: false,
            dirty: true,
            status_message: None,
            tick_count: 0,
            submissions: 0,
        };
        state.refocus();
        state
    }

    pub fn focused_field(&self) -> Option<usize> {
        match self.focus {
            FormFocus::Field(i) => Some(i),
            FormFocus::Submit => None,
        }
    }

    pub fn cycle_focus(&mut self) {
        self.move_focus(1);
    }

    pub fn cycle_focus_back(&mut self) {
        self.move_focus(-1);
    }

    fn move_focus(&mut self, delta: isize) {
        let fields = self.form.field_count();
        let total = fields + 1;
        let current = match self.focus {
            FormFocus::Field(i) => i,
            FormFocus::Submit => fields,
        };
        let next = (current as isize + delta).rem_euclid(total as isize) as usize;
        if next == current {
            return;
        }
        self.blur_current();
        self.focus = if next == fields {
            FormFocus::Submit
        } else {
            FormFocus::Field(next)
        };
        self.refocus();
        self.dirty = true;
    }

    fn blur_current(&mut self) {
        if let FormFocus::Field(i) = self.focus {
            if let Some(field) = self.form.fields.get_mut(i) {
                field.control.on_blur();
            }
        }
    }

    /// Re-apply the focus side effect of the currently focused field.
    pub fn refocus(&mut self) {
        if let FormFocus::Field(i) = self.focus {
            if let Some(field) = self.form.fields.get_mut(i) {
                field.control.on_focus();
            }
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            kind,
            since: Instant::now(),
        });
        self.dirty = true;
    }

    /// Drop the status message once its display time has elapsed. Returns
    /// true when something changed.
    pub fn clear_expired_status(&mut self, ttl: Duration) -> bool {
        if let Some(msg) = &self.status_message {
            if msg.since.elapsed() >= ttl {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    pub fn status_line(&self) -> String {
        if let Some(ref msg) = self.status_message {
            return msg.text.clone();
        }
        let filled = self
            .form
            .fields
            .iter()
            .filter(|f| !f.control.is_empty())
            .count();
        let mut line = format!("Fields: {}/{}", filled, self.form.field_count());
        if self.submissions > 0 {
            line.push_str(&format!(" | Submitted: {}", self.submissions));
        }
        line
    }

    /// Label for the focus indicator in the status bar.
    pub fn focus_label(&self) -> String {
        match self.focus {
            FormFocus::Submit => "SUBMIT".to_string(),
            FormFocus::Field(i) => self
                .form
                .fields
                .get(i)
                .map(|f| f.label.to_uppercase())
                .unwrap_or_default(),
        }
    }
}
