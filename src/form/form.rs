//! Form container: an ordered list of fields, their values, and
//! required-field validation.
//!
//! Each field wraps one widget state. The container never reaches into
//! widget internals beyond the value accessors; widgets stay usable on
//! their own.

use std::fmt;

use crate::config::model::{FieldConfig, FieldKind, FormConfig};
use crate::form::multiselect::{ChoiceOption, MultiSelectState};
use crate::form::select::SelectState;
use crate::form::text_input::TextInputState;

#[derive(Debug)]
pub enum Control {
    Text(TextInputState),
    Select(SelectState),
    MultiSelect(MultiSelectState),
}

impl Control {
    pub fn is_empty(&self) -> bool {
        match self {
            Control::Text(input) => input.text.trim().is_empty(),
            Control::Select(select) => select.selected.is_none(),
            Control::MultiSelect(ms) => ms.selected_len() == 0,
        }
    }

    /// Focus side effect: the multiselect opens when its search input gains
    /// focus. The single select only opens on an explicit key.
    pub fn on_focus(&mut self) {
        if let Control::MultiSelect(ms) = self {
            ms.open();
        }
    }

    /// Blur side effect: dropdowns close when focus leaves the field.
    pub fn on_blur(&mut self) {
        match self {
            Control::Select(select) => select.close(),
            Control::MultiSelect(ms) => ms.close(),
            Control::Text(_) => {}
        }
    }

    fn value(&self) -> FieldValue {
        match self {
            Control::Text(input) => FieldValue::Text(input.text.clone()),
            Control::Select(select) => FieldValue::Choice(select.selected_value()),
            Control::MultiSelect(ms) => FieldValue::Choices(ms.selected_values()),
        }
    }

    fn reset(&mut self) {
        match self {
            Control::Text(input) => input.clear(),
            Control::Select(select) => select.reset(),
            Control::MultiSelect(ms) => ms.reset(),
        }
    }
}

/// A submitted field value, keyed by field name in the values snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Choice(Option<String>),
    Choices(Vec<String>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => write!(f, "{:?}", text),
            FieldValue::Choice(Some(value)) => write!(f, "{:?}", value),
            FieldValue::Choice(None) => write!(f, "-"),
            FieldValue::Choices(values) => {
                write!(f, "[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", v)?;
                }
                write!(f, "]")
            }
        }
    }
}

#[derive(Debug)]
pub struct Field {
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub required: bool,
    pub error: Option<String>,
    pub control: Control,
}

#[derive(Debug)]
pub struct FormState {
    pub title: String,
    pub fields: Vec<Field>,
    pub submitting: bool,
}

impl FormState {
    pub fn from_config(config: &FormConfig) -> Self {
        let fields = config.fields.iter().map(build_field).collect();
        Self {
            title: config.title.clone(),
            fields,
            submitting: false,
        }
    }

    /// Required-field check. Sets or clears each field's error message and
    /// returns whether the whole form is valid.
    pub fn validate(&mut self) -> bool {
        let mut valid = true;
        for field in &mut self.fields {
            if field.required && field.control.is_empty() {
                field.error = Some("Required".to_string());
                valid = false;
            } else {
                field.error = None;
            }
        }
        valid
    }

    /// Snapshot of all field values, keyed by field name, in field order.
    pub fn values(&self) -> Vec<(String, FieldValue)> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.control.value()))
            .collect()
    }

    /// Restore every field to its initial state.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.control.reset();
            field.error = None;
        }
        self.submitting = false;
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

fn build_field(config: &FieldConfig) -> Field {
    let options = || -> Vec<ChoiceOption> {
        config
            .options
            .iter()
            .map(|o| ChoiceOption::new(o.id, o.value.clone()))
            .collect()
    };
    let control = match config.kind {
        FieldKind::Text => Control::Text(TextInputState::new()),
        FieldKind::Select => Control::Select(SelectState::new(options())),
        FieldKind::MultiSelect => Control::MultiSelect(MultiSelectState::new(options())),
    };
    Field {
        name: config.name.clone(),
        label: config.label.clone(),
        placeholder: config.placeholder.clone(),
        required: config.required,
        error: None,
        control,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::OptionConfig;

    fn sample_config() -> FormConfig {
        FormConfig {
            title: "Profile".to_string(),
            fields: vec![
                FieldConfig {
                    name: "name".to_string(),
                    label: "Name".to_string(),
                    placeholder: String::new(),
                    kind: FieldKind::Text,
                    required: true,
                    options: Vec::new(),
                },
                FieldConfig {
                    name: "colors".to_string(),
                    label: "Colors".to_string(),
                    placeholder: String::new(),
                    kind: FieldKind::MultiSelect,
                    required: false,
                    options: vec![
                        OptionConfig {
                            id: 1,
                            value: "blue".to_string(),
                        },
                        OptionConfig {
                            id: 2,
                            value: "red".to_string(),
                        },
                    ],
                },
            ],
        }
    }

    #[test]
    fn test_required_validation_sets_and_clears_error() {
        let mut form = FormState::from_config(&sample_config());
        assert!(!form.validate());
        assert_eq!(form.fields[0].error.as_deref(), Some("Required"));
        assert!(form.fields[1].error.is_none());

        if let Control::Text(input) = &mut form.fields[0].control {
            input.set_text("Ada");
        }
        assert!(form.validate());
        assert!(form.fields[0].error.is_none());
    }

    #[test]
    fn test_whitespace_only_text_counts_as_empty() {
        let mut form = FormState::from_config(&sample_config());
        if let Control::Text(input) = &mut form.fields[0].control {
            input.set_text("   ");
        }
        assert!(!form.validate());
    }

    #[test]
    fn test_values_snapshot_keyed_by_name() {
        let mut form = FormState::from_config(&sample_config());
        if let Control::Text(input) = &mut form.fields[0].control {
            input.set_text("Ada");
        }
        if let Control::MultiSelect(ms) = &mut form.fields[1].control {
            ms.add_option(2);
            ms.add_option(1);
        }
        let values = form.values();
        assert_eq!(
            values[0],
            ("name".to_string(), FieldValue::Text("Ada".to_string()))
        );
        assert_eq!(
            values[1],
            (
                "colors".to_string(),
                FieldValue::Choices(vec!["red".to_string(), "blue".to_string()])
            )
        );
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut form = FormState::from_config(&sample_config());
        if let Control::Text(input) = &mut form.fields[0].control {
            input.set_text("Ada");
        }
        if let Control::MultiSelect(ms) = &mut form.fields[1].control {
            ms.add_option(1);
            ms.set_search_text("re");
        }
        form.validate();
        form.submitting = true;
        form.reset();

        assert!(form.fields.iter().all(|f| f.control.is_empty()));
        assert!(form.fields.iter().all(|f| f.error.is_none()));
        assert!(!form.submitting);
        if let Control::MultiSelect(ms) = &form.fields[1].control {
            assert_eq!(ms.search.text, "");
            assert_eq!(ms.visible_len(), 2);
        }
    }
}
