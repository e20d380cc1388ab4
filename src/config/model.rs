//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the
//! box with no config file present.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_form")]
    pub form: FormConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            form: default_form(),
            ui: UiConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// The form definition: a title and an ordered list of fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default = "default_form_title")]
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    /// Only meaningful for select and multiselect fields.
    #[serde(default)]
    pub options: Vec<OptionConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Select,
    MultiSelect,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionConfig {
    pub id: u64,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    /// Seconds a transient status message stays on screen.
    #[serde(default = "default_status_message_secs")]
    pub status_message_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
            status_message_secs: default_status_message_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Append submitted form values to daily log files.
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_dir: default_log_dir(),
        }
    }
}

/// Rejected form definitions. Widgets trust their inputs; this is the one
/// boundary where duplicates are caught.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("duplicate field name {0:?} in form definition")]
    DuplicateFieldName(String),
    #[error("duplicate option id {id} in field {field:?}")]
    DuplicateOptionId { field: String, id: u64 },
    #[error("field {0:?} is a {1} field but has no options")]
    MissingOptions(String, &'static str),
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();
        for field in &self.form.fields {
            if !names.insert(field.name.as_str()) {
                return Err(ConfigError::DuplicateFieldName(field.name.clone()));
            }
            let mut ids = HashSet::new();
            for option in &field.options {
                if !ids.insert(option.id) {
                    return Err(ConfigError::DuplicateOptionId {
                        field: field.name.clone(),
                        id: option.id,
                    });
                }
            }
            let kind = match field.kind {
                FieldKind::Select => Some("select"),
                FieldKind::MultiSelect => Some("multi_select"),
                FieldKind::Text => None,
            };
            if let Some(kind) = kind {
                if field.options.is_empty() {
                    return Err(ConfigError::MissingOptions(field.name.clone(), kind));
                }
            }
        }
        Ok(())
    }
}

fn default_form_title() -> String {
    "Profile".to_string()
}

fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

fn default_status_message_secs() -> u64 {
    4
}

fn default_true() -> bool {
    true
}

fn default_log_dir() -> String {
    "~/.local/share/crabform/submissions".to_string()
}

fn color_options() -> Vec<OptionConfig> {
    ["blue", "red", "green", "amber", "teal", "violet"]
        .iter()
        .enumerate()
        .map(|(i, value)| OptionConfig {
            id: i as u64 + 1,
            value: (*value).to_string(),
        })
        .collect()
}

fn default_form() -> FormConfig {
    FormConfig {
        title: default_form_title(),
        fields: vec![
            FieldConfig {
                name: "name".into(),
                label: "Name".into(),
                placeholder: "Your full name".into(),
                kind: FieldKind::Text,
                required: true,
                options: Vec::new(),
            },
            FieldConfig {
                name: "email".into(),
                label: "Email".into(),
                placeholder: "you@example.com".into(),
                kind: FieldKind::Text,
                required: false,
                options: Vec::new(),
            },
            FieldConfig {
                name: "role".into(),
                label: "Role".into(),
                placeholder: String::new(),
                kind: FieldKind::Select,
                required: true,
                options: vec![
                    OptionConfig {
                        id: 1,
                        value: "admin".into(),
                    },
                    OptionConfig {
                        id: 2,
                        value: "editor".into(),
                    },
                    OptionConfig {
                        id: 3,
                        value: "viewer".into(),
                    },
                ],
            },
            FieldConfig {
                name: "favorite_colors".into(),
                label: "Favorite colors".into(),
                placeholder: "Type to filter".into(),
                kind: FieldKind::MultiSelect,
                required: false,
                options: color_options(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.form.fields.len(), 4);
    }

    #[test]
    fn test_duplicate_option_id_rejected() {
        let mut config = AppConfig::default();
        config.form.fields[3].options[1].id = 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateOptionId { id: 1, .. })
        ));
    }

    #[test]
    fn test_duplicate_field_name_rejected() {
        let mut config = AppConfig::default();
        config.form.fields[1].name = "name".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateFieldName(_))
        ));
    }

    #[test]
    fn test_select_without_options_rejected() {
        let mut config = AppConfig::default();
        config.form.fields[2].options.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingOptions(..))
        ));
    }

    #[test]
    fn test_minimal_toml_round_trip() {
        let toml_src = r#"
            [form]
            title = "Signup"

            [[form.fields]]
            name = "username"
            label = "Username"
            kind = "text"
            required = true
        "#;
        let config: AppConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.form.title, "Signup");
        assert_eq!(config.form.fields.len(), 1);
        assert_eq!(config.form.fields[0].kind, FieldKind::Text);
        assert!(config.ui.status_message_secs > 0);
        assert!(config.validate().is_ok());
    }
}
