// ABOUTME: Per-instance picker configuration and the parent-driven filter pair
// ABOUTME: Defaults mirror the stock lookup: Name/Id display fields, setup icon

use serde::{Deserialize, Serialize};

use crate::record::RecordSchema;

/// Configuration recognized per picker instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Backend metadata object the picker searches.
    pub metadata_name: String,
    /// Primary display field.
    pub title: String,
    /// Secondary display field.
    pub subtitle: String,
    /// Field the parent-driven filter restricts on.
    pub filter_by: String,
    pub icon_name: String,
    pub placeholder: String,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            metadata_name: String::new(),
            title: "Name".to_string(),
            subtitle: "Id".to_string(),
            filter_by: String::new(),
            icon_name: "utility:setup".to_string(),
            placeholder: "Search...".to_string(),
        }
    }
}

impl PickerConfig {
    pub fn new(metadata_name: impl Into<String>) -> Self {
        Self {
            metadata_name: metadata_name.into(),
            ..Self::default()
        }
    }

    /// Resolve the field schema once for the lifetime of the instance.
    pub fn schema(&self) -> RecordSchema {
        RecordSchema::new(self.title.clone(), self.subtitle.clone())
    }
}

/// The parent-driven restriction applied when no free-text search is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// Field name the restriction tests.
    pub filter_by: String,
    /// Field value to match; `None` requests the unrestricted default set.
    pub filter_test: Option<String>,
}

impl Filter {
    pub fn new(filter_by: impl Into<String>, filter_test: Option<String>) -> Self {
        Self {
            filter_by: filter_by.into(),
            filter_test,
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.filter_test.is_none()
    }
}

/// One selectable value for the finder's filter combobox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PicklistOption {
    pub label: String,
    pub value: String,
}

impl PicklistOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Placeholder substituted when the backend has no picklist values.
    pub fn none() -> Self {
        Self::new("None", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_mirrors_stock_lookup() {
        let config = PickerConfig::default();
        assert_eq!(config.title, "Name");
        assert_eq!(config.subtitle, "Id");
        assert_eq!(config.icon_name, "utility:setup");
        assert_eq!(config.placeholder, "Search...");
        assert!(config.filter_by.is_empty());
    }

    #[test]
    fn schema_uses_configured_display_fields() {
        let config = PickerConfig {
            title: "MasterLabel".to_string(),
            subtitle: "DeveloperName".to_string(),
            ..PickerConfig::new("Widget__mdt")
        };
        let schema = config.schema();
        assert_eq!(schema.title_field, "MasterLabel");
        assert_eq!(schema.subtitle_field, "DeveloperName");
        assert_eq!(schema.id_field, "Id");
    }

    #[test]
    fn filter_without_value_is_unrestricted() {
        assert!(Filter::new("Status", None).is_unrestricted());
        assert!(!Filter::new("Status", Some("Active".into())).is_unrestricted());
    }

    #[test]
    fn none_option_has_empty_value() {
        let option = PicklistOption::none();
        assert_eq!(option.label, "None");
        assert_eq!(option.value, "");
    }
}
