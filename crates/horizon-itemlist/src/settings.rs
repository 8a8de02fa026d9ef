//! Item screen settings loadable from TOML.
//!
//! Hosts that keep their screen layout in a settings file can load it into
//! [`ScreenSettings`] and apply it with
//! [`ItemScreenBuilder::with_settings`](crate::builder::ItemScreenBuilder::with_settings).
//! Items and comparators are code, so they are never part of the settings.
//!
//! # Example
//!
//! ```
//! use horizon_itemlist::settings::ScreenSettings;
//!
//! let settings = ScreenSettings::from_toml_str(r#"
//!     column_count = 2
//!     show_add_button = true
//!     show_sort_selector = true
//!     selector_labels = ["By name", "By price"]
//!     initial_sort_index = 1
//! "#).unwrap();
//!
//! assert_eq!(settings.column_count, 2);
//! assert_eq!(settings.selector_labels.len(), 2);
//! ```

use serde::Deserialize;

use horizon_itemlist_core::logging::targets;

use crate::defaults::{
    DEFAULT_ADD_DIALOG_FIELDS, DEFAULT_COLUMN_COUNT, DEFAULT_INCLUDE_ADD_BUTTON,
    DEFAULT_INCLUDE_SORT_SELECTOR, DEFAULT_ITEM_LAYOUT, DEFAULT_SORT_MODE,
};
use crate::error::Result;

/// Layout options of an item screen. Missing keys take the library defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScreenSettings {
    /// Number of grid columns.
    pub column_count: usize,
    /// Host row layout identifier.
    pub item_layout: u32,
    /// Whether the add trigger is shown.
    pub show_add_button: bool,
    /// Field labels of the add-item dialog.
    pub add_dialog_fields: Vec<String>,
    /// Whether the sort selector is shown.
    pub show_sort_selector: bool,
    /// Selector entry labels, one per sort mode.
    pub selector_labels: Vec<String>,
    /// Sort mode applied before the first render.
    pub initial_sort_index: usize,
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            column_count: DEFAULT_COLUMN_COUNT,
            item_layout: DEFAULT_ITEM_LAYOUT.0,
            show_add_button: DEFAULT_INCLUDE_ADD_BUTTON,
            add_dialog_fields: DEFAULT_ADD_DIALOG_FIELDS
                .iter()
                .map(ToString::to_string)
                .collect(),
            show_sort_selector: DEFAULT_INCLUDE_SORT_SELECTOR,
            selector_labels: Vec::new(),
            initial_sort_index: DEFAULT_SORT_MODE.index(),
        }
    }
}

impl ScreenSettings {
    /// Parse settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Settings`](crate::Error::Settings) if the text is not
    /// valid TOML or a key has the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: Self = toml::from_str(text)?;
        tracing::debug!(target: targets::BUILDER, ?settings, "loaded item screen settings");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_empty_text_gives_defaults() {
        let settings = ScreenSettings::from_toml_str("").unwrap();
        assert_eq!(settings, ScreenSettings::default());
        assert_eq!(settings.column_count, DEFAULT_COLUMN_COUNT);
        assert_eq!(settings.add_dialog_fields, vec!["Name".to_string()]);
        assert!(!settings.show_sort_selector);
    }

    #[test]
    fn test_partial_settings() {
        let settings = ScreenSettings::from_toml_str(
            r#"
            item_layout = 3
            add_dialog_fields = ["Title", "Due date"]
            "#,
        )
        .unwrap();

        assert_eq!(settings.item_layout, 3);
        assert_eq!(settings.add_dialog_fields, vec!["Title", "Due date"]);
        assert_eq!(settings.column_count, DEFAULT_COLUMN_COUNT);
    }

    #[test]
    fn test_wrong_type_is_error() {
        let err = ScreenSettings::from_toml_str("column_count = \"two\"").unwrap_err();
        assert!(matches!(err, Error::Settings(_)));
        assert!(err.is_construction_failure());
    }
}
