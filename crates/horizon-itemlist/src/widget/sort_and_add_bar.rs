//! Control bar with an optional sort-mode selector and "add item" trigger.
//!
//! The bar turns raw gestures into semantic notifications: picking a
//! different entry in the selector emits `sort_mode_selected`, and accepting
//! the add-item dialog emits the entered field values on `add_result()`.
//!
//! # Example
//!
//! ```
//! use horizon_itemlist::widget::{SortAndAddBar, SortSelector};
//!
//! let mut bar = SortAndAddBar::new(
//!     Some(SortSelector::new(["By name", "By date"], 0)),
//!     true,
//!     ["Name"],
//! );
//!
//! bar.sort_mode_selected.connect(|mode| println!("Sort by {mode}"));
//! bar.add_result().connect(|fields| println!("Add {fields:?}"));
//!
//! bar.select_sort_mode(1);
//! ```

use horizon_itemlist_core::logging::targets;
use horizon_itemlist_core::Signal;

use super::add_item_dialog::AddItemDialog;
use crate::model::SortMode;

/// Dropdown listing the available sort modes by label.
///
/// Entry `i` selects sort mode `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSelector {
    labels: Vec<String>,
    current_index: usize,
}

impl SortSelector {
    /// Create a selector over `labels` showing `initial_index`.
    ///
    /// An out-of-range initial index shows the first entry.
    pub fn new<S: Into<String>>(labels: impl IntoIterator<Item = S>, initial_index: usize) -> Self {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let current_index = if initial_index < labels.len() {
            initial_index
        } else {
            0
        };
        Self {
            labels,
            current_index,
        }
    }

    /// The entry labels in display order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Index of the entry currently shown.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Label of the entry currently shown.
    pub fn current_text(&self) -> Option<&str> {
        self.labels.get(self.current_index).map(String::as_str)
    }

    /// Number of entries.
    pub fn count(&self) -> usize {
        self.labels.len()
    }
}

/// Sort/add control surface of an item screen.
///
/// # Signals
///
/// - `sort_mode_selected(SortMode)`: Emitted when the user picks another sort mode
/// - `add_result()` (`Vec<String>`): Emitted when the add-item dialog is accepted
pub struct SortAndAddBar {
    selector: Option<SortSelector>,
    show_add_button: bool,
    dialog: AddItemDialog,

    /// Signal emitted when a different sort mode is selected.
    pub sort_mode_selected: Signal<SortMode>,
}

impl std::fmt::Debug for SortAndAddBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortAndAddBar")
            .field("selector", &self.selector)
            .field("show_add_button", &self.show_add_button)
            .field("dialog", &self.dialog)
            .finish()
    }
}

impl SortAndAddBar {
    /// Create a control bar.
    ///
    /// A selector without labels is not rendered and never emits.
    pub fn new<S: Into<String>>(
        selector: Option<SortSelector>,
        show_add_button: bool,
        dialog_fields: impl IntoIterator<Item = S>,
    ) -> Self {
        let selector = selector.filter(|selector| selector.count() > 0);
        Self {
            selector,
            show_add_button,
            dialog: AddItemDialog::new(dialog_fields),
            sort_mode_selected: Signal::new(),
        }
    }

    /// The rendered selector, if any.
    pub fn selector(&self) -> Option<&SortSelector> {
        self.selector.as_ref()
    }

    /// Whether the selector is rendered.
    pub fn has_selector(&self) -> bool {
        self.selector.is_some()
    }

    /// Whether the add trigger is rendered.
    pub fn has_add_button(&self) -> bool {
        self.show_add_button
    }

    /// The add-item dialog.
    pub fn dialog(&self) -> &AddItemDialog {
        &self.dialog
    }

    /// Mutable access to the add-item dialog, for entering field values.
    pub fn dialog_mut(&mut self) -> &mut AddItemDialog {
        &mut self.dialog
    }

    // =========================================================================
    // Signal Access
    // =========================================================================

    /// Signal emitted with the field values when the add dialog is accepted.
    pub fn add_result(&self) -> &Signal<Vec<String>> {
        &self.dialog.fields_submitted
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    /// The user picked selector entry `index`.
    ///
    /// Emits `sort_mode_selected` when the entry exists and differs from the
    /// one shown. Returns whether the selection changed.
    pub fn select_sort_mode(&mut self, index: usize) -> bool {
        let Some(selector) = self.selector.as_mut() else {
            tracing::debug!(target: targets::VIEW, index, "no sort selector rendered");
            return false;
        };
        if index >= selector.count() || index == selector.current_index {
            return false;
        }

        selector.current_index = index;
        tracing::trace!(target: targets::VIEW, index, "sort mode selected");
        self.sort_mode_selected.emit(SortMode(index));
        true
    }

    /// Show `mode` in the selector without emitting.
    ///
    /// Used when the sort mode changes from outside the bar.
    pub fn sync_sort_mode(&mut self, mode: SortMode) {
        if let Some(selector) = self.selector.as_mut()
            && mode.index() < selector.count()
        {
            selector.current_index = mode.index();
        }
    }

    /// The user activated the add trigger.
    ///
    /// Opens the add-item dialog. Returns `false` if the trigger is hidden.
    pub fn trigger_add(&mut self) -> bool {
        if !self.show_add_button {
            tracing::debug!(target: targets::VIEW, "add trigger hidden, ignoring activation");
            return false;
        }
        self.dialog.open();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn record_modes(bar: &SortAndAddBar) -> Arc<Mutex<Vec<SortMode>>> {
        let modes = Arc::new(Mutex::new(Vec::new()));
        let recv = modes.clone();
        bar.sort_mode_selected.connect(move |&mode| recv.lock().push(mode));
        modes
    }

    #[test]
    fn test_selector_emits_on_change() {
        let mut bar = SortAndAddBar::new(
            Some(SortSelector::new(["Name", "Date", "Size"], 0)),
            false,
            ["Name"],
        );
        let modes = record_modes(&bar);

        assert!(bar.select_sort_mode(2));
        assert!(!bar.select_sort_mode(2));
        assert!(!bar.select_sort_mode(3));
        assert!(bar.select_sort_mode(0));

        assert_eq!(*modes.lock(), vec![SortMode(2), SortMode(0)]);
        assert_eq!(bar.selector().and_then(SortSelector::current_text), Some("Name"));
    }

    #[test]
    fn test_empty_labels_hide_selector() {
        let mut bar = SortAndAddBar::new(
            Some(SortSelector::new(Vec::<String>::new(), 0)),
            false,
            ["Name"],
        );
        let modes = record_modes(&bar);

        assert!(!bar.has_selector());
        assert!(!bar.select_sort_mode(0));
        assert!(modes.lock().is_empty());
    }

    #[test]
    fn test_out_of_range_initial_index() {
        let selector = SortSelector::new(["A", "B"], 5);
        assert_eq!(selector.current_index(), 0);
    }

    #[test]
    fn test_sync_does_not_emit() {
        let mut bar = SortAndAddBar::new(Some(SortSelector::new(["A", "B"], 0)), false, ["Name"]);
        let modes = record_modes(&bar);

        bar.sync_sort_mode(SortMode(1));

        assert_eq!(bar.selector().map(SortSelector::current_index), Some(1));
        assert!(modes.lock().is_empty());
    }

    #[test]
    fn test_add_flow() {
        let mut bar = SortAndAddBar::new(None, true, ["Name", "Qty"]);
        let results = Arc::new(Mutex::new(Vec::new()));
        let recv = results.clone();
        bar.add_result().connect(move |fields| recv.lock().push(fields.clone()));

        assert!(bar.trigger_add());
        assert!(bar.dialog().is_open());
        bar.dialog_mut().set_field_value(0, "Eggs");
        bar.dialog_mut().set_field_value(1, "12");
        bar.dialog_mut().accept();

        assert!(bar.trigger_add());
        bar.dialog_mut().reject();

        assert_eq!(*results.lock(), vec![vec!["Eggs".to_string(), "12".to_string()]]);
    }

    #[test]
    fn test_hidden_add_button() {
        let mut bar = SortAndAddBar::new(None, false, ["Name"]);
        assert!(!bar.has_add_button());
        assert!(!bar.trigger_add());
        assert!(!bar.dialog().is_open());
    }
}
