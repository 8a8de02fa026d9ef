//! Modal dialog collecting the fields of a new item.
//!
//! The host decides which fields the dialog asks for. Accepting the dialog
//! emits the entered values in field order; rejecting it emits nothing.

use horizon_itemlist_core::logging::targets;
use horizon_itemlist_core::Signal;

/// Result of a dialog interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogResult {
    /// The dialog was rejected (cancelled or closed).
    #[default]
    Rejected,
    /// The dialog was accepted.
    Accepted,
}

impl DialogResult {
    /// Check if the dialog was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, DialogResult::Accepted)
    }
}

/// A labelled text field of the add-item dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogField {
    /// Label shown next to the input.
    pub label: String,
    /// Text currently entered.
    pub value: String,
}

/// Modal dialog for entering a new item.
///
/// # Signals
///
/// - `fields_submitted(Vec<String>)`: Emitted on accept with the field values
/// - `finished(DialogResult)`: Emitted whenever the dialog closes
pub struct AddItemDialog {
    title: String,
    fields: Vec<DialogField>,
    open: bool,
    result: DialogResult,

    /// Signal emitted with the entered values when the dialog is accepted.
    pub fields_submitted: Signal<Vec<String>>,
    /// Signal emitted when the dialog closes, accepted or not.
    pub finished: Signal<DialogResult>,
}

impl std::fmt::Debug for AddItemDialog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddItemDialog")
            .field("title", &self.title)
            .field("fields", &self.fields)
            .field("open", &self.open)
            .finish()
    }
}

impl AddItemDialog {
    /// Create a closed dialog asking for one field per label.
    pub fn new<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Self {
        Self {
            title: "Add item".to_string(),
            fields: labels
                .into_iter()
                .map(|label| DialogField {
                    label: label.into(),
                    value: String::new(),
                })
                .collect(),
            open: false,
            result: DialogResult::Rejected,
            fields_submitted: Signal::new(),
            finished: Signal::new(),
        }
    }

    /// Set the title using builder pattern.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// The dialog title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The dialog fields in display order.
    pub fn fields(&self) -> &[DialogField] {
        &self.fields
    }

    /// Enter `value` into the field at `index`.
    ///
    /// Returns `false` if there is no such field or the dialog is closed.
    pub fn set_field_value(&mut self, index: usize, value: impl Into<String>) -> bool {
        if !self.open {
            return false;
        }
        match self.fields.get_mut(index) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    /// The entered values in field order.
    pub fn field_values(&self) -> Vec<String> {
        self.fields.iter().map(|field| field.value.clone()).collect()
    }

    /// Check if the dialog is currently open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The result of the last interaction.
    pub fn result(&self) -> DialogResult {
        self.result
    }

    // =========================================================================
    // Dialog Lifecycle
    // =========================================================================

    /// Open the dialog with all fields cleared.
    pub fn open(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.result = DialogResult::Rejected;
        self.open = true;
        tracing::debug!(target: targets::VIEW, fields = self.fields.len(), "add dialog opened");
    }

    /// Accept the dialog and emit the entered values.
    ///
    /// Does nothing if the dialog is not open.
    pub fn accept(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.result = DialogResult::Accepted;
        self.fields_submitted.emit(self.field_values());
        self.finished.emit(DialogResult::Accepted);
    }

    /// Reject the dialog; no values are emitted.
    pub fn reject(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.result = DialogResult::Rejected;
        tracing::debug!(target: targets::VIEW, "add dialog cancelled");
        self.finished.emit(DialogResult::Rejected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_accept_emits_values_in_order() {
        let mut dialog = AddItemDialog::new(["Name", "Price"]);
        let submitted = Arc::new(Mutex::new(Vec::new()));
        let recv = submitted.clone();
        dialog
            .fields_submitted
            .connect(move |values| recv.lock().push(values.clone()));

        dialog.open();
        assert!(dialog.set_field_value(1, "3.50"));
        assert!(dialog.set_field_value(0, "Milk"));
        assert!(!dialog.set_field_value(2, "ignored"));
        dialog.accept();

        assert!(!dialog.is_open());
        assert!(dialog.result().is_accepted());
        assert_eq!(*submitted.lock(), vec![vec!["Milk".to_string(), "3.50".to_string()]]);
    }

    #[test]
    fn test_reject_emits_nothing() {
        let mut dialog = AddItemDialog::new(["Name"]);
        let submitted = Arc::new(Mutex::new(0));
        let recv = submitted.clone();
        dialog.fields_submitted.connect(move |_| *recv.lock() += 1);

        let finished = Arc::new(Mutex::new(Vec::new()));
        let recv = finished.clone();
        dialog.finished.connect(move |&result| recv.lock().push(result));

        dialog.open();
        dialog.set_field_value(0, "draft");
        dialog.reject();

        assert_eq!(*submitted.lock(), 0);
        assert_eq!(*finished.lock(), vec![DialogResult::Rejected]);
    }

    #[test]
    fn test_closed_dialog_ignores_input() {
        let mut dialog = AddItemDialog::new(["Name"]).with_title("New product");
        assert_eq!(dialog.title(), "New product");
        assert!(!dialog.set_field_value(0, "x"));
        dialog.accept();
        assert_eq!(dialog.result(), DialogResult::Rejected);
    }

    #[test]
    fn test_reopen_clears_fields() {
        let mut dialog = AddItemDialog::new(["Name"]);
        dialog.open();
        dialog.set_field_value(0, "first");
        dialog.accept();

        dialog.open();
        assert_eq!(dialog.field_values(), vec![String::new()]);
    }
}
