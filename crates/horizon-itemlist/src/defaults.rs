//! Library defaults applied by the builder when the host leaves an option unset.

use crate::model::SortMode;
use crate::widget::ItemLayoutId;

/// Number of columns the list view lays items out in.
pub const DEFAULT_COLUMN_COUNT: usize = 1;

/// Row layout used when the host supplies none.
pub const DEFAULT_ITEM_LAYOUT: ItemLayoutId = ItemLayoutId::DEFAULT;

/// Sort mode applied before the first render.
pub const DEFAULT_SORT_MODE: SortMode = SortMode::DEFAULT;

/// Whether the "add new item" trigger is shown.
pub const DEFAULT_INCLUDE_ADD_BUTTON: bool = false;

/// Whether the sort-mode selector is shown.
pub const DEFAULT_INCLUDE_SORT_SELECTOR: bool = false;

/// Field labels of the add-item dialog.
pub const DEFAULT_ADD_DIALOG_FIELDS: &[&str] = &["Name"];
