//! Widgets making up an item screen.
//!
//! - [`ItemListView`] - the list surface
//! - [`SortAndAddBar`] with its [`AddItemDialog`] - the sort/add control surface
//! - [`ItemScreen`] - the composite that mediates between them

mod add_item_dialog;
mod list_view;
mod screen;
mod sort_and_add_bar;

pub use add_item_dialog::{AddItemDialog, DialogField, DialogResult};
pub use list_view::{ActionId, GridCell, ItemLayoutId, ItemListView};
pub use screen::{ItemScreen, ScreenRegion};
pub use sort_and_add_bar::{SortAndAddBar, SortSelector};
