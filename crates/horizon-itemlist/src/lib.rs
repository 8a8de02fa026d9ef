//! Horizon Itemlist - a "list with sort + add" screen for Horizon-style GUIs.
//!
//! An [`ItemScreen`](widget::ItemScreen) combines three widgets:
//!
//! - an [`ItemListView`](widget::ItemListView) rendering the items on a
//!   column grid,
//! - a [`SortAndAddBar`](widget::SortAndAddBar) with an optional sort-mode
//!   selector and an optional "add new item" trigger,
//! - an [`AddItemDialog`](widget::AddItemDialog) collecting the fields of a
//!   new item.
//!
//! The host configures the screen with an
//! [`ItemScreenBuilder`](builder::ItemScreenBuilder), mounts the resulting
//! [`ScreenHandle`](builder::ScreenHandle) into a
//! [`HostContainer`](host::HostContainer), and receives clicks and add
//! results through its [`ItemScreenListener`](host::ItemScreenListener).
//! Storing items is the host's job: after persisting a new item it calls
//! `insert` on the handle.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_itemlist::prelude::*;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Product {
//!     name: String,
//!     price: u32,
//! }
//!
//! struct Catalog;
//!
//! impl ItemScreenListener<Product> for Catalog {
//!     fn on_item_clicked(&self, item: &Product, action: ActionId) {
//!         if action == ActionId::DELETE {
//!             println!("delete {} from storage", item.name);
//!         }
//!     }
//!
//!     fn on_add_result(&self, fields: &[String]) {
//!         println!("store new product {fields:?}");
//!     }
//! }
//!
//! let comparators = ComparatorRegistry::new()
//!     .with(0, |a: &Product, b: &Product| a.name.cmp(&b.name))
//!     .with(1, |a: &Product, b: &Product| a.price.cmp(&b.price));
//!
//! let products = vec![
//!     Product { name: "Tea".into(), price: 4 },
//!     Product { name: "Bread".into(), price: 3 },
//! ];
//!
//! let mut handle = ItemScreenBuilder::new(products, comparators)
//!     .with_column_count(2)
//!     .with_add_button()
//!     .with_add_dialog_fields(["Name", "Price"])
//!     .with_sort_selector(["By name", "By price"], 0)
//!     .build()?;
//!
//! let window = Arc::new(HostContainer::<Product>::new("main window").with_listener(Arc::new(Catalog)));
//! handle.mount(&window, "catalog")?;
//!
//! handle.sort(1)?;
//! assert_eq!(handle.current_sort_mode()?, SortMode(1));
//! # Ok::<(), horizon_itemlist::Error>(())
//! ```

pub mod builder;
pub mod defaults;
mod error;
pub mod host;
pub mod model;
pub mod prelude;
pub mod settings;
pub mod widget;

pub use error::{Error, Result};
