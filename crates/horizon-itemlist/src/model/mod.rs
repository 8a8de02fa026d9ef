//! Models behind the item list widgets.
//!
//! - [`ComparatorRegistry`] maps a [`SortMode`] to an ordering function
//! - [`SortedListModel`] holds the displayed sequence and emits change signals

mod comparator;
mod sorted_list;

pub use comparator::{Comparator, ComparatorRegistry, SortMode};
pub use sorted_list::{ListEntry, ListModelSignals, SortedListModel};
