//! ItemListView widget for displaying a sorted item list on a column grid.
//!
//! This module provides [`ItemListView`], the list surface of an item screen.
//! It renders the rows of a shared [`SortedListModel`] with a host-chosen row
//! layout and column count, and reports taps on items through its
//! `item_clicked` signal.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_itemlist::model::{ComparatorRegistry, SortMode, SortedListModel};
//! use horizon_itemlist::widget::{ActionId, ItemLayoutId, ItemListView};
//!
//! let comparators = ComparatorRegistry::new().with(0, |a: &String, b: &String| a.cmp(b));
//! let model = Arc::new(SortedListModel::new(
//!     vec!["b".to_string(), "a".to_string(), "c".to_string()],
//!     comparators,
//! ));
//! model.sort_by(SortMode::DEFAULT);
//!
//! let view = ItemListView::new(model, 2, ItemLayoutId::DEFAULT).unwrap();
//! view.item_clicked.connect(|(item, action)| {
//!     println!("{item} clicked with action {action:?}");
//! });
//!
//! assert_eq!(view.rows(), vec![vec!["a".to_string(), "b".to_string()], vec!["c".to_string()]]);
//! view.click(0, ActionId::OPEN);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use horizon_itemlist_core::logging::targets;
use horizon_itemlist_core::{ConnectionGuard, Signal};

use crate::error::{Error, Result};
use crate::model::{ListEntry, SortMode, SortedListModel};

/// Identifier of the host's row layout.
///
/// Opaque to this library; the host maps it to whatever it renders a row with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ItemLayoutId(pub u32);

impl ItemLayoutId {
    /// The built-in single-line row layout.
    pub const DEFAULT: ItemLayoutId = ItemLayoutId(0);
}

/// Action attached to a tap on an item.
///
/// The host assigns meaning to the values, except for [`ActionId::DELETE`]
/// which the item screen handles itself before forwarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ActionId(pub i32);

impl ActionId {
    /// A plain tap on the item.
    pub const OPEN: ActionId = ActionId(0);
    /// The item's delete control was tapped.
    pub const DELETE: ActionId = ActionId(1);
}

/// Position of a row on the view's column grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    /// Grid row, counted from the top.
    pub row: usize,
    /// Grid column, counted from the left.
    pub column: usize,
}

/// A view widget that displays the items of a [`SortedListModel`].
///
/// # Signals
///
/// - `item_clicked((T, ActionId))`: Emitted when the user taps an item
pub struct ItemListView<T: ListEntry> {
    model: Arc<SortedListModel<T>>,
    column_count: usize,
    item_layout: ItemLayoutId,

    // Row the view should scroll to after the last insertion.
    scroll_target: Arc<AtomicUsize>,
    _inserted_conn: ConnectionGuard<usize>,

    /// Signal emitted when an item is tapped.
    pub item_clicked: Signal<(T, ActionId)>,
}

impl<T: ListEntry> std::fmt::Debug for ItemListView<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemListView")
            .field("len", &self.model.len())
            .field("column_count", &self.column_count)
            .field("item_layout", &self.item_layout)
            .finish()
    }
}

impl<T: ListEntry> ItemListView<T> {
    /// Create a list view over `model`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `column_count` is zero.
    pub fn new(
        model: Arc<SortedListModel<T>>,
        column_count: usize,
        item_layout: ItemLayoutId,
    ) -> Result<Self> {
        if column_count == 0 {
            return Err(Error::invalid_configuration(
                "column count must be at least 1",
            ));
        }

        let scroll_target = Arc::new(AtomicUsize::new(0));
        let target = scroll_target.clone();
        let inserted_conn = model
            .signals()
            .rows_inserted
            .connect_scoped(move |&row| target.store(row, Ordering::SeqCst));

        Ok(Self {
            model,
            column_count,
            item_layout,
            scroll_target,
            _inserted_conn: inserted_conn,
            item_clicked: Signal::new(),
        })
    }

    /// Create a list view and sort its model by `initial_mode` before the
    /// first render.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `column_count` is zero.
    pub fn with_initial_sort(
        model: Arc<SortedListModel<T>>,
        column_count: usize,
        item_layout: ItemLayoutId,
        initial_mode: SortMode,
    ) -> Result<Self> {
        let view = Self::new(model, column_count, item_layout)?;
        view.model.sort_by(initial_mode);
        Ok(view)
    }

    /// The model this view renders.
    pub fn model(&self) -> &Arc<SortedListModel<T>> {
        &self.model
    }

    /// Number of grid columns.
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// The host row layout.
    pub fn item_layout(&self) -> ItemLayoutId {
        self.item_layout
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Insert `item` at the position `mode` orders it to.
    ///
    /// Returns the row it was rendered at; the view scrolls to that row.
    pub fn insert(&self, item: T, mode: SortMode) -> usize {
        self.model.insert(item, mode)
    }

    /// Remove the first item equal to `item`; no-op when absent.
    pub fn remove(&self, item: &T) -> Option<usize> {
        self.model.remove(item)
    }

    /// Install `items` verbatim, without re-sorting.
    pub fn replace_all(&self, items: Vec<T>) {
        self.model.replace_all(items);
    }

    /// Re-sort all rows by `mode`, falling back to the default mode when
    /// `mode` is unknown. Returns the mode applied.
    pub fn sort_by(&self, mode: SortMode) -> SortMode {
        self.model.sort_by(mode)
    }

    // =========================================================================
    // Rendered state
    // =========================================================================

    /// The rendered sequence, in display order.
    pub fn items(&self) -> Vec<T> {
        self.model.items()
    }

    /// The item rendered at `row`.
    pub fn item_at(&self, row: usize) -> Option<T> {
        self.model.get(row)
    }

    /// The rendered sequence split into grid rows of `column_count` items.
    pub fn rows(&self) -> Vec<Vec<T>> {
        self.model
            .items()
            .chunks(self.column_count)
            .map(<[T]>::to_vec)
            .collect()
    }

    /// Grid cell that the item at `row` is rendered in.
    pub fn grid_cell(&self, row: usize) -> GridCell {
        GridCell {
            row: row / self.column_count,
            column: row % self.column_count,
        }
    }

    /// Row the view scrolled to after the most recent insertion.
    pub fn scroll_target(&self) -> usize {
        self.scroll_target.load(Ordering::SeqCst)
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Handle a tap on the item at `row` with `action`.
    ///
    /// Emits `item_clicked`. Taps outside the rendered rows are ignored.
    pub fn click(&self, row: usize, action: ActionId) -> bool {
        let Some(item) = self.model.get(row) else {
            tracing::debug!(target: targets::VIEW, row, "click outside rendered rows ignored");
            return false;
        };

        tracing::trace!(target: targets::VIEW, row, action = action.0, "item clicked");
        self.item_clicked.emit((item, action));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ComparatorRegistry;
    use parking_lot::Mutex;

    fn model(items: &[&str]) -> Arc<SortedListModel<String>> {
        let comparators = ComparatorRegistry::new()
            .with(0, |a: &String, b: &String| a.cmp(b))
            .with(1, |a: &String, b: &String| b.cmp(a));
        Arc::new(SortedListModel::new(
            items.iter().map(|s| s.to_string()).collect(),
            comparators,
        ))
    }

    #[test]
    fn test_zero_columns_rejected() {
        let result = ItemListView::new(model(&["a"]), 0, ItemLayoutId::DEFAULT);
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_initial_sort_applied() {
        let view = ItemListView::with_initial_sort(
            model(&["b", "a", "c"]),
            1,
            ItemLayoutId(7),
            SortMode(1),
        )
        .unwrap();

        assert_eq!(view.items(), vec!["c", "b", "a"]);
        assert_eq!(view.item_layout(), ItemLayoutId(7));
        assert_eq!(view.column_count(), 1);
    }

    #[test]
    fn test_grid_layout() {
        let view = ItemListView::with_initial_sort(
            model(&["e", "d", "c", "b", "a"]),
            2,
            ItemLayoutId::DEFAULT,
            SortMode::DEFAULT,
        )
        .unwrap();

        assert_eq!(
            view.rows(),
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), "d".to_string()],
                vec!["e".to_string()],
            ]
        );
        assert_eq!(view.grid_cell(3), GridCell { row: 1, column: 1 });
        assert_eq!(view.grid_cell(4), GridCell { row: 2, column: 0 });
        assert_eq!(view.item_at(2), Some("c".to_string()));
        assert_eq!(view.item_at(5), None);
    }

    #[test]
    fn test_insert_scrolls_to_row() {
        let view = ItemListView::with_initial_sort(
            model(&["a", "c", "e"]),
            1,
            ItemLayoutId::DEFAULT,
            SortMode::DEFAULT,
        )
        .unwrap();

        let row = view.insert("d".to_string(), SortMode::DEFAULT);
        assert_eq!(row, 2);
        assert_eq!(view.scroll_target(), 2);
        assert_eq!(view.items().len(), 4);
    }

    #[test]
    fn test_click_emits_item_and_action() {
        let view = ItemListView::with_initial_sort(
            model(&["b", "a"]),
            1,
            ItemLayoutId::DEFAULT,
            SortMode::DEFAULT,
        )
        .unwrap();

        let clicks = Arc::new(Mutex::new(Vec::new()));
        let recv = clicks.clone();
        view.item_clicked
            .connect(move |(item, action)| recv.lock().push((item.clone(), *action)));

        assert!(view.click(1, ActionId(5)));
        assert!(!view.click(9, ActionId::OPEN));

        assert_eq!(*clicks.lock(), vec![("b".to_string(), ActionId(5))]);
    }
}
