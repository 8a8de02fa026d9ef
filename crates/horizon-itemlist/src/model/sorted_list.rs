//! List model that keeps its rows ordered by a registered comparator.
//!
//! `SortedListModel<T>` backs the list view. All mutation goes through its
//! methods so that views connected to its signals stay consistent with the
//! backing sequence.

use parking_lot::RwLock;

use horizon_itemlist_core::logging::targets;
use horizon_itemlist_core::Signal;

use super::comparator::{ComparatorRegistry, SortMode};

/// Items shown by the list widgets.
///
/// Removal matches by value, so items need `PartialEq`; the rest of the bound
/// lets items travel through signals.
pub trait ListEntry: Clone + PartialEq + Send + Sync + 'static {}

impl<T: Clone + PartialEq + Send + Sync + 'static> ListEntry for T {}

/// Change notifications emitted by [`SortedListModel`].
#[derive(Debug, Default)]
pub struct ListModelSignals {
    /// A row was inserted at the given position.
    pub rows_inserted: Signal<usize>,
    /// The row at the given position was removed.
    pub rows_removed: Signal<usize>,
    /// Rows were reordered; the set of items is unchanged.
    pub layout_changed: Signal<SortMode>,
    /// The whole sequence was replaced.
    pub model_reset: Signal<()>,
}

/// An observable sequence of items sorted by a [`ComparatorRegistry`].
pub struct SortedListModel<T> {
    items: RwLock<Vec<T>>,
    comparators: ComparatorRegistry<T>,
    signals: ListModelSignals,
}

impl<T> std::fmt::Debug for SortedListModel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortedListModel")
            .field("len", &self.items.read().len())
            .field("comparators", &self.comparators)
            .finish()
    }
}

impl<T: ListEntry> SortedListModel<T> {
    /// Creates a model holding `items` in the given order.
    ///
    /// No sort is applied; call [`sort_by`](Self::sort_by) before first render.
    pub fn new(items: Vec<T>, comparators: ComparatorRegistry<T>) -> Self {
        Self {
            items: RwLock::new(items),
            comparators,
            signals: ListModelSignals::default(),
        }
    }

    /// The change signals of this model.
    pub fn signals(&self) -> &ListModelSignals {
        &self.signals
    }

    /// The registry this model sorts with.
    pub fn comparators(&self) -> &ComparatorRegistry<T> {
        &self.comparators
    }

    /// Returns the number of items in the model.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the model is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Returns a copy of the current sequence.
    pub fn items(&self) -> Vec<T> {
        self.items.read().clone()
    }

    /// Returns a copy of the item at `row`.
    pub fn get(&self, row: usize) -> Option<T> {
        self.items.read().get(row).cloned()
    }

    /// Returns the position of the first item equal to `item`.
    pub fn position(&self, item: &T) -> Option<usize> {
        self.items.read().iter().position(|existing| existing == item)
    }

    /// Inserts `item` where `mode`'s ordering places it.
    ///
    /// The item goes after any items that compare equal to it. Returns the
    /// row it was inserted at. If no comparator can be resolved the item is
    /// appended.
    pub fn insert(&self, item: T, mode: SortMode) -> usize {
        let row = {
            let mut items = self.items.write();
            let row = match self.comparators.resolve(mode) {
                Some((_, compare)) => {
                    items.partition_point(|existing| compare(existing, &item).is_le())
                }
                None => items.len(),
            };
            items.insert(row, item);
            row
        };

        tracing::debug!(target: targets::MODEL, row, mode = mode.index(), "item inserted");
        self.signals.rows_inserted.emit(row);
        row
    }

    /// Removes the first item equal to `item`.
    ///
    /// Returns the row it was removed from, or `None` (and emits nothing) if
    /// no item matched.
    pub fn remove(&self, item: &T) -> Option<usize> {
        let row = {
            let mut items = self.items.write();
            let row = items.iter().position(|existing| existing == item)?;
            items.remove(row);
            row
        };

        tracing::debug!(target: targets::MODEL, row, "item removed");
        self.signals.rows_removed.emit(row);
        Some(row)
    }

    /// Replaces the whole sequence verbatim.
    ///
    /// The new items are not re-sorted.
    pub fn replace_all(&self, items: Vec<T>) {
        let len = items.len();
        *self.items.write() = items;

        tracing::debug!(target: targets::MODEL, len, "model reset");
        self.signals.model_reset.emit(());
    }

    /// Sorts the sequence in place with the comparator registered for `mode`.
    ///
    /// Unknown modes fall back to the default mode. The sort is stable, so
    /// sorting twice by the same mode is the same as sorting once. Returns
    /// the mode actually applied.
    pub fn sort_by(&self, mode: SortMode) -> SortMode {
        let Some((applied, compare)) = self.comparators.resolve(mode) else {
            tracing::warn!(
                target: targets::MODEL,
                mode = mode.index(),
                "no default comparator registered, leaving order unchanged"
            );
            return mode;
        };

        self.items.write().sort_by(|a, b| compare(a, b));

        tracing::debug!(target: targets::MODEL, mode = applied.index(), "items sorted");
        self.signals.layout_changed.emit(applied);
        applied
    }
}
