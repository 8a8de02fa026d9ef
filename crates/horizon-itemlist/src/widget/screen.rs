//! Composite item screen: a sort-and-add bar above a list view.
//!
//! [`ItemScreen`] owns both child surfaces and mediates between them. A new
//! selection in the bar re-sorts the list, a delete tap removes the item
//! before the host hears about it, and everything else is forwarded to the
//! host's [`ItemScreenListener`].

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use horizon_itemlist_core::logging::targets;
use horizon_itemlist_core::ConnectionGuard;

use super::list_view::{ActionId, ItemListView};
use super::sort_and_add_bar::{SortAndAddBar, SortSelector};
use crate::builder::ScreenConfig;
use crate::error::{Error, Result};
use crate::host::{ItemScreenListener, ListenerSlot, ListenerSource, ScreenId};
use crate::model::{ListEntry, SortMode, SortedListModel};

/// Regions of the screen that child surfaces are mounted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenRegion {
    /// Top strip holding the sort selector and add trigger.
    SortAndAdd,
    /// Remaining area holding the list.
    List,
}

type SharedListener<T> = Arc<ListenerSlot<T>>;

/// The bar mounted in [`ScreenRegion::SortAndAdd`] and the connections that
/// tie it to the screen.
struct MountedControls {
    bar: SortAndAddBar,
    _sort_conn: ConnectionGuard<SortMode>,
    _add_conn: ConnectionGuard<Vec<String>>,
}

/// The view mounted in [`ScreenRegion::List`].
struct MountedList<T: ListEntry> {
    view: ItemListView<T>,
    _click_conn: ConnectionGuard<(T, ActionId)>,
}

/// Composite screen combining an [`ItemListView`] and a [`SortAndAddBar`].
pub struct ItemScreen<T: ListEntry> {
    id: ScreenId,
    config: Arc<ScreenConfig<T>>,
    model: Arc<SortedListModel<T>>,
    current_sort: Arc<Mutex<SortMode>>,
    listener: SharedListener<T>,
    sort_and_add: Option<MountedControls>,
    list: Option<MountedList<T>>,
}

impl<T: ListEntry> std::fmt::Debug for ItemScreen<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemScreen")
            .field("id", &self.id)
            .field("current_sort", &*self.current_sort.lock())
            .field("attached", &self.is_attached())
            .field("sort_and_add_mounted", &self.has_child(ScreenRegion::SortAndAdd))
            .field("list_mounted", &self.has_child(ScreenRegion::List))
            .finish()
    }
}

impl<T: ListEntry> ItemScreen<T> {
    /// Attach a screen built from `config` to `host`.
    ///
    /// The listener capability is resolved first (the host itself, then its
    /// enclosing context); only then are the child surfaces created.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if neither the host nor its enclosing
    /// context provides an [`ItemScreenListener`]. Nothing is mounted in
    /// that case.
    pub fn attach(config: Arc<ScreenConfig<T>>, host: &dyn ListenerSource<T>) -> Result<Self> {
        let Some(listener) = host.resolve_listener() else {
            tracing::warn!(target: targets::SCREEN, "host has no item screen listener");
            return Err(Error::configuration(
                "host must implement the listener interface",
            ));
        };

        let model = Arc::new(SortedListModel::new(
            config.items.clone(),
            config.comparators.clone(),
        ));

        let mut screen = Self {
            id: ScreenId::next(),
            current_sort: Arc::new(Mutex::new(config.initial_sort)),
            config,
            model,
            listener: Arc::new(RwLock::new(Some(listener))),
            sort_and_add: None,
            list: None,
        };
        screen.mount_children()?;

        tracing::debug!(target: targets::SCREEN, id = ?screen.id, "item screen attached");
        Ok(screen)
    }

    /// Create fresh child surfaces in both regions, replacing any children
    /// mounted before. The list is sorted by the current sort mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the configured column count
    /// is zero. The regions keep their previous children in that case.
    pub fn mount_children(&mut self) -> Result<()> {
        let view = ItemListView::new(
            self.model.clone(),
            self.config.column_count,
            self.config.item_layout,
        )?;
        let requested = *self.current_sort.lock();
        let mode = view.sort_by(requested);
        *self.current_sort.lock() = mode;

        let selector = self
            .config
            .selector
            .as_ref()
            .map(|selector| SortSelector::new(selector.labels.iter().cloned(), mode.index()));
        let bar = SortAndAddBar::new(
            selector,
            self.config.show_add_button,
            self.config.add_dialog_fields.iter().cloned(),
        );

        let controls = MountedControls {
            _sort_conn: self.connect_sort_mode(&bar),
            _add_conn: self.connect_add_result(&bar),
            bar,
        };
        let list = MountedList {
            _click_conn: self.connect_item_clicked(&view),
            view,
        };

        let replaced_controls = self.sort_and_add.replace(controls).is_some();
        let replaced_list = self.list.replace(list).is_some();
        if replaced_controls || replaced_list {
            tracing::debug!(target: targets::SCREEN, id = ?self.id, "replaced previously mounted children");
        }
        Ok(())
    }

    fn connect_sort_mode(&self, controls: &SortAndAddBar) -> ConnectionGuard<SortMode> {
        let model = self.model.clone();
        let current_sort = self.current_sort.clone();
        controls.sort_mode_selected.connect_scoped(move |&mode| {
            let applied = model.sort_by(mode);
            *current_sort.lock() = applied;
        })
    }

    fn connect_add_result(&self, controls: &SortAndAddBar) -> ConnectionGuard<Vec<String>> {
        let listener = self.listener.clone();
        controls.add_result().connect_scoped(move |fields| {
            let listener = listener.read().clone();
            match listener {
                Some(listener) => listener.on_add_result(fields),
                None => tracing::warn!(
                    target: targets::SCREEN,
                    "add result dropped, screen is detached"
                ),
            }
        })
    }

    fn connect_item_clicked(&self, list: &ItemListView<T>) -> ConnectionGuard<(T, ActionId)> {
        let model = self.model.clone();
        let listener = self.listener.clone();
        list.item_clicked.connect_scoped(move |(item, action)| {
            if *action == ActionId::DELETE {
                model.remove(item);
            }
            let listener = listener.read().clone();
            match listener {
                Some(listener) => listener.on_item_clicked(item, *action),
                None => tracing::warn!(
                    target: targets::SCREEN,
                    action = action.0,
                    "item click dropped, screen is detached"
                ),
            }
        })
    }

    /// Release the host listener. Later events are dropped.
    pub fn detach(&mut self) {
        if self.listener.write().take().is_some() {
            tracing::debug!(target: targets::SCREEN, id = ?self.id, "item screen detached");
        }
    }

    /// Whether the screen still holds a host listener.
    pub fn is_attached(&self) -> bool {
        self.listener.read().is_some()
    }

    /// Weak handle to the listener slot, for containers that detach a
    /// displaced screen.
    pub(crate) fn listener_slot(&self) -> Weak<ListenerSlot<T>> {
        Arc::downgrade(&self.listener)
    }

    /// The screen identifier.
    pub fn id(&self) -> ScreenId {
        self.id
    }

    /// The configuration snapshot this screen was built from.
    pub fn config(&self) -> &ScreenConfig<T> {
        &self.config
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// The bar mounted in [`ScreenRegion::SortAndAdd`].
    pub fn controls(&self) -> Option<&SortAndAddBar> {
        self.sort_and_add.as_ref().map(|mounted| &mounted.bar)
    }

    /// Mutable access to the sort-and-add bar, for driving user gestures.
    pub fn controls_mut(&mut self) -> Option<&mut SortAndAddBar> {
        self.sort_and_add.as_mut().map(|mounted| &mut mounted.bar)
    }

    /// The view mounted in [`ScreenRegion::List`].
    pub fn list_view(&self) -> Option<&ItemListView<T>> {
        self.list.as_ref().map(|mounted| &mounted.view)
    }

    /// Whether a child is mounted in `region`.
    pub fn has_child(&self, region: ScreenRegion) -> bool {
        match region {
            ScreenRegion::SortAndAdd => self.sort_and_add.is_some(),
            ScreenRegion::List => self.list.is_some(),
        }
    }

    // =========================================================================
    // Host operations
    // =========================================================================

    /// Insert `item` where the current sort mode orders it. Returns its row.
    ///
    /// Called by the host once it has stored the item the add dialog
    /// described.
    pub fn insert(&self, item: T) -> usize {
        let mode = *self.current_sort.lock();
        self.model.insert(item, mode)
    }

    /// Remove the first item equal to `item`; no-op when absent.
    pub fn remove(&self, item: &T) -> Option<usize> {
        self.model.remove(item)
    }

    /// Install `items` verbatim. The current sort mode is not re-applied.
    pub fn replace_all(&self, items: Vec<T>) {
        self.model.replace_all(items);
    }

    /// Re-sort by `mode` on the host's request, as if it had been picked in
    /// the selector. Returns the mode applied.
    pub fn sort_externally(&mut self, mode: SortMode) -> SortMode {
        let applied = self.model.sort_by(mode);
        *self.current_sort.lock() = applied;
        if let Some(controls) = self.controls_mut() {
            controls.sync_sort_mode(applied);
        }
        applied
    }

    /// The last applied sort mode, for state restoration.
    pub fn current_sort_mode(&self) -> SortMode {
        *self.current_sort.lock()
    }

    /// The rendered sequence.
    pub fn items(&self) -> Vec<T> {
        self.model.items()
    }
}

impl<T: ListEntry> Drop for ItemScreen<T> {
    fn drop(&mut self) {
        self.detach();
    }
}
