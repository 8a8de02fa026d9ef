//! Builder and facade for item screens.
//!
//! [`ItemScreenBuilder`] validates the host's configuration and snapshots it
//! into a [`ScreenConfig`]. `build()` returns a [`ScreenHandle`], which mounts
//! the screen into a [`HostContainer`] and forwards the host's list
//! operations to it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_itemlist::builder::ItemScreenBuilder;
//! use horizon_itemlist::host::{HostContainer, ItemScreenListener};
//! use horizon_itemlist::model::ComparatorRegistry;
//! use horizon_itemlist::widget::ActionId;
//!
//! struct Host;
//!
//! impl ItemScreenListener<String> for Host {
//!     fn on_item_clicked(&self, _item: &String, _action: ActionId) {}
//!     fn on_add_result(&self, _fields: &[String]) {}
//! }
//!
//! let comparators = ComparatorRegistry::new()
//!     .with(0, |a: &String, b: &String| a.cmp(b))
//!     .with(1, |a: &String, b: &String| b.cmp(a));
//!
//! let mut handle = ItemScreenBuilder::new(vec!["b".to_string(), "a".to_string()], comparators)
//!     .with_add_button()
//!     .with_sort_selector(["A-Z", "Z-A"], 0)
//!     .build()?;
//!
//! let window = Arc::new(HostContainer::<String>::new("window").with_listener(Arc::new(Host)));
//! handle.mount(&window, "content")?;
//!
//! handle.insert("c".to_string())?;
//! assert_eq!(handle.screen()?.items(), vec!["a", "b", "c"]);
//! # Ok::<(), horizon_itemlist::Error>(())
//! ```

use std::sync::{Arc, Weak};

use horizon_itemlist_core::logging::targets;

use crate::defaults::{
    DEFAULT_ADD_DIALOG_FIELDS, DEFAULT_COLUMN_COUNT, DEFAULT_INCLUDE_ADD_BUTTON,
    DEFAULT_INCLUDE_SORT_SELECTOR, DEFAULT_ITEM_LAYOUT, DEFAULT_SORT_MODE,
};
use crate::error::{Error, Result};
use crate::host::{HostContainer, PlacementId, ScreenId};
use crate::model::{ComparatorRegistry, ListEntry, SortMode};
use crate::settings::ScreenSettings;
use crate::widget::{ItemLayoutId, ItemScreen};

/// Selector part of a [`ScreenConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorConfig {
    /// Entry labels; entry `i` selects sort mode `i`.
    pub labels: Vec<String>,
}

/// Immutable configuration snapshot an item screen is built from.
#[derive(Debug)]
pub struct ScreenConfig<T> {
    pub(crate) items: Vec<T>,
    pub(crate) comparators: ComparatorRegistry<T>,
    pub(crate) column_count: usize,
    pub(crate) item_layout: ItemLayoutId,
    pub(crate) show_add_button: bool,
    pub(crate) add_dialog_fields: Vec<String>,
    pub(crate) selector: Option<SelectorConfig>,
    pub(crate) initial_sort: SortMode,
}

impl<T> ScreenConfig<T> {
    /// The initial item sequence, before the initial sort.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The comparator registry.
    pub fn comparators(&self) -> &ComparatorRegistry<T> {
        &self.comparators
    }

    /// Number of grid columns.
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Host row layout.
    pub fn item_layout(&self) -> ItemLayoutId {
        self.item_layout
    }

    /// Whether the add trigger is shown.
    pub fn show_add_button(&self) -> bool {
        self.show_add_button
    }

    /// Field labels of the add-item dialog.
    pub fn add_dialog_fields(&self) -> &[String] {
        &self.add_dialog_fields
    }

    /// Selector configuration, if the selector is shown.
    pub fn selector(&self) -> Option<&SelectorConfig> {
        self.selector.as_ref()
    }

    /// Sort mode applied before the first render.
    pub fn initial_sort(&self) -> SortMode {
        self.initial_sort
    }
}

/// Builder for item screens.
///
/// Items and a comparator registry containing sort mode 0 are required;
/// everything else has a library default (see [`crate::defaults`]).
pub struct ItemScreenBuilder<T> {
    items: Vec<T>,
    comparators: ComparatorRegistry<T>,
    column_count: usize,
    item_layout: ItemLayoutId,
    show_add_button: bool,
    add_dialog_fields: Vec<String>,
    show_sort_selector: bool,
    selector_labels: Vec<String>,
    initial_sort: SortMode,
}

impl<T: ListEntry> ItemScreenBuilder<T> {
    /// Start a builder with the required inputs.
    pub fn new(items: Vec<T>, comparators: ComparatorRegistry<T>) -> Self {
        Self {
            items,
            comparators,
            column_count: DEFAULT_COLUMN_COUNT,
            item_layout: DEFAULT_ITEM_LAYOUT,
            show_add_button: DEFAULT_INCLUDE_ADD_BUTTON,
            add_dialog_fields: DEFAULT_ADD_DIALOG_FIELDS
                .iter()
                .map(ToString::to_string)
                .collect(),
            show_sort_selector: DEFAULT_INCLUDE_SORT_SELECTOR,
            selector_labels: Vec::new(),
            initial_sort: DEFAULT_SORT_MODE,
        }
    }

    /// Lay items out in `column_count` columns. Must be at least 1.
    pub fn with_column_count(mut self, column_count: usize) -> Self {
        self.column_count = column_count;
        self
    }

    /// Render rows with the host layout `layout`.
    pub fn with_item_layout(mut self, layout: ItemLayoutId) -> Self {
        self.item_layout = layout;
        self
    }

    /// Show the "add new item" trigger.
    pub fn with_add_button(mut self) -> Self {
        self.show_add_button = true;
        self
    }

    /// Ask for these fields in the add-item dialog.
    pub fn with_add_dialog_fields<S: Into<String>>(
        mut self,
        labels: impl IntoIterator<Item = S>,
    ) -> Self {
        self.add_dialog_fields = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Show the sort selector with one label per sort mode, starting at
    /// `initial_index`.
    pub fn with_sort_selector<S: Into<String>>(
        mut self,
        labels: impl IntoIterator<Item = S>,
        initial_index: usize,
    ) -> Self {
        self.show_sort_selector = true;
        self.selector_labels = labels.into_iter().map(Into::into).collect();
        self.initial_sort = SortMode(initial_index);
        self
    }

    /// Sort by `mode` before the first render.
    pub fn with_initial_sort(mut self, mode: SortMode) -> Self {
        self.initial_sort = mode;
        self
    }

    /// Apply layout settings loaded from a settings file.
    ///
    /// Every option the settings cover is replaced, including the selector
    /// and initial sort set by earlier [`with_sort_selector`](Self::with_sort_selector)
    /// or [`with_initial_sort`](Self::with_initial_sort) calls. Only the dialog
    /// fields keep their previous value when the settings list none. Call
    /// `with_settings` first to override single options afterwards.
    pub fn with_settings(mut self, settings: ScreenSettings) -> Self {
        self.column_count = settings.column_count;
        self.item_layout = ItemLayoutId(settings.item_layout);
        self.show_add_button = settings.show_add_button;
        if !settings.add_dialog_fields.is_empty() {
            self.add_dialog_fields = settings.add_dialog_fields;
        }
        self.show_sort_selector = settings.show_sort_selector;
        self.selector_labels = settings.selector_labels;
        self.initial_sort = SortMode(settings.initial_sort_index);
        self
    }

    /// Validate the configuration and snapshot it into a handle.
    ///
    /// An initial sort mode missing from the registry falls back to the
    /// default mode with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the registry has no sort
    /// mode 0, the column count is zero, or the selector is enabled without
    /// labels or with an entry whose sort mode has no comparator.
    pub fn build(self) -> Result<ScreenHandle<T>> {
        if !self.comparators.contains(SortMode::DEFAULT) {
            return Err(Error::invalid_configuration(
                "comparator registry must contain sort mode 0",
            ));
        }
        if self.column_count == 0 {
            return Err(Error::invalid_configuration(
                "column count must be at least 1",
            ));
        }
        if self.show_sort_selector && self.selector_labels.is_empty() {
            return Err(Error::invalid_configuration(
                "sort selector enabled without labels",
            ));
        }

        let initial_sort = match self.comparators.try_get(self.initial_sort) {
            Ok(_) => self.initial_sort,
            Err(err) => {
                tracing::warn!(target: targets::BUILDER, "{err}; starting with sort mode {}", SortMode::DEFAULT);
                SortMode::DEFAULT
            }
        };

        let selector = if self.show_sort_selector {
            if let Some(index) = (0..self.selector_labels.len())
                .find(|&index| !self.comparators.contains(SortMode(index)))
            {
                return Err(Error::invalid_configuration(format!(
                    "selector entry {index} has no comparator"
                )));
            }
            if self.selector_labels.len() < self.comparators.len() {
                tracing::warn!(
                    target: targets::BUILDER,
                    labels = self.selector_labels.len(),
                    comparators = self.comparators.len(),
                    "some sort modes have no selector entry"
                );
            }
            Some(SelectorConfig {
                labels: self.selector_labels,
            })
        } else {
            None
        };

        let add_dialog_fields = if self.add_dialog_fields.is_empty() {
            DEFAULT_ADD_DIALOG_FIELDS
                .iter()
                .map(ToString::to_string)
                .collect()
        } else {
            self.add_dialog_fields
        };

        let config = ScreenConfig {
            items: self.items,
            comparators: self.comparators,
            column_count: self.column_count,
            item_layout: self.item_layout,
            show_add_button: self.show_add_button,
            add_dialog_fields,
            selector,
            initial_sort,
        };

        tracing::debug!(
            target: targets::BUILDER,
            items = config.items.len(),
            comparators = config.comparators.len(),
            column_count = config.column_count,
            initial_sort = initial_sort.index(),
            "item screen configuration built"
        );

        Ok(ScreenHandle {
            config: Arc::new(config),
            mounted: None,
        })
    }
}

struct Mounted<T: ListEntry> {
    screen: ItemScreen<T>,
    container: Weak<HostContainer<T>>,
    placement: PlacementId,
}

/// The host's handle to a built item screen.
///
/// List operations fail with [`Error::NotMounted`] until
/// [`mount`](Self::mount) succeeds.
pub struct ScreenHandle<T: ListEntry> {
    config: Arc<ScreenConfig<T>>,
    mounted: Option<Mounted<T>>,
}

impl<T: ListEntry> std::fmt::Debug for ScreenHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenHandle")
            .field("screen", &self.mounted.as_ref().map(|m| m.screen.id()))
            .field("placement", &self.mounted.as_ref().map(|m| &m.placement))
            .finish()
    }
}

impl<T: ListEntry> ScreenHandle<T> {
    /// The configuration snapshot.
    pub fn config(&self) -> &ScreenConfig<T> {
        &self.config
    }

    /// Mount a screen built from the snapshot into `placement` of `container`.
    ///
    /// A screen already occupying that placement is detached and replaced;
    /// its handle stays mounted but no longer reaches the host. If this handle
    /// is already mounted, its current screen is detached once the new one
    /// is attached; the new screen starts again from the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if neither `container` nor its
    /// enclosing context provides an
    /// [`ItemScreenListener`](crate::host::ItemScreenListener). Nothing is
    /// mounted and the handle keeps its previous state.
    pub fn mount(
        &mut self,
        container: &Arc<HostContainer<T>>,
        placement: impl Into<PlacementId>,
    ) -> Result<ScreenId> {
        let placement = placement.into();
        let screen = ItemScreen::attach(self.config.clone(), &**container)?;
        let id = screen.id();

        self.detach();
        if let Some(previous) = container.place(placement.clone(), id, screen.listener_slot()) {
            tracing::debug!(target: targets::BUILDER, ?previous, "replaced screen in placement");
        }
        tracing::debug!(
            target: targets::BUILDER,
            container = container.name(),
            placement = %placement.0,
            "item screen mounted"
        );

        self.mounted = Some(Mounted {
            screen,
            container: Arc::downgrade(container),
            placement,
        });
        Ok(id)
    }

    /// Detach the mounted screen and release the host listener.
    ///
    /// Does nothing when not mounted.
    pub fn detach(&mut self) {
        if let Some(mut mounted) = self.mounted.take() {
            mounted.screen.detach();
            if let Some(container) = mounted.container.upgrade() {
                container.vacate(&mounted.placement, mounted.screen.id());
            }
        }
    }

    /// Whether a screen is mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// The mounted screen.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotMounted`] before mounting.
    pub fn screen(&self) -> Result<&ItemScreen<T>> {
        self.mounted
            .as_ref()
            .map(|mounted| &mounted.screen)
            .ok_or(Error::NotMounted)
    }

    /// The mounted screen, mutably, for driving user gestures.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotMounted`] before mounting.
    pub fn screen_mut(&mut self) -> Result<&mut ItemScreen<T>> {
        self.mounted
            .as_mut()
            .map(|mounted| &mut mounted.screen)
            .ok_or(Error::NotMounted)
    }

    /// Insert `item` where the current sort mode orders it. Returns its row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotMounted`] before mounting.
    pub fn insert(&self, item: T) -> Result<usize> {
        Ok(self.screen()?.insert(item))
    }

    /// Remove the first item equal to `item`; no-op when absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotMounted`] before mounting.
    pub fn remove(&self, item: &T) -> Result<Option<usize>> {
        Ok(self.screen()?.remove(item))
    }

    /// Install `items` verbatim, without re-sorting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotMounted`] before mounting.
    pub fn replace_all(&self, items: Vec<T>) -> Result<()> {
        self.screen()?.replace_all(items);
        Ok(())
    }

    /// Re-sort by sort mode `index`. Returns the mode applied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotMounted`] before mounting.
    pub fn sort(&mut self, index: usize) -> Result<SortMode> {
        Ok(self.screen_mut()?.sort_externally(SortMode(index)))
    }

    /// The last applied sort mode, for state restoration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotMounted`] before mounting.
    pub fn current_sort_mode(&self) -> Result<SortMode> {
        Ok(self.screen()?.current_sort_mode())
    }
}

impl<T: ListEntry> Drop for ScreenHandle<T> {
    fn drop(&mut self) {
        self.detach();
    }
}
