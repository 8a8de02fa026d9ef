//! Host-side capability contract and containers.
//!
//! An item screen reports clicks and add-dialog results to an
//! [`ItemScreenListener`] supplied by the host. The listener is found at
//! mount time through [`ListenerSource`]: the immediate container is asked
//! first, then its enclosing context.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_itemlist::host::{HostContainer, ItemScreenListener, ListenerSource};
//! use horizon_itemlist::widget::ActionId;
//!
//! struct Shop;
//!
//! impl ItemScreenListener<String> for Shop {
//!     fn on_item_clicked(&self, item: &String, action: ActionId) {
//!         println!("{item}: {action:?}");
//!     }
//!
//!     fn on_add_result(&self, fields: &[String]) {
//!         println!("store {fields:?} and insert it afterwards");
//!     }
//! }
//!
//! let window = Arc::new(HostContainer::<String>::new("main window").with_listener(Arc::new(Shop)));
//! let panel = HostContainer::<String>::new("side panel").with_enclosing(window);
//! assert!(panel.resolve_listener().is_some());
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use horizon_itemlist_core::logging::targets;

use crate::widget::ActionId;

/// Callbacks a host must implement to mount an item screen.
pub trait ItemScreenListener<T>: Send + Sync {
    /// An item was tapped with `action`.
    ///
    /// For [`ActionId::DELETE`] the item has already been removed from the
    /// list; deleting it from durable storage is up to the host.
    fn on_item_clicked(&self, item: &T, action: ActionId);

    /// The add dialog was accepted with `fields`.
    ///
    /// The screen does not insert anything itself. The host persists the new
    /// item and then calls `insert`.
    fn on_add_result(&self, fields: &[String]);
}

/// Something that may provide the listener capability.
pub trait ListenerSource<T> {
    /// The listener this source provides itself, if any.
    fn listener(&self) -> Option<Arc<dyn ItemScreenListener<T>>>;

    /// The context this source is nested in, if any.
    fn enclosing(&self) -> Option<&dyn ListenerSource<T>> {
        None
    }

    /// Resolve the listener: this source first, then its enclosing context.
    fn resolve_listener(&self) -> Option<Arc<dyn ItemScreenListener<T>>> {
        self.listener()
            .or_else(|| self.enclosing().and_then(|outer| outer.listener()))
    }
}

/// Identifier of a mounted item screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenId(u64);

impl ScreenId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Named slot of a host container that a screen is mounted into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlacementId(pub String);

impl PlacementId {
    /// Create a placement id.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl From<&str> for PlacementId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Listener slot shared between a mounted screen and its slots. Emptying it
/// detaches the screen.
pub(crate) type ListenerSlot<T> = RwLock<Option<Arc<dyn ItemScreenListener<T>>>>;

/// Occupant of a placement.
struct Placement<T> {
    screen: ScreenId,
    listener: Weak<ListenerSlot<T>>,
}

/// A host container (window, panel, parent screen) that item screens are
/// mounted into.
///
/// Each placement holds at most one screen; mounting into an occupied
/// placement detaches the previous occupant and takes its place.
pub struct HostContainer<T> {
    name: String,
    listener: Option<Arc<dyn ItemScreenListener<T>>>,
    enclosing: Option<Arc<HostContainer<T>>>,
    placements: Mutex<HashMap<PlacementId, Placement<T>>>,
}

impl<T> std::fmt::Debug for HostContainer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostContainer")
            .field("name", &self.name)
            .field("has_listener", &self.listener.is_some())
            .field("enclosing", &self.enclosing.as_ref().map(|outer| outer.name.as_str()))
            .field(
                "placements",
                &self
                    .placements
                    .lock()
                    .iter()
                    .map(|(placement, occupant)| (placement.0.clone(), occupant.screen))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<T> HostContainer<T> {
    /// Create a container with no listener and no enclosing context.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            listener: None,
            enclosing: None,
            placements: Mutex::new(HashMap::new()),
        }
    }

    /// Provide the listener capability using builder pattern.
    pub fn with_listener(mut self, listener: Arc<dyn ItemScreenListener<T>>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Nest this container inside `enclosing` using builder pattern.
    pub fn with_enclosing(mut self, enclosing: Arc<HostContainer<T>>) -> Self {
        self.enclosing = Some(enclosing);
        self
    }

    /// The container name, used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The screen occupying `placement`, if any.
    pub fn occupant(&self, placement: &PlacementId) -> Option<ScreenId> {
        self.placements
            .lock()
            .get(placement)
            .map(|occupant| occupant.screen)
    }

    /// Put `screen` at `placement`, returning the screen it replaced.
    ///
    /// The replaced screen loses its listener, so it stops forwarding
    /// events to the host.
    pub(crate) fn place(
        &self,
        placement: PlacementId,
        screen: ScreenId,
        listener: Weak<ListenerSlot<T>>,
    ) -> Option<ScreenId> {
        let previous = self
            .placements
            .lock()
            .insert(placement, Placement { screen, listener })?;

        if let Some(slot) = previous.listener.upgrade()
            && slot.write().take().is_some()
        {
            tracing::debug!(
                target: targets::SCREEN,
                screen = ?previous.screen,
                container = %self.name,
                "displaced item screen detached"
            );
        }
        Some(previous.screen)
    }

    /// Clear `placement` if `screen` still occupies it.
    pub(crate) fn vacate(&self, placement: &PlacementId, screen: ScreenId) {
        let mut placements = self.placements.lock();
        if placements
            .get(placement)
            .is_some_and(|occupant| occupant.screen == screen)
        {
            placements.remove(placement);
        }
    }
}

impl<T> ListenerSource<T> for HostContainer<T> {
    fn listener(&self) -> Option<Arc<dyn ItemScreenListener<T>>> {
        self.listener.clone()
    }

    fn enclosing(&self) -> Option<&dyn ListenerSource<T>> {
        self.enclosing
            .as_deref()
            .map(|outer| outer as &dyn ListenerSource<T>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder;

    impl ItemScreenListener<u32> for Recorder {
        fn on_item_clicked(&self, _item: &u32, _action: ActionId) {}
        fn on_add_result(&self, _fields: &[String]) {}
    }

    #[test]
    fn test_resolve_prefers_container() {
        let own: Arc<dyn ItemScreenListener<u32>> = Arc::new(Recorder);
        let outer: Arc<dyn ItemScreenListener<u32>> = Arc::new(Recorder);

        let window = Arc::new(HostContainer::new("window").with_listener(outer.clone()));
        let panel = HostContainer::new("panel")
            .with_listener(own.clone())
            .with_enclosing(window);

        let resolved = panel.resolve_listener().unwrap();
        assert!(Arc::ptr_eq(&resolved, &own));
    }

    #[test]
    fn test_resolve_falls_back_to_enclosing() {
        let outer: Arc<dyn ItemScreenListener<u32>> = Arc::new(Recorder);
        let window = Arc::new(HostContainer::new("window").with_listener(outer.clone()));
        let panel = HostContainer::new("panel").with_enclosing(window);

        let resolved = panel.resolve_listener().unwrap();
        assert!(Arc::ptr_eq(&resolved, &outer));
    }

    #[test]
    fn test_resolve_fails_without_capability() {
        let window = Arc::new(HostContainer::<u32>::new("window"));
        let panel = HostContainer::new("panel").with_enclosing(window);
        assert!(panel.resolve_listener().is_none());
    }

    fn listener_slot() -> Arc<ListenerSlot<u32>> {
        Arc::new(RwLock::new(Some(Arc::new(Recorder) as Arc<dyn ItemScreenListener<u32>>)))
    }

    #[test]
    fn test_placements() {
        let window = HostContainer::<u32>::new("window");
        let slot = PlacementId::from("content");
        let first = ScreenId::next();
        let second = ScreenId::next();
        let first_listener = listener_slot();
        let second_listener = listener_slot();

        assert_eq!(
            window.place(slot.clone(), first, Arc::downgrade(&first_listener)),
            None
        );
        assert_eq!(
            window.place(slot.clone(), second, Arc::downgrade(&second_listener)),
            Some(first)
        );
        assert!(first_listener.read().is_none());
        assert!(second_listener.read().is_some());

        window.vacate(&slot, first);
        assert_eq!(window.occupant(&slot), Some(second));
        window.vacate(&slot, second);
        assert_eq!(window.occupant(&slot), None);
    }

    #[test]
    fn test_place_after_occupant_dropped() {
        let window = HostContainer::<u32>::new("window");
        let slot = PlacementId::from("content");
        let first = ScreenId::next();

        window.place(slot.clone(), first, Arc::downgrade(&listener_slot()));
        let second = ScreenId::next();
        assert_eq!(
            window.place(slot.clone(), second, Arc::downgrade(&listener_slot())),
            Some(first)
        );
        assert_eq!(window.occupant(&slot), Some(second));
    }
}
