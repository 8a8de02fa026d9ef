//! Convenient re-exports for hosts embedding an item screen.
//!
//! ```
//! use horizon_itemlist::prelude::*;
//! ```

pub use crate::builder::{ItemScreenBuilder, ScreenConfig, ScreenHandle};
pub use crate::error::{Error, Result};
pub use crate::host::{HostContainer, ItemScreenListener, ListenerSource, PlacementId, ScreenId};
pub use crate::model::{ComparatorRegistry, ListEntry, SortMode};
pub use crate::settings::ScreenSettings;
pub use crate::widget::{ActionId, ItemLayoutId, ItemScreen};

pub use horizon_itemlist_core::Signal;
