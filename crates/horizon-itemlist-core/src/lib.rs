//! Core systems for Horizon Itemlist.
//!
//! This crate provides the foundation shared by the item list widgets:
//!
//! - **Signal/Slot System**: Type-safe notification from child widgets to
//!   their parent
//! - **Logging**: `tracing` target names for filtering by subsystem
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_itemlist_core::Signal;
//!
//! let add_result = Signal::<Vec<String>>::new();
//!
//! let conn_id = add_result.connect(|fields| {
//!     println!("New item fields: {:?}", fields);
//! });
//!
//! add_result.emit(vec!["Milk".to_string()]);
//! add_result.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use signal::{ConnectionGuard, ConnectionId, Signal};
