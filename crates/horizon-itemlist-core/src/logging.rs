//! Logging facilities for Horizon Itemlist.
//!
//! Horizon Itemlist uses the `tracing` crate for instrumentation. The library
//! never installs a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_itemlist=debug")
//!         .init();
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_itemlist_core::signal";
    /// Comparator registry and list model target.
    pub const MODEL: &str = "horizon_itemlist::model";
    /// List view and sort-and-add bar target.
    pub const VIEW: &str = "horizon_itemlist::widget";
    /// Composite screen lifecycle target.
    pub const SCREEN: &str = "horizon_itemlist::screen";
    /// Builder, settings and handle target.
    pub const BUILDER: &str = "horizon_itemlist::builder";
}
