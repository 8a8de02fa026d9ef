//! Comparator registry mapping sort-mode indices to ordering functions.
//!
//! The host registers one ordering function per sort mode. Index 0 is the
//! default mode and must always be present; every lookup of an unknown index
//! falls back to it.
//!
//! # Example
//!
//! ```
//! use horizon_itemlist::model::{ComparatorRegistry, SortMode};
//!
//! let registry = ComparatorRegistry::<String>::new()
//!     .with(0, |a: &String, b: &String| a.cmp(b))
//!     .with(1, |a: &String, b: &String| b.cmp(a));
//!
//! assert!(registry.contains(SortMode(1)));
//! assert!(!registry.contains(SortMode(7)));
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use horizon_itemlist_core::logging::targets;

use crate::error::{Error, Result};

/// Index of a comparator in a [`ComparatorRegistry`].
///
/// A sort mode has no meaning outside the registry it was configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SortMode(pub usize);

impl SortMode {
    /// The default sort mode (index 0).
    pub const DEFAULT: SortMode = SortMode(0);

    /// The raw registry index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for SortMode {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A shared ordering function over items.
pub type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Mapping from sort mode to ordering function.
pub struct ComparatorRegistry<T> {
    comparators: BTreeMap<SortMode, Comparator<T>>,
}

impl<T> Clone for ComparatorRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            comparators: self.comparators.clone(),
        }
    }
}

impl<T> Default for ComparatorRegistry<T> {
    fn default() -> Self {
        Self {
            comparators: BTreeMap::new(),
        }
    }
}

impl<T> fmt::Debug for ComparatorRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparatorRegistry")
            .field("modes", &self.comparators.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<T> ComparatorRegistry<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a comparator using builder pattern.
    pub fn with<F>(mut self, index: usize, compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        self.insert(SortMode(index), compare);
        self
    }

    /// Registers a comparator, replacing any previous one at the same index.
    pub fn insert<F>(&mut self, mode: SortMode, compare: F)
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        self.comparators.insert(mode, Arc::new(compare));
    }

    /// Returns `true` if a comparator is registered for `mode`.
    pub fn contains(&self, mode: SortMode) -> bool {
        self.comparators.contains_key(&mode)
    }

    /// Number of registered comparators.
    pub fn len(&self) -> usize {
        self.comparators.len()
    }

    /// Returns `true` if no comparator is registered.
    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }

    /// Registered sort modes in ascending order.
    pub fn modes(&self) -> impl Iterator<Item = SortMode> + '_ {
        self.comparators.keys().copied()
    }

    /// Looks up the comparator for `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSortMode`] if nothing is registered for `mode`.
    pub fn try_get(&self, mode: SortMode) -> Result<&Comparator<T>> {
        self.comparators
            .get(&mode)
            .ok_or(Error::InvalidSortMode(mode))
    }

    /// Resolves `mode` leniently.
    ///
    /// Unknown modes fall back to [`SortMode::DEFAULT`] with a warning. Returns
    /// the mode actually selected with its comparator, or `None` when not even
    /// the default is registered.
    pub fn resolve(&self, mode: SortMode) -> Option<(SortMode, &Comparator<T>)> {
        match self.try_get(mode) {
            Ok(compare) => Some((mode, compare)),
            Err(err) => {
                tracing::warn!(
                    target: targets::MODEL,
                    requested = mode.index(),
                    "{err}; falling back to sort mode {}",
                    SortMode::DEFAULT
                );
                self.comparators
                    .get(&SortMode::DEFAULT)
                    .map(|compare| (SortMode::DEFAULT, compare))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ComparatorRegistry<i32> {
        ComparatorRegistry::new()
            .with(0, |a: &i32, b: &i32| a.cmp(b))
            .with(1, |a: &i32, b: &i32| b.cmp(a))
    }

    #[test]
    fn test_lookup() {
        let registry = registry();
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());

        let compare = registry.try_get(SortMode(1)).unwrap();
        assert_eq!(compare(&1, &2), Ordering::Greater);

        assert_eq!(registry.modes().collect::<Vec<_>>(), vec![SortMode(0), SortMode(1)]);
    }

    #[test]
    fn test_try_get_unknown_mode() {
        let registry = registry();
        let err = registry.try_get(SortMode(5)).err().unwrap();
        assert!(matches!(err, Error::InvalidSortMode(SortMode(5))));
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let registry = registry();
        let (mode, compare) = registry.resolve(SortMode(9)).unwrap();
        assert_eq!(mode, SortMode::DEFAULT);
        assert_eq!(compare(&1, &2), Ordering::Less);
    }

    #[test]
    fn test_resolve_without_default() {
        let registry = ComparatorRegistry::<i32>::new().with(3, |a: &i32, b: &i32| a.cmp(b));
        assert!(registry.resolve(SortMode(1)).is_none());
        assert_eq!(registry.resolve(SortMode(3)).map(|(mode, _)| mode), Some(SortMode(3)));
    }

    #[test]
    fn test_insert_replaces() {
        let mut registry = registry();
        registry.insert(SortMode(0), |a: &i32, b: &i32| b.cmp(a));
        let compare = registry.try_get(SortMode(0)).unwrap();
        assert_eq!(compare(&1, &2), Ordering::Greater);
        assert_eq!(registry.len(), 2);
    }
}
