//! Error types for the item list widgets.

use crate::model::SortMode;

/// Result type alias for item list operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, mounting or driving an item screen.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The host cannot satisfy the screen's attachment contract.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The builder received an invalid or incomplete configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The sort mode is not a key of the comparator registry.
    #[error("Invalid sort mode {0}: no comparator registered for this index")]
    InvalidSortMode(SortMode),

    /// A facade operation was called before the screen was mounted.
    #[error("Item screen is not mounted")]
    NotMounted,

    /// Settings text could not be parsed.
    #[error("Failed to parse item screen settings: {0}")]
    Settings(#[from] toml::de::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create an invalid configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Whether this error is fatal to construction (build or mount time).
    pub fn is_construction_failure(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_) | Self::InvalidConfiguration(_) | Self::Settings(_)
        )
    }
}
