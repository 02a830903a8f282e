//! Error types for SlideView.

use thiserror::Error;

/// Errors from a single source-list provider.
///
/// The provider chain recovers from all of them; they only ever reach logs.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Server answered with a non-success status
    #[error("HTTP {status}")]
    Http {
        /// Response status code
        status: u16,
    },

    /// Request could not be made or the body could not be read
    #[error("Network error: {0}")]
    Network(String),

    /// Body was not a valid source list
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Inline fallback element does not exist
    #[error("Inline source element '#{id}' not found")]
    Missing {
        /// Id that was looked up
        id: String,
    },

    /// Source file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the key-value store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No storage backend is available (disabled, sandboxed, no window)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The backend refused the write (quota, private mode)
    #[error("Failed to write '{key}': {message}")]
    Write {
        /// Key being written
        key: String,
        /// Backend message
        message: String,
    },
}

/// Errors that stop the page from being wired.
#[derive(Error, Debug)]
pub enum BootError {
    /// A required element is missing from the page
    #[error("Required element '{0}' not found")]
    MissingElement(String),

    /// The viewer widget could not be constructed
    #[error("Viewer construction failed: {0}")]
    Viewer(String),

    /// A DOM call failed
    #[error("DOM error: {0}")]
    Dom(String),
}

/// Treat a failure while setting up an optional page feature as the feature
/// being absent.
pub fn optional_feature<T>(feature: &str, result: Result<Option<T>, BootError>) -> Option<T> {
    result.unwrap_or_else(|e| {
        log::warn!("{} disabled: {}", feature, e);
        None
    })
}
