//! Error handling for the milestone library.
//!
//! Every fallible operation in the crate returns [`Result`]. Failures are
//! limited to construction-time validation and to scheduling pending work
//! outside of a runtime; the item-event hot path never fails.

use thiserror::Error;

/// Errors that can happen when using milestone.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A tracker was built for an empty batch.
    ///
    /// Percentages and completion estimates divide by the total item count,
    /// so a batch must contain at least one item.
    #[error("a tracker needs at least one item")]
    NoItems,

    /// A builder option was outside its accepted range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Pending work was spawned outside of a tokio runtime.
    #[error("no tokio runtime is available to run pending work")]
    NoRuntime,

    /// Error from an underlying system.
    ///
    /// Raised when the background time pump thread cannot be spawned.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for operations that can fail with a milestone error.
pub type Result<T> = std::result::Result<T, Error>;
