//! Builder pattern implementation for creating Tracker instances.
//!
//! # Examples
//!
//! ```rust
//! use milestone::TrackerBuilder;
//! use std::time::Duration;
//!
//! # fn example() -> milestone::Result<()> {
//! let tracker = TrackerBuilder::new(10_000)
//!     .label("import")
//!     .tick_resolution(Duration::from_millis(50))
//!     .build()?;
//! assert_eq!(tracker.total_items(), 10_000);
//! # Ok(())
//! # }
//! ```

use super::{config::TrackerConfig, tracker::Tracker};
use crate::error::Result;

use std::time::Duration;

/// A builder used to create a [`Tracker`].
#[derive(Debug, Clone)]
pub struct TrackerBuilder {
    config: TrackerConfig,
}

impl TrackerBuilder {
    /// Creates a builder for a batch of `total_items` with the default options.
    pub fn new(total_items: u64) -> Self {
        Self {
            config: TrackerConfig::new(total_items),
        }
    }

    /// Set the period of the background time pump.
    ///
    /// Interval triggers are checked once per period, so this bounds how
    /// late an interval callback can run. Must be greater than zero.
    pub fn tick_resolution(mut self, resolution: Duration) -> Self {
        self.config.tick_resolution = resolution;
        self
    }

    /// Set the label reported in log events.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = label.into();
        self
    }

    /// Create the [`Tracker`] with the specified options.
    ///
    /// Fails with [`Error::NoItems`](crate::Error::NoItems) for an empty
    /// batch and with [`Error::InvalidConfig`](crate::Error::InvalidConfig)
    /// for a zero tick resolution.
    pub fn build(self) -> Result<Tracker> {
        self.config.validate()?;
        Ok(Tracker::from_config(self.config))
    }
}

impl From<TrackerConfig> for TrackerBuilder {
    fn from(config: TrackerConfig) -> Self {
        Self { config }
    }
}
