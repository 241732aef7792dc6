//! Configuration structures and defaults for the tracker.
//!
//! # Examples
//!
//! ```rust
//! use milestone::tracker::{ProgressCallback, TrackerConfig};
//! use milestone::Progress;
//! use std::time::Duration;
//!
//! let mut config = TrackerConfig::new(250);
//! config.tick_resolution = Duration::from_millis(10);
//! config.label = "thumbnails".to_string();
//!
//! let callback: ProgressCallback = Box::new(|progress: &Progress| {
//!     println!("{}% done", progress.percent_done());
//! });
//! ```

use crate::error::{Error, Result};
use crate::progress::Progress;

use std::time::Duration;

/// Callback type invoked with the snapshot that fired it.
pub type ProgressCallback = Box<dyn Fn(&Progress) + Send + Sync>;

/// How often the time pump re-evaluates triggers when nothing else does.
pub const DEFAULT_TICK_RESOLUTION: Duration = Duration::from_millis(25);

/// Label attached to log events when none is configured.
pub const DEFAULT_LABEL: &str = "batch";

/// Configuration structure for the tracker
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Number of items in the batch. Fixed for the tracker's lifetime.
    pub total_items: u64,
    /// Period of the background time pump.
    pub tick_resolution: Duration,
    /// Name reported in every log event of this tracker.
    pub label: String,
}

impl TrackerConfig {
    /// Configuration for a batch of `total_items` with default settings.
    pub fn new(total_items: u64) -> Self {
        Self {
            total_items,
            tick_resolution: DEFAULT_TICK_RESOLUTION,
            label: DEFAULT_LABEL.to_string(),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.total_items == 0 {
            return Err(Error::NoItems);
        }
        if self.tick_resolution.is_zero() {
            return Err(Error::InvalidConfig(
                "tick resolution must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
