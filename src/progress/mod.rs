//! Progress snapshots and the figures derived from them.
//!
//! # Examples
//!
//! ```rust
//! use milestone::Tracker;
//!
//! # fn example() -> milestone::Result<()> {
//! let tracker = Tracker::new(4)?;
//! tracker.item_started();
//! tracker.item_succeeded();
//!
//! let progress = tracker.progress();
//! assert_eq!(progress.items_done(), 1);
//! assert_eq!(progress.percent_done(), 25);
//! assert_eq!(progress.items_remaining(), 3);
//! assert!(progress.estimated_total_time().is_some());
//! # Ok(())
//! # }
//! ```

pub(crate) mod snapshot;

pub use snapshot::Progress;
