//! Milestone reports the progress of a batch of work items to callbacks,
//! firing each one when an item count, a percentage or an elapsed time
//! crosses a declared threshold.
//!
//! # Quick Start
//!
//! ```rust
//! use milestone::{Progress, Tracker, Trigger};
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), milestone::Error> {
//! let tracker = Tracker::new(2001)?;
//! tracker.every(Trigger::items_done(100), |p: &Progress| {
//!     println!("{} of {} done ({}%)", p.items_done(), p.total_items(), p.percent_done());
//! });
//! tracker.every(Trigger::percent_done(25), |p: &Progress| {
//!     println!("{}% done, eta {:?}", p.percent_done(), p.estimated_completion_local());
//! });
//! tracker.every_interval(Duration::from_secs(10), |p: &Progress| {
//!     println!("{} seconds elapsed", p.elapsed_seconds());
//! });
//! tracker.on(Trigger::percent_done(50), |_: &Progress| println!("halfway there"));
//! tracker.on_complete(|p: &Progress| {
//!     println!(
//!         "done in {}s: {} ok, {} failed",
//!         p.elapsed_seconds(),
//!         p.items_succeeded(),
//!         p.items_failed()
//!     );
//! });
//!
//! tracker.start()?;
//! for item in 0..2001 {
//!     tracker.item_started();
//!     if item == 999 {
//!         tracker.item_failed();
//!     } else {
//!         tracker.item_succeeded();
//!     }
//! }
//! tracker.stop();
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`progress`] - The immutable [`Progress`] snapshot and its derived figures
//! - [`trigger`] - Threshold detectors and the metrics they watch
//! - [`tracker`] - The [`Tracker`], its builder, time pump and drain barrier

pub mod error;
pub mod progress;
pub mod tracker;
pub mod trigger;

pub use error::{Error, Result};
pub use progress::Progress;
pub use tracker::{
    PendingGuard, PendingWork, ProgressCallback, Tracker, TrackerBuilder, TrackerConfig,
};
pub use trigger::{Metric, Trigger};
