//! Tracker module containing the counter/trigger engine, its builder and
//! configuration.
//!
//! # Overview
//!
//! - `tracker` - the [`Tracker`] with its evaluate-and-dispatch loop
//! - `builder` - [`TrackerBuilder`] for configuring a tracker
//! - `config` - configuration structure and callback type
//! - `pending` - drain barrier for work started by callbacks
//! - `pump` - background thread driving elapsed-time triggers
//!
//! # Examples
//!
//! ```rust
//! use milestone::{Progress, Tracker, Trigger};
//!
//! # fn example() -> milestone::Result<()> {
//! let tracker = Tracker::new(3)?;
//! tracker.on_complete(|p: &Progress| assert!(p.is_done()));
//! tracker.now(|p: &Progress| assert_eq!(p.items_started(), 0));
//!
//! for _ in 0..3 {
//!     tracker.item_started();
//!     tracker.item_succeeded();
//! }
//! assert_eq!(tracker.action_count(), 0);
//! # Ok(())
//! # }
//! ```

pub(crate) mod action;
pub mod builder;
pub mod config;
pub mod pending;
pub(crate) mod pump;
pub mod tracker;

pub use builder::TrackerBuilder;
pub use config::{ProgressCallback, TrackerConfig, DEFAULT_TICK_RESOLUTION};
pub use pending::{PendingGuard, PendingWork};
pub use tracker::Tracker;
