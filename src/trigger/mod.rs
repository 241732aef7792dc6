//! Triggers decide when a registered callback is due.
//!
//! A [`Trigger`] watches one [`Metric`] of the progress snapshot and fires
//! whenever that metric reaches its next threshold. Triggers are built with
//! plain constructor functions:
//!
//! - by item count: [`Trigger::items_started`], [`Trigger::items_done`],
//!   [`Trigger::items_succeeded`], [`Trigger::items_failed`]
//! - by percentage: [`Trigger::percent_started`], [`Trigger::percent_done`],
//!   [`Trigger::percent_succeeded`], [`Trigger::percent_failed`]
//! - by elapsed time: [`Trigger::elapsed`]

pub mod metric;
pub mod trigger;

pub use metric::Metric;
pub use trigger::Trigger;
