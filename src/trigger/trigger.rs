//! Threshold-crossing detector.

use super::metric::Metric;
use crate::progress::Progress;

use std::time::Duration;
use tracing::warn;

/// Fires each time a [`Metric`] reaches the next multiple of a fixed step.
///
/// The first threshold is the step itself, so a trigger never fires before
/// one full step has been covered. Every fire advances the threshold by one
/// step. When the metric jumps across several steps between two
/// evaluations, the trigger fires once for that evaluation and skipped
/// thresholds are not replayed.
///
/// ```rust
/// use milestone::{Progress, Trigger, Tracker};
///
/// # fn example() -> milestone::Result<()> {
/// let tracker = Tracker::new(100)?;
/// tracker.every(Trigger::items_done(10), |p: &Progress| {
///     println!("{} of {} done", p.items_done(), p.total_items());
/// });
/// tracker.on(Trigger::percent_done(50), |_: &Progress| println!("halfway"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    step: u64,
    next: u64,
    metric: Metric,
}

impl Trigger {
    /// Creates a trigger firing every `step` units of `metric`.
    ///
    /// A zero step would fire on every evaluation, so it is raised to one.
    pub fn new(step: u64, metric: Metric) -> Self {
        let step = if step == 0 {
            warn!(?metric, "trigger step of zero raised to one");
            1
        } else {
            step
        };
        Self {
            step,
            next: step,
            metric,
        }
    }

    /// Fires every `count` items started.
    pub fn items_started(count: u64) -> Self {
        Self::new(count, Metric::ItemsStarted)
    }

    /// Fires every `count` items finished, whatever their outcome.
    pub fn items_done(count: u64) -> Self {
        Self::new(count, Metric::ItemsDone)
    }

    /// Fires every `count` items succeeded.
    pub fn items_succeeded(count: u64) -> Self {
        Self::new(count, Metric::ItemsSucceeded)
    }

    /// Fires every `count` items failed.
    pub fn items_failed(count: u64) -> Self {
        Self::new(count, Metric::ItemsFailed)
    }

    /// Fires every `percent` percent of items started.
    pub fn percent_started(percent: u64) -> Self {
        Self::new(percent, Metric::PercentStarted)
    }

    /// Fires every `percent` percent of items finished.
    pub fn percent_done(percent: u64) -> Self {
        Self::new(percent, Metric::PercentDone)
    }

    /// Fires every `percent` percent of items succeeded.
    pub fn percent_succeeded(percent: u64) -> Self {
        Self::new(percent, Metric::PercentSucceeded)
    }

    /// Fires every `percent` percent of items failed.
    pub fn percent_failed(percent: u64) -> Self {
        Self::new(percent, Metric::PercentFailed)
    }

    /// Fires every `interval` of elapsed time, at microsecond granularity.
    pub fn elapsed(interval: Duration) -> Self {
        let micros = u64::try_from(interval.as_micros()).unwrap_or(u64::MAX);
        Self::new(micros, Metric::ElapsedMicros)
    }

    /// Checks the snapshot and advances the threshold when it was reached.
    pub fn fires(&mut self, progress: &Progress) -> bool {
        if self.metric.value(progress) >= self.next {
            self.next = self.next.saturating_add(self.step);
            true
        } else {
            false
        }
    }

    /// Distance between two consecutive thresholds.
    pub fn step(&self) -> u64 {
        self.step
    }

    /// The metric value the next fire waits for.
    pub fn next_threshold(&self) -> u64 {
        self.next
    }

    /// The metric this trigger watches.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Whether the trigger needs the time pump to fire without item events.
    pub fn is_time_based(&self) -> bool {
        self.metric.is_time_based()
    }
}
