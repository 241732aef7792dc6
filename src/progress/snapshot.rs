//! Point-in-time view of a batch's counters.
//!
//! A [`Progress`] stores only the four counters and the timing window. All
//! other figures are derived when they are asked for, so a snapshot taken
//! while the batch is still running reports a growing elapsed time.

use chrono::{DateTime, Local, TimeDelta, Utc};
use std::time::{Duration, Instant};

/// Immutable snapshot of a batch's progress.
///
/// Snapshots are produced by [`Tracker::progress`](crate::Tracker::progress)
/// and handed to every fired callback.
///
/// The counters are expected to satisfy
/// `succeeded + failed <= started <= total`. This is not enforced; derived
/// values saturate at zero instead of underflowing when it does not hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    total_items: u64,
    items_started: u64,
    items_succeeded: u64,
    items_failed: u64,
    start: Instant,
    end: Option<Instant>,
}

impl Progress {
    /// Create a new snapshot.
    ///
    /// `total_items` must be non-zero; the tracker guarantees this for every
    /// snapshot it builds.
    pub(crate) fn new(
        total_items: u64,
        items_started: u64,
        items_succeeded: u64,
        items_failed: u64,
        start: Instant,
        end: Option<Instant>,
    ) -> Self {
        debug_assert!(total_items > 0);
        Self {
            total_items,
            items_started,
            items_succeeded,
            items_failed,
            start,
            end,
        }
    }

    /// Number of items in the batch.
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Number of items reported as started.
    pub fn items_started(&self) -> u64 {
        self.items_started
    }

    /// Number of items reported as succeeded.
    pub fn items_succeeded(&self) -> u64 {
        self.items_succeeded
    }

    /// Number of items reported as failed.
    pub fn items_failed(&self) -> u64 {
        self.items_failed
    }

    /// Items that finished, whatever their outcome.
    pub fn items_done(&self) -> u64 {
        self.items_succeeded + self.items_failed
    }

    /// Items that were started but have not finished yet.
    pub fn items_in_progress(&self) -> u64 {
        self.items_started.saturating_sub(self.items_done())
    }

    /// Items that have not been started yet.
    pub fn items_remaining(&self) -> u64 {
        self.total_items.saturating_sub(self.items_started)
    }

    fn percent(&self, items: u64) -> u64 {
        100 * items / self.total_items
    }

    fn percent_exact(&self, items: u64) -> f64 {
        100.0 * items as f64 / self.total_items as f64
    }

    /// Percentage of items started, truncated.
    pub fn percent_started(&self) -> u64 {
        self.percent(self.items_started)
    }

    /// Percentage of items finished, truncated.
    pub fn percent_done(&self) -> u64 {
        self.percent(self.items_done())
    }

    /// Percentage of items succeeded, truncated.
    pub fn percent_succeeded(&self) -> u64 {
        self.percent(self.items_succeeded)
    }

    /// Percentage of items failed, truncated.
    pub fn percent_failed(&self) -> u64 {
        self.percent(self.items_failed)
    }

    /// Percentage of items in flight, truncated.
    pub fn percent_in_progress(&self) -> u64 {
        self.percent(self.items_in_progress())
    }

    /// Percentage of items not started yet, truncated.
    pub fn percent_remaining(&self) -> u64 {
        self.percent(self.items_remaining())
    }

    /// Percentage of items started, without truncation.
    pub fn percent_started_exact(&self) -> f64 {
        self.percent_exact(self.items_started)
    }

    /// Percentage of items finished, without truncation.
    pub fn percent_done_exact(&self) -> f64 {
        self.percent_exact(self.items_done())
    }

    /// Percentage of items succeeded, without truncation.
    pub fn percent_succeeded_exact(&self) -> f64 {
        self.percent_exact(self.items_succeeded)
    }

    /// Percentage of items failed, without truncation.
    pub fn percent_failed_exact(&self) -> f64 {
        self.percent_exact(self.items_failed)
    }

    /// Percentage of items in flight, without truncation.
    pub fn percent_in_progress_exact(&self) -> f64 {
        self.percent_exact(self.items_in_progress())
    }

    /// Percentage of items not started yet, without truncation.
    pub fn percent_remaining_exact(&self) -> f64 {
        self.percent_exact(self.items_remaining())
    }

    /// Whether the tracker had been stopped when this snapshot was taken.
    pub fn is_stopped(&self) -> bool {
        self.end.is_some()
    }

    /// Whether every item in the batch has finished.
    pub fn is_done(&self) -> bool {
        self.items_done() == self.total_items
    }

    fn elapsed_at(&self, now: Instant) -> Duration {
        self.end.unwrap_or(now).saturating_duration_since(self.start)
    }

    /// Time since the tracker started.
    ///
    /// Frozen at the stop time once the tracker has been stopped, otherwise
    /// measured against the current time on every call.
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    /// Whole seconds elapsed.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed().as_secs()
    }

    /// Whole minutes elapsed.
    pub fn elapsed_minutes(&self) -> u64 {
        self.elapsed().as_secs() / 60
    }

    /// Whole hours elapsed.
    pub fn elapsed_hours(&self) -> u64 {
        self.elapsed().as_secs() / 3600
    }

    fn estimated_total_at(&self, elapsed: Duration) -> Option<Duration> {
        let done = self.items_done();
        if done == 0 {
            return None;
        }
        let nanos = elapsed.as_nanos() * u128::from(self.total_items) / u128::from(done);
        u64::try_from(nanos).ok().map(Duration::from_nanos)
    }

    /// Projected duration of the whole batch, extrapolated from the
    /// throughput so far.
    ///
    /// Returns `None` until at least one item has finished.
    pub fn estimated_total_time(&self) -> Option<Duration> {
        self.estimated_total_at(self.elapsed())
    }

    /// Projected time left until the batch finishes.
    pub fn estimated_remaining(&self) -> Option<Duration> {
        let elapsed = self.elapsed();
        self.estimated_total_at(elapsed)
            .map(|total| total.saturating_sub(elapsed))
    }

    /// Projected monotonic instant at which the batch finishes.
    pub fn estimated_completion(&self) -> Option<Instant> {
        let now = Instant::now();
        let elapsed = self.elapsed_at(now);
        let remaining = self.estimated_total_at(elapsed)?.saturating_sub(elapsed);
        now.checked_add(remaining)
    }

    /// Projected wall-clock completion time in UTC.
    pub fn estimated_completion_utc(&self) -> Option<DateTime<Utc>> {
        let remaining = TimeDelta::from_std(self.estimated_remaining()?).ok()?;
        Utc::now().checked_add_signed(remaining)
    }

    /// Projected wall-clock completion time in the local time zone.
    pub fn estimated_completion_local(&self) -> Option<DateTime<Local>> {
        let remaining = TimeDelta::from_std(self.estimated_remaining()?).ok()?;
        Local::now().checked_add_signed(remaining)
    }
}
