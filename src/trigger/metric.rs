//! Monotonic progress metrics a trigger can watch.

use crate::progress::Progress;

/// A monotonically non-decreasing figure read from a [`Progress`].
///
/// Each variant resolves through a fixed lookup table, so adding a metric
/// means adding a variant and its table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    ItemsStarted,
    ItemsDone,
    ItemsSucceeded,
    ItemsFailed,
    PercentStarted,
    PercentDone,
    PercentSucceeded,
    PercentFailed,
    /// Elapsed time in microseconds.
    ElapsedMicros,
}

type MetricFn = fn(&Progress) -> u64;

// Indexed by the `Metric` discriminant.
const METRIC_TABLE: [MetricFn; 9] = [
    Progress::items_started,
    Progress::items_done,
    Progress::items_succeeded,
    Progress::items_failed,
    Progress::percent_started,
    Progress::percent_done,
    Progress::percent_succeeded,
    Progress::percent_failed,
    elapsed_micros,
];

fn elapsed_micros(progress: &Progress) -> u64 {
    u64::try_from(progress.elapsed().as_micros()).unwrap_or(u64::MAX)
}

impl Metric {
    /// Every metric, in table order.
    pub const ALL: [Metric; 9] = [
        Metric::ItemsStarted,
        Metric::ItemsDone,
        Metric::ItemsSucceeded,
        Metric::ItemsFailed,
        Metric::PercentStarted,
        Metric::PercentDone,
        Metric::PercentSucceeded,
        Metric::PercentFailed,
        Metric::ElapsedMicros,
    ];

    /// Read this metric from a snapshot.
    pub fn value(self, progress: &Progress) -> u64 {
        METRIC_TABLE[self as usize](progress)
    }

    /// Whether the metric advances with wall-clock time rather than with
    /// item events.
    pub fn is_time_based(self) -> bool {
        matches!(self, Metric::ElapsedMicros)
    }
}
