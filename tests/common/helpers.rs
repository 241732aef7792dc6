use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use milestone::{Progress, Tracker, TrackerBuilder};
use tracing_subscriber::EnvFilter;

// Common test constants
pub const TEST_LABEL: &str = "milestone-test";
pub const TEST_TICK: Duration = Duration::from_millis(10);

static TRACING: Once = Once::new();

/// Installs a test-friendly tracing subscriber once per test binary.
///
/// Honors `RUST_LOG`, defaulting to warnings only.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

// === Tracker Creation Helpers ===

/// Creates a tracker for `total` items with test settings
pub fn create_tracker(total: u64) -> Tracker {
    init_tracing();
    create_tracker_builder(total)
        .build()
        .expect("Failed to build tracker")
}

/// Creates a builder with the test label and a fast time pump
pub fn create_tracker_builder(total: u64) -> TrackerBuilder {
    TrackerBuilder::new(total)
        .label(TEST_LABEL)
        .tick_resolution(TEST_TICK)
}

// === Event Helpers ===

/// Starts and succeeds `count` items one after the other
pub fn succeed_items(tracker: &Tracker, count: u64) {
    for _ in 0..count {
        tracker.item_started();
        tracker.item_succeeded();
    }
}

/// Starts and fails `count` items one after the other
pub fn fail_items(tracker: &Tracker, count: u64) {
    for _ in 0..count {
        tracker.item_started();
        tracker.item_failed();
    }
}

/// Returns a snapshot of a tracker that went through the given events
pub fn progress_after(total: u64, succeeded: u64, failed: u64, in_flight: u64) -> Progress {
    let tracker = create_tracker(total);
    succeed_items(&tracker, succeeded);
    fail_items(&tracker, failed);
    for _ in 0..in_flight {
        tracker.item_started();
    }
    tracker.progress()
}

// === Callback Helpers ===

/// Creates a callback counting its invocations
pub fn counting_callback() -> (Arc<AtomicUsize>, impl Fn(&Progress) + Send + Sync + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    (count, move |_: &Progress| {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

/// Creates a callback recording `items_done` of every snapshot it receives
pub fn recording_callback() -> (Arc<Mutex<Vec<u64>>>, impl Fn(&Progress) + Send + Sync + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    (seen, move |p: &Progress| {
        sink.lock().unwrap().push(p.items_done());
    })
}

// === Assertion Helpers ===

/// Reads a shared invocation counter
pub fn count_of(count: &AtomicUsize) -> usize {
    count.load(Ordering::SeqCst)
}

/// Asserts the counters of a snapshot
pub fn assert_counts(progress: &Progress, started: u64, succeeded: u64, failed: u64) {
    assert_eq!(progress.items_started(), started, "items started");
    assert_eq!(progress.items_succeeded(), succeeded, "items succeeded");
    assert_eq!(progress.items_failed(), failed, "items failed");
}
