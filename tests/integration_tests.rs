//! End-to-end batch scenario mixing count, percent and completion triggers.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use milestone::{Progress, Trigger};

mod common;
use common::helpers::*;

const TOTAL: u64 = 5001;

#[test]
fn test_item_tracking_over_a_full_batch() {
    let tracker = create_tracker(TOTAL);
    let log_count = Arc::new(AtomicUsize::new(0));

    // 25 fires
    let started_seen = Arc::new(AtomicU64::new(0));
    let logs = Arc::clone(&log_count);
    tracker.every(Trigger::items_started(200), move |p: &Progress| {
        let started = started_seen.fetch_add(200, Ordering::SeqCst) + 200;
        assert_eq!(p.items_started(), started);
        assert_eq!(p.items_in_progress(), 1);
        assert_eq!(p.items_done(), started - 1);
        assert_eq!(p.items_succeeded(), started - 1);
        assert_eq!(p.items_failed(), 0);
        assert_eq!(p.items_remaining(), TOTAL - started);
        logs.fetch_add(1, Ordering::SeqCst);
    });

    // 4 fires
    let percent_seen = Arc::new(AtomicU64::new(0));
    let logs = Arc::clone(&log_count);
    tracker.every(Trigger::percent_done(25), move |p: &Progress| {
        let percent = percent_seen.fetch_add(25, Ordering::SeqCst) + 25;
        assert_eq!(p.percent_done(), percent);
        assert_eq!(p.items_done(), 5000 * percent / 100 + 1);
        logs.fetch_add(1, Ordering::SeqCst);
    });

    // 1 fire
    let logs = Arc::clone(&log_count);
    tracker.on(Trigger::percent_done(50), move |_: &Progress| {
        logs.fetch_add(1, Ordering::SeqCst);
    });

    // 1 fire
    let logs = Arc::clone(&log_count);
    tracker.on_complete(move |p: &Progress| {
        assert_eq!(p.items_done(), TOTAL);
        logs.fetch_add(1, Ordering::SeqCst);
    });

    succeed_items(&tracker, TOTAL);

    assert_eq!(log_count.load(Ordering::SeqCst), 31);
    assert_eq!(tracker.action_count(), 2);
    assert!(tracker.progress().is_done());
}

#[test]
fn test_batch_with_failures_reports_both_outcomes() {
    let tracker = create_tracker(100);
    let (seen, callback) = recording_callback();
    let (failed_fires, on_failures) = counting_callback();
    tracker.every(Trigger::percent_done(10), callback);
    tracker.every(Trigger::items_failed(5), on_failures);

    for item in 0..100 {
        tracker.item_started();
        if item % 10 == 9 {
            tracker.item_failed();
        } else {
            tracker.item_succeeded();
        }
    }

    assert_eq!(*seen.lock().unwrap(), (1..=10).map(|n| n * 10).collect::<Vec<_>>());
    assert_eq!(count_of(&failed_fires), 2);
    assert_counts(&tracker.progress(), 100, 90, 10);
}
