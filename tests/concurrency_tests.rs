//! Tests for concurrent item events.

use std::thread;

use milestone::Trigger;

mod common;
use common::helpers::*;

#[test]
fn test_concurrent_events_report_each_count_once() {
    let tracker = create_tracker(10);
    let (seen, callback) = recording_callback();
    tracker.every(Trigger::items_done(1), callback);

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| tracker.item_succeeded());
        }
    });

    let mut seen = seen.lock().unwrap().clone();
    seen.sort_unstable();
    assert_eq!(seen, (1..=8).collect::<Vec<_>>());
}

#[test]
fn test_concurrent_events_lose_no_updates() {
    const WORKERS: u64 = 8;
    const PER_WORKER: u64 = 500;

    let tracker = create_tracker(WORKERS * PER_WORKER);
    let (count, callback) = counting_callback();
    let (completed, on_complete) = counting_callback();
    tracker.every(Trigger::items_done(1), callback);
    tracker.on_complete(on_complete);

    thread::scope(|scope| {
        for worker in 0..WORKERS {
            let tracker = &tracker;
            scope.spawn(move || {
                for item in 0..PER_WORKER {
                    tracker.item_started();
                    if (worker + item) % 10 == 0 {
                        tracker.item_failed();
                    } else {
                        tracker.item_succeeded();
                    }
                }
            });
        }
    });

    let progress = tracker.progress();
    assert_eq!(progress.items_started(), WORKERS * PER_WORKER);
    assert_eq!(progress.items_done(), WORKERS * PER_WORKER);
    assert!(progress.is_done());
    assert_eq!(count_of(&count) as u64, WORKERS * PER_WORKER);
    assert_eq!(count_of(&completed), 1);
}
