//! Tests for elapsed-time triggers and the background time pump.

use std::thread;
use std::time::Duration;

mod common;
use common::helpers::*;

#[test]
fn test_interval_fires_while_items_are_processed() {
    let tracker = create_tracker(9);
    let (count, callback) = counting_callback();
    tracker.every_interval(Duration::from_millis(100), callback);

    tracker.start().unwrap();
    for _ in 0..9 {
        tracker.item_started();
        thread::sleep(Duration::from_millis(100));
        tracker.item_succeeded();
    }
    tracker.stop();

    assert!(count_of(&count) >= 9, "fired {} times", count_of(&count));
    assert!(tracker.progress().elapsed() >= Duration::from_millis(900));
}

#[test]
fn test_interval_fires_without_item_events() {
    let tracker = create_tracker(1);
    let (count, callback) = counting_callback();
    tracker.every_interval(Duration::from_millis(100), callback);
    tracker.start().unwrap();

    thread::sleep(Duration::from_millis(1000));
    assert!(count_of(&count) >= 9, "fired {} times", count_of(&count));
}

#[test]
fn test_stop_halts_interval_callbacks() {
    let tracker = create_tracker(1);
    let (count, callback) = counting_callback();
    tracker.every_interval(Duration::from_millis(20), callback);
    tracker.start().unwrap();
    thread::sleep(Duration::from_millis(100));

    tracker.stop();
    assert!(!tracker.is_running());
    let fired = count_of(&count);
    assert!(fired > 0);

    thread::sleep(Duration::from_millis(100));
    assert_eq!(count_of(&count), fired);
}

#[test]
fn test_time_trigger_registration_starts_the_pump() {
    let tracker = create_tracker(1);
    assert!(!tracker.is_running());
    tracker.every_interval(Duration::from_secs(60), |_: &milestone::Progress| {});
    assert!(tracker.is_running());
}

#[test]
fn test_registration_after_stop_keeps_the_pump_down() {
    let tracker = create_tracker(1);
    tracker.start().unwrap();
    tracker.stop();
    tracker.every_interval(Duration::from_millis(10), |_: &milestone::Progress| {});
    assert!(!tracker.is_running());
}

#[test]
fn test_dropping_the_tracker_stops_the_pump() {
    let tracker = create_tracker(1);
    let (count, callback) = counting_callback();
    tracker.every_interval(Duration::from_millis(10), callback);
    thread::sleep(Duration::from_millis(60));
    drop(tracker);

    let fired = count_of(&count);
    thread::sleep(Duration::from_millis(60));
    assert_eq!(count_of(&count), fired);
}

#[test]
fn test_panicking_interval_callback_keeps_the_pump_alive() {
    init_tracing();
    let tracker = create_tracker(1);
    let (count, callback) = counting_callback();
    tracker.every_interval(Duration::from_millis(20), |_: &milestone::Progress| {
        panic!("interval callback failure")
    });
    tracker.every_interval(Duration::from_millis(20), callback);
    tracker.start().unwrap();

    thread::sleep(Duration::from_millis(100));
    let early = count_of(&count);
    assert!(early > 0);
    assert!(tracker.is_running());

    thread::sleep(Duration::from_millis(100));
    assert!(count_of(&count) > early, "pump kept ticking after panics");
    assert!(tracker.is_running());
    assert_eq!(tracker.action_count(), 2);
    tracker.stop();
}
