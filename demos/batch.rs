//! Example processing a batch of simulated work items with progress logging

use color_eyre::{eyre::eyre, Result};
use milestone::{Progress, TrackerBuilder, Trigger};
use rand::Rng;
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const ITEMS: u64 = 2001;

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let tracker = TrackerBuilder::new(ITEMS).label("demo").build()?;
    tracker.every(Trigger::items_done(100), log_count);
    tracker.every(Trigger::percent_done(25), log_percent);
    tracker.every_interval(Duration::from_secs(10), log_seconds);
    tracker.on(Trigger::percent_done(50), |_: &Progress| {
        println!("hey we're half done!")
    });
    tracker.on_complete(log_done);

    tracker.start()?;
    let mut rng = rand::rng();
    for item in 1..=ITEMS {
        tracker.item_started();
        match process_item(item, rng.random_bool(0.001)) {
            Ok(()) => tracker.item_succeeded(),
            Err(e) => {
                tracing::warn!(item, error = %e, "item failed");
                tracker.item_failed();
            }
        }
    }
    tracker.stop();

    Ok(())
}

fn process_item(item: u64, unlucky: bool) -> Result<()> {
    thread::sleep(Duration::from_millis(10));
    if item == 999 || unlucky {
        return Err(eyre!("item {item} failed"));
    }
    Ok(())
}

fn log_count(p: &Progress) {
    println!(
        "\t{} of {} done ({}%)",
        p.items_done(),
        p.total_items(),
        p.percent_done()
    );
}

fn log_percent(p: &Progress) {
    match p.estimated_completion_local() {
        Some(eta) => println!(
            "{}% done. estimated completion time: {}",
            p.percent_done(),
            eta.format("%-I:%M:%S %p")
        ),
        None => println!("{}% done", p.percent_done()),
    }
}

fn log_seconds(p: &Progress) {
    println!(
        "{} seconds elapsed, {} of {} done",
        p.elapsed_seconds(),
        p.items_done(),
        p.total_items()
    );
}

fn log_done(p: &Progress) {
    println!(
        "Done! Completed in {} seconds, {} succeeded, {} failed.",
        p.elapsed_seconds(),
        p.items_succeeded(),
        p.items_failed()
    );
}
