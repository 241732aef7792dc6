//! Core tracker implementation with the evaluate-and-dispatch loop.
//!
//! # Examples
//!
//! ```rust
//! use milestone::{Progress, Tracker, Trigger};
//! use std::time::Duration;
//!
//! # fn process(_item: u32) -> Result<(), ()> { Ok(()) }
//! # fn example() -> milestone::Result<()> {
//! let items: Vec<u32> = (0..500).collect();
//! let tracker = Tracker::new(items.len() as u64)?;
//!
//! tracker.every(Trigger::items_done(100), |p: &Progress| {
//!     println!("{} of {} done ({}%)", p.items_done(), p.total_items(), p.percent_done());
//! });
//! tracker.every_interval(Duration::from_secs(10), |p: &Progress| {
//!     println!("{}s elapsed", p.elapsed_seconds());
//! });
//! tracker.on_complete(|p: &Progress| {
//!     println!("{} succeeded, {} failed", p.items_succeeded(), p.items_failed());
//! });
//!
//! tracker.start()?;
//! for item in items {
//!     tracker.item_started();
//!     match process(item) {
//!         Ok(()) => tracker.item_succeeded(),
//!         Err(()) => tracker.item_failed(),
//!     }
//! }
//! tracker.stop();
//! # Ok(())
//! # }
//! ```

use super::action::RegisteredAction;
use super::builder::TrackerBuilder;
use super::config::{ProgressCallback, TrackerConfig};
use super::pending::PendingWork;
use super::pump::Pump;
use crate::error::Result;
use crate::progress::Progress;
use crate::trigger::Trigger;

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tracing::{debug, error, trace};

type PanicPayload = Box<dyn Any + Send>;

#[derive(Debug, Clone, Copy)]
enum Counter {
    Started,
    Succeeded,
    Failed,
}

#[derive(Debug)]
struct State {
    started: u64,
    succeeded: u64,
    failed: u64,
    start: Instant,
    end: Option<Instant>,
    actions: Vec<RegisteredAction>,
}

/// State reachable from both the tracker and its pump thread.
#[derive(Debug)]
struct Shared {
    config: TrackerConfig,
    state: Mutex<State>,
}

impl Shared {
    // Callbacks never run under the lock, so a poisoned lock still guards
    // consistent state.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot(&self, state: &State) -> Progress {
        Progress::new(
            self.config.total_items,
            state.started,
            state.succeeded,
            state.failed,
            state.start,
            state.end,
        )
    }

    /// Applies an optional increment and collects every action that fires
    /// against the resulting snapshot, as one atomic step.
    fn evaluate(&self, counter: Option<Counter>) -> (Progress, Vec<Arc<ProgressCallback>>) {
        let mut state = self.lock();
        match counter {
            Some(Counter::Started) => state.started += 1,
            Some(Counter::Succeeded) => state.succeeded += 1,
            Some(Counter::Failed) => state.failed += 1,
            None => {}
        }
        let progress = self.snapshot(&state);

        let mut fired = Vec::new();
        let label = self.config.label.as_str();
        state.actions.retain_mut(|action| {
            if !action.trigger.fires(&progress) {
                return true;
            }
            debug!(
                label,
                metric = ?action.trigger.metric(),
                next_threshold = action.trigger.next_threshold(),
                recurring = action.recurring,
                "trigger fired"
            );
            fired.push(Arc::clone(&action.callback));
            action.recurring
        });
        (progress, fired)
    }

    /// Runs every fired callback, isolating each from the others' panics.
    ///
    /// Returns the first panic payload so the caller decides where it
    /// surfaces.
    fn dispatch(
        &self,
        progress: &Progress,
        fired: Vec<Arc<ProgressCallback>>,
    ) -> Option<PanicPayload> {
        let mut first_panic = None;
        for callback in fired {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| callback(progress))) {
                error!(
                    label = %self.config.label,
                    items_done = progress.items_done(),
                    "progress callback panicked"
                );
                first_panic.get_or_insert(payload);
            }
        }
        first_panic
    }

    fn tick(&self) {
        let (progress, fired) = self.evaluate(None);
        if fired.is_empty() {
            return;
        }
        // No caller to hand the panic to; it was already logged.
        let _ = self.dispatch(&progress, fired);
    }
}

/// Tracks a batch of work items and fires callbacks as thresholds are
/// crossed.
///
/// All methods take `&self`; share a tracker between workers with an
/// [`Arc`] or scoped threads. Counter updates, trigger evaluation and
/// registry changes happen under one lock, while callbacks run after it is
/// released, in the order their triggering events took the lock.
pub struct Tracker {
    shared: Arc<Shared>,
    pump: Mutex<Option<Pump>>,
    pending: PendingWork,
}

impl fmt::Debug for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracker")
            .field("config", &self.shared.config)
            .field("progress", &self.progress())
            .field("actions", &self.action_count())
            .field("running", &self.is_running())
            .field("pending", &self.pending.outstanding())
            .finish()
    }
}

impl Tracker {
    /// Creates a tracker for a batch of `total_items` with default options.
    ///
    /// The timing window starts now; call [`start`](Self::start) to move it.
    /// Fails with [`Error::NoItems`](crate::Error::NoItems) when
    /// `total_items` is zero.
    pub fn new(total_items: u64) -> Result<Self> {
        TrackerBuilder::new(total_items).build()
    }

    /// Creates a [`TrackerBuilder`] for a batch of `total_items`.
    pub fn builder(total_items: u64) -> TrackerBuilder {
        TrackerBuilder::new(total_items)
    }

    pub(crate) fn from_config(config: TrackerConfig) -> Self {
        debug!(label = %config.label, total_items = config.total_items, "tracker created");
        let state = State {
            started: 0,
            succeeded: 0,
            failed: 0,
            start: Instant::now(),
            end: None,
            actions: Vec::new(),
        };
        Self {
            shared: Arc::new(Shared {
                config,
                state: Mutex::new(state),
            }),
            pump: Mutex::new(None),
            pending: PendingWork::default(),
        }
    }

    /// Number of items in the batch.
    pub fn total_items(&self) -> u64 {
        self.shared.config.total_items
    }

    /// Label reported in this tracker's log events.
    pub fn label(&self) -> &str {
        &self.shared.config.label
    }

    /// Restarts the timing window at the current time and starts the time
    /// pump.
    ///
    /// Clears the stop time of a previous [`stop`](Self::stop). When called
    /// inside a tokio runtime, pump-driven callbacks run in its context.
    pub fn start(&self) -> Result<()> {
        {
            let mut state = self.shared.lock();
            state.start = Instant::now();
            state.end = None;
        }
        debug!(label = %self.label(), "tracker started");
        self.ensure_pump(false)
    }

    /// Freezes the elapsed time and halts the time pump.
    ///
    /// Once this returns, no pump-driven callback starts anymore.
    pub fn stop(&self) {
        self.shared.lock().end = Some(Instant::now());
        self.halt_pump();
        debug!(label = %self.label(), "tracker stopped");
    }

    /// Whether the time pump is running.
    pub fn is_running(&self) -> bool {
        self.pump_slot().is_some()
    }

    fn pump_slot(&self) -> MutexGuard<'_, Option<Pump>> {
        self.pump.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock order is pump slot, then state.
    fn ensure_pump(&self, unless_stopped: bool) -> Result<()> {
        let mut slot = self.pump_slot();
        if slot.is_some() || (unless_stopped && self.shared.lock().end.is_some()) {
            return Ok(());
        }
        let shared = Arc::clone(&self.shared);
        *slot = Some(Pump::spawn(
            &self.shared.config.label,
            self.shared.config.tick_resolution,
            Handle::try_current().ok(),
            move || shared.tick(),
        )?);
        Ok(())
    }

    fn halt_pump(&self) {
        // Taken out first so a callback calling back into the tracker
        // cannot block on the slot while the pump is joined.
        let pump = self.pump_slot().take();
        if let Some(pump) = pump {
            pump.stop(self.label());
        }
    }

    fn register(&self, trigger: Trigger, callback: ProgressCallback, recurring: bool) {
        let time_based = trigger.is_time_based();
        self.shared
            .lock()
            .actions
            .push(RegisteredAction::new(trigger, callback, recurring));
        if time_based {
            if let Err(e) = self.ensure_pump(true) {
                error!(
                    label = %self.label(),
                    error = %e,
                    "time trigger will only be checked on item events"
                );
            }
        }
    }

    /// Registers `callback` to run every time `trigger` fires.
    pub fn every<F>(&self, trigger: Trigger, callback: F)
    where
        F: Fn(&Progress) + Send + Sync + 'static,
    {
        self.register(trigger, Box::new(callback), true);
    }

    /// Registers `callback` to run the first time `trigger` fires only.
    pub fn on<F>(&self, trigger: Trigger, callback: F)
    where
        F: Fn(&Progress) + Send + Sync + 'static,
    {
        self.register(trigger, Box::new(callback), false);
    }

    /// Registers `callback` to run every `interval` of elapsed time.
    ///
    /// Interval callbacks run on the pump thread when no item event
    /// evaluates them first, inside the tokio runtime the pump was started
    /// from, if any.
    pub fn every_interval<F>(&self, interval: Duration, callback: F)
    where
        F: Fn(&Progress) + Send + Sync + 'static,
    {
        self.every(Trigger::elapsed(interval), callback);
    }

    /// Registers `callback` to run once, when every item has finished.
    pub fn on_complete<F>(&self, callback: F)
    where
        F: Fn(&Progress) + Send + Sync + 'static,
    {
        self.on(Trigger::items_done(self.total_items()), callback);
    }

    /// Runs `callback` right away with the current snapshot.
    ///
    /// Nothing is registered and no trigger is evaluated.
    pub fn now<F>(&self, callback: F)
    where
        F: FnOnce(&Progress),
    {
        callback(&self.progress());
    }

    /// Current snapshot. Does not evaluate any trigger.
    pub fn progress(&self) -> Progress {
        let state = self.shared.lock();
        self.shared.snapshot(&state)
    }

    /// Number of registered actions that can still fire.
    pub fn action_count(&self) -> usize {
        self.shared.lock().actions.len()
    }

    /// Records that an item started, then dispatches fired callbacks.
    pub fn item_started(&self) {
        self.record(Counter::Started);
    }

    /// Records that an item succeeded, then dispatches fired callbacks.
    pub fn item_succeeded(&self) {
        self.record(Counter::Succeeded);
    }

    /// Records that an item failed, then dispatches fired callbacks.
    pub fn item_failed(&self) {
        self.record(Counter::Failed);
    }

    /// Callbacks fired by this event all run before the first panic among
    /// them is resumed on the calling thread.
    fn record(&self, counter: Counter) {
        let (progress, fired) = self.shared.evaluate(Some(counter));
        trace!(
            label = %self.label(),
            ?counter,
            items_started = progress.items_started(),
            items_done = progress.items_done(),
            fired = fired.len(),
            "item event"
        );
        if let Some(payload) = self.shared.dispatch(&progress, fired) {
            panic::resume_unwind(payload);
        }
    }

    /// Handle for callbacks to register work that outlives them.
    pub fn pending(&self) -> PendingWork {
        self.pending.clone()
    }

    /// Waits until all work registered through [`pending`](Self::pending)
    /// has finished.
    ///
    /// Call it once the processing loop has issued its last item event.
    pub async fn complete_async(&self) {
        self.pending.drain().await;
    }

    /// Alias of [`complete_async`](Self::complete_async).
    pub async fn drain(&self) {
        self.pending.drain().await;
    }

    /// Blocking form of [`complete_async`](Self::complete_async).
    pub fn drain_blocking(&self) {
        self.pending.drain_blocking();
    }
}

impl Drop for Tracker {
    fn drop(&mut self) {
        self.halt_pump();
    }
}
