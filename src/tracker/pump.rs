//! Background time pump.
//!
//! Elapsed-time triggers have to fire even while no item events arrive. The
//! pump is a dedicated thread that re-runs trigger evaluation once per tick
//! until it is cancelled. Callbacks may block, so the pump does not borrow a
//! runtime worker, but it enters the runtime it was started from so that
//! callbacks can still spawn pending work.

use crate::error::{Error, Result};

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, warn};

pub(crate) const PUMP_THREAD_NAME: &str = "milestone-pump";

/// Handle to a running pump thread.
#[derive(Debug)]
pub(crate) struct Pump {
    cancel: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

impl Pump {
    /// Spawns a thread calling `tick` every `resolution` until stopped.
    ///
    /// When `runtime` is given, the thread runs inside its context so ticks
    /// can spawn tasks onto it.
    pub(crate) fn spawn<F>(
        label: &str,
        resolution: Duration,
        runtime: Option<Handle>,
        tick: F,
    ) -> Result<Self>
    where
        F: Fn() + Send + 'static,
    {
        let (cancel, cancelled) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name(PUMP_THREAD_NAME.to_string())
            .spawn(move || {
                let _context = runtime.as_ref().map(Handle::enter);
                loop {
                    match cancelled.recv_timeout(resolution) {
                        Err(RecvTimeoutError::Timeout) => tick(),
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })
            .map_err(|e| Error::Internal(format!("failed to spawn time pump: {e}")))?;
        debug!(label, ?resolution, "time pump started");
        Ok(Self { cancel, handle })
    }

    /// Cancels the pump and waits for its thread to exit.
    ///
    /// When called from a callback running on the pump thread itself, the
    /// thread exits after that callback returns instead.
    pub(crate) fn stop(self, label: &str) {
        let _ = self.cancel.send(());
        if self.handle.thread().id() == thread::current().id() {
            debug!(label, "time pump stopped from its own thread");
            return;
        }
        if self.handle.join().is_err() {
            warn!(label, "time pump thread panicked");
        }
        debug!(label, "time pump stopped");
    }
}
